use std::io::stdout;
use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;
use log::{debug, info, warn};
use rustyline::history::{DefaultHistory, History};
use rustyline::Editor;

use crate::classifier::Classifier;
use crate::config::Config;
use crate::controller::{run_choice, Context, LineSource, MenuChoice, MENU};
use crate::editor::MenuHelper;
use crate::store::ExpenseStore;

mod aggregate;
mod chart;
mod classifier;
mod config;
mod controller;
mod display;
mod editor;
mod expense;
mod forecast;
mod store;
mod tokeniser;
mod util;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// Expense file path, defaults to `expenses.csv`
    file: Option<String>,

    /// Config file with currency and extra category examples
    config_file: Option<String>,
}

static COMMAND_HISTORY_FILE: &str = ".expense_tracker_history";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli: Cli = Cli::parse();

    let config_path = match &cli.config_file {
        Some(f) => Some(PathBuf::from(f)),
        None => Config::default_path(),
    };
    let config = match config_path {
        Some(path) => Config::load_from_file(&path).unwrap_or_else(|err| {
            warn!("{:#}, using defaults", err);
            Config::empty()
        }),
        None => Config::empty(),
    };

    let data_file = cli.file.as_deref().unwrap_or(config.data_file());
    let store = ExpenseStore::new(data_file);
    if let Err(err) = store.ensure_initialized() {
        warn!("Unable to create {}: {}", store.path().display(), err);
    }

    let classifier = Classifier::with_extra_examples(&config.training_examples())?;
    let ctx = Context { store: &store, classifier: &classifier, currency: config.currency() };

    let mut rl = Editor::<MenuHelper, DefaultHistory>::new()?;
    rl.set_helper(Some(MenuHelper::new()));
    if rl.load_history(COMMAND_HISTORY_FILE).is_err() {
        info!("No previous history.");
    }

    loop {
        println!("{MENU}");
        let line = match rl.read_line("Choose an option: ") {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break
            }
        };
        record_history(rl.history_mut(), &line);

        match MenuChoice::parse(&line) {
            Some(MenuChoice::Exit) => break,
            Some(choice) => {
                let result = run_choice(&ctx, choice, &mut rl, &mut stdout());
                if let Err(err) = result {
                    println!("{}", err);
                }
            }
            None => println!("Invalid choice, try again!"),
        }
    }

    println!("Goodbye!");
    if let Err(err) = rl.save_history(COMMAND_HISTORY_FILE) {
        warn!("Unable to save history: {}", err);
    }

    Ok(())
}

/// Add a non-blank menu choice to the history. A history that refuses the entry is logged and ignored.
fn record_history<H: History>(history: &mut H, line: &str) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }
    if let Err(err) = history.add(line) {
        debug!("Unable to add history entry: {}", err);
    }
}
