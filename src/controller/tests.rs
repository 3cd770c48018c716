use std::collections::VecDeque;
use std::fs;
use chrono::NaiveDate;
use tempfile::TempDir;
use crate::classifier::{Classifier, TRAINING_EXAMPLES};
use crate::controller::{run_choice, Context, LineSource, MenuChoice};
use crate::expense::Expense;
use crate::store::ExpenseStore;
use crate::util::today;

/// Answers prompts from a fixed script, then behaves like a closed terminal
struct ScriptedInput {
    answers: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    fn new(answers: &[&str]) -> ScriptedInput {
        ScriptedInput {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            prompts: vec![],
        }
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }
}

struct Fixture {
    _dir: TempDir,
    store: ExpenseStore,
    classifier: Classifier,
}

impl Fixture {
    fn new() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let store = ExpenseStore::new(dir.path().join("expenses.csv"));
        store.ensure_initialized().unwrap();
        Fixture { _dir: dir, store, classifier: Classifier::train(&TRAINING_EXAMPLES).unwrap() }
    }

    fn run(&self, choice: MenuChoice, answers: &[&str]) -> (String, ScriptedInput) {
        let ctx = Context { store: &self.store, classifier: &self.classifier, currency: "₹" };
        let mut input = ScriptedInput::new(answers);
        let mut out: Vec<u8> = vec![];
        run_choice(&ctx, choice, &mut input, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), input)
    }

    fn add(&self, date: &str, category: &str, amount: f64, description: &str) {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        self.store.append(&Expense::new(date, category, amount, description)).unwrap();
    }
}

#[test]
fn test_menu_choice() {
    assert_eq!(MenuChoice::parse(" 1 "), Some(MenuChoice::Add));
    assert_eq!(MenuChoice::parse("7"), Some(MenuChoice::Predict));
    assert_eq!(MenuChoice::parse("9"), Some(MenuChoice::Exit));
    assert_eq!(MenuChoice::parse("10"), None);
    assert_eq!(MenuChoice::parse("add"), None);
}

#[test]
fn test_add_with_predicted_category() {
    let f = Fixture::new();
    let (output, input) = f.run(MenuChoice::Add, &["2024-01-15", "250", "pizza with friends", ""]);
    assert!(output.contains("Expense added successfully under 'Food'!"));
    assert!(input.prompts[3].contains("[Food]"));

    let expenses = f.store.load_all().unwrap();
    assert_eq!(expenses, vec![Expense {
        date: "2024-01-15".to_string(),
        category: "Food".to_string(),
        amount: Some(250.0),
        description: "pizza with friends".to_string(),
    }]);
}

#[test]
fn test_add_reprompts_invalid_input() {
    let f = Fixture::new();
    let (output, input) = f.run(MenuChoice::Add, &["15th Jan", "", "twelve", "-12.5", "refund", "Shopping"]);
    assert!(output.contains("Invalid date '15th Jan'"));
    assert!(output.contains("Invalid amount 'twelve'"));
    assert_eq!(input.prompts.len(), 6);

    let expenses = f.store.load_all().unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].date, today().format("%Y-%m-%d").to_string());
    assert_eq!(expenses[0].category, "Shopping");
    assert_eq!(expenses[0].amount, Some(-12.5));
}

#[test]
fn test_add_with_blank_description_is_misc() {
    let f = Fixture::new();
    let (output, _) = f.run(MenuChoice::Add, &["2024-03-01", "10", "", ""]);
    assert!(output.contains("under 'Misc'"));
}

#[test]
fn test_add_abandoned() {
    let f = Fixture::new();
    let (output, _) = f.run(MenuChoice::Add, &["2024-03-01"]);
    assert!(output.is_empty());
    assert!(f.store.load_all().unwrap().is_empty());
}

#[test]
fn test_add_reports_write_failure() {
    let dir = tempfile::tempdir().unwrap();
    // A directory can't be opened for appending
    let store = ExpenseStore::new(dir.path());
    let classifier = Classifier::train(&TRAINING_EXAMPLES).unwrap();
    let ctx = Context { store: &store, classifier: &classifier, currency: "₹" };
    let mut input = ScriptedInput::new(&["2024-03-01", "10", "tea", "Food"]);
    let mut out: Vec<u8> = vec![];
    run_choice(&ctx, MenuChoice::Add, &mut input, &mut out).unwrap();
    assert!(String::from_utf8(out).unwrap().contains("Unable to save expense"));
}

#[test]
fn test_reports_read_failure() {
    let dir = tempfile::tempdir().unwrap();
    // The path exists but reading a directory fails
    let store = ExpenseStore::new(dir.path());
    let classifier = Classifier::train(&TRAINING_EXAMPLES).unwrap();
    let ctx = Context { store: &store, classifier: &classifier, currency: "₹" };
    assert!(store.load_all().is_err());

    let mut out: Vec<u8> = vec![];
    run_choice(&ctx, MenuChoice::View, &mut ScriptedInput::new(&[]), &mut out).unwrap();
    let output = String::from_utf8(out).unwrap();
    assert!(output.starts_with("Unable to read expenses: "));
    assert!(output.ends_with("No expenses found.\n"));

    let mut out: Vec<u8> = vec![];
    run_choice(&ctx, MenuChoice::Summary, &mut ScriptedInput::new(&[]), &mut out).unwrap();
    let output = String::from_utf8(out).unwrap();
    assert!(output.starts_with("Unable to read expenses: "));
    assert!(output.ends_with("No expenses to summarise.\n"));
}

#[test]
fn test_empty_reports() {
    let f = Fixture::new();
    assert_eq!(f.run(MenuChoice::View, &[]).0, "No expenses found.\n");
    assert_eq!(f.run(MenuChoice::Summary, &[]).0, "No expenses to summarise.\n");
    assert_eq!(f.run(MenuChoice::MonthlyTrend, &[]).0, "No dated expenses to show.\n");
    assert_eq!(f.run(MenuChoice::CategoryChart, &[]).0, "No expenses to visualise.\n");
    assert_eq!(f.run(MenuChoice::OverTimeChart, &[]).0, "No expenses to visualise.\n");
    assert!(f.run(MenuChoice::Predict, &[]).0.contains("need at least 2 months"));
    assert!(f.run(MenuChoice::Diagnose, &[]).0.contains("No malformed rows found"));
}

#[test]
fn test_reports() {
    let f = Fixture::new();
    f.add("2024-01-15", "Food", 250.0, "lunch");
    f.add("2024-02-10", "Food", 150.0, "dinner");
    f.add("2024-02-11", "Travel", 50.0, "bus");

    let (output, _) = f.run(MenuChoice::View, &[]);
    assert!(output.contains("--- All Expenses ---"));
    assert!(output.contains("dinner"));

    let (output, _) = f.run(MenuChoice::Summary, &[]);
    assert!(output.contains("₹400.00"));
    assert!(output.contains("₹50.00"));
    assert!(output.contains("₹450.00"));

    let (output, _) = f.run(MenuChoice::MonthlyTrend, &[]);
    assert!(output.contains("Jan-2024"));
    assert!(output.contains("Feb-2024"));
    assert!(output.contains("₹200.00"));

    let (output, _) = f.run(MenuChoice::CategoryChart, &[]);
    assert!(output.contains("Expenses by Category"));
    assert!(output.contains("88.9%"));

    let (output, _) = f.run(MenuChoice::OverTimeChart, &[]);
    assert!(output.contains("2024-01-15 .. 2024-02-11"));
}

#[test]
fn test_predict() {
    let f = Fixture::new();
    f.add("2024-01-15", "Food", 100.0, "lunch");
    let (output, _) = f.run(MenuChoice::Predict, &[]);
    assert!(output.contains("need at least 2 months of expenses to predict, found 1"));

    f.add("2024-02-10", "Food", 200.0, "dinner");
    let (output, _) = f.run(MenuChoice::Predict, &[]);
    assert_eq!(output, "Predicted spend for Mar-2024: ₹300.00\n");
}

#[test]
fn test_diagnose() {
    let f = Fixture::new();
    f.add("2024-01-15", "Food", 100.0, "lunch");
    let mut content = fs::read_to_string(f.store.path()).unwrap();
    content.push_str("2024-01-16,Food,80,snacks, chips\n");
    fs::write(f.store.path(), content).unwrap();

    let (output, _) = f.run(MenuChoice::Diagnose, &[]);
    assert!(output.contains("1 Malformed Rows"));
    assert!(output.contains('3'));

    // The malformed row is left out of every report
    let (output, _) = f.run(MenuChoice::View, &[]);
    assert!(!output.contains("snacks"));
}
