use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Context;
use serde::Deserialize;
use toml::value::Table;
use toml::Value;

/// Data file used when neither the command line nor the config names one
pub(crate) const DEFAULT_DATA_FILE: &str = "expenses.csv";

const DEFAULT_CURRENCY: &str = "₹";

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct Config {
    /// Path of the expense file
    pub(crate) data_file: Option<String>,
    /// Symbol printed in front of totals
    pub(crate) currency: Option<String>,
    /// Extra classifier training phrases, `"phrase" = "Category"`
    pub(crate) examples: Table,
}

impl Config {
    pub(crate) fn empty() -> Config {
        Config::default()
    }

    /// Read config from a TOML file. A missing file gives an empty config.
    pub(crate) fn load_from_file(path: &Path) -> anyhow::Result<Config> {
        if path.exists() && path.is_file() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Unable to read config file {}", path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Invalid config file {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::empty())
        }
    }

    /// `<config dir>/expense-tracker/config.toml`, e.g. `~/.config/expense-tracker/config.toml` on Linux
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("expense-tracker").join("config.toml"))
    }

    pub(crate) fn currency(&self) -> &str {
        self.currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }

    pub(crate) fn data_file(&self) -> &str {
        self.data_file.as_deref().unwrap_or(DEFAULT_DATA_FILE)
    }

    /// Training examples as (phrase, category) pairs. Entries whose value isn't a string are ignored.
    pub(crate) fn training_examples(&self) -> Vec<(String, String)> {
        let mut examples = vec![];
        for (phrase, value) in &self.examples {
            if let Value::String(category) = value {
                examples.push((phrase.clone(), category.clone()));
            }
        }
        examples
    }
}
