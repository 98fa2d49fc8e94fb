use std::path::PathBuf;
use std::time::Duration;

use crate::store::StoreOptions;

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("Could not determine data directory")]
    NoDataDir,
}

/// Runtime settings, read from `BUDGETBOX_*` environment variables.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    /// Round trip of the simulated remote mirror.
    pub(crate) sync_delay: Duration,
    pub(crate) sync_timeout: Duration,
    pub(crate) autosave_debounce: Duration,
    /// `host:port` dialled to decide whether we are online.
    pub(crate) probe_addr: String,
    pub(crate) probe_interval: Duration,
    pub(crate) offline: bool,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = match lookup("BUDGETBOX_DATA_DIR") {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => directories::ProjectDirs::from("com", "budgetbox", "BudgetBox")
                .ok_or(ConfigError::NoDataDir)?
                .data_dir()
                .to_path_buf(),
        };

        let millis = |key: &str, default: u64| -> Result<Duration, ConfigError> {
            parse_or(&lookup, key, default).map(Duration::from_millis)
        };

        let probe_interval = parse_or(&lookup, "BUDGETBOX_PROBE_INTERVAL_SECS", 5)?;
        if probe_interval == 0 {
            return Err(ConfigError::InvalidValue(
                "BUDGETBOX_PROBE_INTERVAL_SECS".to_string(),
                "must be at least 1 second".to_string(),
            ));
        }

        Ok(Self {
            data_dir,
            sync_delay: millis("BUDGETBOX_SYNC_DELAY_MS", 1000)?,
            sync_timeout: millis("BUDGETBOX_SYNC_TIMEOUT_MS", 10_000)?,
            autosave_debounce: millis("BUDGETBOX_AUTOSAVE_DEBOUNCE_MS", 250)?,
            probe_addr: lookup("BUDGETBOX_PROBE_ADDR").unwrap_or_else(|| "1.1.1.1:443".to_string()),
            probe_interval: Duration::from_secs(probe_interval),
            offline: lookup("BUDGETBOX_OFFLINE").is_some_and(|v| is_truthy(&v)),
        })
    }

    pub(crate) fn db_path(&self) -> PathBuf {
        self.data_dir.join("budgetbox.db")
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.data_dir.join("budgetbox.log")
    }

    pub(crate) fn store_options(&self) -> StoreOptions {
        StoreOptions {
            initially_online: !self.offline,
            sync_timeout: self.sync_timeout,
            autosave_debounce: self.autosave_debounce,
        }
    }
}

fn parse_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> Result<u64, ConfigError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ConfigError::InvalidValue(key.to_string(), format!("{e}"))),
        None => Ok(default),
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
