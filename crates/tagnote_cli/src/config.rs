//! Environment-driven CLI configuration.
//!
//! # Invariants
//! - Blank variables are treated as unset.
//! - Logging stays off unless `TAGNOTE_LOG_DIR` is set.

use std::path::PathBuf;
use tagnote_core::default_log_level;

pub const DB_PATH_VAR: &str = "TAGNOTE_DB_PATH";
pub const LOG_DIR_VAR: &str = "TAGNOTE_LOG_DIR";
pub const LOG_LEVEL_VAR: &str = "TAGNOTE_LOG_LEVEL";
const DEFAULT_DB_FILE_NAME: &str = "tagnote.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// SQLite file holding the `Notes` and `Tags` entries.
    pub db_path: PathBuf,
    /// Absolute directory for rolling log files.
    pub log_dir: Option<String>,
    pub log_level: String,
}

impl CliConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_dir: read(LOG_DIR_VAR),
            log_level: read(LOG_LEVEL_VAR).unwrap_or_else(|| default_log_level().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CliConfig, DB_PATH_VAR, LOG_DIR_VAR, LOG_LEVEL_VAR};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_with(vars: &[(&str, &str)]) -> CliConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        CliConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_with(&[]);
        assert_eq!(config.db_path, std::env::temp_dir().join("tagnote.sqlite3"));
        assert_eq!(config.log_dir, None);
        assert_eq!(config.log_level, tagnote_core::default_log_level());
    }

    #[test]
    fn explicit_values_are_trimmed_and_blank_means_unset() {
        let config = config_with(&[
            (DB_PATH_VAR, " /data/notes.db "),
            (LOG_DIR_VAR, "   "),
            (LOG_LEVEL_VAR, "warn"),
        ]);
        assert_eq!(config.db_path, PathBuf::from("/data/notes.db"));
        assert_eq!(config.log_dir, None);
        assert_eq!(config.log_level, "warn");
    }
}
