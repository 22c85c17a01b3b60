/// Runtime configuration, read from the environment.
///
/// A `.env` file in the working directory is honoured via `dotenv`.
///
/// | Variable                   | Meaning                                   | Default |
/// |----------------------------|-------------------------------------------|---------|
/// | `KAMERDATA_FILE`           | TOML dataset file to load                 | built-in tables |
/// | `KAMERDATA_LOG_LEVEL`      | `debug`, `info`, `warn` or `error`        | `info`  |
/// | `KAMERDATA_LOG_FILE`       | append log entries to this file           | none    |
/// | `KAMERDATA_LOG_TIMESTAMPS` | `true` for timestamped console lines      | `false` |

use crate::logging::LogLevel;
use std::path::PathBuf;

pub const ENV_FILE: &str = "KAMERDATA_FILE";
pub const ENV_LOG_LEVEL: &str = "KAMERDATA_LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "KAMERDATA_LOG_FILE";
pub const ENV_LOG_TIMESTAMPS: &str = "KAMERDATA_LOG_TIMESTAMPS";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Dataset file to load instead of the built-in tables.
    pub dataset_file: Option<PathBuf>,
    pub log_level: LogLevel,
    pub log_file: Option<String>,
    pub console_timestamps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_file: None,
            log_level: LogLevel::Info,
            log_file: None,
            console_timestamps: false,
        }
    }
}

impl Config {
    /// Loads `.env` (if present) and reads configuration from the process
    /// environment.
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(path) = get(ENV_FILE) {
            config.dataset_file = Some(PathBuf::from(path));
        }
        if let Some(level) = get(ENV_LOG_LEVEL) {
            config.log_level = level
                .parse()
                .map_err(|e| format!("{}: {}", ENV_LOG_LEVEL, e))?;
        }
        config.log_file = get(ENV_LOG_FILE);
        if let Some(flag) = get(ENV_LOG_TIMESTAMPS) {
            config.console_timestamps = parse_flag(&flag)
                .ok_or_else(|| format!("{}: expected true or false, got '{}'", ENV_LOG_TIMESTAMPS, flag))?;
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.dataset_file.is_none());
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_FILE, "data/tweede_kamer.toml"),
            (ENV_LOG_LEVEL, "debug"),
            (ENV_LOG_FILE, "/tmp/kamerdata.log"),
            (ENV_LOG_TIMESTAMPS, "yes"),
        ]))
        .unwrap();

        assert_eq!(config.dataset_file, Some(PathBuf::from("data/tweede_kamer.toml")));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.log_file.as_deref(), Some("/tmp/kamerdata.log"));
        assert!(config.console_timestamps);
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let config = Config::from_lookup(lookup_from(&[(ENV_FILE, "  "), (ENV_LOG_FILE, "")])).unwrap();
        assert!(config.dataset_file.is_none());
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let err = Config::from_lookup(lookup_from(&[(ENV_LOG_LEVEL, "loud")])).unwrap_err();
        assert!(err.contains(ENV_LOG_LEVEL));

        let err = Config::from_lookup(lookup_from(&[(ENV_LOG_TIMESTAMPS, "maybe")])).unwrap_err();
        assert!(err.contains(ENV_LOG_TIMESTAMPS));
    }
}
