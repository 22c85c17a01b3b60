/// Structured logging for the dataset loader and CLI.
///
/// Provides leveled logging tagged with the emitting component and, where
/// relevant, the party code involved. Supports console output and an
/// optional append-only log file.

use crate::model::DatasetError;
use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::str::FromStr;
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    Loader,
    Config,
    Cli,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Loader => write!(f, "LOAD"),
            Component::Config => write!(f, "CFG"),
            Component::Cli => write!(f, "CLI"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Caller asked for something the dataset does not contain
    Expected,
    /// The dataset itself is broken or unreadable
    Unexpected,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
        }
    }
}

/// Classify a dataset error by whether it points at the caller or the data.
pub fn classify_failure(err: &DatasetError) -> FailureType {
    match err {
        DatasetError::UnknownParty(_) | DatasetError::UnknownYear { .. } => FailureType::Expected,
        DatasetError::InconsistentTable { .. }
        | DatasetError::DuplicateParty(_)
        | DatasetError::ParseError(_)
        | DatasetError::IoError(_) => FailureType::Unexpected,
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>, console_timestamps: bool) {
        let logger = Logger {
            min_level,
            log_file,
            console_timestamps,
        };

        if let Ok(mut slot) = LOGGER.lock() {
            *slot = Some(logger);
        }
    }

    fn format_entry(level: LogLevel, component: &Component, party: Option<&str>, message: &str) -> String {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let party_part = party.map(|p| format!(" [{}]", p)).unwrap_or_default();
        format!("{} {} {}{}: {}", timestamp, level, component, party_part, message)
    }

    fn log(&self, level: LogLevel, component: &Component, party: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let log_entry = Self::format_entry(level, component, party, message);
        let party_part = party.map(|p| format!(" [{}]", p)).unwrap_or_default();

        // stdout is reserved for CLI output
        if self.console_timestamps {
            eprintln!("{}", log_entry);
        } else {
            match level {
                LogLevel::Error => eprintln!("   ✗ {}{}: {}", component, party_part, message),
                LogLevel::Warning => eprintln!("   ⚠ {}{}: {}", component, party_part, message),
                LogLevel::Info => eprintln!("   {}", message),
                LogLevel::Debug => eprintln!("   [DEBUG] {}", message),
            }
        }

        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>, console_timestamps: bool) {
    Logger::init(min_level, log_file.map(String::from), console_timestamps);
}

fn emit(level: LogLevel, component: Component, party: Option<&str>, message: &str) {
    if let Ok(guard) = LOGGER.lock() {
        if let Some(logger) = guard.as_ref() {
            logger.log(level, &component, party, message);
        }
    }
}

/// Log a general informational message
pub fn info(component: Component, party: Option<&str>, message: &str) {
    emit(LogLevel::Info, component, party, message);
}

/// Log a warning message
pub fn warn(component: Component, party: Option<&str>, message: &str) {
    emit(LogLevel::Warning, component, party, message);
}

/// Log an error message
pub fn error(component: Component, party: Option<&str>, message: &str) {
    emit(LogLevel::Error, component, party, message);
}

/// Log a debug message
pub fn debug(component: Component, party: Option<&str>, message: &str) {
    emit(LogLevel::Debug, component, party, message);
}

// ---------------------------------------------------------------------------
// Structured Failure Logging
// ---------------------------------------------------------------------------

/// Log a dataset failure with automatic classification.
///
/// Lookup misses are logged at debug level; broken data at error level.
pub fn log_dataset_failure(component: Component, operation: &str, err: &DatasetError) {
    let failure_type = classify_failure(err);
    let party = match err {
        DatasetError::UnknownParty(code) | DatasetError::DuplicateParty(code) => Some(code.as_str()),
        _ => None,
    };
    let message = format!("{} failed [{}]: {}", operation, failure_type, err);

    match failure_type {
        FailureType::Expected => debug(component, party, &message),
        FailureType::Unexpected => error(component, party, &message),
    }
}

/// Log a summary of a completed dataset load.
pub fn log_load_summary(origin: &str, parties: usize, elections: usize, months: usize) {
    let message = format!(
        "Loaded dataset from {}: {} parties, {} elections, {} poll months",
        origin, parties, elections, months
    );

    if parties == 0 {
        warn(Component::Loader, None, &message);
    } else {
        info(Component::Loader, None, &message);
    }
}
