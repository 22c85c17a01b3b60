/// Core data types for the Tweede Kamer reference dataset.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no I/O, only types and the small conversions they need.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

/// Largest value representable in a 24-bit RGB color.
pub const RGB_MAX: u32 = 0xff_ff_ff;

/// A 24-bit display color, stored as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub u32);

impl Rgb {
    /// Returns `None` if the value does not fit in 24 bits.
    pub fn new(value: u32) -> Option<Rgb> {
        (value <= RGB_MAX).then_some(Rgb(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn red(self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    pub fn green(self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    pub fn blue(self) -> u8 {
        (self.0 & 0xff) as u8
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Poll months
// ---------------------------------------------------------------------------

/// Parses a `YYYY-MM` month string into the first day of that month.
pub fn parse_month(s: &str) -> Result<NaiveDate, DatasetError> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|e| DatasetError::ParseError(format!("invalid month '{}': {}", s, e)))
}

/// Number of calendar months from `first` to `last`, both inclusive.
/// Zero when `last` precedes `first`.
pub fn months_inclusive(first: NaiveDate, last: NaiveDate) -> usize {
    let start = first.year() * 12 + first.month0() as i32;
    let end = last.year() * 12 + last.month0() as i32;
    if end < start { 0 } else { (end - start + 1) as usize }
}

/// The first day of the month `offset` months after `first`.
pub fn nth_month(first: NaiveDate, offset: usize) -> Option<NaiveDate> {
    let total = first.year() * 12 + first.month0() as i32 + i32::try_from(offset).ok()?;
    NaiveDate::from_ymd_opt(total.div_euclid(12), total.rem_euclid(12) as u32 + 1, 1)
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Everything the dataset knows about one party.
///
/// Built once at load time from the index-aligned input tables; the
/// record replaces "position `i` in every table" with a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyRecord {
    /// Short party code, e.g. "VVD". Unique within a dataset.
    pub code: String,
    pub color: Rgb,
    /// Vote totals keyed by election year.
    pub votes: BTreeMap<u16, u64>,
    /// Left-right positioning keyed by survey year.
    pub left_right: BTreeMap<u16, f64>,
    /// Monthly poll percentages, one per month of the poll period.
    pub polls: Vec<u32>,
}

/// Inclusive range of months covered by the poll series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollPeriod {
    pub first_month: NaiveDate,
    pub last_month: NaiveDate,
}

impl PollPeriod {
    pub fn month_count(&self) -> usize {
        months_inclusive(self.first_month, self.last_month)
    }

    /// Zero-based position of `month` within the period, if it falls inside.
    /// Any day of the month is accepted.
    pub fn offset_of(&self, month: NaiveDate) -> Option<usize> {
        let first = month.with_day(1)?;
        if first < self.first_month || first > self.last_month {
            return None;
        }
        Some(months_inclusive(self.first_month, first) - 1)
    }

    pub fn months(&self) -> Vec<NaiveDate> {
        (0..self.month_count())
            .filter_map(|i| nth_month(self.first_month, i))
            .collect()
    }
}

/// Attribution for one table of the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceNote {
    /// Table the note applies to: "elections", "positioning" or "polls".
    pub table: String,
    pub description: String,
    pub url: String,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when loading or querying the dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetError {
    /// The requested party code is not in the party list.
    UnknownParty(String),
    /// A table's length does not match the party list (or, for a poll
    /// series, the number of months in the poll period).
    InconsistentTable {
        table: String,
        expected: usize,
        found: usize,
    },
    /// The requested year has no election or positioning table.
    UnknownYear { table: String, year: u16 },
    /// The party list contains the same code twice.
    DuplicateParty(String),
    /// Malformed input: TOML syntax, month strings, year keys, colors.
    ParseError(String),
    /// The dataset file could not be read.
    IoError(String),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::UnknownParty(code) => write!(f, "Unknown party: {}", code),
            DatasetError::InconsistentTable { table, expected, found } => write!(
                f,
                "Inconsistent table '{}': expected {} entries, found {}",
                table, expected, found
            ),
            DatasetError::UnknownYear { table, year } => {
                write!(f, "No {} data for year {}", table, year)
            }
            DatasetError::DuplicateParty(code) => write!(f, "Duplicate party code: {}", code),
            DatasetError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            DatasetError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for DatasetError {}

impl From<toml::de::Error> for DatasetError {
    fn from(e: toml::de::Error) -> Self {
        DatasetError::ParseError(e.to_string())
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(e: std::io::Error) -> Self {
        DatasetError::IoError(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
