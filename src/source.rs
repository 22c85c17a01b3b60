//! Parallel-table input format.
//!
//! The dataset arrives as a set of independent tables that are aligned by
//! position with the party list. [`RawTables`] is that shape, unvalidated:
//! it is what a TOML dataset file deserialises into and what the built-in
//! registry produces. `Dataset::from_tables` checks the alignment and turns
//! the tables into per-party records.

use crate::model::{DatasetError, SourceNote};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Unvalidated tables, each index-aligned with `parties`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTables {
    pub parties: Vec<String>,
    pub colors: Vec<u32>,
    /// Vote totals keyed by election year (as a string, since TOML keys are).
    #[serde(default)]
    pub elections: BTreeMap<String, Vec<u64>>,
    /// Left-right scores keyed by survey year.
    #[serde(default)]
    pub positioning: BTreeMap<String, Vec<f64>>,
    pub polls: RawPolls,
    #[serde(default)]
    pub sources: Vec<SourceNote>,
}

/// Poll series plus the inclusive month range they cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPolls {
    /// First month, `YYYY-MM`.
    pub first_month: String,
    /// Last month, `YYYY-MM`, inclusive.
    pub last_month: String,
    pub series: Vec<Vec<u32>>,
}

impl RawTables {
    /// Parses tables from a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, DatasetError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a TOML dataset file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DatasetError::IoError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }
}

/// Parses a year key such as `"2023"`.
pub(crate) fn parse_year(key: &str) -> Result<u16, DatasetError> {
    key.trim()
        .parse::<u16>()
        .map_err(|_| DatasetError::ParseError(format!("invalid year key '{}'", key)))
}
