//! Read-only access to the Tweede Kamer reference dataset.
//!
//! A [`Dataset`] is built once from index-aligned [`RawTables`] and never
//! mutated afterwards. Building it is the only place the alignment between
//! the party list and the other tables is checked: a table of the wrong
//! length fails the whole load with [`DatasetError::InconsistentTable`],
//! so a `Dataset` that exists is always consistent.
//!
//! Lookups take a party code and fail with [`DatasetError::UnknownParty`]
//! when the code is absent. A `Dataset` is `Send + Sync`; share it by
//! reference or `Arc` without locking.

use crate::config::Config;
use crate::logging::{self, Component};
use crate::model::{DatasetError, PartyRecord, PollPeriod, Rgb, SourceNote, parse_month};
use crate::registry;
use crate::source::{RawTables, parse_year};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    parties: Vec<PartyRecord>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    election_years: Vec<u16>,
    positioning_years: Vec<u16>,
    poll_period: PollPeriod,
    sources: Vec<SourceNote>,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Dataset {
    /// Builds the dataset from the tables compiled into the crate.
    pub fn builtin() -> Result<Self, DatasetError> {
        Self::load_logged("built-in tables", registry::builtin_tables())
    }

    /// Validates index alignment and converts the tables to per-party records.
    pub fn from_tables(tables: RawTables) -> Result<Self, DatasetError> {
        Self::load_logged("tables", tables)
    }

    /// Parses and validates a TOML dataset document.
    pub fn from_toml_str(s: &str) -> Result<Self, DatasetError> {
        let tables = RawTables::from_toml_str(s).inspect_err(|e| {
            logging::log_dataset_failure(Component::Loader, "parse dataset", e)
        })?;
        Self::load_logged("TOML document", tables)
    }

    /// Reads, parses and validates a TOML dataset file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let tables = RawTables::from_toml_file(path).inspect_err(|e| {
            logging::log_dataset_failure(Component::Loader, &format!("read {}", origin), e)
        })?;
        Self::load_logged(&origin, tables)
    }

    /// Loads the configured dataset file, or the built-in tables if none is set.
    pub fn load(config: &Config) -> Result<Self, DatasetError> {
        match &config.dataset_file {
            Some(path) => Self::from_toml_file(path),
            None => Self::builtin(),
        }
    }

    fn load_logged(origin: &str, tables: RawTables) -> Result<Self, DatasetError> {
        match Self::build(tables) {
            Ok(dataset) => {
                logging::log_load_summary(
                    origin,
                    dataset.len(),
                    dataset.election_years.len(),
                    dataset.poll_period.month_count(),
                );
                Ok(dataset)
            }
            Err(e) => {
                logging::log_dataset_failure(Component::Loader, &format!("load {}", origin), &e);
                Err(e)
            }
        }
    }

    fn build(tables: RawTables) -> Result<Self, DatasetError> {
        let RawTables {
            parties,
            colors,
            elections,
            positioning,
            polls,
            sources,
        } = tables;

        // Party list: non-empty, unique codes.
        let mut index = HashMap::with_capacity(parties.len());
        for (i, code) in parties.iter().enumerate() {
            if code.trim().is_empty() {
                return Err(DatasetError::ParseError(format!("empty party code at index {}", i)));
            }
            if index.insert(code.clone(), i).is_some() {
                return Err(DatasetError::DuplicateParty(code.clone()));
            }
        }
        let n = parties.len();

        check_len("colors", n, colors.len())?;
        let colors = colors
            .into_iter()
            .zip(&parties)
            .map(|(value, code)| {
                Rgb::new(value).ok_or_else(|| {
                    DatasetError::ParseError(format!(
                        "color 0x{:x} for '{}' does not fit in 24 bits",
                        value, code
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let elections = keyed_by_year("elections", elections, n)?;
        let positioning = keyed_by_year("positioning", positioning, n)?;

        let first_month = parse_month(&polls.first_month)?;
        let last_month = parse_month(&polls.last_month)?;
        if last_month < first_month {
            return Err(DatasetError::ParseError(format!(
                "poll period ends ({}) before it starts ({})",
                polls.last_month, polls.first_month
            )));
        }
        let poll_period = PollPeriod { first_month, last_month };
        let months = poll_period.month_count();

        check_len("polls.series", n, polls.series.len())?;
        for (code, series) in parties.iter().zip(&polls.series) {
            check_len(&format!("polls.series[{}]", code), months, series.len())?;
        }

        let records = parties
            .into_iter()
            .zip(colors)
            .zip(polls.series)
            .enumerate()
            .map(|(i, ((code, color), polls))| PartyRecord {
                code,
                color,
                votes: elections.iter().map(|(year, votes)| (*year, votes[i])).collect(),
                left_right: positioning.iter().map(|(year, scores)| (*year, scores[i])).collect(),
                polls,
            })
            .collect();

        Ok(Dataset {
            parties: records,
            index,
            election_years: elections.keys().copied().collect(),
            positioning_years: positioning.keys().copied().collect(),
            poll_period,
            sources,
        })
    }
}

fn check_len(table: &str, expected: usize, found: usize) -> Result<(), DatasetError> {
    if expected == found {
        Ok(())
    } else {
        Err(DatasetError::InconsistentTable {
            table: table.to_string(),
            expected,
            found,
        })
    }
}

/// Parses the year keys of a per-year table and checks every column length.
fn keyed_by_year<T>(
    table: &str,
    columns: BTreeMap<String, Vec<T>>,
    expected: usize,
) -> Result<BTreeMap<u16, Vec<T>>, DatasetError> {
    let mut by_year = BTreeMap::new();
    for (key, column) in columns {
        let year = parse_year(&key)?;
        check_len(&format!("{}.{}", table, key), expected, column.len())?;
        if by_year.insert(year, column).is_some() {
            return Err(DatasetError::ParseError(format!(
                "year {} appears twice in {}",
                year, table
            )));
        }
    }
    Ok(by_year)
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

impl Dataset {
    /// Number of parties.
    pub fn len(&self) -> usize {
        self.parties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }

    /// Party codes in canonical order.
    pub fn parties(&self) -> Vec<&str> {
        self.parties.iter().map(|p| p.code.as_str()).collect()
    }

    /// All records, in the same order as [`Dataset::parties`].
    pub fn records(&self) -> &[PartyRecord] {
        &self.parties
    }

    /// Position of `code` in the party list.
    pub fn index_of(&self, code: &str) -> Result<usize, DatasetError> {
        self.index
            .get(code)
            .copied()
            .ok_or_else(|| DatasetError::UnknownParty(code.to_string()))
    }

    pub fn party(&self, code: &str) -> Result<&PartyRecord, DatasetError> {
        let i = self.index_of(code)?;
        Ok(&self.parties[i])
    }

    /// Record at position `index`, or `None` past the end of the party list.
    pub fn party_at(&self, index: usize) -> Option<&PartyRecord> {
        self.parties.get(index)
    }

    pub fn color(&self, code: &str) -> Result<Rgb, DatasetError> {
        Ok(self.party(code)?.color)
    }

    /// Votes cast for `code` in the election held in `year`.
    pub fn election_result(&self, year: u16, code: &str) -> Result<u64, DatasetError> {
        let party = self.party(code)?;
        party
            .votes
            .get(&year)
            .copied()
            .ok_or_else(|| DatasetError::UnknownYear {
                table: "elections".to_string(),
                year,
            })
    }

    /// Left-right score for `code` from the `year` survey.
    pub fn positioning(&self, year: u16, code: &str) -> Result<f64, DatasetError> {
        let party = self.party(code)?;
        party
            .left_right
            .get(&year)
            .copied()
            .ok_or_else(|| DatasetError::UnknownYear {
                table: "positioning".to_string(),
                year,
            })
    }

    /// Monthly poll percentages for `code`, one per month of the poll period.
    pub fn poll_series(&self, code: &str) -> Result<&[u32], DatasetError> {
        Ok(&self.party(code)?.polls)
    }

    /// Poll percentage for `code` in the month containing `month`.
    /// `Ok(None)` if the month is outside the poll period.
    pub fn poll_at(&self, code: &str, month: NaiveDate) -> Result<Option<u32>, DatasetError> {
        let series = self.poll_series(code)?;
        Ok(self
            .poll_period
            .offset_of(month)
            .and_then(|i| series.get(i).copied()))
    }

    pub fn election_years(&self) -> &[u16] {
        &self.election_years
    }

    pub fn positioning_years(&self) -> &[u16] {
        &self.positioning_years
    }

    pub fn poll_period(&self) -> PollPeriod {
        self.poll_period
    }

    /// First day of every month in the poll period, in order.
    pub fn poll_months(&self) -> Vec<NaiveDate> {
        self.poll_period.months()
    }

    pub fn sources(&self) -> &[SourceNote] {
        &self.sources
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
