//! Tweede Kamer reference dataset.
//!
//! Party codes, display colors, the 2023 and 2025 election results,
//! KiesKompas left-right positions and monthly poll averages, exposed as a
//! read-only [`Dataset`] whose tables are guaranteed index-aligned.
//!
//! ```
//! let ds = kamerdata::registry::dataset().unwrap();
//! assert_eq!(ds.election_result(2023, "PVV").unwrap(), 2_450_878);
//! assert_eq!(ds.color("SGP").unwrap().value(), 0xe14400);
//! ```

pub mod config;
pub mod dataset;
pub mod logging;
pub mod model;
pub mod registry;
pub mod source;

pub use dataset::Dataset;
pub use model::{DatasetError, PartyRecord, PollPeriod, Rgb, SourceNote};
