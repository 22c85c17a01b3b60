/// Integration tests for the shipped dataset.
///
/// These tests verify:
/// 1. The built-in tables and `data/tweede_kamer.toml` describe the same dataset
/// 2. Every table is index-aligned with the party list
/// 3. Lookups return the published figures
/// 4. Broken dataset files are rejected at load time, never half-loaded
///
/// Run with: cargo test --test dataset_integration

use kamerdata::config::Config;
use kamerdata::registry::{self, COLORS, PARTY_CODES};
use kamerdata::{Dataset, DatasetError, Rgb};

use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

fn data_file() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/tweede_kamer.toml")
}

fn data_file_contents() -> String {
    std::fs::read_to_string(data_file()).expect("data/tweede_kamer.toml should be readable")
}

fn builtin() -> &'static Dataset {
    registry::dataset().expect("built-in dataset should load")
}

/// Writes `contents` to a per-test temporary file and returns its path.
fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("kamerdata_{}_{}.toml", std::process::id(), name));
    std::fs::write(&path, contents).expect("temp file should be writable");
    path
}

// ---------------------------------------------------------------------------
// Shipped data
// ---------------------------------------------------------------------------

#[test]
fn test_data_file_matches_builtin_tables() {
    let from_file = Dataset::from_toml_file(data_file()).expect("shipped file should load");
    assert_eq!(&from_file, builtin());
}

#[test]
fn test_load_with_configured_file() {
    let config = Config {
        dataset_file: Some(data_file()),
        ..Config::default()
    };
    let ds = Dataset::load(&config).unwrap();
    assert_eq!(ds.parties(), PARTY_CODES.to_vec());
}

#[test]
fn test_every_table_has_one_entry_per_party() {
    let ds = builtin();
    let n = ds.parties().len();
    assert_eq!(n, 16);
    for record in ds.records() {
        assert_eq!(record.votes.len(), ds.election_years().len(), "votes for {}", record.code);
        assert_eq!(
            record.left_right.len(),
            ds.positioning_years().len(),
            "positioning for {}",
            record.code
        );
    }
    assert_eq!(ds.election_years(), &[2023u16, 2025]);
    assert_eq!(ds.positioning_years(), &[2023u16, 2025]);
}

#[test]
fn test_colors_follow_party_order() {
    let ds = builtin();
    for (i, code) in ds.parties().iter().enumerate() {
        assert_eq!(ds.color(code).unwrap(), Rgb(COLORS[i]), "color for {}", code);
        assert_eq!(ds.index_of(code).unwrap(), i);
        assert_eq!(ds.party_at(i).map(|p| p.code.as_str()), Some(*code));
    }
}

#[test]
fn test_poll_series_have_equal_length() {
    let ds = builtin();
    let months = ds.poll_months().len();
    assert_eq!(months, 22);
    for code in ds.parties() {
        assert_eq!(ds.poll_series(code).unwrap().len(), months, "poll series for {}", code);
    }
}

#[test]
fn test_poll_values_are_percentages() {
    let ds = builtin();
    for code in ds.parties() {
        for &value in ds.poll_series(code).unwrap() {
            assert!(value <= 100, "{} poll value {} out of range", code, value);
        }
    }
}

#[test]
fn test_published_figures() {
    let ds = builtin();
    assert_eq!(ds.election_result(2023, "PVV").unwrap(), 2_450_878);
    assert_eq!(ds.election_result(2025, "D66").unwrap(), 1_790_634);
    assert_eq!(ds.color("SGP").unwrap(), Rgb(0xe14400));
    assert_eq!(ds.positioning(2025, "FvD").unwrap(), 9.4);
    assert_eq!(
        ds.poll_series("D66").unwrap().len(),
        ds.poll_series("PVV").unwrap().len()
    );
}

#[test]
fn test_poll_months_span_between_elections() {
    let ds = builtin();
    let months = ds.poll_months();
    assert_eq!(months.first(), NaiveDate::from_ymd_opt(2023, 12, 1).as_ref());
    assert_eq!(months.last(), NaiveDate::from_ymd_opt(2025, 9, 1).as_ref());

    let dec_2023 = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();
    let sep_2025 = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
    assert_eq!(ds.poll_at("PVV", dec_2023).unwrap(), Some(46));
    assert_eq!(ds.poll_at("CDA", sep_2025).unwrap(), Some(24));
    assert_eq!(ds.poll_at("PVV", NaiveDate::from_ymd_opt(2023, 11, 1).unwrap()).unwrap(), None);
}

#[test]
fn test_sources_cover_every_table() {
    let tables: Vec<_> = builtin().sources().iter().map(|s| s.table.as_str()).collect();
    for expected in ["elections", "positioning", "polls"] {
        assert!(tables.contains(&expected), "no source note for '{}'", expected);
    }
}

#[test]
fn test_unknown_party_fails_every_lookup() {
    let ds = builtin();
    assert_eq!(ds.color("XYZ"), Err(DatasetError::UnknownParty("XYZ".to_string())));
    assert!(matches!(ds.election_result(2023, "XYZ"), Err(DatasetError::UnknownParty(_))));
    assert!(matches!(ds.positioning(2023, "XYZ"), Err(DatasetError::UnknownParty(_))));
    assert!(matches!(ds.poll_series("XYZ"), Err(DatasetError::UnknownParty(_))));
    // Codes are case-sensitive.
    assert!(matches!(ds.color("pvv"), Err(DatasetError::UnknownParty(_))));
}

#[test]
fn test_concurrent_readers_share_one_dataset() {
    let ds = Arc::new(Dataset::builtin().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let ds = Arc::clone(&ds);
            std::thread::spawn(move || {
                ds.parties()
                    .iter()
                    .map(|code| ds.election_result(2025, code).unwrap())
                    .sum::<u64>()
            })
        })
        .collect();

    let totals: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(totals.windows(2).all(|w| w[0] == w[1]));
    assert!(totals[0] > 0);
}

// ---------------------------------------------------------------------------
// Broken dataset files
// ---------------------------------------------------------------------------

#[test]
fn test_truncated_color_table_is_rejected() {
    let contents = data_file_contents().replace("    0x007b5f, # CDA\n", "");
    let path = write_temp("short_colors", &contents);

    let result = Dataset::from_toml_file(&path);
    let _ = std::fs::remove_file(&path);

    assert_eq!(
        result,
        Err(DatasetError::InconsistentTable {
            table: "colors".to_string(),
            expected: 16,
            found: 15,
        })
    );
}

#[test]
fn test_truncated_poll_series_is_rejected() {
    let contents = data_file_contents().replace(
        "[5, 6, 7, 8, 7, 8, 9, 10, 8, 11, 12, 13, 15, 16, 16, 17, 18, 18, 21, 23, 22, 24], # CDA",
        "[5, 6, 7, 8, 7, 8, 9, 10, 8, 11, 12, 13, 15, 16, 16, 17, 18, 18, 21, 23, 22], # CDA",
    );
    let result = Dataset::from_toml_str(&contents);
    assert_eq!(
        result,
        Err(DatasetError::InconsistentTable {
            table: "polls.series[CDA]".to_string(),
            expected: 22,
            found: 21,
        })
    );
}

#[test]
fn test_extra_party_without_data_is_rejected() {
    let contents = data_file_contents().replace("    \"CDA\",\n]", "    \"CDA\",\n    \"NEW\",\n]");
    match Dataset::from_toml_str(&contents) {
        Err(DatasetError::InconsistentTable { expected, found, .. }) => {
            assert_eq!(expected, 17);
            assert_eq!(found, 16);
        }
        other => panic!("expected InconsistentTable, got {:?}", other),
    }
}

#[test]
fn test_missing_file_is_reported() {
    let result = Dataset::from_toml_file("/nonexistent/tweede_kamer.toml");
    assert!(matches!(result, Err(DatasetError::IoError(_))));
}

#[test]
fn test_json_export_keeps_party_order() {
    let json = serde_json::to_value(builtin()).unwrap();
    let codes: Vec<&str> = json["parties"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, PARTY_CODES.to_vec());
    assert_eq!(json["parties"][12]["votes"]["2023"], 2_450_878);
}
