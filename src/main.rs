/// `kamerdata` — print the Tweede Kamer reference dataset.
///
/// Usage:
///   kamerdata [--json] [--file PATH]
///
/// Without `--file`, the file named by `KAMERDATA_FILE` is loaded, or the
/// built-in tables if that is unset.

use kamerdata::config::Config;
use kamerdata::logging::{self, Component};
use kamerdata::Dataset;
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "usage: kamerdata [--json] [--file PATH]";

struct Args {
    json: bool,
    file: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<Args>, String> {
    let mut parsed = Args { json: false, file: None };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => parsed.json = true,
            "--file" => {
                let path = args.next().ok_or("--file needs a path")?;
                parsed.file = Some(PathBuf::from(path));
            }
            "-h" | "--help" => return Ok(None),
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }
    Ok(Some(parsed))
}

fn print_table(ds: &Dataset) {
    let latest_election = ds.election_years().last().copied();
    let latest_positioning = ds.positioning_years().last().copied();

    println!(
        "{:<8} {:<8} {:>12} {:>6} {:>5}",
        "party",
        "color",
        latest_election.map(|y| format!("votes {}", y)).unwrap_or_default(),
        "l-r",
        "poll"
    );
    for party in ds.records() {
        let votes = latest_election
            .and_then(|y| party.votes.get(&y))
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());
        let left_right = latest_positioning
            .and_then(|y| party.left_right.get(&y))
            .map(|s| format!("{:.2}", s))
            .unwrap_or_else(|| "-".to_string());
        let poll = party
            .polls
            .last()
            .map(|p| format!("{}%", p))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<8} {:<8} {:>12} {:>6} {:>5}",
            party.code, party.color, votes, left_right, poll
        );
    }

    let period = ds.poll_period();
    println!(
        "\npolls: {} to {} ({} months)",
        period.first_month.format("%Y-%m"),
        period.last_month.format("%Y-%m"),
        period.month_count()
    );
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(Some(args)) => args,
        Ok(None) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::from(2);
        }
    };
    if args.file.is_some() {
        config.dataset_file = args.file;
    }

    logging::init_logger(config.log_level, config.log_file.as_deref(), config.console_timestamps);
    logging::debug(Component::Config, None, &format!("{:?}", config));

    let dataset = match Dataset::load(&config) {
        Ok(ds) => ds,
        Err(e) => {
            eprintln!("Failed to load dataset: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&dataset) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                logging::error(Component::Cli, None, &format!("JSON encoding failed: {}", e));
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_table(&dataset);
    }

    ExitCode::SUCCESS
}
