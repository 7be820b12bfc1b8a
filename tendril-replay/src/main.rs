//! Replays recorded list interactions through the selection engine.
//!
//! Usage: `tendril-replay <scenario.json> [--log <file>] [--verbose]`

mod error;
mod replay;
mod scenario;
mod sim;

use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use simplelog::{Config, LevelFilter, SimpleLogger, WriteLogger};

use crate::error::ReplayError;
use crate::scenario::Scenario;

#[derive(Debug, Parser)]
#[command(name = "tendril-replay", about = "Replay a drag-selection scenario")]
struct Args {
    /// Scenario file (JSON)
    scenario: PathBuf,
    /// Write logs to this file
    #[arg(long)]
    log: Option<PathBuf>,
    /// Trace-level logging (to stderr unless --log is given)
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(args: &Args) -> Result<(), ReplayError> {
    let level = if args.verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    let installed = match &args.log {
        Some(path) => WriteLogger::init(level, Config::default(), File::create(path)?),
        None if args.verbose => SimpleLogger::init(level, Config::default()),
        None => return Ok(()),
    };
    if let Err(e) = installed {
        eprintln!("Warning: logging disabled: {}", e);
    }
    Ok(())
}

fn run() -> Result<(), ReplayError> {
    let args = Args::parse();
    init_logging(&args)?;

    let text = fs::read_to_string(&args.scenario)?;
    let scenario: Scenario = serde_json::from_str(&text)?;
    log::info!(
        "Replaying {} steps over {} items",
        scenario.steps.len(),
        scenario.list.items.len()
    );

    let report = replay::run(scenario)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
