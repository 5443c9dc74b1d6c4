//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `dig_report` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! Exit codes: 0 when the query was answered, 2 when dig got no response,
//! 1 on any error.

use std::io::Read;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use dig_report::dig::{parse_report, QueryOutcome};
use dig_report::initialization::init_logger_with;
use dig_report::{Opt, OutputFormat, QueryError};

const EXIT_NO_RESPONSE: i32 = 2;

fn main() -> Result<()> {
    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    match outcome(&opt) {
        Ok(QueryOutcome::Answered(report)) => {
            match opt.output {
                OutputFormat::Plain => println!("{report}"),
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&report).context("Failed to serialize report")?
                ),
            }
            Ok(())
        }
        Ok(QueryOutcome::NoResponse(reason)) => {
            warn!("No response for {}: {:?}", opt.domain, reason);
            process::exit(EXIT_NO_RESPONSE);
        }
        Err(e) => {
            eprintln!("dig_report error: {:#}", e);
            if let Some(raw) = e.downcast_ref::<QueryError>().and_then(|q| q.raw_output()) {
                eprintln!("--- dig output ---\n{raw}");
            }
            process::exit(1);
        }
    }
}

/// Parses either a saved report or the output of a fresh dig run.
fn outcome(opt: &Opt) -> Result<QueryOutcome> {
    match &opt.input {
        Some(path) => {
            let text = if path.as_os_str() == "-" {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read report from stdin")?;
                text
            } else {
                std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read report from {}", path.display()))?
            };
            info!("Parsing saved report for {}", opt.domain);
            parse_report(&text)
                .map_err(QueryError::from)
                .context("Failed to parse saved report")
        }
        None => {
            let query = opt.to_query();
            info!("Querying {} with {}", opt.domain, query.program_path().display());
            query.run().context("dig query failed")
        }
    }
}
