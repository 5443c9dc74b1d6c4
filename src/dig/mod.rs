//! dig invocation and report parsing.
//!
//! - `line`: one five-field record line
//! - `report`: a whole report, header facts plus per-section records
//! - `command`: building and running the dig command line

mod command;
mod line;
mod report;

use regex::Regex;

// Re-export public API
pub use command::{run_query, DigQuery};
pub use line::{parse_record_line, RecordLine};
pub use report::{
    missing_header_fields, parse_report, NoResponseReason, ParsedReport, QueryOutcome, Section,
};

/// Compiles a static regex pattern, panicking with context on failure.
/// Only used for compile-time constant patterns.
fn compile_regex_unsafe(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}
