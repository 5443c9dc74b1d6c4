//! dig_report library: run `dig` and parse its report
//!
//! The core of the crate is a parser for the text dig prints: header facts
//! (status, section counts, responding server, timing, message size) and the
//! record lines of the ANSWER, AUTHORITY and ADDITIONAL sections.
//!
//! # Example
//!
//! ```no_run
//! use dig_report::dig::{DigQuery, QueryOutcome};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let query = DigQuery::new("cnn.com").target_server("8.8.8.8");
//! match query.run()? {
//!     QueryOutcome::Answered(report) => {
//!         println!("{} in {} ms", report.status, report.query_time_ms);
//!         for record in &report.answer_section {
//!             println!("{record}");
//!         }
//!     }
//!     QueryOutcome::NoResponse(reason) => println!("no answer: {reason:?}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Reports captured earlier can be parsed without running dig:
//!
//! ```
//! use dig_report::dig::{parse_report, NoResponseReason, QueryOutcome};
//!
//! let outcome = parse_report(";; connection timed out; no servers could be reached\n").unwrap();
//! assert_eq!(outcome, QueryOutcome::NoResponse(NoResponseReason::TimedOut));
//! ```

pub mod config;
pub mod dig;
pub mod error_handling;
pub mod initialization;

// Re-export public API
pub use config::{LogFormat, LogLevel, Opt, OutputFormat};
pub use dig::{
    missing_header_fields, parse_record_line, parse_report, run_query, DigQuery,
    NoResponseReason, ParsedReport, QueryOutcome, RecordLine, Section,
};
pub use error_handling::{HeaderField, QueryError, ReportError};
