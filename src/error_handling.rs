//! Error type definitions.
//!
//! Absence of a usable answer (empty output, timeout) is not an error and is
//! reported through [`crate::dig::QueryOutcome`]. The types here cover the
//! genuine faults: a report that does not follow dig's grammar, a dig process
//! that could not be run, and logger setup.

use std::path::PathBuf;

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Header fields that every non-rejected dig report must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum HeaderField {
    Status,
    AnswerCount,
    AuthorityCount,
    AdditionalCount,
    RespondingServer,
    QueryTime,
    MessageSize,
}

impl HeaderField {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderField::Status => "status",
            HeaderField::AnswerCount => "ANSWER count",
            HeaderField::AuthorityCount => "AUTHORITY count",
            HeaderField::AdditionalCount => "ADDITIONAL count",
            HeaderField::RespondingServer => "SERVER",
            HeaderField::QueryTime => "Query time",
            HeaderField::MessageSize => "MSG SIZE",
        }
    }
}

impl std::fmt::Display for HeaderField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A report that passed early rejection but does not follow dig's grammar.
///
/// Both variants carry the full report so the caller can see what dig
/// actually printed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// A mandatory header marker is absent.
    #[error("dig report is missing the {field} field")]
    MissingField { field: HeaderField, raw: String },

    /// The marker is present but its value does not fit the field type.
    #[error("dig report has an invalid {field} value {value:?}")]
    InvalidField {
        field: HeaderField,
        value: String,
        raw: String,
    },
}

impl ReportError {
    /// The header field at fault.
    pub fn field(&self) -> HeaderField {
        match self {
            ReportError::MissingField { field, .. } | ReportError::InvalidField { field, .. } => {
                *field
            }
        }
    }

    /// The report text that failed to parse.
    pub fn raw_output(&self) -> &str {
        match self {
            ReportError::MissingField { raw, .. } | ReportError::InvalidField { raw, .. } => raw,
        }
    }
}

/// Failures running a dig query end to end.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The dig process could not be started (not installed, not executable).
    #[error("failed to run {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// dig wrote something that is not UTF-8.
    #[error("dig output is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// dig ran but its output is not a report this crate understands.
    #[error("unparseable dig output: {0}")]
    Unparseable(#[from] ReportError),
}

impl QueryError {
    /// The raw dig output, when the failure happened after dig produced it.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            QueryError::Unparseable(e) => Some(e.raw_output()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_header_field_names_are_unique() {
        let names: std::collections::HashSet<_> =
            HeaderField::iter().map(|f| f.as_str()).collect();
        assert_eq!(names.len(), HeaderField::iter().count());
    }

    #[test]
    fn test_report_error_keeps_raw_output() {
        let err = ReportError::MissingField {
            field: HeaderField::QueryTime,
            raw: "garbage".to_string(),
        };
        assert_eq!(err.field(), HeaderField::QueryTime);
        assert_eq!(err.raw_output(), "garbage");
        assert_eq!(err.to_string(), "dig report is missing the Query time field");
    }

    #[test]
    fn test_query_error_exposes_raw_output_only_when_unparseable() {
        let unparseable = QueryError::from(ReportError::InvalidField {
            field: HeaderField::RespondingServer,
            value: "999.1.1.1".to_string(),
            raw: ";; SERVER: 999.1.1.1#53".to_string(),
        });
        assert_eq!(unparseable.raw_output(), Some(";; SERVER: 999.1.1.1#53"));

        let spawn = QueryError::Spawn {
            program: PathBuf::from("dig"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(spawn.raw_output(), None);
        assert!(spawn.to_string().starts_with("failed to run dig"));
    }
}
