//! Report parsing.
//!
//! A dig report is read in two independent passes: the header facts are
//! picked out of the whole text with anchored searches, and the record lines
//! are collected by one forward scan that tracks which section it is in.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::LazyLock;

use log::{debug, trace};
use regex::Regex;
use serde::Serialize;
use strum::IntoEnumIterator;

use super::line::{parse_record_line, RecordLine};
use crate::config::{
    ADDITIONAL_SECTION_MARKER, ANSWER_SECTION_MARKER, AUTHORITY_SECTION_MARKER,
    RECURSION_NOT_AVAILABLE_PHRASE, TIMEOUT_PHRASE,
};
use crate::error_handling::{HeaderField, ReportError};

/// The three record sections of a dig report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Answer,
    Authority,
    Additional,
}

impl Section {
    /// The text dig prints on the line introducing this section.
    pub fn marker(&self) -> &'static str {
        match self {
            Section::Answer => ANSWER_SECTION_MARKER,
            Section::Authority => AUTHORITY_SECTION_MARKER,
            Section::Additional => ADDITIONAL_SECTION_MARKER,
        }
    }

    /// Returns the section introduced by `line`, if it is a marker line.
    fn from_marker_line(line: &str) -> Option<Section> {
        [Section::Answer, Section::Authority, Section::Additional]
            .into_iter()
            .find(|section| line.contains(section.marker()))
    }
}

/// Parsed contents of one dig report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedReport {
    /// Response code (e.g. "NOERROR", "NXDOMAIN")
    pub status: String,
    /// Counts as declared in the header flags line. These are not reconciled
    /// with the number of lines parsed into each section.
    pub answer_count: u32,
    pub authority_count: u32,
    pub additional_count: u32,
    pub responding_server: Ipv4Addr,
    pub query_time_ms: u64,
    pub message_size_bytes: u64,
    pub recursion_not_available: bool,
    pub answer_section: Vec<RecordLine>,
    pub authority_section: Vec<RecordLine>,
    pub additional_section: Vec<RecordLine>,
}

impl ParsedReport {
    pub fn section(&self, section: Section) -> &[RecordLine] {
        match section {
            Section::Answer => &self.answer_section,
            Section::Authority => &self.authority_section,
            Section::Additional => &self.additional_section,
        }
    }
}

/// Why a report carried no usable answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoResponseReason {
    /// dig printed nothing at all.
    EmptyOutput,
    /// dig gave up waiting for the server.
    TimedOut,
}

/// Outcome of parsing a report that follows dig's grammar.
///
/// `NoResponse` is an expected result of querying a dead or filtered server,
/// not a failure. Malformed reports are reported separately as
/// [`ReportError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum QueryOutcome {
    Answered(ParsedReport),
    NoResponse(NoResponseReason),
}

impl QueryOutcome {
    /// The parsed report, if the query was answered.
    pub fn report(&self) -> Option<&ParsedReport> {
        match self {
            QueryOutcome::Answered(report) => Some(report),
            QueryOutcome::NoResponse(_) => None,
        }
    }

    pub fn into_report(self) -> Option<ParsedReport> {
        match self {
            QueryOutcome::Answered(report) => Some(report),
            QueryOutcome::NoResponse(_) => None,
        }
    }
}

static STATUS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| super::compile_regex_unsafe(r"status: ([A-Z]+),", "STATUS_PATTERN"));
static ANSWER_COUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| super::compile_regex_unsafe(r"ANSWER: (\d+),", "ANSWER_COUNT_PATTERN"));
static AUTHORITY_COUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    super::compile_regex_unsafe(r"AUTHORITY: (\d+),", "AUTHORITY_COUNT_PATTERN")
});
static ADDITIONAL_COUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    super::compile_regex_unsafe(r"ADDITIONAL: (\d+)", "ADDITIONAL_COUNT_PATTERN")
});
static SERVER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    super::compile_regex_unsafe(
        r";; SERVER: (\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})",
        "SERVER_PATTERN",
    )
});
static QUERY_TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    super::compile_regex_unsafe(r"Query time: (\d+) msec", "QUERY_TIME_PATTERN")
});
// dig pads "MSG SIZE  rcvd:" with a variable number of spaces
static MSG_SIZE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| super::compile_regex_unsafe(r"MSG SIZE +rcvd: (\d+)", "MSG_SIZE_PATTERN"));

/// Parses the full text of a dig report.
///
/// # Returns
///
/// * `Ok(QueryOutcome::NoResponse(_))` for empty output or a report saying
///   the connection timed out.
/// * `Ok(QueryOutcome::Answered(_))` with the header facts and the record
///   lines of each section.
///
/// # Errors
///
/// Returns [`ReportError`] when any mandatory header field is missing or
/// holds a value that does not fit its type. No partial report is produced.
pub fn parse_report(output: &str) -> Result<QueryOutcome, ReportError> {
    if output.is_empty() {
        return Ok(QueryOutcome::NoResponse(NoResponseReason::EmptyOutput));
    }
    if output.contains(TIMEOUT_PHRASE) {
        return Ok(QueryOutcome::NoResponse(NoResponseReason::TimedOut));
    }

    let flat = output.replace(['\r', '\n'], " ");
    let header = HeaderExtractor {
        flat: &flat,
        raw: output,
    };

    let status = header.capture(HeaderField::Status)?.to_string();
    let authority_count: u32 = header.parse(HeaderField::AuthorityCount)?;
    let answer_count: u32 = header.parse(HeaderField::AnswerCount)?;
    let additional_count: u32 = header.parse(HeaderField::AdditionalCount)?;
    let responding_server: Ipv4Addr = header.parse(HeaderField::RespondingServer)?;
    let query_time_ms: u64 = header.parse(HeaderField::QueryTime)?;
    let message_size_bytes: u64 = header.parse(HeaderField::MessageSize)?;
    let recursion_not_available = output.contains(RECURSION_NOT_AVAILABLE_PHRASE);

    let mut answer_section = Vec::new();
    let mut authority_section = Vec::new();
    let mut additional_section = Vec::new();
    let mut current: Option<Section> = None;

    for line in output.lines() {
        if let Some(section) = Section::from_marker_line(line) {
            current = Some(section);
            continue;
        }
        let Some(section) = current else {
            continue;
        };
        match parse_record_line(line) {
            Some(record) => match section {
                Section::Answer => answer_section.push(record),
                Section::Authority => authority_section.push(record),
                Section::Additional => additional_section.push(record),
            },
            None => trace!("Skipping non-record line in {:?} section: {line:?}", section),
        }
    }

    debug!(
        "Parsed dig report: status={status}, server={responding_server}, \
         {} answer / {} authority / {} additional records",
        answer_section.len(),
        authority_section.len(),
        additional_section.len()
    );

    Ok(QueryOutcome::Answered(ParsedReport {
        status,
        answer_count,
        authority_count,
        additional_count,
        responding_server,
        query_time_ms,
        message_size_bytes,
        recursion_not_available,
        answer_section,
        authority_section,
        additional_section,
    }))
}

/// Lists every mandatory header field whose marker is absent from `output`.
///
/// Useful for diagnosing a [`ReportError::MissingField`], which only names
/// the first field found missing.
pub fn missing_header_fields(output: &str) -> Vec<HeaderField> {
    let flat = output.replace(['\r', '\n'], " ");
    HeaderField::iter()
        .filter(|field| !header_pattern(*field).is_match(&flat))
        .collect()
}

fn header_pattern(field: HeaderField) -> &'static Regex {
    match field {
        HeaderField::Status => &STATUS_PATTERN,
        HeaderField::AnswerCount => &ANSWER_COUNT_PATTERN,
        HeaderField::AuthorityCount => &AUTHORITY_COUNT_PATTERN,
        HeaderField::AdditionalCount => &ADDITIONAL_COUNT_PATTERN,
        HeaderField::RespondingServer => &SERVER_PATTERN,
        HeaderField::QueryTime => &QUERY_TIME_PATTERN,
        HeaderField::MessageSize => &MSG_SIZE_PATTERN,
    }
}

/// Pulls header values out of the newline-flattened report.
struct HeaderExtractor<'a> {
    flat: &'a str,
    raw: &'a str,
}

impl HeaderExtractor<'_> {
    /// The value of the last occurrence of the field's marker.
    fn capture(&self, field: HeaderField) -> Result<&str, ReportError> {
        header_pattern(field)
            .captures_iter(self.flat)
            .last()
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| {
                debug!(
                    "dig report is missing header fields: {:?}",
                    missing_header_fields(self.raw)
                );
                ReportError::MissingField {
                    field,
                    raw: self.raw.to_string(),
                }
            })
    }

    fn parse<T: FromStr>(&self, field: HeaderField) -> Result<T, ReportError> {
        let value = self.capture(field)?;
        value.parse().map_err(|_| ReportError::InvalidField {
            field,
            value: value.to_string(),
            raw: self.raw.to_string(),
        })
    }
}

impl fmt::Display for ParsedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "status: {}, query time: {}, message size: {}, responding server: {}, \
             ANSWER: {}, AUTHORITY: {}, ADDITIONAL: {}",
            self.status,
            self.query_time_ms,
            self.message_size_bytes,
            self.responding_server,
            self.answer_count,
            self.authority_count,
            self.additional_count
        )?;
        for section in [Section::Answer, Section::Authority, Section::Additional] {
            let records: Vec<String> = self
                .section(section)
                .iter()
                .map(|record| record.to_string())
                .collect();
            write!(f, "\n\t{}: [{}]", section.marker(), records.join(", "))?;
        }
        Ok(())
    }
}
