//! Record line parsing.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// One resource record printed inside an ANSWER, AUTHORITY or ADDITIONAL section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordLine {
    /// Owner name (e.g. "www.cnn.com.")
    pub name: String,
    pub ttl: u32,
    /// Record class (e.g. "IN")
    pub record_class: String,
    /// Record type (e.g. "A", "CNAME", "AAAA")
    pub record_type: String,
    /// Everything after the type, unsplit (address, target, or MX/SOA data)
    pub value: String,
}

static RECORD_LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    super::compile_regex_unsafe(
        r"^(\S+)\s+(\d+)\s+(\S+)\s+(\S+)\s+(.*)",
        "RECORD_LINE_PATTERN",
    )
});

/// Parses a single line from a dig section.
///
/// Returns `None` for anything that is not a five-field record line (blank
/// lines, comments, statistics). That is the common case while scanning a
/// report and is not an error.
///
/// # Examples
///
/// ```
/// use dig_report::dig::parse_record_line;
///
/// let record = parse_record_line("cnn.com.  14  IN  A  151.101.193.67").unwrap();
/// assert_eq!(record.ttl, 14);
/// assert_eq!(record.value, "151.101.193.67");
/// assert!(parse_record_line("").is_none());
/// ```
pub fn parse_record_line(line: &str) -> Option<RecordLine> {
    let caps = RECORD_LINE_PATTERN.captures(line)?;
    // TTLs are 32-bit on the wire; anything longer is not a record line
    let ttl: u32 = caps[2].parse().ok()?;
    Some(RecordLine {
        name: caps[1].to_string(),
        ttl,
        record_class: caps[3].to_string(),
        record_type: caps[4].to_string(),
        value: caps[5].to_string(),
    })
}

impl fmt::Display for RecordLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[name: {}, ttl: {}, class={}, type={}, value={}]",
            self.name, self.ttl, self.record_class, self.record_type, self.value
        )
    }
}
