//! dig process invocation.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, warn};

use super::report::{parse_report, QueryOutcome};
use crate::config::{DEFAULT_TIMEOUT_SECS, DEFAULT_TRIES, DIG_PROGRAM};
use crate::error_handling::QueryError;

/// A single dig query.
///
/// Timeout and retry behaviour is enforced by dig itself through `+time` and
/// `+tries`; this type only shapes the command line.
///
/// # Examples
///
/// ```
/// use dig_report::dig::DigQuery;
///
/// let query = DigQuery::new("cnn.com").target_server("1.1.1.1").norecurse(true);
/// assert_eq!(
///     query.args(),
///     vec!["@1.1.1.1", "cnn.com", "+time=5", "+tries=1", "+stats", "+norecurse"]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigQuery {
    domain: String,
    target_server: Option<String>,
    timeout_secs: u32,
    tries: u32,
    stats: bool,
    norecurse: bool,
    program: PathBuf,
}

impl DigQuery {
    pub fn new(domain: impl Into<String>) -> Self {
        DigQuery {
            domain: domain.into(),
            target_server: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            tries: DEFAULT_TRIES,
            stats: true,
            norecurse: false,
            program: PathBuf::from(DIG_PROGRAM),
        }
    }

    /// Sends the query to `server` instead of the system resolver.
    pub fn target_server(mut self, server: impl Into<String>) -> Self {
        self.target_server = Some(server.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u32) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn tries(mut self, tries: u32) -> Self {
        self.tries = tries;
        self
    }

    /// Toggles `+stats`, which makes dig print the footer block.
    pub fn stats(mut self, stats: bool) -> Self {
        self.stats = stats;
        self
    }

    pub fn norecurse(mut self, norecurse: bool) -> Self {
        self.norecurse = norecurse;
        self
    }

    /// Uses a dig binary other than the one on `PATH`.
    pub fn program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn program_path(&self) -> &Path {
        &self.program
    }

    /// Arguments passed to dig, in order, without the program name.
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(6);
        if let Some(server) = &self.target_server {
            args.push(format!("@{server}"));
        }
        args.push(self.domain.clone());
        args.push(format!("+time={}", self.timeout_secs));
        args.push(format!("+tries={}", self.tries));
        if self.stats {
            args.push("+stats".to_string());
        }
        if self.norecurse {
            args.push("+norecurse".to_string());
        }
        args
    }

    /// Runs dig and returns its standard output.
    ///
    /// Blocks until dig exits. A non-zero exit status is logged but not
    /// treated as a failure: dig exits non-zero on timeouts while still
    /// printing a report that says so.
    ///
    /// # Errors
    ///
    /// * `QueryError::Spawn` if dig cannot be started.
    /// * `QueryError::InvalidUtf8` if dig writes non-UTF-8 output.
    pub fn run_raw(&self) -> Result<String, QueryError> {
        let args = self.args();
        debug!("Running {} {}", self.program.display(), args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|source| QueryError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            warn!(
                "{} exited with {} for {}",
                self.program.display(),
                output.status,
                self.domain()
            );
        }

        Ok(String::from_utf8(output.stdout)?)
    }

    /// Runs dig and parses its report.
    ///
    /// # Errors
    ///
    /// Everything [`DigQuery::run_raw`] returns, plus
    /// `QueryError::Unparseable` carrying dig's output when the report is
    /// malformed.
    pub fn run(&self) -> Result<QueryOutcome, QueryError> {
        let output = self.run_raw()?;
        Ok(parse_report(&output)?)
    }
}

/// Runs `query` and parses the result. Equivalent to [`DigQuery::run`].
pub fn run_query(query: &DigQuery) -> Result<QueryOutcome, QueryError> {
    query.run()
}
