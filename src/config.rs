use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::dig::DigQuery;

// constants (used as defaults)
pub const DIG_PROGRAM: &str = "dig";
/// Default `+time=` value passed to dig, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u32 = 5;
/// Default `+tries=` value passed to dig.
pub const DEFAULT_TRIES: u32 = 1;

// Phrases dig writes into its report
pub const TIMEOUT_PHRASE: &str = ";; connection timed out";
pub const RECURSION_NOT_AVAILABLE_PHRASE: &str = "recursion requested but not available";

// Section markers
pub const ANSWER_SECTION_MARKER: &str = "ANSWER SECTION";
pub const AUTHORITY_SECTION_MARKER: &str = "AUTHORITY SECTION";
pub const ADDITIONAL_SECTION_MARKER: &str = "ADDITIONAL SECTION";

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace). Used with the `--log-level` CLI option.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Plain,
    Json,
}

/// How the parsed result is written to stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Query through the system resolver
/// dig_report cnn.com
///
/// # Ask a specific server, without recursion
/// dig_report cnn.com --server 8.8.8.8 --norecurse
///
/// # Parse a report captured earlier
/// dig_report cnn.com --input saved.txt --output json
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "dig_report",
    about = "Runs dig for a domain and prints the parsed report."
)]
pub struct Opt {
    /// Domain to query
    pub domain: String,

    /// Server to send the query to (passed to dig as @server)
    #[arg(long)]
    pub server: Option<String>,

    /// Per-try timeout in seconds (dig +time)
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub time: u32,

    /// Number of tries (dig +tries)
    #[arg(long, default_value_t = DEFAULT_TRIES)]
    pub tries: u32,

    /// Do not ask dig for query statistics
    #[arg(long)]
    pub no_stats: bool,

    /// Disable recursion on the queried server (dig +norecurse)
    #[arg(long)]
    pub norecurse: bool,

    /// Path to the dig binary
    #[arg(long, value_parser, default_value = DIG_PROGRAM)]
    pub dig_path: PathBuf,

    /// Parse a saved dig report instead of running dig ("-" reads stdin)
    #[arg(long, value_parser)]
    pub input: Option<PathBuf>,

    /// Output format: plain|json
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Opt {
    /// Builds the dig invocation described by these options.
    pub fn to_query(&self) -> DigQuery {
        let mut query = DigQuery::new(&self.domain)
            .timeout_secs(self.time)
            .tries(self.tries)
            .stats(!self.no_stats)
            .norecurse(self.norecurse)
            .program(&self.dig_path);
        if let Some(server) = &self.server {
            query = query.target_server(server);
        }
        query
    }
}
