//! Application initialization.
//!
//! The only process-wide resource this crate sets up is the logger.

mod logger;

// Re-export public API
pub use logger::init_logger_with;
