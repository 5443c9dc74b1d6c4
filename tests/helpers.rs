// Shared test helpers for loading captured dig reports.

use std::path::PathBuf;

/// Path of a file under `tests/fixtures`.
#[allow(dead_code)] // Used by other test files
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Reads a captured dig report from `tests/fixtures`.
#[allow(dead_code)] // Used by other test files
pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("Failed to read fixture {name}: {e}"))
}
