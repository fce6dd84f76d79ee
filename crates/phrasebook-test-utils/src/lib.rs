//! Test utilities for Phrasebook crates.

use tempfile::TempDir;

/// Creates a temporary directory that is cleaned up on drop.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Creates a temporary locales directory holding the given catalog files.
///
/// ```
/// let dir = phrasebook_test_utils::temp_locales_dir(&[("de.json", r#"{"Hello": "Hallo"}"#)]);
/// assert!(dir.path().join("de.json").is_file());
/// ```
pub fn temp_locales_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = temp_dir();
    for (name, content) in files {
        std::fs::write(dir.path().join(name), content).expect("Failed to write locale file");
    }
    dir
}

/// Read a catalog file from `dir`, panicking if it is missing.
pub fn read_locale_file(dir: &TempDir, name: &str) -> String {
    std::fs::read_to_string(dir.path().join(name))
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", name, e))
}

/// Assert that a Result is Ok and return the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}
