use phrasebook_core::{ErrorCategory, ErrorCode, Result};
use phrasebook_fs as fs;
use std::path::PathBuf;

#[test]
fn test_integration_with_core_types() {
    let result: Result<String> = fs::read_to_string("/nonexistent/file", 1024);
    assert!(result.is_err());

    let error = result.unwrap_err();
    assert_eq!(error.category(), ErrorCategory::FileSystem);
    assert_eq!(error.code(), ErrorCode::FILE_NOT_FOUND);
    assert_eq!(error.path(), Some("/nonexistent/file"));
}

#[test]
fn test_path_normalization_integration() {
    let test_cases = vec![
        ("./a/b/../c", "a/c"),
        ("a/./b", "a/b"),
        ("a/../b", "b"),
        ("../../a/b", "../../a/b"),
        ("a/b/c/../../d", "a/d"),
        ("", "."),
        (".", "."),
        ("..", ".."),
    ];

    for (input, expected) in test_cases {
        let normalized = fs::path::normalize(input);
        assert_eq!(normalized, PathBuf::from(expected), "Failed for input: {}", input);
    }
}

#[test]
fn test_write_then_read_catalog_blob() {
    let dir = tempfile::tempdir().unwrap();
    let locales = dir.path().join("locales");
    fs::ensure_dir(&locales).unwrap();

    let target = locales.join("de.json");
    fs::write_string_atomic(&target, "{\n\t\"Hello\": \"Hallo\"\n}").unwrap();

    let content = fs::read_to_string(&target, fs::DEFAULT_MAX_READ).unwrap();
    assert_eq!(content, "{\n\t\"Hello\": \"Hallo\"\n}");
    assert!(target.is_file());
}

#[test]
fn test_rewrite_replaces_whole_blob() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("en.json");

    fs::write_string_atomic(&target, "{\"a\": \"a\", \"b\": \"b\"}").unwrap();
    fs::write_string_atomic(&target, "{}").unwrap();

    assert_eq!(std::fs::read_to_string(&target).unwrap(), "{}");
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
