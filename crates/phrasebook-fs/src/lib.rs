//! File system utilities for Phrasebook.

pub mod path;

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use phrasebook_core::error::BoxedSource;
use phrasebook_core::{Error, ErrorCode, Result};

/// Largest catalog blob we are willing to read into memory.
pub const DEFAULT_MAX_READ: usize = 16 * 1024 * 1024;

fn fs_error(code: ErrorCode, message: String, path: &Path, source: Option<io::Error>) -> Error {
    Error::FileSystem {
        code,
        message,
        path: Some(path.to_string_lossy().to_string()),
        source: source.map(|e| Box::new(e) as BoxedSource),
    }
}

fn read_error(path: &Path, e: io::Error, what: &str) -> Error {
    match e.kind() {
        io::ErrorKind::NotFound => fs_error(
            ErrorCode::FILE_NOT_FOUND,
            format!("file not found: {}", path.display()),
            path,
            Some(e),
        ),
        io::ErrorKind::PermissionDenied => fs_error(
            ErrorCode::FILE_READ_ERROR,
            format!("permission denied: {}", path.display()),
            path,
            Some(e),
        ),
        _ => fs_error(
            ErrorCode::FILE_READ_ERROR,
            format!("failed to {}: {}", what, path.display()),
            path,
            Some(e),
        ),
    }
}

/// Read a file to string with size limit.
pub fn read_to_string(path: impl AsRef<Path>, max_size: usize) -> Result<String> {
    let path = path.as_ref();

    let metadata = fs::metadata(path).map_err(|e| read_error(path, e, "read metadata"))?;

    if !metadata.is_file() {
        return Err(fs_error(
            ErrorCode::FILE_READ_ERROR,
            format!("not a regular file: {}", path.display()),
            path,
            None,
        ));
    }

    if metadata.len() as usize > max_size {
        return Err(fs_error(
            ErrorCode::FILE_READ_ERROR,
            format!("file too large: {} bytes (max: {})", metadata.len(), max_size),
            path,
            None,
        ));
    }

    fs::read_to_string(path).map_err(|e| read_error(path, e, "read file"))
}

/// Temporary sibling used by [`write_atomic`] for `path`.
pub fn temp_path_for(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let mut temp_path = path.to_path_buf();
    if let Some(name) = path.file_name() {
        temp_path.set_file_name(format!(".{}.tmp", name.to_string_lossy()));
    } else {
        temp_path.push(".tmp");
    }
    temp_path
}

/// Write to a file atomically (write to temp, verify, then rename).
///
/// The parent directory must already exist; see [`ensure_dir`]. On any failure
/// the target is left untouched.
pub fn write_atomic(path: impl AsRef<Path>, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let temp_path = temp_path_for(path);

    {
        let mut file = File::create(&temp_path).map_err(|e| {
            fs_error(
                ErrorCode::FILE_WRITE_ERROR,
                format!("failed to create temporary file: {}", temp_path.display()),
                &temp_path,
                Some(e),
            )
        })?;

        file.write_all(contents).map_err(|e| {
            fs_error(
                ErrorCode::FILE_WRITE_ERROR,
                format!("failed to write to temporary file: {}", temp_path.display()),
                &temp_path,
                Some(e),
            )
        })?;

        file.sync_all().map_err(|e| {
            fs_error(
                ErrorCode::FILE_WRITE_ERROR,
                format!("failed to sync temporary file: {}", temp_path.display()),
                &temp_path,
                Some(e),
            )
        })?;
    }

    // The temp file must be a regular file holding every byte before it replaces the target.
    let verified = fs::metadata(&temp_path)
        .map(|m| m.is_file() && m.len() == contents.len() as u64)
        .unwrap_or(false);
    if !verified {
        let _ = fs::remove_file(&temp_path);
        return Err(fs_error(
            ErrorCode::FILE_WRITE_ERROR,
            format!("temporary file failed verification: {}", temp_path.display()),
            &temp_path,
            None,
        ));
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        fs_error(
            ErrorCode::FILE_WRITE_ERROR,
            format!("failed to rename temporary file to target: {}", path.display()),
            path,
            Some(e),
        )
    })
}

/// Write string to file atomically.
pub fn write_string_atomic(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    write_atomic(path, contents.as_bytes())
}

/// Ensure a directory exists, creating it (and its parents) with mode 0755.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    builder.create(path).map_err(|e| {
        fs_error(
            ErrorCode::FILE_WRITE_ERROR,
            format!("failed to create directory: {}", path.display()),
            path,
            Some(e),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("en.json");

        write_string_atomic(&path, "{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");

        write_string_atomic(&path, "{\n\t\"a\": \"a\"\n}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\n\t\"a\": \"a\"\n}");

        // No temp file left behind
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_atomic_write_missing_parent_leaves_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing/en.json");

        let err = write_string_atomic(&path, "{}").unwrap_err();
        assert_eq!(err.code(), ErrorCode::FILE_WRITE_ERROR);
        assert!(!path.exists());
    }

    #[test]
    fn test_temp_path_for() {
        assert_eq!(
            temp_path_for("locales/en.json"),
            PathBuf::from("locales/.en.json.tmp")
        );
    }

    #[test]
    fn test_ensure_dir() {
        let dir = tempdir().unwrap();
        let nested_path = dir.path().join("a/b/c");

        ensure_dir(&nested_path).unwrap();
        assert!(nested_path.is_dir());

        ensure_dir(&nested_path).unwrap();
        assert!(nested_path.is_dir());
    }

    #[test]
    fn test_file_not_found() {
        let result = read_to_string("/nonexistent/path", 1024);
        match result.unwrap_err() {
            Error::FileSystem { code, .. } => {
                assert_eq!(code, ErrorCode::FILE_NOT_FOUND);
            }
            other => panic!("Expected FileSystem error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        let err = read_to_string(dir.path(), 1024).unwrap_err();
        assert_eq!(err.code(), ErrorCode::FILE_READ_ERROR);
    }

    #[test]
    fn test_read_with_size_limit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("large.json");

        let large_content = "x".repeat(1000);
        fs::write(&path, &large_content).unwrap();

        let result = read_to_string(&path, 500);
        assert!(result.unwrap_err().to_string().contains("file too large"));

        let content = read_to_string(&path, 2000).unwrap();
        assert_eq!(content, large_content);
    }
}
