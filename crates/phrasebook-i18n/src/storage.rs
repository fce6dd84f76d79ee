//! Catalog persistence.
//!
//! Catalog blobs live at `<directory>/<locale><extension>` as tab-indented JSON
//! with sorted keys. Reads and writes go through a [`BlobStore`], so the
//! engine can run against the file system or an in-memory map.

use crate::entry::PhraseTable;
use crate::error::I18nError;
use parking_lot::{Mutex, RwLock};
use phrasebook_config::I18nConfig;
use phrasebook_core::{Error, ErrorCode};
use phrasebook_fs::path::{is_plain_file_name, normalize};
use phrasebook_log::spans::{record_error, storage_span};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Key-value blob storage keyed by path.
pub trait BlobStore: Send + Sync {
    /// Read a whole blob.
    fn read(&self, path: &Path) -> phrasebook_core::Result<String>;

    /// Replace a blob. Readers never observe a partial write.
    fn write(&self, path: &Path, contents: &str) -> phrasebook_core::Result<()>;

    /// True when something exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Make sure `dir` exists.
    fn ensure_dir(&self, dir: &Path) -> phrasebook_core::Result<()>;
}

/// File system store with atomic temp-file-and-rename writes.
#[derive(Debug, Clone)]
pub struct FsStore {
    max_read: usize,
}

impl FsStore {
    pub fn new() -> Self {
        Self {
            max_read: phrasebook_fs::DEFAULT_MAX_READ,
        }
    }

    /// Refuse to read blobs larger than `max_read` bytes.
    pub fn with_max_read(mut self, max_read: usize) -> Self {
        self.max_read = max_read;
        self
    }
}

impl Default for FsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for FsStore {
    fn read(&self, path: &Path) -> phrasebook_core::Result<String> {
        phrasebook_fs::read_to_string(path, self.max_read)
    }

    fn write(&self, path: &Path, contents: &str) -> phrasebook_core::Result<()> {
        phrasebook_fs::write_string_atomic(path, contents)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn ensure_dir(&self, dir: &Path) -> phrasebook_core::Result<()> {
        phrasebook_fs::ensure_dir(dir)
    }
}

/// In-memory store. Counts writes so callers can check what was persisted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: Mutex<BTreeMap<PathBuf, String>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a blob without counting it as a write.
    pub fn with_blob(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.blobs.lock().insert(path.into(), contents.into());
        self
    }

    /// Current contents of a blob.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.blobs.lock().get(path.as_ref()).cloned()
    }

    /// Paths of every stored blob, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.blobs.lock().keys().cloned().collect()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl BlobStore for MemoryStore {
    fn read(&self, path: &Path) -> phrasebook_core::Result<String> {
        self.blobs.lock().get(path).cloned().ok_or_else(|| Error::FileSystem {
            code: ErrorCode::FILE_NOT_FOUND,
            message: format!("file not found: {}", path.display()),
            path: Some(path.to_string_lossy().to_string()),
            source: None,
        })
    }

    fn write(&self, path: &Path, contents: &str) -> phrasebook_core::Result<()> {
        self.blobs.lock().insert(path.to_path_buf(), contents.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.blobs.lock().contains_key(path)
    }

    fn ensure_dir(&self, _dir: &Path) -> phrasebook_core::Result<()> {
        Ok(())
    }
}

/// Serialize a table the way catalog blobs are stored: sorted keys, tab indentation.
pub fn to_blob(table: &PhraseTable) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    table.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Reads and writes phrase tables for one storage directory.
pub struct Persistence {
    store: Arc<dyn BlobStore>,
    directory: PathBuf,
    update_files: bool,
    extension: RwLock<String>,
    fallback_extension: Option<String>,
}

impl Persistence {
    pub fn new(config: &I18nConfig, store: Arc<dyn BlobStore>) -> Self {
        Self {
            store,
            directory: config.directory.clone(),
            update_files: config.update_files,
            extension: RwLock::new(config.extension.clone()),
            fallback_extension: config.fallback_extension.clone(),
        }
    }

    /// Extension currently used for every locale.
    pub fn extension(&self) -> String {
        self.extension.read().clone()
    }

    /// Whether tables are written back at all.
    pub fn is_enabled(&self) -> bool {
        self.update_files
    }

    /// Blob path for `locale`.
    ///
    /// If a blob with the fallback extension exists for this locale, the
    /// fallback becomes the extension for every later call, for every locale.
    pub fn storage_path(&self, locale: &str) -> Result<PathBuf, I18nError> {
        if !is_plain_file_name(locale) {
            return Err(I18nError::UnsafeLocale(locale.to_string()));
        }

        if let Some(fallback) = &self.fallback_extension {
            if *self.extension.read() != *fallback {
                let candidate = normalize(self.directory.join(format!("{}{}", locale, fallback)));
                if self.store.exists(&candidate) {
                    debug!(path = %candidate.display(), "using existing file");
                    *self.extension.write() = fallback.clone();
                    return Ok(candidate);
                }
            }
        }

        let extension = self.extension.read();
        Ok(normalize(self.directory.join(format!("{}{}", locale, *extension))))
    }

    /// Load the table for `locale`.
    pub fn load(&self, locale: &str) -> Result<PhraseTable, I18nError> {
        let path = self.storage_path(locale)?;
        let span = storage_span("read", &path.display().to_string());
        let _guard = span.enter();

        debug!(locale, "read catalog");
        let contents = self.store.read(&path).map_err(|source| {
            record_error(&source);
            I18nError::StorageRead {
                path: path.clone(),
                source,
            }
        })?;

        serde_json::from_str(&contents).map_err(|source| {
            record_error(&source);
            I18nError::StorageParse { path, source }
        })
    }

    /// Write `table` for `locale`. Returns `Ok(false)` when writing is disabled.
    pub fn save(&self, locale: &str, table: &PhraseTable) -> Result<bool, I18nError> {
        if !self.update_files {
            return Ok(false);
        }

        let path = self.storage_path(locale)?;
        let span = storage_span("write", &path.display().to_string());
        let _guard = span.enter();

        let write_error = |source: Error| {
            record_error(&source);
            I18nError::StorageWrite {
                path: path.clone(),
                source,
            }
        };

        if !self.store.exists(&self.directory) {
            debug!(directory = %self.directory.display(), "creating locales dir");
        }
        self.store.ensure_dir(&self.directory).map_err(write_error)?;

        let blob = to_blob(table).map_err(|e| write_error(Error::Serialization(e.to_string())))?;
        self.store.write(&path, &blob).map_err(write_error)?;

        debug!(locale, phrases = table.len(), "wrote catalog");
        Ok(true)
    }
}
