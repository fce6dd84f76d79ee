//! Error taxonomy for catalog and locale operations.
//!
//! None of these reach callers of the translation API; the engine logs them
//! and degrades to the default locale, an empty table, or in-memory state.

use std::path::PathBuf;
use thiserror::Error;

/// i18n errors.
#[derive(Debug, Error)]
pub enum I18nError {
    #[error("no locale in translation context, using default locale {default:?}")]
    MissingLocale { default: String },

    #[error("unable to read catalog {}: {source}", path.display())]
    StorageRead {
        path: PathBuf,
        #[source]
        source: phrasebook_core::Error,
    },

    #[error("unable to parse catalog {} (empty or invalid JSON?): {source}", path.display())]
    StorageParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unable to write catalog {}: {source}", path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: phrasebook_core::Error,
    },

    #[error("locale {0:?} is not a plain file name")]
    UnsafeLocale(String),

    #[error(transparent)]
    Config(#[from] phrasebook_config::ConfigError),
}

impl I18nError {
    /// Path of the catalog blob involved, for storage errors.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::StorageRead { path, .. }
            | Self::StorageParse { path, .. }
            | Self::StorageWrite { path, .. } => Some(path),
            _ => None,
        }
    }
}
