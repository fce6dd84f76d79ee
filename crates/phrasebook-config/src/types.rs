//! Configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::loader::ConfigError;

/// Engine configuration.
///
/// Every field has a default, so a partial YAML file (or none at all) is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Locale used when a request carries none. Default `"en"`.
    pub default_locale: String,
    /// Directory holding one catalog file per locale. Default `"locales"`.
    pub directory: PathBuf,
    /// Write newly seen phrases back to disk. Default `true`.
    pub update_files: bool,
    /// Catalog file suffix, including the dot. Default `".json"`.
    pub extension: String,
    /// Suffix that takes over for the rest of the process once a file with it
    /// is found. Default `".js"`; `None` disables the switch.
    pub fallback_extension: Option<String>,
    /// Cookie consulted for a locale override. Default: no cookie lookup.
    pub cookie: Option<String>,
    /// Locales loaded eagerly when the engine starts.
    pub locales: Vec<String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            directory: PathBuf::from("locales"),
            update_files: true,
            extension: ".json".to_string(),
            fallback_extension: Some(".js".to_string()),
            cookie: None,
            locales: Vec::new(),
        }
    }
}

impl I18nConfig {
    /// Use `directory` as the storage root.
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Set the default locale.
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    /// Enable the cookie override under `name`.
    pub fn with_cookie(mut self, name: impl Into<String>) -> Self {
        self.cookie = Some(name.into());
        self
    }

    /// Locales to preload.
    pub fn with_locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locales = locales.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable writing catalogs back to disk.
    pub fn with_update_files(mut self, enabled: bool) -> Self {
        self.update_files = enabled;
        self
    }

    /// Set the catalog file suffix.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_locale.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "default_locale must not be empty".to_string(),
            });
        }

        if self.extension.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "extension must not be empty".to_string(),
            });
        }

        if matches!(self.fallback_extension.as_deref(), Some("")) {
            return Err(ConfigError::ValidationError {
                message: "fallback_extension must not be empty when set".to_string(),
            });
        }

        if let Some(index) = self.locales.iter().position(|l| l.trim().is_empty()) {
            return Err(ConfigError::ValidationError {
                message: format!("locales[{}] must not be empty", index),
            });
        }

        Ok(())
    }
}
