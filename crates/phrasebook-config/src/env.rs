//! Environment variable handling.

use crate::types::I18nConfig;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("required environment variable not set: {var}")]
    NotSet { var: String },

    #[error("invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("failed to load .env file: {0}")]
    DotenvError(#[from] dotenvy::Error),
}

/// Environment variable names.
pub mod vars {
    // Engine overrides
    pub const PHRASEBOOK_DEFAULT_LOCALE: &str = "PHRASEBOOK_DEFAULT_LOCALE";
    pub const PHRASEBOOK_LOCALES_DIR: &str = "PHRASEBOOK_LOCALES_DIR";
    pub const PHRASEBOOK_UPDATE_FILES: &str = "PHRASEBOOK_UPDATE_FILES";
    pub const PHRASEBOOK_EXTENSION: &str = "PHRASEBOOK_EXTENSION";
    pub const PHRASEBOOK_COOKIE: &str = "PHRASEBOOK_COOKIE";
    pub const PHRASEBOOK_LOCALES: &str = "PHRASEBOOK_LOCALES";

    // Process
    pub const PHRASEBOOK_ENV: &str = "PHRASEBOOK_ENV";
    pub const RUST_LOG: &str = "RUST_LOG";
}

/// Environment configuration.
pub struct Environment {
    _guard: (),
}

impl Environment {
    /// Initialize environment from .env files in the current directory.
    pub fn init() -> Result<Self, EnvError> {
        Self::init_from(env::current_dir().unwrap_or_default())
    }

    /// Initialize environment from .env files in `dir`.
    ///
    /// Files load in order `.env`, `.env.local`, `.env.{PHRASEBOOK_ENV}`.
    /// Variables already present in the process are never overwritten.
    pub fn init_from(dir: impl AsRef<Path>) -> Result<Self, EnvError> {
        let dir = dir.as_ref();
        let mut files: Vec<PathBuf> = vec![dir.join(".env"), dir.join(".env.local")];

        if let Ok(name) = env::var(vars::PHRASEBOOK_ENV) {
            files.push(dir.join(format!(".env.{}", name)));
        }

        for file in files {
            match dotenvy::from_path(&file) {
                Ok(()) => {}
                Err(e) if e.not_found() => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(Self { _guard: () })
    }

    /// Get a required string variable.
    pub fn require(var: &str) -> Result<String, EnvError> {
        env::var(var).map_err(|_| EnvError::NotSet { var: var.to_string() })
    }

    /// Get an optional string variable.
    pub fn get(var: &str) -> Option<String> {
        env::var(var).ok()
    }

    /// Get a variable with a default value.
    pub fn get_or(var: &str, default: &str) -> String {
        env::var(var).unwrap_or_else(|_| default.to_string())
    }

    /// Get a boolean variable.
    pub fn get_bool(var: &str) -> Result<Option<bool>, EnvError> {
        match env::var(var) {
            Ok(v) => match v.to_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(Some(true)),
                "false" | "0" | "no" => Ok(Some(false)),
                _ => Err(EnvError::InvalidValue {
                    var: var.to_string(),
                    message: format!("expected boolean, got {:?}", v),
                }),
            },
            Err(_) => Ok(None),
        }
    }

    /// Get a comma-separated list variable. Empty items are dropped.
    pub fn get_list(var: &str) -> Option<Vec<String>> {
        env::var(var).ok().map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
    }
}

impl I18nConfig {
    /// Overlay `PHRASEBOOK_*` variables onto this configuration.
    ///
    /// An empty `PHRASEBOOK_COOKIE` disables the cookie override.
    pub fn apply_env(&mut self) -> Result<(), EnvError> {
        if let Some(locale) = Environment::get(vars::PHRASEBOOK_DEFAULT_LOCALE) {
            self.default_locale = locale;
        }

        if let Some(dir) = Environment::get(vars::PHRASEBOOK_LOCALES_DIR) {
            self.directory = PathBuf::from(dir);
        }

        if let Some(update) = Environment::get_bool(vars::PHRASEBOOK_UPDATE_FILES)? {
            self.update_files = update;
        }

        if let Some(extension) = Environment::get(vars::PHRASEBOOK_EXTENSION) {
            self.extension = extension;
        }

        if let Some(cookie) = Environment::get(vars::PHRASEBOOK_COOKIE) {
            self.cookie = (!cookie.is_empty()).then_some(cookie);
        }

        if let Some(locales) = Environment::get_list(vars::PHRASEBOOK_LOCALES) {
            self.locales = locales;
        }

        Ok(())
    }
}
