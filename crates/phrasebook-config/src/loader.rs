//! Configuration file loading and parsing.

use crate::types::I18nConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file inside the project's `.phrasebook` directory.
pub const CONFIG_FILE: &str = "config.yaml";

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },

    #[error(transparent)]
    Env(#[from] crate::env::EnvError),
}

/// Configuration loader.
pub struct ConfigLoader {
    base_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the given project directory.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            base_path: project_dir.as_ref().to_path_buf(),
        }
    }

    /// Create a loader rooted at the nearest project root above the current directory.
    pub fn discover() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        let root = phrasebook_fs::path::find_project_root(&cwd).unwrap_or(cwd);
        Self::new(root)
    }

    /// Full path of the config file this loader reads.
    pub fn config_path(&self) -> PathBuf {
        phrasebook_fs::path::config_dir(&self.base_path).join(CONFIG_FILE)
    }

    /// Load configuration from `.phrasebook/config.yaml`.
    ///
    /// A missing file yields the defaults. A relative `directory` is resolved
    /// against the project directory.
    pub fn load(&self) -> Result<I18nConfig, ConfigError> {
        let config_path = self.config_path();

        if !config_path.exists() {
            return Ok(I18nConfig::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let expanded = self.expand_env_vars(&contents)?;

        let mut config: I18nConfig = serde_yaml::from_str(&expanded)
            .map_err(|e| ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        if config.directory.is_relative() {
            config.directory = self.base_path.join(&config.directory);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load the file, then overlay `PHRASEBOOK_*` environment variables.
    pub fn load_with_env(&self) -> Result<I18nConfig, ConfigError> {
        let mut config = self.load()?;
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
    fn expand_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        let re = regex::Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").map_err(|e| {
            ConfigError::ParseError {
                line: None,
                message: e.to_string(),
            }
        })?;

        let mut result = content.to_string();
        for cap in re.captures_iter(content) {
            let full_match = &cap[0];
            let var_name = &cap[1];
            let default = cap.get(2).map(|m| m.as_str());

            let value = match std::env::var(var_name) {
                Ok(v) => v,
                Err(_) => match default {
                    Some(d) => d.to_string(),
                    None => {
                        return Err(ConfigError::EnvVarNotFound {
                            var: var_name.to_string(),
                        })
                    }
                },
            };

            result = result.replace(full_match, &value);
        }

        Ok(result)
    }

    /// Save configuration to file.
    pub fn save(&self, config: &I18nConfig) -> Result<(), ConfigError> {
        let config_path = self.config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(config)
            .map_err(|e| ConfigError::ParseError {
                line: None,
                message: e.to_string(),
            })?;

        std::fs::write(config_path, yaml)?;
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_default())
    }
}
