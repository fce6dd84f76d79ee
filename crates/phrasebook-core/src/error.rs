//! Error types for Phrasebook.

use std::fmt;
use thiserror::Error;

/// Boxed error source carried by file system errors.
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Stable numeric error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    pub const GENERIC: Self = Self(1000);
    pub const CONFIG_INVALID: Self = Self(2000);
    pub const FILE_NOT_FOUND: Self = Self(3000);
    pub const FILE_READ_ERROR: Self = Self(3001);
    pub const FILE_WRITE_ERROR: Self = Self(3002);
    pub const SERIALIZATION_FAILED: Self = Self(4000);

    /// Category this code belongs to.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            2000..=2999 => ErrorCategory::Config,
            3000..=3999 => ErrorCategory::FileSystem,
            4000..=4999 => ErrorCategory::Serialization,
            _ => ErrorCategory::Generic,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.0)
    }
}

/// Broad error category, used for log routing and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Generic,
    Config,
    FileSystem,
    Serialization,
}

/// The main error type for Phrasebook operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error with custom message.
    #[error("{0}")]
    Generic(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system error with a stable code and the offending path.
    #[error("[{code}] {message}")]
    FileSystem {
        code: ErrorCode,
        message: String,
        path: Option<String>,
        #[source]
        source: Option<BoxedSource>,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create a new generic error.
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic(msg.into())
    }

    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Generic(_) => ErrorCode::GENERIC,
            Self::Config(_) => ErrorCode::CONFIG_INVALID,
            Self::FileSystem { code, .. } => *code,
            Self::Io(e) if e.kind() == std::io::ErrorKind::NotFound => ErrorCode::FILE_NOT_FOUND,
            Self::Io(_) => ErrorCode::FILE_READ_ERROR,
            Self::Serialization(_) => ErrorCode::SERIALIZATION_FAILED,
        }
    }

    /// Category of this error.
    pub fn category(&self) -> ErrorCategory {
        self.code().category()
    }

    /// Path attached to a file system error, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::FileSystem { path, .. } => path.as_deref(),
            _ => None,
        }
    }

    /// True when the error means "the file does not exist".
    pub fn is_not_found(&self) -> bool {
        self.code() == ErrorCode::FILE_NOT_FOUND
    }
}

/// Result type alias using Phrasebook's Error.
pub type Result<T> = std::result::Result<T, Error>;
