//! Phrasebook common core types.

pub mod error;

pub use error::{Error, ErrorCategory, ErrorCode, Result};
