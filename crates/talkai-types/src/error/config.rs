//! Configuration-related errors.
//!
//! Covers the two files the gateway reads at startup: the outbound key file
//! and the model catalog. Callers decide what a failure means; both degrade
//! (no outbound key, empty catalog) rather than abort startup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or writing gateway config files.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ConfigError {
    /// File not found at the expected path
    #[error("Config not found: {path}")]
    NotFound {
        /// Filesystem path where the file was expected
        path: String,
    },

    /// Malformed JSON or wrong shape
    #[error("Config parse error: {message}")]
    ParseError {
        /// Description of the parse failure
        message: String,
    },

    /// File could not be read or written (permissions, disk full, etc)
    #[error("Config write error: {message}")]
    WriteError {
        /// Description of the IO failure
        message: String,
    },
}

impl ConfigError {
    /// Create a parse error from a serde_json error.
    pub fn from_json_error(e: &serde_json::Error) -> Self {
        Self::ParseError { message: e.to_string() }
    }

    /// Create a write error from an IO error.
    pub fn from_io_error(e: &std::io::Error) -> Self {
        Self::WriteError { message: e.to_string() }
    }
}
