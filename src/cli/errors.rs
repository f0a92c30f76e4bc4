//! CLI-specific error type
//!
//! Every subsystem error converts into a `CliError` carrying the
//! subsystem's stable code, so the error envelope always names the real
//! cause.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::declaration::CatalogError;
use crate::resolution::{IsolationError, ResolutionError};
use crate::snapshot::SnapshotError;

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: &'static str,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Input file could not be read or parsed
    pub fn input_error(msg: impl Into<String>) -> Self {
        Self::new("DASH_CLI_INPUT", msg)
    }

    /// stdout could not be written
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new("DASH_CLI_IO", msg)
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

macro_rules! from_coded_error {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for CliError {
                fn from(e: $ty) -> Self {
                    Self::new(e.code(), e.to_string())
                }
            }
        )+
    };
}

from_coded_error!(ConfigError, CatalogError, ResolutionError, IsolationError, SnapshotError);

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
