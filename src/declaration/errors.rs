//! # Catalog Errors

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Declaration catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Declaration breaks a structural rule
    #[error("Invalid declaration '{id}': {reason}")]
    InvalidDeclaration { id: String, reason: String },

    /// Same id and version registered twice
    #[error("Declaration '{id}@{version}' is already registered")]
    Duplicate { id: String, version: String },

    /// No declaration for the requested id (and version, if given)
    #[error("Dashboard not found: {}", qualified(.id, .version))]
    NotFound { id: String, version: Option<String> },

    /// Catalog file could not be read
    #[error("Failed to read catalog file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Catalog file is not a JSON array of declarations
    #[error("Invalid catalog JSON: {0}")]
    Parse(String),
}

fn qualified(id: &str, version: &Option<String>) -> String {
    match version {
        Some(version) => format!("{}@{}", id, version),
        None => id.to_string(),
    }
}

impl CatalogError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::InvalidDeclaration { .. } => "DASH_CATALOG_INVALID",
            CatalogError::Duplicate { .. } => "DASH_CATALOG_DUPLICATE",
            CatalogError::NotFound { .. } => "DASH_CATALOG_NOT_FOUND",
            CatalogError::Io { .. } => "DASH_CATALOG_IO",
            CatalogError::Parse(_) => "DASH_CATALOG_PARSE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = CatalogError::NotFound {
            id: "partner-dashboard".to_string(),
            version: Some("2.0.0".to_string()),
        };
        assert_eq!(err.to_string(), "Dashboard not found: partner-dashboard@2.0.0");

        let err = CatalogError::NotFound {
            id: "partner-dashboard".to_string(),
            version: None,
        };
        assert_eq!(err.to_string(), "Dashboard not found: partner-dashboard");
        assert_eq!(err.code(), "DASH_CATALOG_NOT_FOUND");
    }
}
