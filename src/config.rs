//! Configuration
//!
//! Loaded from a JSON file. Every field has a default, so `{}` is a valid
//! configuration.
//!
//! ```json
//! {
//!   "snapshot_expiration_ms": 3600000,
//!   "log_level": "info",
//!   "catalog_path": "./dashboards.json"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::declaration::{CatalogError, DeclarationCatalog};
use crate::observability::{log_event, Event, Logger, Severity};
use crate::snapshot::DEFAULT_EXPIRATION_MS;

/// Result type for configuration
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid config value: {0}")]
    Invalid(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ConfigError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "DASH_CONFIG_READ",
            ConfigError::Parse(_) => "DASH_CONFIG_PARSE",
            ConfigError::Invalid(_) => "DASH_CONFIG_INVALID",
            ConfigError::Catalog(e) => e.code(),
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Snapshot validity window (default one hour, must be > 0)
    #[serde(default = "default_snapshot_expiration_ms")]
    pub snapshot_expiration_ms: u64,

    /// Minimum log severity: trace, info, warn or error (default info)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Extra declarations merged over the built-in catalog
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

fn default_snapshot_expiration_ms() -> u64 {
    DEFAULT_EXPIRATION_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot_expiration_ms: default_snapshot_expiration_ms(),
            log_level: default_log_level(),
            catalog_path: None,
        }
    }
}

impl Config {
    /// Load and validate configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Config =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.snapshot_expiration_ms == 0 {
            return Err(ConfigError::Invalid(
                "snapshot_expiration_ms must be > 0".to_string(),
            ));
        }
        self.severity()?;
        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> ConfigResult<Severity> {
        Severity::parse(&self.log_level).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "Invalid log_level: '{}'. Expected trace, info, warn or error.",
                self.log_level
            ))
        })
    }

    /// Applies the log level to the process-wide logger
    pub fn apply_logging(&self) -> ConfigResult<()> {
        Logger::set_min_severity(self.severity()?);
        log_event(
            Event::ConfigLoaded,
            &[
                ("log_level", self.log_level.as_str()),
                ("snapshot_expiration_ms", self.snapshot_expiration_ms.to_string().as_str()),
            ],
        );
        Ok(())
    }

    /// Built-in catalog plus `catalog_path`, if set
    pub fn catalog(&self) -> ConfigResult<DeclarationCatalog> {
        let mut catalog = DeclarationCatalog::builtin();
        if let Some(path) = &self.catalog_path {
            let loaded = catalog.load_file(path)?;
            log_event(
                Event::CatalogLoaded,
                &[
                    ("declarations", loaded.to_string().as_str()),
                    ("path", path.display().to_string().as_str()),
                ],
            );
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{partner_dashboard, PARTNER_DASHBOARD_ID};
    use tempfile::TempDir;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.snapshot_expiration_ms, 3_600_000);
        assert_eq!(config.severity().unwrap(), Severity::Info);
    }

    #[test]
    fn test_zero_expiration_rejected() {
        let err = Config::from_json(r#"{"snapshot_expiration_ms": 0}"#).unwrap_err();
        assert_eq!(err.code(), "DASH_CONFIG_INVALID");
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let err = Config::from_json(r#"{"log_level": "loud"}"#).unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_invalid_json() {
        let err = Config::from_json("not json").unwrap_err();
        assert_eq!(err.code(), "DASH_CONFIG_PARSE");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/dashgate.json")).unwrap_err();
        assert_eq!(err.code(), "DASH_CONFIG_READ");
    }

    #[test]
    fn test_catalog_merges_file() {
        let temp_dir = TempDir::new().unwrap();
        let catalog_path = temp_dir.path().join("dashboards.json");
        let mut next = partner_dashboard();
        next.version = "1.1.0".to_string();
        fs::write(&catalog_path, serde_json::to_string(&vec![next]).unwrap()).unwrap();

        let config_path = temp_dir.path().join("dashgate.json");
        fs::write(
            &config_path,
            serde_json::json!({ "catalog_path": catalog_path }).to_string(),
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.latest(PARTNER_DASHBOARD_ID).unwrap().version, "1.1.0");
    }
}
