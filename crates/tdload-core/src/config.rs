//! Configuration structures for tdload.
//!
//! Configuration is loaded from TOML and covers writer selection plus the
//! spark bridge settings. Everything has a sensible default so an empty
//! document is a valid configuration.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Writer selected by [`crate::Writer::from_config`]
    pub writer: String,

    /// Spark bridge configuration
    pub spark: SparkConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            writer: default_writer(),
            spark: SparkConfig::default(),
        }
    }
}

/// Spark bridge configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SparkConfig {
    /// Explicit path to the engine runtime archive. When unset, the default
    /// location under the system temp directory is probed instead.
    pub archive_path: Option<PathBuf>,

    /// Download the runtime archive when it is missing locally
    pub download_if_missing: bool,
}

impl Default for SparkConfig {
    fn default() -> Self {
        Self {
            archive_path: None,
            download_if_missing: true,
        }
    }
}

fn default_writer() -> String {
    "bulk_import".to_string()
}

impl Config {
    /// Parse a configuration from a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Load a configuration from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.writer, "bulk_import");
        assert!(config.spark.archive_path.is_none());
        assert!(config.spark.download_if_missing);
    }

    #[test]
    fn test_empty_document_is_valid() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.writer, "bulk_import");
    }

    #[test]
    fn test_parse_overrides() {
        let raw = r#"
            writer = "spark"

            [spark]
            archive_path = "/opt/engine/runtime.jar"
            download_if_missing = false
        "#;
        let config = Config::from_toml_str(raw).unwrap();
        assert_eq!(config.writer, "spark");
        assert_eq!(
            config.spark.archive_path.as_deref(),
            Some(Path::new("/opt/engine/runtime.jar"))
        );
        assert!(!config.spark.download_if_missing);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = Config::from_toml_str("writer = [");
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }
}
