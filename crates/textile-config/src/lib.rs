use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {source}")]
    ConfigParseError {
        config_path: Option<PathBuf>,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigSerializeError(#[from] toml::ser::Error),

    #[error("Failed to write config file at {config_path}: {source}")]
    ConfigWriteError {
        config_path: PathBuf,
        source: std::io::Error,
    },
}

/// Limits applied by the converter.
///
/// Every field has a default, so a config file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documents longer than this many bytes are rejected before parsing.
    pub max_input_bytes: usize,
    /// Deepest recursion of the driver before a span is kept as literal text.
    pub max_nesting_depth: usize,
    /// Deepest list level that will be opened.
    pub max_list_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_input_bytes: 1024 * 1024,
            max_nesting_depth: 64,
            max_list_depth: 32,
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::ConfigParseError {
            config_path: None,
            source,
        })
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
            config_path: Some(config_path.to_path_buf()),
            source,
        })?;

        Ok(Some(config))
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> Result<(), ConfigError> {
        let config_path = config_path.as_ref();
        let write_error = |source| ConfigError::ConfigWriteError {
            config_path: config_path.to_path_buf(),
            source,
        };
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content).map_err(write_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_limits() {
        let config = Config::default();

        assert_eq!(config.max_input_bytes, 1024 * 1024);
        assert_eq!(config.max_nesting_depth, 64);
        assert_eq!(config.max_list_depth, 32);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            max_input_bytes: 4096,
            max_nesting_depth: 8,
            max_list_depth: 3,
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::from_toml_str("max_list_depth = 4\n").unwrap();

        assert_eq!(config.max_list_depth, 4);
        assert_eq!(config.max_input_bytes, Config::default().max_input_bytes);
        assert_eq!(config.max_nesting_depth, Config::default().max_nesting_depth);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_value_is_parse_error() {
        let result = Config::from_toml_str("max_input_bytes = \"lots\"\n");

        assert!(matches!(
            result,
            Err(ConfigError::ConfigParseError {
                config_path: None,
                ..
            })
        ));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_malformed_file_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "max_list_depth = [").unwrap();

        match Config::load_from_path(&config_file) {
            Err(ConfigError::ConfigParseError { config_path, .. }) => {
                assert_eq!(config_path, Some(config_file));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            max_input_bytes: 100,
            ..Config::default()
        };

        test_config.save_to_path(&config_file).unwrap();
        assert!(config_file.exists(), "Config file should exist");

        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(loaded_config, test_config);
    }
}
