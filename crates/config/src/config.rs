//! Core configuration struct and loading logic.

use std::path::{Path, PathBuf};

use beiramar_protocol::Language;
use serde::{Deserialize, Serialize};

use crate::delays::DelayConfig;
use crate::error::Result;
use crate::persistence::{default_storage_dir, find_config_file, read_config_file, write_config_file};

/// The main configuration struct for the beiramar application.
///
/// # Examples
///
/// ```
/// use beiramar_config::{Config, DelayConfig};
/// use beiramar_protocol::Language;
///
/// let config = Config {
///     language: Language::En,
///     delays: DelayConfig::none(),
///     ..Config::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Interface language used until the user picks one.
    #[serde(default)]
    pub language: Language,

    /// Directory of the key-value storage; defaults to the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,

    /// Simulated latencies.
    #[serde(default)]
    pub delays: DelayConfig,
}

impl Config {
    /// Loads configuration from the default file locations, or defaults when
    /// no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read, parsed or validated.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a delay is out of range.
    pub fn validate(&self) -> Result<()> {
        self.delays.validate()
    }

    /// The storage directory: the configured one, or the default under the
    /// data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no directory is configured and the data directory
    /// cannot be determined.
    pub fn storage_dir(&self) -> Result<PathBuf> {
        match &self.storage_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_storage_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.language, Language::Pt);
        assert!(config.storage_dir.is_none());
        assert_eq!(config.delays, DelayConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn configured_storage_dir_wins() {
        let config = Config {
            storage_dir: Some(PathBuf::from("/tmp/beiramar-test")),
            ..Config::default()
        };
        assert_eq!(config.storage_dir().unwrap(), PathBuf::from("/tmp/beiramar-test"));
    }

    #[test]
    fn load_from_json5_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("beiramar.json5");
        std::fs::write(
            &path,
            r#"
            {
                language: "en",
                storage_dir: "/srv/beiramar",
                delays: { payment_ms: 0 },
            }
            "#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.language, Language::En);
        assert_eq!(config.storage_dir, Some(PathBuf::from("/srv/beiramar")));
        assert_eq!(config.delays.payment_ms, 0);
        assert_eq!(config.delays.login_ms, 600);
    }

    #[test]
    fn load_rejects_out_of_range_delay() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("beiramar.json");
        std::fs::write(&path, r#"{"delays": {"login_ms": 60000}}"#).unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn load_rejects_unknown_language() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("beiramar.json");
        std::fs::write(&path, r#"{"language": "fr"}"#).unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let original = Config {
            language: Language::En,
            storage_dir: Some(dir.path().join("storage")),
            delays: DelayConfig::none(),
        };

        original.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), original);
    }

    #[test]
    fn storage_dir_not_serialized_when_none() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(!json.contains("storage_dir"));
    }
}
