//! Configuration file reading and writing, and well-known paths.
//!
//! # File Locations
//!
//! Configuration is searched in the following order:
//!
//! 1. Local: `./beiramar.json5` or `./beiramar.json`
//! 2. User: `~/.config/beiramar/config.json5` or `~/.config/beiramar/config.json`
//!
//! Runtime data lives under the platform data directory
//! (`~/.local/share/beiramar` on Linux): the key-value storage directory and
//! the log file.

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Configuration file names to search for, in priority order.
const CONFIG_FILE_NAMES: &[&str] = &["beiramar.json5", "beiramar.json"];

/// Application directory name under the config and data directories.
const APP_DIR: &str = "beiramar";

/// User config file names to search for, in priority order.
const USER_CONFIG_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Storage directory name under the data directory.
const STORAGE_DIR: &str = "storage";

/// Log file name under the data directory.
const LOG_FILE: &str = "beiramar.log";

/// Finds the configuration file path, local directory first.
///
/// # Examples
///
/// ```no_run
/// use beiramar_config::persistence::find_config_file;
///
/// if let Some(path) = find_config_file() {
///     println!("Found config at: {}", path.display());
/// }
/// ```
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    let local = CONFIG_FILE_NAMES.iter().map(PathBuf::from);
    let user = dirs::config_dir()
        .map(|dir| {
            USER_CONFIG_FILE_NAMES
                .iter()
                .map(|name| dir.join(APP_DIR).join(name))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    local.chain(user).find(|path| path.exists())
}

/// Returns the user configuration directory, typically `~/.config/beiramar/`.
///
/// # Errors
///
/// Returns an error if the platform has no config directory.
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .ok_or(ConfigError::NoConfigDirectory)
}

/// Returns the default user configuration file path.
///
/// # Errors
///
/// Returns an error if the platform has no config directory.
pub fn default_user_config_path() -> Result<PathBuf> {
    Ok(user_config_dir()?.join("config.json5"))
}

/// Returns the application data directory, typically `~/.local/share/beiramar/`.
///
/// # Errors
///
/// Returns an error if the data directory cannot be determined.
pub fn data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .ok_or(ConfigError::NoDataDirectory)
}

/// Returns the default key-value storage directory.
///
/// # Errors
///
/// Returns an error if the data directory cannot be determined.
pub fn default_storage_dir() -> Result<PathBuf> {
    Ok(data_dir()?.join(STORAGE_DIR))
}

/// Returns the log file path.
///
/// # Errors
///
/// Returns an error if the data directory cannot be determined.
pub fn log_file_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(LOG_FILE))
}

/// Reads and parses a JSON5 or JSON configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its content cannot be parsed.
///
/// # Examples
///
/// ```no_run
/// use beiramar_config::persistence::read_config_file;
/// use beiramar_config::Config;
///
/// # fn main() -> beiramar_config::Result<()> {
/// let config: Config = read_config_file("beiramar.json5")?;
/// # Ok(())
/// # }
/// ```
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    // JSON is a subset of JSON5
    serde_json5::from_str(&content).map_err(ConfigError::from)
}

/// Writes a value as pretty-printed JSON, creating parent directories.
///
/// # Errors
///
/// Returns an error if a directory or the file cannot be written, or the
/// value cannot be serialized.
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, config: &T) -> Result<()> {
    let path = path.as_ref();
    let write_error = |e| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty() && !p.exists()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(write_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        value: i32,
    }

    #[test]
    fn read_json5_with_comments() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.json5");
        std::fs::write(
            &path,
            r#"
            {
                // comment
                name: "sample",
                value: 7,
            }
            "#,
        )
        .unwrap();

        let sample: Sample = read_config_file(&path).unwrap();
        assert_eq!(sample, Sample {
            name: "sample".to_string(),
            value: 7
        });
    }

    #[test]
    fn read_missing_file_reports_path() {
        let err = read_config_file::<Sample>("/nonexistent/beiramar.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/beiramar.json"));
    }

    #[test]
    fn read_invalid_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("invalid.json");
        std::fs::write(&path, "not valid json").unwrap();
        assert!(read_config_file::<Sample>(&path).is_err());
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let sample = Sample {
            name: "x".to_string(),
            value: 1,
        };

        write_config_file(&path, &sample).unwrap();
        assert_eq!(read_config_file::<Sample>(&path).unwrap(), sample);
    }

    #[test]
    fn data_paths_share_app_dir() {
        if dirs::data_dir().is_some() {
            let storage = default_storage_dir().unwrap();
            let log = log_file_path().unwrap();
            assert!(storage.ends_with("beiramar/storage"));
            assert_eq!(storage.parent(), log.parent());
        }
    }
}
