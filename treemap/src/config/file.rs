//! Configuration file handling for ~/.treemap/config.ini.
//!
//! The file only ever supplies overrides; defaults live in
//! [`super::defaults`] and are applied by [`super::MapConfig::merge`].

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::defaults::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_LOG_FILE};
use super::map::MapOverrides;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

/// Contents of the configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Map settings found in `[map]` and `[servers]`
    pub map: MapOverrides,
    /// Log file path from `[logging] file`
    pub log_file: PathBuf,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            map: MapOverrides::default(),
            log_file: config_directory().join("logs").join(DEFAULT_LOG_FILE),
        }
    }
}

impl ConfigFile {
    /// Load configuration from the default path (~/.treemap/config.ini).
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }
}

/// Get the path to the config directory (~/.treemap).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Get the path to the config file (~/.treemap/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::LatLng;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&dir.path().join("absent.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_load_full_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(
            &path,
            "[map]\n\
             min_zoom = 3\n\
             max_zoom = 19\n\
             center_lat = -6.8\n\
             center_lng = 39.28\n\
             width = 1280\n\
             height = 720\n\
             debug = off\n\
             user_id = 42\n\
             [servers]\n\
             tile_url = https://tiles.example/\n\
             api_url = https://api.example/\n\
             [logging]\n\
             file = /tmp/treemap-test.log\n",
        )
        .unwrap();

        let config = ConfigFile::load_from(&path).unwrap();

        assert_eq!(config.map.min_zoom, Some(3));
        assert_eq!(config.map.max_zoom, Some(19));
        assert_eq!(config.map.initial_center, Some(LatLng::new(-6.8, 39.28)));
        assert_eq!(config.map.width, Some(1280));
        assert_eq!(config.map.height, Some(720));
        assert_eq!(config.map.debug, Some(false));
        assert_eq!(config.map.user_id.as_deref(), Some("42"));
        assert_eq!(
            config.map.tile_server_url.as_deref(),
            Some("https://tiles.example/")
        );
        assert_eq!(
            config.map.api_server_url.as_deref(),
            Some("https://api.example/")
        );
        assert_eq!(config.log_file, PathBuf::from("/tmp/treemap-test.log"));
    }

    #[test]
    fn test_invalid_value_names_the_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[map]\nmin_zoom = lots\n").unwrap();

        let err = ConfigFile::load_from(&path).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("map.min_zoom"), "got: {}", message);
        assert!(message.contains("lots"));
    }

    #[test]
    fn test_config_file_path_layout() {
        let path = config_file_path();
        assert!(path.ends_with(".treemap/config.ini"));
    }
}
