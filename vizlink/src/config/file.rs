//! Settings file handling for ~/.vizlink/config.ini.
//!
//! Structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;
use tracing::debug;

use super::settings::Settings;
use crate::tiling::{TileError, TileGrid};

/// Settings file errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read settings file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write settings file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid settings value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create settings directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl Settings {
    /// Load settings from the default path (~/.vizlink/config.ini).
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&config_file_path())
    }

    /// Load settings from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save settings to the default path (~/.vizlink/config.ini).
    pub fn save(&self) -> Result<(), SettingsError> {
        self.save_to(&config_file_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SettingsError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| SettingsError::WriteError(e.to_string()))
    }

    /// Create the default settings file if it doesn't exist.
    ///
    /// Returns the path to the settings file.
    pub fn ensure_exists() -> Result<PathBuf, SettingsError> {
        let path = config_file_path();
        if !path.exists() {
            Self::default().save_to(&path)?;
        }
        Ok(path)
    }

    /// Tile grid of a raster `grid_width` × `grid_height` tiles wide at
    /// full resolution, using the configured tile pyramid.
    pub fn tile_grid(&self, grid_width: u32, grid_height: u32) -> Result<TileGrid, TileError> {
        TileGrid::new(
            self.tiles.min_zoom,
            self.tiles.max_zoom,
            self.tiles.tile_size,
            grid_width,
            grid_height,
        )
    }

    /// Full path of the log file.
    pub fn log_path(&self) -> PathBuf {
        self.logging.directory.join(&self.logging.file)
    }
}

/// Get the path to the settings directory (~/.vizlink).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".vizlink")
}

/// Get the path to the settings file (~/.vizlink/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.logging.file, DEFAULT_LOG_FILE);
        assert!(settings.logging.directory.ends_with(".vizlink"));
        assert_eq!(settings.tiles.tile_size, 512);
        assert_eq!(settings.tiles.min_zoom, DEFAULT_MIN_ZOOM);
        assert_eq!(settings.tiles.max_zoom, DEFAULT_MAX_ZOOM);
        assert_eq!(settings.quadtree.min_cell_size, 0.0);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from(&temp_dir.path().join("absent.ini")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.ini");

        Settings::default().save_to(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_tile_grid_from_settings() {
        let settings = Settings::default();
        let grid = settings.tile_grid(4, 2).unwrap();
        assert_eq!(grid.tile_size, 512);
        assert_eq!(grid.min_zoom, DEFAULT_MIN_ZOOM);
        assert_eq!(grid.grid_width, 4);
    }

    #[test]
    fn test_log_path() {
        let mut settings = Settings::default();
        settings.logging.directory = PathBuf::from("/var/log/vizlink");
        assert_eq!(
            settings.log_path(),
            PathBuf::from("/var/log/vizlink/vizlink.log")
        );
    }
}
