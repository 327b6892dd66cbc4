//! Settings key access and validation.
//!
//! Type-safe access to settings values by `section.key` name. The INI
//! parser and the `config set` command both go through [`SettingKey::set`],
//! so a value is validated the same way wherever it comes from.

use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use super::settings::Settings;

/// Errors that can occur when getting or setting values by key.
#[derive(Debug, Error)]
pub enum SettingKeyError {
    /// Unknown settings key.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// Validation failed for the value.
    #[error("Invalid value for {key}: {reason}")]
    ValidationFailed { key: String, reason: String },
}

/// Supported settings keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    // Logging settings
    LoggingDirectory,
    LoggingFile,

    // Tile settings
    TilesTileSize,
    TilesMinZoom,
    TilesMaxZoom,

    // Quadtree settings
    QuadtreeMinCellSize,
}

impl FromStr for SettingKey {
    type Err = SettingKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|key| key.name() == lower)
            .ok_or_else(|| SettingKeyError::UnknownKey(s.to_string()))
    }
}

impl SettingKey {
    pub fn name(&self) -> &'static str {
        match self {
            SettingKey::LoggingDirectory => "logging.directory",
            SettingKey::LoggingFile => "logging.file",
            SettingKey::TilesTileSize => "tiles.tile_size",
            SettingKey::TilesMinZoom => "tiles.min_zoom",
            SettingKey::TilesMaxZoom => "tiles.max_zoom",
            SettingKey::QuadtreeMinCellSize => "quadtree.min_cell_size",
        }
    }

    pub fn section(&self) -> &'static str {
        self.name().split('.').next().unwrap_or("")
    }

    pub fn key_name(&self) -> &'static str {
        self.name().split('.').nth(1).unwrap_or(self.name())
    }

    /// Current value as it would be written to the file.
    pub fn get(&self, settings: &Settings) -> String {
        match self {
            SettingKey::LoggingDirectory => path_to_display(&settings.logging.directory),
            SettingKey::LoggingFile => settings.logging.file.clone(),
            SettingKey::TilesTileSize => settings.tiles.tile_size.to_string(),
            SettingKey::TilesMinZoom => settings.tiles.min_zoom.to_string(),
            SettingKey::TilesMaxZoom => settings.tiles.max_zoom.to_string(),
            SettingKey::QuadtreeMinCellSize => settings.quadtree.min_cell_size.to_string(),
        }
    }

    /// Validate and store a value.
    pub fn set(&self, settings: &mut Settings, value: &str) -> Result<(), SettingKeyError> {
        let value = value.trim();
        self.validate(value)?;
        match self {
            SettingKey::LoggingDirectory => {
                settings.logging.directory = super::parser::expand_tilde(value);
            }
            SettingKey::LoggingFile => settings.logging.file = value.to_string(),
            SettingKey::TilesTileSize => settings.tiles.tile_size = self.parse(value)?,
            SettingKey::TilesMinZoom => settings.tiles.min_zoom = self.parse(value)?,
            SettingKey::TilesMaxZoom => settings.tiles.max_zoom = self.parse(value)?,
            SettingKey::QuadtreeMinCellSize => {
                settings.quadtree.min_cell_size = self.parse(value)?;
            }
        }
        Ok(())
    }

    /// Check a value without storing it.
    pub fn validate(&self, value: &str) -> Result<(), SettingKeyError> {
        let spec: &dyn ValueSpecification = match self {
            SettingKey::LoggingDirectory | SettingKey::LoggingFile => &NonEmptySpec,
            SettingKey::TilesTileSize => &PositiveIntegerSpec,
            SettingKey::TilesMinZoom | SettingKey::TilesMaxZoom => &IntegerSpec,
            SettingKey::QuadtreeMinCellSize => &NonNegativeNumberSpec,
        };
        spec.is_satisfied_by(value)
            .map_err(|reason| SettingKeyError::ValidationFailed {
                key: self.name().to_string(),
                reason,
            })
    }

    fn parse<T: FromStr>(&self, value: &str) -> Result<T, SettingKeyError> {
        value
            .parse()
            .map_err(|_| SettingKeyError::ValidationFailed {
                key: self.name().to_string(),
                reason: format!("cannot parse '{}'", value),
            })
    }

    /// Every key, in file order.
    pub fn all() -> &'static [SettingKey] {
        &[
            SettingKey::LoggingDirectory,
            SettingKey::LoggingFile,
            SettingKey::TilesTileSize,
            SettingKey::TilesMinZoom,
            SettingKey::TilesMaxZoom,
            SettingKey::QuadtreeMinCellSize,
        ]
    }
}

fn path_to_display(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// Specification a settings value must satisfy.
trait ValueSpecification {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String>;
}

/// Specification that rejects empty values.
struct NonEmptySpec;

impl ValueSpecification for NonEmptySpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        if value.is_empty() {
            Err("must not be empty".to_string())
        } else {
            Ok(())
        }
    }
}

/// Specification for positive integer values.
struct PositiveIntegerSpec;

impl ValueSpecification for PositiveIntegerSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        match value.parse::<u32>() {
            Ok(n) if n > 0 => Ok(()),
            _ => Err("must be a positive integer".to_string()),
        }
    }
}

/// Specification for signed integer values.
struct IntegerSpec;

impl ValueSpecification for IntegerSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        value
            .parse::<i32>()
            .map(|_| ())
            .map_err(|_| "must be an integer".to_string())
    }
}

/// Specification for finite numbers >= 0.
struct NonNegativeNumberSpec;

impl ValueSpecification for NonNegativeNumberSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        match value.parse::<f64>() {
            Ok(n) if n.is_finite() && n >= 0.0 => Ok(()),
            _ => Err("must be a non-negative number".to_string()),
        }
    }
}
