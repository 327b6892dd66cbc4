//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI settings file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

/// Complete application settings loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Logging settings
    pub logging: LoggingSettings,
    /// Raster tile settings
    pub tiles: TileSettings,
    /// Spatial index settings
    pub quadtree: QuadtreeSettings,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Directory holding the log file
    pub directory: PathBuf,
    /// Log file name inside `directory`
    pub file: String,
}

/// Raster tile pyramid configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSettings {
    /// Tile edge in pixels at full resolution
    pub tile_size: u32,
    /// Most downsampled zoom level (usually negative)
    pub min_zoom: i32,
    /// Full-resolution zoom level
    pub max_zoom: i32,
}

/// Quadtree configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadtreeSettings {
    /// Nodes at or below this edge length are not split further
    pub min_cell_size: f64,
}
