//! Default values and constants for all configuration settings.

use super::settings::*;
use crate::quadtree::DEFAULT_MIN_CELL_SIZE;
use crate::tiling::DEFAULT_TILE_SIZE;

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "vizlink.log";

/// Default most-downsampled zoom level.
pub const DEFAULT_MIN_ZOOM: i32 = -8;

/// Default full-resolution zoom level.
pub const DEFAULT_MAX_ZOOM: i32 = 0;

impl Default for Settings {
    fn default() -> Self {
        Self {
            logging: LoggingSettings {
                directory: super::file::config_directory(),
                file: DEFAULT_LOG_FILE.to_string(),
            },
            tiles: TileSettings {
                tile_size: DEFAULT_TILE_SIZE,
                min_zoom: DEFAULT_MIN_ZOOM,
                max_zoom: DEFAULT_MAX_ZOOM,
            },
            quadtree: QuadtreeSettings {
                min_cell_size: DEFAULT_MIN_CELL_SIZE,
            },
        }
    }
}
