//! Application settings.
//!
//! Settings live in an INI file at `~/.vizlink/config.ini`. Missing keys
//! fall back to defaults, so an empty or absent file is valid.
//!
//! # Example
//!
//! ```
//! use vizlink::config::{SettingKey, Settings};
//!
//! let mut settings = Settings::default();
//! SettingKey::TilesTileSize.set(&mut settings, "256").unwrap();
//! assert_eq!(settings.tiles.tile_size, 256);
//!
//! let grid = settings.tile_grid(8, 8).unwrap();
//! assert_eq!(grid.tile_size, 256);
//! ```

mod defaults;
mod file;
mod keys;
mod parser;
mod settings;
mod writer;

pub use defaults::{DEFAULT_LOG_FILE, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM};
pub use file::{config_directory, config_file_path, SettingsError};
pub use keys::{SettingKey, SettingKeyError};
pub use settings::{LoggingSettings, QuadtreeSettings, Settings, TileSettings};
