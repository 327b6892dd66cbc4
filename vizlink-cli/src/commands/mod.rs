//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Settings management (get, set, list, path)
//! - [`spatial`] - Quadtree queries over a points file (nearest, region)
//! - [`tiles`] - Visible raster tiles for a viewport
//! - [`view`] - View configuration checks (validate, scopes)

pub mod config;
pub mod spatial;
pub mod tiles;
pub mod view;
