//! vizlink - Coordinated state for linked visualization views
//!
//! Several independently rendering views of one dataset (scatterplot,
//! spatial image, heatmap, ...) stay in sync without knowing about each
//! other. This library provides the substrate:
//!
//! - [`coordination`]: named, scoped shared values and per-view bindings
//! - [`events`]: synchronous topic-addressed publish/subscribe
//! - [`quadtree`]: region and nearest-neighbour queries over point data
//! - [`tiling`]: the raster tiles a viewport needs
//! - [`view_config`]: the JSON document describing views and their scopes
//! - [`loader`]: asynchronous dataset loading with latest-request-wins
//! - [`views`]: render layer production for each view kind
//! - [`session`]: ties the pieces together for one loaded configuration
//!
//! # High-Level API
//!
//! ```ignore
//! use std::sync::Arc;
//! use vizlink::events::EventBus;
//! use vizlink::loader::LoaderRegistry;
//! use vizlink::session::Session;
//! use vizlink::view_config::ViewConfig;
//!
//! let config = ViewConfig::load_from(path)?;
//! let registry = Arc::new(LoaderRegistry::from_config(&config, base_dir));
//! let session = Session::new(config, registry, Arc::new(EventBus::new()))?;
//!
//! let view = session.activate("spatial-1")?;
//! view.load_all().await;
//! ```

pub mod config;
pub mod coordination;
pub mod events;
pub mod loader;
pub mod log;
pub mod logging;
pub mod quadtree;
pub mod session;
pub mod tiling;
pub mod view_config;
pub mod views;

/// Version of the vizlink library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
