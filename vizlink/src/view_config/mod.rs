//! View configuration documents.
//!
//! A view configuration is the JSON document describing a session: the
//! datasets to load, the coordination space (declared types, scopes and
//! their current values) and the views on the layout grid with the scope
//! each of them binds per coordination type.
//!
//! ```text
//! {
//!   "version": "1.0.0",
//!   "datasets": [{ "uid": "d1", "files": [...] }],
//!   "coordinationSpace": { "spatialZoom": { "A": -2.5 } },
//!   "layout": [{ "component": "spatial", "uid": "v1",
//!                "coordinationScopes": { "spatialZoom": "A" }, ... }]
//! }
//! ```
//!
//! # Usage
//!
//! ```
//! use vizlink::view_config::ViewConfig;
//!
//! let json = r#"{
//!     "version": "1.0.0",
//!     "coordinationSpace": { "spatialZoom": { "A": -2.5 } },
//!     "layout": [{
//!         "component": "spatial",
//!         "uid": "v1",
//!         "coordinationScopes": { "spatialZoom": "A" }
//!     }]
//! }"#;
//!
//! let config = ViewConfig::from_json(json).unwrap();
//! config.validate().unwrap();
//! let config = config.with_auto_scopes().unwrap();
//! assert_eq!(config.view("v1").unwrap().coordination_scopes["spatialTargetX"], "A");
//! ```

mod document;
mod error;

pub use document::{
    Dataset, DatasetFile, SpaceNames, ViewComponent, ViewConfig, CURRENT_VERSION,
    SUPPORTED_VERSIONS,
};
pub use error::ViewConfigError;

#[cfg(test)]
mod tests;
