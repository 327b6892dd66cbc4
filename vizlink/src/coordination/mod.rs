//! Coordination space and scope binding.
//!
//! Views never talk to each other directly. Each declares which *scope*
//! of each *coordination type* it uses; views bound to the same
//! (type, scope) observe the same value, views bound to different scopes
//! are isolated.
//!
//! # Architecture
//!
//! ```text
//! CoordinationSpace
//! ├── spatialZoom
//! │   ├── "A" → -2.5        ← spatial view #1, spatial view #2
//! │   └── "B" → 0.0         ← spatial view #3
//! └── cellSelection
//!     └── "A" → ["c1","c7"] ← scatterplot, spatial, heatmap
//! ```
//!
//! # Usage
//!
//! ```
//! use serde_json::json;
//! use vizlink::coordination::{
//!     CoordinationScopes, CoordinationSpace, CoordinationType, ScopeBinding,
//! };
//!
//! let space = CoordinationSpace::new();
//! space.declare_scope(CoordinationType::SpatialZoom, "A", json!(0.0));
//!
//! let scopes = CoordinationScopes::new().with(CoordinationType::SpatialZoom, "A");
//! let binding = ScopeBinding::bind(&space, &[CoordinationType::SpatialZoom], &scopes).unwrap();
//!
//! binding.setters().by_name("setSpatialZoom").unwrap().set(json!(-1.5));
//! assert_eq!(binding.snapshot().get_f64(CoordinationType::SpatialZoom), Some(-1.5));
//! ```

mod binding;
mod components;
mod error;
mod space;
mod types;

pub use binding::{
    Binding, CoordinationScopes, CoordinationSnapshot, ScopeBinding, Setter, Setters,
};
pub use components::ViewKind;
pub use error::CoordinationError;
pub use space::{CoordinationSpace, ScopeValues, SpaceDocument};
pub use types::{CoordinationType, DEFAULT_SCOPE};
