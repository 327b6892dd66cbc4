//! Spatial index over point datasets.
//!
//! A region quadtree answering "which cells are inside this rectangle"
//! (lasso/rectangle selection) and "which cell is under the pointer"
//! (hover, click) without scanning every point.
//!
//! # Architecture
//!
//! ```text
//! root: smallest square covering all points
//! ├── NW ── leaf [i, j]          (coincident points share a leaf)
//! ├── NE ── ┬── NW ... SE        (split while positions differ and
//! │         └── ...               side > min_cell_size)
//! ├── SW ── leaf []
//! └── SE ── leaf [k]
//! ```
//!
//! Leaves hold indices into the caller's entries; positions come from the
//! accessor on every query.
//!
//! # Usage
//!
//! ```
//! use vizlink::quadtree::{QuadtreeIndex, Region};
//!
//! let cells = vec![("a", [0.0, 0.0]), ("b", [10.0, 0.0]), ("c", [0.0, 10.0])];
//! let index = QuadtreeIndex::build(cells, |(_, xy)| Some(*xy));
//!
//! let inside = index.query_region(&Region::new(0.0, 0.0, 5.0, 5.0));
//! assert_eq!(inside.len(), 1);
//! assert_eq!(index.find_nearest(9.0, 1.0, 3.0).map(|(id, _)| *id), Some("b"));
//! ```

mod bounds;
mod error;
mod index;

pub use bounds::{Bounds, Point, Region};
pub use error::SpatialQueryError;
pub use index::{QuadtreeBuilder, QuadtreeIndex, DEFAULT_MIN_CELL_SIZE};
