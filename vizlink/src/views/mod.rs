//! View building blocks.
//!
//! Data and selection helpers shared by the cell-based views, the
//! [`LayerProducer`] capability each view kind implements, and the mapping
//! between coordinated view state and a [`Viewport`](crate::tiling::Viewport).
//!
//! ```
//! use std::collections::BTreeMap;
//! use vizlink::tiling::Viewport;
//! use vizlink::views::{
//!     CellSelection, CompositeView, LayerProducer, RenderContext, ScatterplotLayers, ViewData,
//! };
//!
//! let view = CompositeView::new().with(ScatterplotLayers::new("t-SNE"));
//! let data = ViewData::default();
//! let selection = CellSelection::new();
//! let ctx = RenderContext {
//!     data: &data,
//!     selection: &selection,
//!     viewport: Viewport::new([0.0, 0.0], 0.0, 800.0, 600.0),
//!     colors: None,
//!     highlight: None,
//! };
//! // Nothing loaded yet, nothing to draw
//! assert!(view.layers(&ctx).is_empty());
//! ```

mod cells;
mod layers;
mod selection;
mod view_state;

pub use cells::{
    cell_info, index_cells, parse_cells, Cell, CellEntry, CellMap, CellPosition, SharedCells,
};
pub use layers::{
    CellMark, Color, CompositeView, HeatmapLayers, LayerDescriptor, LayerProducer, MatrixShape,
    RenderContext, ScatterplotLayers, SpatialLayers, ViewData, DEFAULT_COLOR, HEATMAP_TILE_SIZE,
};
pub use selection::{
    is_selected, radius_scale, select_region, selection_from_value, selection_to_value,
    toggle_cell_selection, CellSelection, MAX_RADIUS_SCALE,
};
pub use view_state::{viewport_from_snapshot, view_state_updates};
