//! Cell selection rules shared by the views.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::quadtree::{Point, QuadtreeIndex, Region};

use super::cells::CellEntry;

/// Selected cell ids.
pub type CellSelection = BTreeSet<String>;

/// Largest cell radius scale.
pub const MAX_RADIUS_SCALE: f64 = 0.2;

/// Diagonal length that maps to a radius scale of 1.
const RADIUS_DIAGONAL_DIVISOR: f64 = 300.0;

/// Toggle a clicked cell in or out of the selection.
///
/// Returns whether the cell is selected afterwards.
pub fn toggle_cell_selection(selection: &mut CellSelection, cell_id: &str) -> bool {
    if selection.remove(cell_id) {
        false
    } else {
        selection.insert(cell_id.to_string());
        true
    }
}

/// Whether a cell renders as selected.
///
/// An empty selection means nothing has been narrowed down yet, so every
/// cell counts as selected.
pub fn is_selected(selection: &CellSelection, cell_id: &str) -> bool {
    selection.is_empty() || selection.contains(cell_id)
}

/// Cells inside a drag rectangle.
pub fn select_region(index: &QuadtreeIndex<CellEntry>, region: &Region) -> CellSelection {
    let mut selection = CellSelection::new();
    index.visit(region, |(id, _), _| {
        selection.insert(id.clone());
    });
    selection
}

/// Radius scale for cells spread over `positions`.
///
/// Scales with the diagonal of the positions' extent, clamped to
/// `[0, MAX_RADIUS_SCALE]`. A degenerate extent (no points, one point,
/// or all coincident) yields zero, in which case `previous` is kept.
pub fn radius_scale<I>(positions: I, previous: f64) -> f64
where
    I: IntoIterator<Item = Point>,
{
    let mut extent: Option<[f64; 4]> = None;
    for [x, y] in positions {
        let e = extent.get_or_insert([x, y, x, y]);
        e[0] = e[0].min(x);
        e[1] = e[1].min(y);
        e[2] = e[2].max(x);
        e[3] = e[3].max(y);
    }
    let Some([min_x, min_y, max_x, max_y]) = extent else {
        return previous;
    };
    let diagonal = ((max_x - min_x).powi(2) + (max_y - min_y).powi(2)).sqrt();
    let scale = (diagonal / RADIUS_DIAGONAL_DIVISOR).clamp(0.0, MAX_RADIUS_SCALE);
    if scale > 0.0 {
        scale
    } else {
        previous
    }
}

/// Decode a `cellSelection` coordination value (array of ids or null).
pub fn selection_from_value(value: &Value) -> CellSelection {
    match value {
        Value::Array(ids) => ids
            .iter()
            .filter_map(|id| id.as_str().map(str::to_string))
            .collect(),
        _ => CellSelection::new(),
    }
}

/// Encode a selection as a `cellSelection` coordination value.
pub fn selection_to_value(selection: &CellSelection) -> Value {
    Value::Array(selection.iter().cloned().map(Value::String).collect())
}
