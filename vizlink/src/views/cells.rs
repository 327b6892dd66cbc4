//! Cell records shared by the cell-based views.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::quadtree::{Point, QuadtreeBuilder, QuadtreeIndex};

/// One cell of a `cells` dataset file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Embedding name → 2D position
    #[serde(default)]
    pub mappings: BTreeMap<String, Point>,
    /// Position in the spatial image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xy: Option<Point>,
    /// Annotation name → value
    #[serde(default)]
    pub factors: BTreeMap<String, String>,
}

/// Cells keyed by id, in id order.
pub type CellMap = BTreeMap<String, Cell>;

/// Decode the content of a `cells` file.
pub fn parse_cells(value: &Value) -> Result<CellMap, serde_json::Error> {
    CellMap::deserialize(value)
}

/// Which coordinates of a cell a view plots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellPosition {
    /// An embedding from `mappings`, e.g. `t-SNE`
    Mapping(String),
    /// The spatial `xy` position
    Spatial,
}

impl CellPosition {
    pub fn of(&self, cell: &Cell) -> Option<Point> {
        match self {
            CellPosition::Mapping(name) => cell.mappings.get(name).copied(),
            CellPosition::Spatial => cell.xy,
        }
    }
}

/// Entry stored in a cell quadtree: id and position, if the cell has one.
pub type CellEntry = (String, Option<Point>);

/// Spatial index over the cells' positions under `position`.
///
/// Every cell is handed to the index in id order. If the first cell has
/// no such position the result is the empty handle; later cells without
/// one are skipped.
pub fn index_cells(
    cells: &CellMap,
    position: &CellPosition,
    min_cell_size: f64,
) -> QuadtreeIndex<CellEntry> {
    let entries: Vec<CellEntry> = cells
        .iter()
        .map(|(id, cell)| (id.clone(), position.of(cell)))
        .collect();
    QuadtreeBuilder::new()
        .min_cell_size(min_cell_size)
        .build(entries, |(_, p): &CellEntry| *p)
}

/// Tooltip rows for a cell: its id followed by its factors.
pub fn cell_info(cells: &CellMap, cell_id: &str, label: &str) -> BTreeMap<String, String> {
    let mut info = BTreeMap::new();
    info.insert(format!("{} ID", capitalize(label)), cell_id.to_string());
    if let Some(cell) = cells.get(cell_id) {
        info.extend(cell.factors.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    info
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Shared, immutable cell data as handed to renderers.
pub type SharedCells = Arc<CellMap>;
