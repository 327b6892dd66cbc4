//! Render layer production.
//!
//! Each view kind is a [`LayerProducer`]: given the data it has, the
//! current selection and its view state, it describes the layers a
//! renderer should draw. Views are composed from producers rather than
//! derived from a common base; a spatial view with an extra overlay is a
//! [`CompositeView`] of two producers.

use std::collections::BTreeMap;

use serde::Serialize;

use super::cells::{CellPosition, SharedCells};
use super::selection::{is_selected, radius_scale, CellSelection, MAX_RADIUS_SCALE};
use crate::quadtree::Point;
use crate::tiling::{compute_visible_tiles, Tile, TileGrid, Viewport};

/// RGB color.
pub type Color = [u8; 3];

/// Color of cells without an assigned color.
pub const DEFAULT_COLOR: Color = [128, 128, 128];

/// Edge of one heatmap texture tile, in matrix entries.
pub const HEATMAP_TILE_SIZE: u32 = 2048;

/// Shape of an expression matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatrixShape {
    /// Cells
    pub rows: u32,
    /// Genes
    pub cols: u32,
}

/// Data available to a view. Missing entries have not loaded.
#[derive(Debug, Clone, Default)]
pub struct ViewData {
    pub cells: Option<SharedCells>,
    pub raster: Option<TileGrid>,
    pub matrix: Option<MatrixShape>,
}

/// Everything a producer may read.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub data: &'a ViewData,
    pub selection: &'a CellSelection,
    pub viewport: Viewport,
    pub colors: Option<&'a BTreeMap<String, Color>>,
    pub highlight: Option<&'a str>,
}

/// One drawn cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellMark {
    pub cell_id: String,
    pub position: Point,
    pub color: Color,
    pub selected: bool,
    pub highlighted: bool,
}

/// Description of one layer for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum LayerDescriptor {
    /// Cells as points
    Cells {
        id: String,
        cells: Vec<CellMark>,
        radius_scale: f64,
    },
    /// Raster image tiles for the current viewport
    Raster {
        id: String,
        tiles: Vec<Tile>,
        tile_size: u32,
    },
    /// Expression matrix texture tiles
    Heatmap {
        id: String,
        tiles: Vec<Tile>,
        shape: MatrixShape,
    },
}

impl LayerDescriptor {
    pub fn id(&self) -> &str {
        match self {
            LayerDescriptor::Cells { id, .. }
            | LayerDescriptor::Raster { id, .. }
            | LayerDescriptor::Heatmap { id, .. } => id,
        }
    }
}

/// Capability of producing render layers.
pub trait LayerProducer: Send + Sync {
    fn layers(&self, ctx: &RenderContext<'_>) -> Vec<LayerDescriptor>;
}

fn cell_marks(ctx: &RenderContext<'_>, position: &CellPosition) -> Option<Vec<CellMark>> {
    let cells = ctx.data.cells.as_ref()?;
    let marks = cells
        .iter()
        .filter_map(|(id, cell)| {
            let point = position.of(cell)?;
            Some(CellMark {
                cell_id: id.clone(),
                position: point,
                color: ctx
                    .colors
                    .and_then(|colors| colors.get(id).copied())
                    .unwrap_or(DEFAULT_COLOR),
                selected: is_selected(ctx.selection, id),
                highlighted: ctx.highlight == Some(id.as_str()),
            })
        })
        .collect();
    Some(marks)
}

/// Embedding scatterplot.
#[derive(Debug, Clone)]
pub struct ScatterplotLayers {
    pub mapping: String,
    /// Used when the cells' extent is degenerate
    pub radius_scale: f64,
}

impl ScatterplotLayers {
    pub fn new(mapping: impl Into<String>) -> Self {
        Self {
            mapping: mapping.into(),
            radius_scale: MAX_RADIUS_SCALE,
        }
    }
}

impl LayerProducer for ScatterplotLayers {
    fn layers(&self, ctx: &RenderContext<'_>) -> Vec<LayerDescriptor> {
        let position = CellPosition::Mapping(self.mapping.clone());
        match cell_marks(ctx, &position) {
            Some(cells) => {
                let scale = radius_scale(cells.iter().map(|c| c.position), self.radius_scale);
                vec![LayerDescriptor::Cells {
                    id: "scatterplot".to_string(),
                    cells,
                    radius_scale: scale,
                }]
            }
            None => Vec::new(),
        }
    }
}

/// Spatial image: raster tiles under cell outlines.
#[derive(Debug, Clone)]
pub struct SpatialLayers {
    pub show_raster: bool,
    pub show_cells: bool,
    pub radius_scale: f64,
}

impl Default for SpatialLayers {
    fn default() -> Self {
        Self {
            show_raster: true,
            show_cells: true,
            radius_scale: MAX_RADIUS_SCALE,
        }
    }
}

impl LayerProducer for SpatialLayers {
    fn layers(&self, ctx: &RenderContext<'_>) -> Vec<LayerDescriptor> {
        let mut layers = Vec::new();
        if self.show_raster {
            if let Some(grid) = &ctx.data.raster {
                layers.push(LayerDescriptor::Raster {
                    id: "spatial-raster".to_string(),
                    tiles: compute_visible_tiles(&ctx.viewport, grid),
                    tile_size: grid.tile_size,
                });
            }
        }
        if self.show_cells {
            if let Some(cells) = cell_marks(ctx, &CellPosition::Spatial) {
                layers.push(LayerDescriptor::Cells {
                    id: "spatial-cells".to_string(),
                    cells,
                    radius_scale: self.radius_scale,
                });
            }
        }
        layers
    }
}

/// Expression heatmap split into fixed-size texture tiles.
#[derive(Debug, Clone, Default)]
pub struct HeatmapLayers;

impl HeatmapLayers {
    /// Texture tiles covering a matrix, row by row.
    pub fn tiles(shape: MatrixShape) -> Vec<Tile> {
        let x_tiles = shape.cols.div_ceil(HEATMAP_TILE_SIZE);
        let y_tiles = shape.rows.div_ceil(HEATMAP_TILE_SIZE);
        (0..y_tiles)
            .flat_map(|y| (0..x_tiles).map(move |x| Tile::new(x, y, 0)))
            .collect()
    }
}

impl LayerProducer for HeatmapLayers {
    fn layers(&self, ctx: &RenderContext<'_>) -> Vec<LayerDescriptor> {
        match ctx.data.matrix {
            Some(shape) => vec![LayerDescriptor::Heatmap {
                id: "heatmap".to_string(),
                tiles: Self::tiles(shape),
                shape,
            }],
            None => Vec::new(),
        }
    }
}

/// Several producers drawn in order.
#[derive(Default)]
pub struct CompositeView {
    producers: Vec<Box<dyn LayerProducer>>,
}

impl CompositeView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, producer: impl LayerProducer + 'static) -> Self {
        self.producers.push(Box::new(producer));
        self
    }

    pub fn len(&self) -> usize {
        self.producers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }
}

impl LayerProducer for CompositeView {
    fn layers(&self, ctx: &RenderContext<'_>) -> Vec<LayerDescriptor> {
        self.producers.iter().flat_map(|p| p.layers(ctx)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::cells::parse_cells;
    use serde_json::json;
    use std::sync::Arc;

    fn data() -> ViewData {
        let cells = parse_cells(&json!({
            "cell_1": { "mappings": { "UMAP": [0.0, 0.0] }, "xy": [100.0, 100.0] },
            "cell_2": { "mappings": { "UMAP": [1.0, 2.0] }, "xy": [600.0, 300.0] },
            "cell_3": { "xy": [50.0, 50.0] }
        }))
        .unwrap();
        ViewData {
            cells: Some(Arc::new(cells)),
            raster: Some(TileGrid::new(-3, 0, 512, 4, 4).unwrap()),
            matrix: Some(MatrixShape {
                rows: 3000,
                cols: 5000,
            }),
        }
    }

    fn ctx<'a>(data: &'a ViewData, selection: &'a CellSelection) -> RenderContext<'a> {
        RenderContext {
            data,
            selection,
            viewport: Viewport::new([512.0, 512.0], 0.0, 1024.0, 1024.0),
            colors: None,
            highlight: Some("cell_2"),
        }
    }

    #[test]
    fn test_scatterplot_uses_mapping() {
        let data = data();
        let selection = CellSelection::new();
        let layers = ScatterplotLayers::new("UMAP").layers(&ctx(&data, &selection));
        assert_eq!(layers.len(), 1);
        let LayerDescriptor::Cells { cells, .. } = &layers[0] else {
            panic!("expected a cells layer");
        };
        // cell_3 has no UMAP position
        assert_eq!(cells.len(), 2);
        assert!(cells.iter().all(|c| c.selected));
        assert!(cells[1].highlighted);
        assert_eq!(cells[0].color, DEFAULT_COLOR);
    }

    #[test]
    fn test_scatterplot_radius_scale_follows_extent() {
        let data = data();
        let selection = CellSelection::new();
        let layers = ScatterplotLayers::new("UMAP").layers(&ctx(&data, &selection));
        let LayerDescriptor::Cells {
            radius_scale: scale,
            ..
        } = &layers[0]
        else {
            panic!("expected a cells layer");
        };
        // Extent 1 × 2
        assert!((scale - 5.0_f64.sqrt() / 300.0).abs() < 1e-12);
    }

    #[test]
    fn test_selection_marks_cells() {
        let data = data();
        let selection: CellSelection = ["cell_1".to_string()].into_iter().collect();
        let layers = ScatterplotLayers::new("UMAP").layers(&ctx(&data, &selection));
        let LayerDescriptor::Cells { cells, .. } = &layers[0] else {
            panic!("expected a cells layer");
        };
        assert!(cells[0].selected);
        assert!(!cells[1].selected);
    }

    #[test]
    fn test_colors_applied() {
        let data = data();
        let selection = CellSelection::new();
        let colors: BTreeMap<String, Color> = [("cell_2".to_string(), [255, 0, 0])].into();
        let mut context = ctx(&data, &selection);
        context.colors = Some(&colors);
        let layers = ScatterplotLayers::new("UMAP").layers(&context);
        let LayerDescriptor::Cells { cells, .. } = &layers[0] else {
            panic!("expected a cells layer");
        };
        assert_eq!(cells[1].color, [255, 0, 0]);
    }

    #[test]
    fn test_no_data_no_layers() {
        let data = ViewData::default();
        let selection = CellSelection::new();
        let context = ctx(&data, &selection);
        assert!(ScatterplotLayers::new("UMAP").layers(&context).is_empty());
        assert!(SpatialLayers::default().layers(&context).is_empty());
        assert!(HeatmapLayers.layers(&context).is_empty());
    }

    #[test]
    fn test_spatial_raster_and_cells() {
        let data = data();
        let selection = CellSelection::new();
        let layers = SpatialLayers::default().layers(&ctx(&data, &selection));
        let ids: Vec<_> = layers.iter().map(|l| l.id()).collect();
        assert_eq!(ids, vec!["spatial-raster", "spatial-cells"]);

        let LayerDescriptor::Raster { tiles, .. } = &layers[0] else {
            panic!("expected a raster layer");
        };
        // Viewport covers world [0, 1024] at full resolution
        assert_eq!(tiles.len(), 4);
    }

    #[test]
    fn test_heatmap_tiles() {
        let tiles = HeatmapLayers::tiles(MatrixShape {
            rows: 3000,
            cols: 5000,
        });
        // 3 columns × 2 rows of 2048-entry tiles
        assert_eq!(tiles.len(), 6);
        assert_eq!(tiles[0], Tile::new(0, 0, 0));
        assert_eq!(tiles[5], Tile::new(2, 1, 0));
    }

    #[test]
    fn test_composite_concatenates_in_order() {
        let data = data();
        let selection = CellSelection::new();
        let view = CompositeView::new()
            .with(HeatmapLayers)
            .with(ScatterplotLayers::new("UMAP"));
        let layers = view.layers(&ctx(&data, &selection));
        let ids: Vec<_> = layers.iter().map(|l| l.id()).collect();
        assert_eq!(ids, vec!["heatmap", "scatterplot"]);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_layer_serializes_with_type_tag() {
        let layer = LayerDescriptor::Raster {
            id: "r".to_string(),
            tiles: vec![Tile::new(0, 0, -1)],
            tile_size: 512,
        };
        let value = serde_json::to_value(&layer).unwrap();
        assert_eq!(value["type"], "raster");
        assert_eq!(value["tileSize"], 512);
    }
}
