//! Visible tile computation
//!
//! Maps an orthographic viewport onto the tiles of a raster pyramid that
//! must be fetched to cover it. Pure and stateless; call it on every
//! viewport change.

mod types;

pub use types::{
    effective_tile_size, Tile, TileBounds, TileError, TileGrid, Viewport, DEFAULT_TILE_SIZE,
};

/// Effective zoom level for a viewport.
///
/// Tiles never get finer than full resolution (zoom 0), so positive
/// viewport zooms reuse level 0. The result is clamped to the grid's
/// zoom range. A non-finite zoom falls back to the coarsest level, and
/// so does every zoom on a grid whose range is inverted.
pub fn effective_zoom(viewport_zoom: f64, grid: &TileGrid) -> i32 {
    let (min_zoom, max_zoom) = grid.zoom_range();
    if !viewport_zoom.is_finite() {
        return min_zoom;
    }
    let z = viewport_zoom.ceil().min(0.0) as i32;
    z.clamp(min_zoom, max_zoom)
}

/// Tiles covering the viewport, row by row from the north-west.
///
/// At or below the grid's minimum zoom the answer is always the single
/// coarsest tile `{0, 0, min_zoom}`, regardless of pan. Otherwise the
/// canvas corners are unprojected, converted to fractional tile indices
/// at the effective zoom, widened to whole tiles and clipped to the grid.
///
/// Cost is proportional to the number of tiles returned.
pub fn compute_visible_tiles(viewport: &Viewport, grid: &TileGrid) -> Vec<Tile> {
    let z = effective_zoom(viewport.zoom, grid);
    if z <= grid.min_zoom {
        return vec![Tile::new(0, 0, grid.min_zoom)];
    }

    let span = effective_tile_size(grid.tile_size, z);
    let [min_x, min_y, max_x, max_y] = viewport.world_bounds();

    let (x0, x1) = index_range(min_x / span, max_x / span, grid.grid_width);
    let (y0, y1) = index_range(min_y / span, max_y / span, grid.grid_height);

    let mut tiles = Vec::with_capacity(((x1 - x0) as usize) * ((y1 - y0) as usize));
    for y in y0..y1 {
        for x in x0..x1 {
            tiles.push(Tile::new(x, y, z));
        }
    }
    tiles
}

/// Half-open whole-tile range `[floor(min), ceil(max))` clipped to `[0, limit]`.
#[inline]
fn index_range(min: f64, max: f64, limit: u32) -> (u32, u32) {
    let limit_f = limit as f64;
    let start = min.floor().clamp(0.0, limit_f);
    let end = max.ceil().clamp(0.0, limit_f);
    let start = start as u32;
    let end = (end as u32).max(start);
    (start, end)
}
