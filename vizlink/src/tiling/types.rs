//! Viewport and tile type definitions

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default raster tile edge in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 512;

/// Orthographic 2D viewport.
///
/// World coordinates map to screen pixels by a uniform `2^zoom` scale
/// around `target`, which sits at the center of the canvas. Screen Y grows
/// downward, as does world Y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// World point at the canvas center
    pub target: [f64; 2],
    /// Log2 scale; 0 is one world unit per pixel
    pub zoom: f64,
    /// Canvas width in pixels
    pub width: f64,
    /// Canvas height in pixels
    pub height: f64,
}

impl Viewport {
    pub fn new(target: [f64; 2], zoom: f64, width: f64, height: f64) -> Self {
        Self {
            target,
            zoom,
            width,
            height,
        }
    }

    /// Pixels per world unit.
    #[inline]
    pub fn scale(&self) -> f64 {
        2.0_f64.powf(self.zoom)
    }

    /// World coordinates to screen pixels.
    #[inline]
    pub fn project(&self, world: [f64; 2]) -> [f64; 2] {
        let scale = self.scale();
        [
            (world[0] - self.target[0]) * scale + self.width / 2.0,
            (world[1] - self.target[1]) * scale + self.height / 2.0,
        ]
    }

    /// Screen pixels to world coordinates.
    #[inline]
    pub fn unproject(&self, pixel: [f64; 2]) -> [f64; 2] {
        let scale = self.scale();
        [
            self.target[0] + (pixel[0] - self.width / 2.0) / scale,
            self.target[1] + (pixel[1] - self.height / 2.0) / scale,
        ]
    }

    /// World-space bounding box `[min_x, min_y, max_x, max_y]` of the canvas.
    pub fn world_bounds(&self) -> [f64; 4] {
        let corners = [
            self.unproject([0.0, 0.0]),
            self.unproject([self.width, 0.0]),
            self.unproject([0.0, self.height]),
            self.unproject([self.width, self.height]),
        ];
        let mut bounds = [f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY];
        for [x, y] in corners {
            bounds[0] = bounds[0].min(x);
            bounds[1] = bounds[1].min(y);
            bounds[2] = bounds[2].max(x);
            bounds[3] = bounds[3].max(y);
        }
        bounds
    }
}

/// Address of one raster tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tile {
    /// Column, 0 at west
    pub x: u32,
    /// Row, 0 at north
    pub y: u32,
    /// Zoom level (0 is full resolution, negative is downsampled)
    pub z: i32,
}

impl Tile {
    pub fn new(x: u32, y: u32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// World-pixel extent of the tile.
    pub fn bounding_box(&self, tile_size: u32) -> TileBounds {
        let span = effective_tile_size(tile_size, self.z);
        TileBounds {
            west: self.x as f64 * span,
            north: self.y as f64 * span,
            east: (self.x as f64 + 1.0) * span,
            south: (self.y as f64 + 1.0) * span,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// Extent of a tile in world pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileBounds {
    pub west: f64,
    pub north: f64,
    pub east: f64,
    pub south: f64,
}

/// World pixels covered by one tile edge at zoom `z`.
#[inline]
pub fn effective_tile_size(tile_size: u32, z: i32) -> f64 {
    tile_size as f64 * 2.0_f64.powi(-z)
}

/// Shape of a tiled raster pyramid.
///
/// Deserializing goes through [`TileGrid::new`], so a parsed grid has a
/// valid zoom range and tile size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TileGridFields")]
pub struct TileGrid {
    /// Coarsest level
    pub min_zoom: i32,
    /// Finest level
    pub max_zoom: i32,
    /// Tile edge in pixels
    pub tile_size: u32,
    /// Columns available
    pub grid_width: u32,
    /// Rows available
    pub grid_height: u32,
}

impl TileGrid {
    /// Validate and create a grid.
    pub fn new(
        min_zoom: i32,
        max_zoom: i32,
        tile_size: u32,
        grid_width: u32,
        grid_height: u32,
    ) -> Result<Self, TileError> {
        if min_zoom > max_zoom {
            return Err(TileError::InvalidZoomRange { min_zoom, max_zoom });
        }
        if tile_size == 0 {
            return Err(TileError::InvalidTileSize(tile_size));
        }
        Ok(Self {
            min_zoom,
            max_zoom,
            tile_size,
            grid_width,
            grid_height,
        })
    }

    /// Zoom range with an inverted range collapsed onto `min_zoom`.
    pub(crate) fn zoom_range(&self) -> (i32, i32) {
        (self.min_zoom, self.max_zoom.max(self.min_zoom))
    }

    /// Whether a tile lies inside the grid and its zoom range.
    pub fn contains(&self, tile: &Tile) -> bool {
        tile.x < self.grid_width
            && tile.y < self.grid_height
            && (self.min_zoom..=self.max_zoom).contains(&tile.z)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TileGridFields {
    min_zoom: i32,
    max_zoom: i32,
    tile_size: u32,
    grid_width: u32,
    grid_height: u32,
}

impl TryFrom<TileGridFields> for TileGrid {
    type Error = TileError;

    fn try_from(f: TileGridFields) -> Result<Self, Self::Error> {
        TileGrid::new(f.min_zoom, f.max_zoom, f.tile_size, f.grid_width, f.grid_height)
    }
}

/// Errors for tile grid construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileError {
    /// min_zoom is above max_zoom
    InvalidZoomRange { min_zoom: i32, max_zoom: i32 },
    /// Tile size must be positive
    InvalidTileSize(u32),
}

impl fmt::Display for TileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileError::InvalidZoomRange { min_zoom, max_zoom } => {
                write!(
                    f,
                    "Invalid zoom range: min zoom {} is above max zoom {}",
                    min_zoom, max_zoom
                )
            }
            TileError::InvalidTileSize(size) => {
                write!(f, "Invalid tile size: {} (must be positive)", size)
            }
        }
    }
}

impl std::error::Error for TileError {}
