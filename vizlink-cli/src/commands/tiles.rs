//! Visible tile computation for a viewport.

use clap::Args;
use vizlink::config::Settings;
use vizlink::tiling::{compute_visible_tiles, effective_zoom, TileGrid, Viewport};

use crate::error::CliError;

/// Arguments of `vizlink tiles`.
#[derive(Debug, Args)]
pub struct TilesArgs {
    /// Viewport center, world X
    #[arg(long, allow_negative_numbers = true)]
    pub target_x: f64,

    /// Viewport center, world Y
    #[arg(long, allow_negative_numbers = true)]
    pub target_y: f64,

    /// Viewport zoom (log2 scale, 0 is full resolution)
    #[arg(long, allow_negative_numbers = true)]
    pub zoom: f64,

    /// Canvas width in pixels
    #[arg(long, default_value = "1024")]
    pub width: f64,

    /// Canvas height in pixels
    #[arg(long, default_value = "768")]
    pub height: f64,

    /// Raster columns at full resolution
    #[arg(long)]
    pub grid_width: u32,

    /// Raster rows at full resolution
    #[arg(long)]
    pub grid_height: u32,

    /// Tile edge in pixels (default from settings)
    #[arg(long)]
    pub tile_size: Option<u32>,

    /// Most downsampled zoom level (default from settings)
    #[arg(long, allow_negative_numbers = true)]
    pub min_zoom: Option<i32>,

    /// Full-resolution zoom level (default from settings)
    #[arg(long, allow_negative_numbers = true)]
    pub max_zoom: Option<i32>,
}

/// Print the tiles covering the viewport, one `z/x/y` per line.
pub fn run(args: TilesArgs, settings: &Settings) -> Result<(), CliError> {
    let grid = TileGrid::new(
        args.min_zoom.unwrap_or(settings.tiles.min_zoom),
        args.max_zoom.unwrap_or(settings.tiles.max_zoom),
        args.tile_size.unwrap_or(settings.tiles.tile_size),
        args.grid_width,
        args.grid_height,
    )?;
    let viewport = Viewport::new(
        [args.target_x, args.target_y],
        args.zoom,
        args.width,
        args.height,
    );

    let tiles = compute_visible_tiles(&viewport, &grid);
    eprintln!(
        "{} tile(s) at zoom {}",
        tiles.len(),
        effective_zoom(viewport.zoom, &grid)
    );
    for tile in tiles {
        println!("{}", tile);
    }
    Ok(())
}
