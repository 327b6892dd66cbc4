//! Quadtree queries over a points file.
//!
//! A points file is JSON in one of three shapes:
//!
//! - an array of `[x, y]` pairs (ids are the array indices)
//! - an object of id → `[x, y]`
//! - a `cells` file, with `--mapping <name>` or `--spatial` choosing the
//!   coordinates

use std::path::PathBuf;

use clap::Args;
use serde_json::Value;
use tracing::debug;
use vizlink::config::Settings;
use vizlink::quadtree::{QuadtreeBuilder, QuadtreeIndex, Region};
use vizlink::views::{index_cells, parse_cells, CellEntry, CellPosition};

use crate::error::CliError;

/// Where to read points from.
#[derive(Debug, Args)]
pub struct PointsArgs {
    /// JSON points or cells file
    pub points: PathBuf,

    /// Read a cells file, using this embedding's coordinates
    #[arg(long, conflicts_with = "spatial")]
    pub mapping: Option<String>,

    /// Read a cells file, using the spatial `xy` coordinates
    #[arg(long)]
    pub spatial: bool,
}

/// Arguments of `vizlink nearest`.
#[derive(Debug, Args)]
pub struct NearestArgs {
    #[command(flatten)]
    pub source: PointsArgs,

    #[arg(long, allow_negative_numbers = true)]
    pub x: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub y: f64,

    /// Search radius (inclusive)
    #[arg(long, default_value = "inf")]
    pub radius: f64,
}

/// Arguments of `vizlink region`.
#[derive(Debug, Args)]
pub struct RegionArgs {
    #[command(flatten)]
    pub source: PointsArgs,

    #[arg(long, allow_negative_numbers = true)]
    pub min_x: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub min_y: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub max_x: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub max_y: f64,
}

/// Print the point nearest to (x, y) within the radius.
pub fn run_nearest(args: NearestArgs, settings: &Settings) -> Result<(), CliError> {
    let index = load_index(&args.source, settings)?;
    match index.try_find_nearest(args.x, args.y, args.radius)? {
        Some((id, Some([x, y]))) => println!("{}\t{}\t{}", id, x, y),
        _ => eprintln!("No point within {} of ({}, {})", args.radius, args.x, args.y),
    }
    Ok(())
}

/// Print every point inside the region.
pub fn run_region(args: RegionArgs, settings: &Settings) -> Result<(), CliError> {
    let index = load_index(&args.source, settings)?;
    let region = Region::new(args.min_x, args.min_y, args.max_x, args.max_y);

    let mut count = 0usize;
    index.try_visit(&region, |(id, _), [x, y]| {
        println!("{}\t{}\t{}", id, x, y);
        count += 1;
    })?;
    eprintln!("{} of {} point(s) in region", count, index.len());
    Ok(())
}

fn load_index(args: &PointsArgs, settings: &Settings) -> Result<QuadtreeIndex<CellEntry>, CliError> {
    let points_error = |reason: String| CliError::Points {
        path: args.points.clone(),
        reason,
    };
    let content = std::fs::read_to_string(&args.points).map_err(|e| points_error(e.to_string()))?;
    let value: Value = serde_json::from_str(&content).map_err(|e| points_error(e.to_string()))?;
    let min_cell_size = settings.quadtree.min_cell_size;

    let position = match (&args.mapping, args.spatial) {
        (Some(name), _) => Some(CellPosition::Mapping(name.clone())),
        (None, true) => Some(CellPosition::Spatial),
        (None, false) => None,
    };

    let index = match position {
        Some(position) => {
            let cells = parse_cells(&value).map_err(|e| points_error(e.to_string()))?;
            index_cells(&cells, &position, min_cell_size)
        }
        None => {
            let entries = parse_points(&value).map_err(points_error)?;
            QuadtreeBuilder::new()
                .min_cell_size(min_cell_size)
                .build(entries, |(_, p): &CellEntry| *p)
        }
    };
    debug!(
        path = %args.points.display(),
        indexed = index.len(),
        skipped = index.skipped(),
        "Built point index"
    );
    Ok(index)
}

/// Decode an array of `[x, y]` or an object of id → `[x, y]`.
pub fn parse_points(value: &Value) -> Result<Vec<CellEntry>, String> {
    let point = |id: &str, v: &Value| -> Result<CellEntry, String> {
        serde_json::from_value::<[f64; 2]>(v.clone())
            .map(|p| (id.to_string(), Some(p)))
            .map_err(|_| format!("point '{}' is not an [x, y] pair", id))
    };
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| point(&i.to_string(), v))
            .collect(),
        Value::Object(map) => map.iter().map(|(id, v)| point(id, v)).collect(),
        _ => Err("expected an array or object of points".to_string()),
    }
}
