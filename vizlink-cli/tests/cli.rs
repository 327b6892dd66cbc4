//! Integration tests for the `vizlink` binary.
//!
//! Each test runs the compiled binary with `HOME` pointed at a temporary
//! directory, so settings and log files never touch the real home.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const CONFIG: &str = r#"{
  "version": "1.0.0",
  "name": "CLI fixture",
  "datasets": [
    { "uid": "d1", "name": "Dataset", "files": [
      { "type": "cells", "url": "cells.json" }
    ] }
  ],
  "coordinationSpace": {
    "dataset": { "A": "d1" },
    "spatialZoom": { "A": -2.0, "B": 0.0 }
  },
  "layout": [
    { "component": "spatial", "uid": "spatial-1",
      "coordinationScopes": { "dataset": "A", "spatialZoom": "A" } },
    { "component": "spatial", "uid": "spatial-2",
      "coordinationScopes": { "dataset": "A", "spatialZoom": "B" } }
  ]
}"#;

fn vizlink(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vizlink"))
        .args(args)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run vizlink")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// =========================================================================
// View configs
// =========================================================================

#[test]
fn test_validate_binds_every_view() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.json");
    fs::write(&config, CONFIG).unwrap();

    let output = vizlink(home.path(), &["validate", config.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("spatial-1"));
    assert!(out.contains("spatial-2"));
    assert!(out.contains("OK: version 1.0.0, 2 view(s) bound, 1 local data file(s)"));
}

#[test]
fn test_validate_rejects_undeclared_scope() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.json");
    fs::write(&config, CONFIG.replace("\"spatialZoom\": \"B\"", "\"spatialZoom\": \"C\"")).unwrap();

    let output = vizlink(home.path(), &["validate", config.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("spatial-2"), "stderr: {}", err);
    assert!(err.contains("coordinationSpace"));
}

#[test]
fn test_validate_missing_file() {
    let home = TempDir::new().unwrap();
    let output = vizlink(home.path(), &["validate", "does-not-exist.json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to read view config"));
}

#[test]
fn test_scopes_lists_space_and_views() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.json");
    fs::write(&config, CONFIG).unwrap();

    let output = vizlink(home.path(), &["scopes", config.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("spatialZoom"));
    assert!(out.contains("-2.0"));
    assert!(out.contains("spatial-2 (spatial)"));
}

// =========================================================================
// Tiles
// =========================================================================

#[test]
fn test_tiles_at_full_resolution() {
    let home = TempDir::new().unwrap();
    let output = vizlink(
        home.path(),
        &[
            "tiles", "--target-x", "512", "--target-y", "512", "--zoom", "0", "--width", "1024",
            "--height", "1024", "--grid-width", "4", "--grid-height", "4", "--tile-size", "512",
            "--min-zoom", "-3", "--max-zoom", "0",
        ],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "0/0/0\n0/1/0\n0/0/1\n0/1/1\n");
}

#[test]
fn test_tiles_below_min_zoom() {
    let home = TempDir::new().unwrap();
    let output = vizlink(
        home.path(),
        &[
            "tiles", "--target-x", "9000", "--target-y", "-40", "--zoom", "-6",
            "--grid-width", "4", "--grid-height", "4", "--min-zoom", "-3", "--max-zoom", "0",
        ],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "-3/0/0\n");
}

#[test]
fn test_tiles_invalid_grid() {
    let home = TempDir::new().unwrap();
    let output = vizlink(
        home.path(),
        &[
            "tiles", "--target-x", "0", "--target-y", "0", "--zoom", "0", "--grid-width", "1",
            "--grid-height", "1", "--min-zoom", "2", "--max-zoom", "0",
        ],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid tile grid"));
}

// =========================================================================
// Spatial queries
// =========================================================================

fn write_corners(dir: &Path) -> String {
    let points = dir.join("points.json");
    fs::write(
        &points,
        r#"{"a": [0, 0], "b": [10, 0], "c": [0, 10], "d": [10, 10]}"#,
    )
    .unwrap();
    points.to_str().unwrap().to_string()
}

#[test]
fn test_region_query() {
    let home = TempDir::new().unwrap();
    let points = write_corners(home.path());

    let output = vizlink(
        home.path(),
        &["region", &points, "--min-x", "0", "--min-y", "0", "--max-x", "4.999", "--max-y", "4.999"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "a\t0\t0\n");
}

#[test]
fn test_region_rejects_inverted_region() {
    let home = TempDir::new().unwrap();
    let points = write_corners(home.path());

    let output = vizlink(
        home.path(),
        &["region", &points, "--min-x", "5", "--min-y", "0", "--max-x", "1", "--max-y", "1"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid query"));
}

#[test]
fn test_nearest_query() {
    let home = TempDir::new().unwrap();
    let points = write_corners(home.path());

    let output = vizlink(
        home.path(),
        &["nearest", &points, "--x", "9", "--y", "8", "--radius", "5"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "d\t10\t10\n");

    let output = vizlink(
        home.path(),
        &["nearest", &points, "--x", "5", "--y", "5", "--radius", "1"],
    );
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
    assert!(stderr(&output).contains("No point within"));
}

#[test]
fn test_nearest_over_cells_file() {
    let home = TempDir::new().unwrap();
    let cells = home.path().join("cells.json");
    fs::write(
        &cells,
        r#"{"cell_1": {"mappings": {"UMAP": [1, 1]}, "xy": [100, 100]},
            "cell_2": {"mappings": {"UMAP": [50, 50]}, "xy": [2, 2]}}"#,
    )
    .unwrap();
    let cells = cells.to_str().unwrap();

    let output = vizlink(home.path(), &["nearest", cells, "--mapping", "UMAP", "--x", "0", "--y", "0"]);
    assert!(stdout(&output).starts_with("cell_1\t"));

    let output = vizlink(home.path(), &["nearest", cells, "--spatial", "--x", "0", "--y", "0"]);
    assert!(stdout(&output).starts_with("cell_2\t"));
}

// =========================================================================
// Settings
// =========================================================================

#[test]
fn test_config_set_get_and_path() {
    let home = TempDir::new().unwrap();

    let output = vizlink(home.path(), &["config", "set", "tiles.tile_size", "256"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(home.path().join(".vizlink").join("config.ini").exists());

    let output = vizlink(home.path(), &["config", "get", "tiles.tile_size"]);
    assert_eq!(stdout(&output), "256\n");

    let output = vizlink(home.path(), &["config", "path"]);
    assert!(stdout(&output).trim_end().ends_with("config.ini"));
}

#[test]
fn test_config_set_rejects_bad_value() {
    let home = TempDir::new().unwrap();
    let output = vizlink(home.path(), &["config", "set", "tiles.tile_size", "0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("positive integer"));
}

#[test]
fn test_config_list() {
    let home = TempDir::new().unwrap();
    let output = vizlink(home.path(), &["config", "list"]);
    let out = stdout(&output);
    assert!(out.contains("[tiles]"));
    assert!(out.contains("  min_zoom = -8"));
    assert!(out.contains("[quadtree]"));
}
