//! INI serialization logic for converting `Settings` → INI string.

use std::path::Path;

use super::settings::Settings;

/// Convert `Settings` to a commented INI string for saving.
pub(super) fn to_config_string(settings: &Settings) -> String {
    format!(
        r#"[logging]
; Directory holding the log file (default: ~/.vizlink)
directory = {}
; Log file name (default: vizlink.log)
file = {}

[tiles]
; Raster tile edge in pixels at full resolution (default: 512)
tile_size = {}
; Most downsampled zoom level; each level down halves the resolution (default: -8)
min_zoom = {}
; Full-resolution zoom level (default: 0)
max_zoom = {}

[quadtree]
; Quadtree nodes at or below this edge length are not split (default: 0, split until points separate)
min_cell_size = {}
"#,
        path_to_string(&settings.logging.directory),
        settings.logging.file,
        settings.tiles.tile_size,
        settings.tiles.min_zoom,
        settings.tiles.max_zoom,
        settings.quadtree.min_cell_size,
    )
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
