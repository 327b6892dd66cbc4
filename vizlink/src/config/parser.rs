//! INI parsing logic for converting `Ini` → `Settings`.

use std::path::PathBuf;

use ini::Ini;

use super::file::SettingsError;
use super::keys::{SettingKey, SettingKeyError};
use super::settings::Settings;

/// Parse an `Ini` object into `Settings`.
///
/// Starts from `Settings::default()` and overlays any values found in the
/// INI. Empty values keep the default.
pub(super) fn parse_ini(ini: &Ini) -> Result<Settings, SettingsError> {
    let mut settings = Settings::default();

    for key in SettingKey::all() {
        let Some(section) = ini.section(Some(key.section())) else {
            continue;
        };
        let Some(value) = section.get(key.key_name()) else {
            continue;
        };
        if value.trim().is_empty() {
            continue;
        }
        key.set(&mut settings, value).map_err(|e| {
            let reason = match e {
                SettingKeyError::ValidationFailed { reason, .. } => reason,
                other => other.to_string(),
            };
            invalid(*key, value, reason)
        })?;
    }

    if settings.tiles.min_zoom > settings.tiles.max_zoom {
        return Err(invalid(
            SettingKey::TilesMinZoom,
            &settings.tiles.min_zoom.to_string(),
            format!("must not exceed max_zoom ({})", settings.tiles.max_zoom),
        ));
    }

    Ok(settings)
}

fn invalid(key: SettingKey, value: &str, reason: String) -> SettingsError {
    SettingsError::InvalidValue {
        section: key.section().to_string(),
        key: key.key_name().to_string(),
        value: value.to_string(),
        reason,
    }
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<Settings, SettingsError> {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, content).unwrap();
        Settings::load_from(&config_path)
    }

    #[test]
    fn test_partial_config() {
        let settings = load(
            r#"
[tiles]
tile_size = 256
"#,
        )
        .unwrap();

        assert_eq!(settings.tiles.tile_size, 256);
        assert_eq!(settings.tiles.min_zoom, DEFAULT_MIN_ZOOM);
        assert_eq!(settings.logging.file, DEFAULT_LOG_FILE);
    }

    #[test]
    fn test_full_config() {
        let settings = load(
            r#"
[logging]
directory = /tmp/vizlink-logs
file = session.log

[tiles]
tile_size = 1024
min_zoom = -4
max_zoom = 1

[quadtree]
min_cell_size = 0.25
"#,
        )
        .unwrap();

        assert_eq!(settings.logging.directory, PathBuf::from("/tmp/vizlink-logs"));
        assert_eq!(settings.logging.file, "session.log");
        assert_eq!(settings.tiles.tile_size, 1024);
        assert_eq!(settings.tiles.min_zoom, -4);
        assert_eq!(settings.tiles.max_zoom, 1);
        assert_eq!(settings.quadtree.min_cell_size, 0.25);
    }

    #[test]
    fn test_empty_value_keeps_default() {
        let settings = load("[logging]\nfile =\n").unwrap();
        assert_eq!(settings.logging.file, DEFAULT_LOG_FILE);
    }

    #[test]
    fn test_invalid_tile_size() {
        let err = load("[tiles]\ntile_size = big\n").unwrap_err();
        match err {
            SettingsError::InvalidValue {
                section,
                key,
                value,
                reason,
            } => {
                assert_eq!(section, "tiles");
                assert_eq!(key, "tile_size");
                assert_eq!(value, "big");
                assert!(reason.contains("positive integer"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_inverted_zoom_range() {
        let err = load("[tiles]\nmin_zoom = 2\nmax_zoom = 0\n").unwrap_err();
        assert!(err.to_string().contains("tiles.min_zoom"));
        assert!(err.to_string().contains("max_zoom"));
    }

    #[test]
    fn test_invalid_min_cell_size() {
        let err = load("[quadtree]\nmin_cell_size = -3\n").unwrap_err();
        assert!(err.to_string().contains("min_cell_size"));
    }

    #[test]
    fn test_expand_tilde() {
        let path = expand_tilde("~/test/path");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(path, home.join("test/path"));
        }

        // Non-tilde paths should be unchanged
        let path = expand_tilde("/absolute/path");
        assert_eq!(path, PathBuf::from("/absolute/path"));
    }
}
