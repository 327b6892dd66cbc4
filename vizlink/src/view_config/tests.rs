//! Tests for view configuration documents

use super::*;
use crate::coordination::{CoordinationType, ScopeBinding, ViewKind};
use serde_json::{json, Value};

const LINKED: &str = r#"{
  "version": "1.0.0",
  "name": "Linked views",
  "description": "Spatial and scatterplot sharing a selection",
  "public": true,
  "datasets": [
    {
      "uid": "linnarsson",
      "name": "Linnarsson",
      "files": [
        { "type": "cells", "fileType": "cells.json", "url": "https://example.org/cells.json" },
        { "type": "raster", "fileType": "raster.json", "url": "https://example.org/raster.json",
          "requestInit": { "mode": "cors" } }
      ]
    }
  ],
  "coordinationSpace": {
    "dataset": { "A": "linnarsson" },
    "embeddingType": { "A": "t-SNE" },
    "spatialZoom": { "A": -5.5 },
    "spatialTargetX": { "A": 16000 },
    "cellSelection": { "A": null },
    "cellHighlight": { "A": null, "B": "cell_3" }
  },
  "layout": [
    {
      "component": "spatial",
      "uid": "spatial-1",
      "coordinationScopes": {
        "dataset": "A",
        "spatialZoom": "A",
        "spatialTargetX": "A",
        "cellSelection": "A",
        "cellHighlight": "A"
      },
      "x": 0, "y": 0, "w": 6, "h": 6,
      "props": { "view": { "zoom": -5.5 } }
    },
    {
      "component": "scatterplot",
      "uid": "scatter-1",
      "coordinationScopes": {
        "dataset": "A",
        "embeddingType": "A",
        "cellSelection": "A",
        "cellHighlight": "B"
      },
      "x": 6, "y": 0, "w": 6, "h": 6
    }
  ]
}"#;

fn linked() -> ViewConfig {
    ViewConfig::from_json(LINKED).unwrap()
}

// =========================================================================
// Parsing and round trip
// =========================================================================

#[test]
fn test_parse_fields() {
    let config = linked();
    assert_eq!(config.name, "Linked views");
    assert_eq!(config.datasets.len(), 1);
    assert_eq!(config.datasets[0].files[1].data_type, "raster");
    assert_eq!(config.layout.len(), 2);
    assert_eq!(config.view("scatter-1").unwrap().w, 6);
    assert_eq!(config.coordination_space["spatialZoom"]["A"], json!(-5.5));
}

#[test]
fn test_round_trip_is_lossless() {
    let config = linked();
    let json = config.to_json().unwrap();
    let reparsed = ViewConfig::from_json(&json).unwrap();
    assert_eq!(reparsed, config);

    let original: Value = serde_json::from_str(LINKED).unwrap();
    let written: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(written, original);
}

#[test]
fn test_unknown_keys_survive() {
    let config = linked();
    assert_eq!(config.extra["public"], json!(true));
    assert_eq!(
        config.datasets[0].files[1].extra["requestInit"],
        json!({"mode": "cors"})
    );
}

#[test]
fn test_space_round_trip_through_coordination_space() {
    let mut config = linked();
    let space = config.coordination_space().unwrap();
    let before = config.coordination_space.clone();

    config.set_coordination_space(&space);
    assert_eq!(config.coordination_space, before);

    let reparsed = ViewConfig::from_json(&config.to_json().unwrap()).unwrap();
    let space2 = reparsed.coordination_space().unwrap();
    for t in space.types() {
        for scope in space.scope_names(t) {
            assert_eq!(
                space.try_get_value(t, &scope),
                space2.try_get_value(t, &scope),
                "{}/{}",
                t,
                scope
            );
        }
    }
}

#[test]
fn test_set_coordination_space_captures_edits() {
    let mut config = linked();
    let space = config.coordination_space().unwrap();
    space.set_value(CoordinationType::CellSelection, "A", json!(["cell_1", "cell_2"]));

    config.set_coordination_space(&space);
    assert_eq!(
        config.coordination_space["cellSelection"]["A"],
        json!(["cell_1", "cell_2"])
    );
}

#[test]
fn test_invalid_json() {
    let err = ViewConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ViewConfigError::Parse(_)));
}

#[test]
fn test_load_from_missing_file() {
    let err = ViewConfig::load_from(std::path::Path::new("/nonexistent/vizlink.json")).unwrap_err();
    assert!(matches!(err, ViewConfigError::ReadError { .. }));
}

// =========================================================================
// Validation
// =========================================================================

#[test]
fn test_validate_ok() {
    linked().validate().unwrap();
}

#[test]
fn test_validate_rejects_bad_version() {
    let mut config = linked();
    config.version = "2.0.0".to_string();
    assert!(matches!(config.validate(), Err(ViewConfigError::Version { .. })));

    config.version = "one".to_string();
    assert!(matches!(config.validate(), Err(ViewConfigError::Version { .. })));
}

#[test]
fn test_validate_rejects_undeclared_scope() {
    let mut config = linked();
    config.layout[1]
        .coordination_scopes
        .insert("embeddingType".to_string(), "Z".to_string());

    let err = config.validate().unwrap_err();
    let source = err.coordination_error().unwrap();
    assert!(source.is_configuration());
    assert!(err.to_string().contains("scatter-1"));
}

#[test]
fn test_validate_rejects_unknown_type_name() {
    let mut config = linked();
    config
        .coordination_space
        .insert("spatialWobble".to_string(), Default::default());
    let err = config.validate().unwrap_err();
    assert!(err.coordination_error().unwrap().is_configuration());
}

#[test]
fn test_validate_rejects_unknown_component() {
    let mut config = linked();
    config.layout[0].component = "teapot".to_string();
    assert!(matches!(
        config.validate(),
        Err(ViewConfigError::UnknownComponent { .. })
    ));
}

#[test]
fn test_validate_rejects_duplicate_uid() {
    let mut config = linked();
    config.layout[1].uid = "spatial-1".to_string();
    assert!(matches!(config.validate(), Err(ViewConfigError::DuplicateView(_))));
}

// =========================================================================
// Auto scopes
// =========================================================================

#[test]
fn test_auto_scopes_complete_every_view() {
    let config = linked().with_auto_scopes().unwrap();
    config.validate().unwrap();

    let space = config.coordination_space().unwrap();
    for view in &config.layout {
        let kind = view.kind().unwrap();
        let scopes = view.coordination_scopes().unwrap();
        ScopeBinding::bind(&space, kind.coordination_types(), &scopes).unwrap();
    }
}

#[test]
fn test_auto_scopes_keep_existing() {
    let config = linked().with_auto_scopes().unwrap();
    let scatter = config.view("scatter-1").unwrap();
    assert_eq!(scatter.coordination_scopes["cellHighlight"], "B");
    assert_eq!(scatter.coordination_scopes["embeddingZoom"], "A");
    // Existing values are never overwritten
    assert_eq!(config.coordination_space["spatialZoom"]["A"], json!(-5.5));
    assert_eq!(config.coordination_space["embeddingZoom"]["A"], json!(0.0));
}

#[test]
fn test_without_auto_scopes_binding_reports_missing_scope() {
    let config = linked();
    let space = config.coordination_space().unwrap();
    let view = config.view("spatial-1").unwrap();
    let err = ScopeBinding::bind(
        &space,
        ViewKind::Spatial.coordination_types(),
        &view.coordination_scopes().unwrap(),
    )
    .unwrap_err();
    assert!(err.is_missing_scope());
}

#[test]
fn test_new_view_component() {
    let mut config = ViewConfig::default();
    config.layout.push(ViewComponent::new(ViewKind::Heatmap, "heatmap-1"));
    let config = config.with_auto_scopes().unwrap();
    config.validate().unwrap();
    assert_eq!(
        config.view("heatmap-1").unwrap().coordination_scopes.len(),
        ViewKind::Heatmap.coordination_types().len()
    );
}
