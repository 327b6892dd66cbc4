//! Coordinated view state ↔ viewport.

use serde_json::{json, Value};

use crate::coordination::{CoordinationSnapshot, CoordinationType, ViewKind};
use crate::tiling::Viewport;

/// Zoom and target coordination types of a view kind.
///
/// The heatmap zooms each axis separately; its X zoom drives the viewport.
fn view_state_types(kind: ViewKind) -> Option<[CoordinationType; 3]> {
    use CoordinationType::*;
    match kind {
        ViewKind::Scatterplot => Some([EmbeddingZoom, EmbeddingTargetX, EmbeddingTargetY]),
        ViewKind::Spatial => Some([SpatialZoom, SpatialTargetX, SpatialTargetY]),
        ViewKind::Heatmap => Some([HeatmapZoomX, HeatmapTargetX, HeatmapTargetY]),
        _ => None,
    }
}

/// Viewport of a view from its bound coordination values.
///
/// Unset (null) values read as 0. Returns `None` for kinds without a
/// view state.
pub fn viewport_from_snapshot(
    snapshot: &CoordinationSnapshot,
    kind: ViewKind,
    width: f64,
    height: f64,
) -> Option<Viewport> {
    let [zoom, target_x, target_y] = view_state_types(kind)?;
    let read = |t| snapshot.get_f64(t).unwrap_or(0.0);
    Some(Viewport::new(
        [read(target_x), read(target_y)],
        read(zoom),
        width,
        height,
    ))
}

/// Coordination updates that move a view to `zoom` and `target`.
///
/// Apply them with [`Binding::set_many`](crate::coordination::Binding::set_many)
/// so every sibling view sees the whole change at once.
pub fn view_state_updates(kind: ViewKind, zoom: f64, target: [f64; 2]) -> Vec<(CoordinationType, Value)> {
    let Some([zoom_type, target_x, target_y]) = view_state_types(kind) else {
        return Vec::new();
    };
    let mut updates = vec![
        (zoom_type, json!(zoom)),
        (target_x, json!(target[0])),
        (target_y, json!(target[1])),
    ];
    if kind == ViewKind::Heatmap {
        updates.push((CoordinationType::HeatmapZoomY, json!(zoom)));
    }
    updates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordination::{CoordinationScopes, CoordinationSpace, ScopeBinding};

    fn heatmap_binding(space: &CoordinationSpace) -> crate::coordination::Binding {
        let required = ViewKind::Heatmap.coordination_types();
        let mut scopes = CoordinationScopes::new();
        for &t in required {
            space.declare_scope(t, "A", t.default_value());
            scopes.insert(t, "A");
        }
        ScopeBinding::bind(space, required, &scopes).unwrap()
    }

    #[test]
    fn test_viewport_defaults_to_origin() {
        let space = CoordinationSpace::new();
        let binding = heatmap_binding(&space);
        let viewport = viewport_from_snapshot(&binding.snapshot(), ViewKind::Heatmap, 800.0, 600.0)
            .unwrap();
        assert_eq!(viewport, Viewport::new([0.0, 0.0], 0.0, 800.0, 600.0));
    }

    #[test]
    fn test_updates_move_viewport_atomically() {
        let space = CoordinationSpace::new();
        let binding = heatmap_binding(&space);

        binding
            .set_many(view_state_updates(ViewKind::Heatmap, -1.5, [100.0, 40.0]))
            .unwrap();

        let snapshot = binding.snapshot();
        assert_eq!(snapshot.get_f64(CoordinationType::HeatmapZoomY), Some(-1.5));
        let viewport = viewport_from_snapshot(&snapshot, ViewKind::Heatmap, 10.0, 10.0).unwrap();
        assert_eq!(viewport.zoom, -1.5);
        assert_eq!(viewport.target, [100.0, 40.0]);
    }

    #[test]
    fn test_kinds_without_view_state() {
        let snapshot = CoordinationSnapshot::default();
        assert!(viewport_from_snapshot(&snapshot, ViewKind::Genes, 1.0, 1.0).is_none());
        assert!(view_state_updates(ViewKind::Status, 0.0, [0.0, 0.0]).is_empty());
    }
}
