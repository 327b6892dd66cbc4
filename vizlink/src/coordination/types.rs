//! Coordination type definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::error::CoordinationError;

/// Scope name used when a view does not declare one.
pub const DEFAULT_SCOPE: &str = "A";

/// A category of shared view state.
///
/// Serialized with the camelCase names used in view configuration
/// documents (`heatmapZoomX`, `cellSelection`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CoordinationType {
    /// Dataset uid a view reads from
    Dataset,
    /// Embedding mapping name (UMAP, t-SNE, PCA)
    EmbeddingType,
    /// Scatterplot zoom level
    EmbeddingZoom,
    /// Scatterplot target X
    EmbeddingTargetX,
    /// Scatterplot target Y
    EmbeddingTargetY,
    /// Spatial view zoom level
    SpatialZoom,
    /// Spatial view target X
    SpatialTargetX,
    /// Spatial view target Y
    SpatialTargetY,
    /// Spatial raster/cell/molecule layer definitions
    SpatialLayers,
    /// Heatmap zoom along X
    HeatmapZoomX,
    /// Heatmap zoom along Y
    HeatmapZoomY,
    /// Heatmap target X
    HeatmapTargetX,
    /// Heatmap target Y
    HeatmapTargetY,
    /// Cells passing the current filter
    CellFilter,
    /// Hovered cell
    CellHighlight,
    /// Selected cells
    CellSelection,
    /// Selected cell sets
    CellSetSelection,
    /// Hovered cell set
    CellSetHighlight,
    /// How cells are colored (`geneSelection` or `cellSetSelection`)
    CellColorEncoding,
    /// Genes passing the current filter
    GeneFilter,
    /// Hovered gene
    GeneHighlight,
    /// Selected genes
    GeneSelection,
}

impl CoordinationType {
    /// Every coordination type, in declaration order.
    pub const ALL: [CoordinationType; 22] = [
        CoordinationType::Dataset,
        CoordinationType::EmbeddingType,
        CoordinationType::EmbeddingZoom,
        CoordinationType::EmbeddingTargetX,
        CoordinationType::EmbeddingTargetY,
        CoordinationType::SpatialZoom,
        CoordinationType::SpatialTargetX,
        CoordinationType::SpatialTargetY,
        CoordinationType::SpatialLayers,
        CoordinationType::HeatmapZoomX,
        CoordinationType::HeatmapZoomY,
        CoordinationType::HeatmapTargetX,
        CoordinationType::HeatmapTargetY,
        CoordinationType::CellFilter,
        CoordinationType::CellHighlight,
        CoordinationType::CellSelection,
        CoordinationType::CellSetSelection,
        CoordinationType::CellSetHighlight,
        CoordinationType::CellColorEncoding,
        CoordinationType::GeneFilter,
        CoordinationType::GeneHighlight,
        CoordinationType::GeneSelection,
    ];

    /// Name used in view configuration documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            CoordinationType::Dataset => "dataset",
            CoordinationType::EmbeddingType => "embeddingType",
            CoordinationType::EmbeddingZoom => "embeddingZoom",
            CoordinationType::EmbeddingTargetX => "embeddingTargetX",
            CoordinationType::EmbeddingTargetY => "embeddingTargetY",
            CoordinationType::SpatialZoom => "spatialZoom",
            CoordinationType::SpatialTargetX => "spatialTargetX",
            CoordinationType::SpatialTargetY => "spatialTargetY",
            CoordinationType::SpatialLayers => "spatialLayers",
            CoordinationType::HeatmapZoomX => "heatmapZoomX",
            CoordinationType::HeatmapZoomY => "heatmapZoomY",
            CoordinationType::HeatmapTargetX => "heatmapTargetX",
            CoordinationType::HeatmapTargetY => "heatmapTargetY",
            CoordinationType::CellFilter => "cellFilter",
            CoordinationType::CellHighlight => "cellHighlight",
            CoordinationType::CellSelection => "cellSelection",
            CoordinationType::CellSetSelection => "cellSetSelection",
            CoordinationType::CellSetHighlight => "cellSetHighlight",
            CoordinationType::CellColorEncoding => "cellColorEncoding",
            CoordinationType::GeneFilter => "geneFilter",
            CoordinationType::GeneHighlight => "geneHighlight",
            CoordinationType::GeneSelection => "geneSelection",
        }
    }

    /// Name of the bound setter for this type, e.g. `setHeatmapZoomX`.
    pub fn setter_name(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => format!("set{}{}", first.to_ascii_uppercase(), chars.as_str()),
            None => String::from("set"),
        }
    }

    /// Value a scope of this type holds before anything sets it.
    pub fn default_value(&self) -> Value {
        match self {
            CoordinationType::EmbeddingZoom
            | CoordinationType::SpatialZoom
            | CoordinationType::HeatmapZoomX
            | CoordinationType::HeatmapZoomY => json!(0.0),
            CoordinationType::EmbeddingTargetX
            | CoordinationType::EmbeddingTargetY
            | CoordinationType::SpatialTargetX
            | CoordinationType::SpatialTargetY
            | CoordinationType::HeatmapTargetX
            | CoordinationType::HeatmapTargetY => json!(0.0),
            CoordinationType::CellColorEncoding => json!("cellSetSelection"),
            _ => Value::Null,
        }
    }
}

impl fmt::Display for CoordinationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoordinationType {
    type Err = CoordinationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CoordinationType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoordinationError::unknown_type(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_matches_serde_name() {
        for t in CoordinationType::ALL {
            let serialized = serde_json::to_value(t).unwrap();
            assert_eq!(serialized, Value::String(t.as_str().to_string()));
        }
    }

    #[test]
    fn test_from_str_roundtrip() {
        for t in CoordinationType::ALL {
            assert_eq!(t.as_str().parse::<CoordinationType>().unwrap(), t);
        }
    }

    #[test]
    fn test_from_str_unknown_is_configuration_error() {
        let err = "scatterplotZoom".parse::<CoordinationType>().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("scatterplotZoom"));
    }

    #[test]
    fn test_setter_name() {
        assert_eq!(
            CoordinationType::HeatmapZoomX.setter_name(),
            "setHeatmapZoomX"
        );
        assert_eq!(
            CoordinationType::CellHighlight.setter_name(),
            "setCellHighlight"
        );
        assert_eq!(CoordinationType::Dataset.setter_name(), "setDataset");
    }

    #[test]
    fn test_default_values() {
        assert_eq!(CoordinationType::EmbeddingZoom.default_value(), json!(0.0));
        assert_eq!(CoordinationType::CellSelection.default_value(), Value::Null);
        assert_eq!(
            CoordinationType::CellColorEncoding.default_value(),
            json!("cellSetSelection")
        );
    }

    #[test]
    fn test_all_is_unique() {
        use std::collections::HashSet;
        let set: HashSet<_> = CoordinationType::ALL.iter().collect();
        assert_eq!(set.len(), CoordinationType::ALL.len());
    }
}
