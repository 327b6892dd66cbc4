//! Coordination requirements of each view component.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::CoordinationError;
use super::types::CoordinationType;

/// Kinds of view component that bind to the coordination space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewKind {
    /// Embedding scatterplot (UMAP, t-SNE, PCA)
    Scatterplot,
    /// Spatial image with cell and molecule overlays
    Spatial,
    /// Expression heatmap
    Heatmap,
    /// Cell set hierarchy
    CellSets,
    /// Gene list
    Genes,
    /// Dataset description
    Description,
    /// Status bar
    Status,
}

impl ViewKind {
    /// Every view kind.
    pub const ALL: [ViewKind; 7] = [
        ViewKind::Scatterplot,
        ViewKind::Spatial,
        ViewKind::Heatmap,
        ViewKind::CellSets,
        ViewKind::Genes,
        ViewKind::Description,
        ViewKind::Status,
    ];

    /// Component name used in view configuration documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Scatterplot => "scatterplot",
            ViewKind::Spatial => "spatial",
            ViewKind::Heatmap => "heatmap",
            ViewKind::CellSets => "cellSets",
            ViewKind::Genes => "genes",
            ViewKind::Description => "description",
            ViewKind::Status => "status",
        }
    }

    /// Coordination types a component of this kind binds on activation.
    pub fn coordination_types(&self) -> &'static [CoordinationType] {
        use CoordinationType::*;
        match self {
            ViewKind::Scatterplot => &[
                Dataset,
                EmbeddingType,
                EmbeddingZoom,
                EmbeddingTargetX,
                EmbeddingTargetY,
                CellFilter,
                CellHighlight,
                CellSelection,
                CellSetSelection,
                CellSetHighlight,
                CellColorEncoding,
                GeneSelection,
            ],
            ViewKind::Spatial => &[
                Dataset,
                SpatialZoom,
                SpatialTargetX,
                SpatialTargetY,
                SpatialLayers,
                CellFilter,
                CellHighlight,
                CellSelection,
                CellSetSelection,
                CellSetHighlight,
                CellColorEncoding,
                GeneSelection,
            ],
            ViewKind::Heatmap => &[
                Dataset,
                HeatmapZoomX,
                HeatmapZoomY,
                HeatmapTargetX,
                HeatmapTargetY,
                GeneSelection,
                CellSelection,
                CellSetSelection,
                CellHighlight,
                GeneHighlight,
            ],
            ViewKind::CellSets => &[
                Dataset,
                CellSetSelection,
                CellSetHighlight,
                CellColorEncoding,
            ],
            ViewKind::Genes => &[
                Dataset,
                GeneSelection,
                GeneHighlight,
                GeneFilter,
                CellColorEncoding,
            ],
            ViewKind::Description => &[Dataset],
            ViewKind::Status => &[Dataset, CellHighlight, GeneHighlight],
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewKind {
    type Err = CoordinationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| CoordinationError::Configuration {
                reason: format!("unknown view component '{}'", s),
            })
    }
}
