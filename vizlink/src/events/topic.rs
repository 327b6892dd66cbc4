//! Topic vocabulary and payload shapes.
//!
//! Topic names and payload shapes are a stability contract with view
//! components; renaming one breaks every subscriber that listens for it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Address of a notification on the [`EventBus`](super::EventBus).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topic {
    /// Cell data finished loading
    CellsAdd,
    /// Per-cell colors changed
    CellsColor,
    /// Pointer hovers a cell (per frame)
    CellsHover,
    /// The selected cell set changed
    CellsSelection,
    /// A cell set was chosen for display
    CellSetsView,
    /// Free-text status line
    StatusInfo,
    /// A view's projection changed
    ViewInfo,
    /// A loading indicator can be cleared
    ClearPleaseWait,
    /// The grid was resized
    GridResize,
    /// Everything should reset
    Reset,
    /// Point vs rectangle selection mode
    SelectionModeSet,
    /// Raster image finished loading
    ImageAdd,
    /// Molecule data finished loading
    MoleculesAdd,
    /// Application-defined topic
    Custom(String),
}

impl Topic {
    /// Built-in topics.
    pub const BUILTIN: [Topic; 13] = [
        Topic::CellsAdd,
        Topic::CellsColor,
        Topic::CellsHover,
        Topic::CellsSelection,
        Topic::CellSetsView,
        Topic::StatusInfo,
        Topic::ViewInfo,
        Topic::ClearPleaseWait,
        Topic::GridResize,
        Topic::Reset,
        Topic::SelectionModeSet,
        Topic::ImageAdd,
        Topic::MoleculesAdd,
    ];

    /// Wire name of the topic.
    pub fn as_str(&self) -> &str {
        match self {
            Topic::CellsAdd => "cells-add",
            Topic::CellsColor => "cells-color",
            Topic::CellsHover => "cells-hover",
            Topic::CellsSelection => "cells-selection-changed",
            Topic::CellSetsView => "cell-sets-view",
            Topic::StatusInfo => "status-info",
            Topic::ViewInfo => "view-info",
            Topic::ClearPleaseWait => "clear-please-wait",
            Topic::GridResize => "grid-resize",
            Topic::Reset => "reset",
            Topic::SelectionModeSet => "selection-mode-set",
            Topic::ImageAdd => "image-add",
            Topic::MoleculesAdd => "molecules-add",
            Topic::Custom(name) => name,
        }
    }

    /// Topic for an application-defined name.
    pub fn custom(name: impl Into<String>) -> Self {
        Topic::Custom(name.into())
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = std::convert::Infallible;

    /// Built-in names map to their variant; anything else is custom.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Topic::BUILTIN
            .iter()
            .find(|t| t.as_str() == s)
            .cloned()
            .unwrap_or_else(|| Topic::Custom(s.to_string())))
    }
}

/// Payload of a `cells-hover` notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverInfo {
    /// Hovered cell, `None` when the pointer left every cell
    pub cell_id: Option<String>,
    /// View that produced the hover
    pub uuid: String,
    /// Position of the cell in that view, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f64; 2]>,
}

/// Payload of a `view-info` notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewInfo {
    /// View that changed
    pub uuid: String,
    /// Current zoom
    pub zoom: f64,
    /// Current target
    pub target: [f64; 2],
    /// Canvas size in pixels
    pub width: f64,
    /// Canvas size in pixels
    pub height: f64,
}

/// Selection mode carried by `selection-mode-set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Click selects single cells
    Point,
    /// Drag selects a rectangle
    Rect,
}

/// Encode a payload struct as a JSON value.
///
/// The payload types above always encode; this returns `Value::Null`
/// only for types whose `Serialize` impl can fail.
pub fn to_payload<T: Serialize>(payload: &T) -> Value {
    serde_json::to_value(payload).unwrap_or(Value::Null)
}
