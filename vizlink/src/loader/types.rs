//! Data type vocabulary and load errors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of data a dataset file provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataType {
    /// Per-cell positions, mappings and factors
    Cells,
    /// Cell set hierarchy
    CellSets,
    /// Gene × cell expression values
    ExpressionMatrix,
    /// Categorical per-cell annotations
    Factors,
    /// Gene list
    Genes,
    /// Molecule positions
    Molecules,
    /// Neighbourhood polygons
    Neighborhoods,
    /// Tiled raster images
    Raster,
}

impl DataType {
    pub const ALL: [DataType; 8] = [
        DataType::Cells,
        DataType::CellSets,
        DataType::ExpressionMatrix,
        DataType::Factors,
        DataType::Genes,
        DataType::Molecules,
        DataType::Neighborhoods,
        DataType::Raster,
    ];

    /// Name used in dataset files and readiness tracking, e.g. `cell-sets`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Cells => "cells",
            DataType::CellSets => "cell-sets",
            DataType::ExpressionMatrix => "expression-matrix",
            DataType::Factors => "factors",
            DataType::Genes => "genes",
            DataType::Molecules => "molecules",
            DataType::Neighborhoods => "neighborhoods",
            DataType::Raster => "raster",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = LoadError;

    /// Case-insensitive: `CELL-SETS` and `cell-sets` are the same type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| LoadError::UnknownDataType(s.to_string()))
    }
}

/// Errors produced while loading a dataset file.
///
/// Clonable so one failed fetch can be reported to every view sharing it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Dataset file names a type this crate does not know
    #[error("Unknown data type '{0}'")]
    UnknownDataType(String),

    /// No loader registered for the dataset and type
    #[error("No loader for {data_type} in dataset '{dataset}'")]
    NotRegistered { dataset: String, data_type: DataType },

    /// The source could not be read
    #[error("Error while fetching {name}: {reason}")]
    Fetch { name: String, reason: String },

    /// The source was read but is not usable
    #[error("Error while validating {name}: {reason}")]
    Invalid { name: String, reason: String },
}
