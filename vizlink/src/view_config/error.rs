//! View configuration errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::coordination::CoordinationError;

/// Errors from loading or validating a view configuration.
#[derive(Debug, Error)]
pub enum ViewConfigError {
    /// Failed to read the document
    #[error("Failed to read view config {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid JSON for the schema
    #[error("Invalid view config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Version field is not a supported semantic version
    #[error("Unsupported view config version '{version}' - {reason}")]
    Version { version: String, reason: String },

    /// Two views share a uid
    #[error("Duplicate view uid '{0}'")]
    DuplicateView(String),

    /// Component name is not a known view kind
    #[error("View '{uid}' has unknown component '{component}'")]
    UnknownComponent { uid: String, component: String },

    /// A coordination type or scope could not be resolved
    #[error("{context}: {source}")]
    Coordination {
        context: String,
        #[source]
        source: CoordinationError,
    },
}

impl ViewConfigError {
    pub(crate) fn coordination(context: impl Into<String>, source: CoordinationError) -> Self {
        Self::Coordination {
            context: context.into(),
            source,
        }
    }

    /// The underlying coordination error, if this is one.
    pub fn coordination_error(&self) -> Option<&CoordinationError> {
        match self {
            Self::Coordination { source, .. } => Some(source),
            _ => None,
        }
    }
}
