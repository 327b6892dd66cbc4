//! Errors raised while binding views to the coordination space.

use thiserror::Error;

use super::types::CoordinationType;

/// Errors that can occur when resolving coordination scopes.
///
/// Both variants are raised at bind time so a misconfigured view fails
/// on activation rather than on its first read.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinationError {
    /// A coordination type or scope is not known to the space
    #[error("Configuration error: {reason}")]
    Configuration {
        /// Human-readable description of the problem
        reason: String,
    },

    /// A view requested a coordination type without declaring a scope for it
    #[error("Missing scope: view requires '{coordination_type}' but declares no scope for it")]
    MissingScope {
        /// The type that has no scope entry
        coordination_type: CoordinationType,
    },
}

impl CoordinationError {
    pub(crate) fn unknown_type(name: &str) -> Self {
        CoordinationError::Configuration {
            reason: format!("unknown coordination type '{}'", name),
        }
    }

    pub(crate) fn undeclared_type(coordination_type: CoordinationType) -> Self {
        CoordinationError::Configuration {
            reason: format!(
                "coordination type '{}' is not declared in the coordination space",
                coordination_type
            ),
        }
    }

    pub(crate) fn unknown_scope(coordination_type: CoordinationType, scope: &str) -> Self {
        CoordinationError::Configuration {
            reason: format!(
                "scope '{}' is not declared for coordination type '{}'",
                scope, coordination_type
            ),
        }
    }

    pub(crate) fn not_bound(coordination_type: CoordinationType) -> Self {
        CoordinationError::Configuration {
            reason: format!("coordination type '{}' is not bound", coordination_type),
        }
    }

    /// True for [`CoordinationError::Configuration`].
    pub fn is_configuration(&self) -> bool {
        matches!(self, CoordinationError::Configuration { .. })
    }

    /// True for [`CoordinationError::MissingScope`].
    pub fn is_missing_scope(&self) -> bool {
        matches!(self, CoordinationError::MissingScope { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_scope_display() {
        let err = CoordinationError::MissingScope {
            coordination_type: CoordinationType::GeneSelection,
        };
        assert!(err.to_string().contains("geneSelection"));
        assert!(err.is_missing_scope());
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_unknown_scope_display() {
        let err = CoordinationError::unknown_scope(CoordinationType::SpatialZoom, "Z");
        let msg = err.to_string();
        assert!(msg.starts_with("Configuration error"));
        assert!(msg.contains("'Z'"));
        assert!(msg.contains("spatialZoom"));
    }

    #[test]
    fn test_error_trait() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<CoordinationError>();
    }
}
