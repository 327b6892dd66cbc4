//! CoordinationSpace, the shared type → scope → value store.
//!
//! A space is created from a view configuration, mutated by bound setters,
//! and discarded wholesale when the configuration changes.
//!
//! # Consistency
//!
//! - Every write replaces a value; nothing is merged.
//! - `set_values()` applies a batch under one write lock, so readers see
//!   either none or all of a composite update.
//! - Reads of several values (`read_many()`) happen under one read lock.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, trace};

use super::types::CoordinationType;

/// Scope name → value for one coordination type.
pub type ScopeValues = BTreeMap<String, Value>;

/// Serializable form of a coordination space.
pub type SpaceDocument = BTreeMap<CoordinationType, ScopeValues>;

#[derive(Debug, Default)]
struct SpaceState {
    values: SpaceDocument,
    revision: u64,
}

/// Shared store of coordination values.
///
/// Cloning is cheap and yields a handle to the same store; this is how
/// bound setters reach the space.
#[derive(Clone, Default)]
pub struct CoordinationSpace {
    state: Arc<RwLock<SpaceState>>,
    defaults: Arc<BTreeMap<CoordinationType, Value>>,
}

impl CoordinationSpace {
    /// Create an empty space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a space holding the values of a document.
    pub fn from_document(document: SpaceDocument) -> Self {
        let scope_count: usize = document.values().map(|scopes| scopes.len()).sum();
        debug!(
            types = document.len(),
            scopes = scope_count,
            "CoordinationSpace::from_document"
        );
        Self {
            state: Arc::new(RwLock::new(SpaceState {
                values: document,
                revision: 0,
            })),
            defaults: Arc::default(),
        }
    }

    /// Override the value returned for unset scopes of a type.
    ///
    /// Without an override, [`CoordinationType::default_value`] is used.
    pub fn with_default(mut self, coordination_type: CoordinationType, value: Value) -> Self {
        Arc::make_mut(&mut self.defaults).insert(coordination_type, value);
        self
    }

    /// Default value for a type.
    pub fn default_for(&self, coordination_type: CoordinationType) -> Value {
        self.defaults
            .get(&coordination_type)
            .cloned()
            .unwrap_or_else(|| coordination_type.default_value())
    }

    /// Declare a scope with an initial value.
    ///
    /// Does nothing if the scope already exists. Returns whether the
    /// scope was added.
    pub fn declare_scope(
        &self,
        coordination_type: CoordinationType,
        scope: impl Into<String>,
        value: Value,
    ) -> bool {
        let mut state = self.state.write();
        let scopes = state.values.entry(coordination_type).or_default();
        let scope = scope.into();
        if scopes.contains_key(&scope) {
            return false;
        }
        scopes.insert(scope, value);
        state.revision += 1;
        true
    }

    /// Current value of a (type, scope), or the type's default when unset.
    pub fn get_value(&self, coordination_type: CoordinationType, scope: &str) -> Value {
        self.try_get_value(coordination_type, scope)
            .unwrap_or_else(|| self.default_for(coordination_type))
    }

    /// Current value of a (type, scope), or `None` when undeclared.
    pub fn try_get_value(&self, coordination_type: CoordinationType, scope: &str) -> Option<Value> {
        let state = self.state.read();
        state
            .values
            .get(&coordination_type)
            .and_then(|scopes| scopes.get(scope))
            .cloned()
    }

    /// Replace the value of a (type, scope).
    ///
    /// The scope is created if it does not exist yet. Returns the new
    /// revision of the space.
    pub fn set_value(
        &self,
        coordination_type: CoordinationType,
        scope: &str,
        value: Value,
    ) -> u64 {
        let mut state = self.state.write();
        state
            .values
            .entry(coordination_type)
            .or_default()
            .insert(scope.to_string(), value);
        state.revision += 1;
        trace!(
            coordination_type = %coordination_type,
            scope,
            revision = state.revision,
            "CoordinationSpace::set_value"
        );
        state.revision
    }

    /// Apply several replacements as one update.
    ///
    /// No reader observes a state where only part of the batch is applied.
    pub fn set_values<I, S>(&self, updates: I) -> u64
    where
        I: IntoIterator<Item = (CoordinationType, S, Value)>,
        S: Into<String>,
    {
        // Collect outside the lock so caller iterators never run under it
        let updates: Vec<(CoordinationType, String, Value)> = updates
            .into_iter()
            .map(|(t, scope, value)| (t, scope.into(), value))
            .collect();

        let mut state = self.state.write();
        let count = updates.len();
        for (coordination_type, scope, value) in updates {
            state
                .values
                .entry(coordination_type)
                .or_default()
                .insert(scope, value);
        }
        state.revision += 1;
        trace!(count, revision = state.revision, "CoordinationSpace::set_values");
        state.revision
    }

    /// Read several (type, scope) values under one lock.
    ///
    /// Unset scopes yield the type's default.
    pub fn read_many<'a, I>(&self, keys: I) -> BTreeMap<CoordinationType, Value>
    where
        I: IntoIterator<Item = (CoordinationType, &'a str)>,
    {
        let state = self.state.read();
        keys.into_iter()
            .map(|(coordination_type, scope)| {
                let value = state
                    .values
                    .get(&coordination_type)
                    .and_then(|scopes| scopes.get(scope))
                    .cloned()
                    .unwrap_or_else(|| self.default_for(coordination_type));
                (coordination_type, value)
            })
            .collect()
    }

    /// Whether any scope is declared for a type.
    pub fn has_type(&self, coordination_type: CoordinationType) -> bool {
        self.state.read().values.contains_key(&coordination_type)
    }

    /// Whether a (type, scope) is declared.
    pub fn has_scope(&self, coordination_type: CoordinationType, scope: &str) -> bool {
        self.state
            .read()
            .values
            .get(&coordination_type)
            .is_some_and(|scopes| scopes.contains_key(scope))
    }

    /// Declared types, in order.
    pub fn types(&self) -> Vec<CoordinationType> {
        self.state.read().values.keys().copied().collect()
    }

    /// Declared scope names of a type, in order.
    pub fn scope_names(&self, coordination_type: CoordinationType) -> Vec<String> {
        self.state
            .read()
            .values
            .get(&coordination_type)
            .map(|scopes| scopes.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of writes applied so far.
    pub fn revision(&self) -> u64 {
        self.state.read().revision
    }

    /// Copy of every declared value.
    pub fn to_document(&self) -> SpaceDocument {
        self.state.read().values.clone()
    }

    /// Replace the whole store with a document in one swap.
    pub fn replace_all(&self, document: SpaceDocument) {
        let mut state = self.state.write();
        state.values = document;
        state.revision += 1;
        debug!(revision = state.revision, "CoordinationSpace::replace_all");
    }
}

impl fmt::Debug for CoordinationSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("CoordinationSpace")
            .field("types", &state.values.len())
            .field("revision", &state.revision)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // =========================================================================
    // Read / write
    // =========================================================================

    #[test]
    fn test_read_after_write() {
        let space = CoordinationSpace::new();
        let cases = [
            (CoordinationType::SpatialZoom, "A", json!(-3.5)),
            (CoordinationType::CellSelection, "B", json!(["cell_1", "cell_2"])),
            (CoordinationType::GeneHighlight, "A", json!("CD74")),
            (CoordinationType::Dataset, "A", json!({"uid": "d1"})),
        ];
        for (t, scope, value) in cases {
            space.set_value(t, scope, value.clone());
            assert_eq!(space.get_value(t, scope), value);
        }
    }

    #[test]
    fn test_unset_scope_returns_type_default() {
        let space = CoordinationSpace::new();
        assert_eq!(
            space.get_value(CoordinationType::EmbeddingZoom, "A"),
            json!(0.0)
        );
        assert_eq!(
            space.get_value(CoordinationType::CellHighlight, "A"),
            Value::Null
        );
        assert!(space
            .try_get_value(CoordinationType::CellHighlight, "A")
            .is_none());
    }

    #[test]
    fn test_configured_default_overrides_type_default() {
        let space =
            CoordinationSpace::new().with_default(CoordinationType::EmbeddingZoom, json!(2.0));
        assert_eq!(
            space.get_value(CoordinationType::EmbeddingZoom, "A"),
            json!(2.0)
        );
    }

    #[test]
    fn test_set_replaces_without_merge() {
        let space = CoordinationSpace::new();
        space.set_value(
            CoordinationType::SpatialLayers,
            "A",
            json!({"raster": true, "cells": true}),
        );
        space.set_value(CoordinationType::SpatialLayers, "A", json!({"cells": false}));
        assert_eq!(
            space.get_value(CoordinationType::SpatialLayers, "A"),
            json!({"cells": false})
        );
    }

    #[test]
    fn test_scopes_are_isolated() {
        let space = CoordinationSpace::new();
        space.set_value(CoordinationType::SpatialZoom, "A", json!(1.0));
        space.set_value(CoordinationType::SpatialZoom, "B", json!(5.0));
        assert_eq!(space.get_value(CoordinationType::SpatialZoom, "A"), json!(1.0));
        assert_eq!(space.get_value(CoordinationType::SpatialZoom, "B"), json!(5.0));
    }

    // =========================================================================
    // Declaration
    // =========================================================================

    #[test]
    fn test_declare_scope_keeps_existing_value() {
        let space = CoordinationSpace::new();
        assert!(space.declare_scope(CoordinationType::GeneSelection, "A", json!(["A1"])));
        assert!(!space.declare_scope(CoordinationType::GeneSelection, "A", json!(null)));
        assert_eq!(
            space.get_value(CoordinationType::GeneSelection, "A"),
            json!(["A1"])
        );
        assert!(space.has_type(CoordinationType::GeneSelection));
        assert!(space.has_scope(CoordinationType::GeneSelection, "A"));
        assert!(!space.has_scope(CoordinationType::GeneSelection, "B"));
    }

    #[test]
    fn test_scope_names_sorted() {
        let space = CoordinationSpace::new();
        space.set_value(CoordinationType::SpatialZoom, "B", json!(1));
        space.set_value(CoordinationType::SpatialZoom, "A", json!(2));
        assert_eq!(
            space.scope_names(CoordinationType::SpatialZoom),
            vec!["A".to_string(), "B".to_string()]
        );
        assert!(space.scope_names(CoordinationType::Dataset).is_empty());
    }

    // =========================================================================
    // Batches and revisions
    // =========================================================================

    #[test]
    fn test_set_values_bumps_revision_once() {
        let space = CoordinationSpace::new();
        let before = space.revision();
        let after = space.set_values([
            (CoordinationType::HeatmapZoomX, "A", json!(1.0)),
            (CoordinationType::HeatmapZoomY, "A", json!(1.0)),
            (CoordinationType::HeatmapTargetX, "A", json!(10.0)),
            (CoordinationType::HeatmapTargetY, "A", json!(20.0)),
        ]);
        assert_eq!(after, before + 1);
        assert_eq!(
            space.get_value(CoordinationType::HeatmapTargetY, "A"),
            json!(20.0)
        );
    }

    #[test]
    fn test_read_many_uses_defaults() {
        let space = CoordinationSpace::new();
        space.set_value(CoordinationType::SpatialZoom, "A", json!(-2.0));
        let values = space.read_many([
            (CoordinationType::SpatialZoom, "A"),
            (CoordinationType::CellSelection, "A"),
        ]);
        assert_eq!(values[&CoordinationType::SpatialZoom], json!(-2.0));
        assert_eq!(values[&CoordinationType::CellSelection], Value::Null);
    }

    #[test]
    fn test_batch_never_observed_partially() {
        use std::thread;

        let space = CoordinationSpace::new();
        space.set_values([
            (CoordinationType::HeatmapTargetX, "A", json!(0)),
            (CoordinationType::HeatmapTargetY, "A", json!(0)),
        ]);

        let writer_space = space.clone();
        let writer = thread::spawn(move || {
            for i in 1..=500 {
                writer_space.set_values([
                    (CoordinationType::HeatmapTargetX, "A", json!(i)),
                    (CoordinationType::HeatmapTargetY, "A", json!(i)),
                ]);
            }
        });

        for _ in 0..500 {
            let values = space.read_many([
                (CoordinationType::HeatmapTargetX, "A"),
                (CoordinationType::HeatmapTargetY, "A"),
            ]);
            assert_eq!(
                values[&CoordinationType::HeatmapTargetX],
                values[&CoordinationType::HeatmapTargetY]
            );
        }
        writer.join().expect("writer thread panicked");
    }

    // =========================================================================
    // Documents
    // =========================================================================

    #[test]
    fn test_document_roundtrip() {
        let space = CoordinationSpace::new();
        space.set_value(CoordinationType::SpatialZoom, "A", json!(-4.25));
        space.set_value(CoordinationType::CellSelection, "sel", json!(["c1"]));
        let copy = CoordinationSpace::from_document(space.to_document());
        assert_eq!(copy.to_document(), space.to_document());
    }

    #[test]
    fn test_replace_all() {
        let space = CoordinationSpace::new();
        space.set_value(CoordinationType::SpatialZoom, "A", json!(1));
        let handle = space.clone();
        space.replace_all(SpaceDocument::new());
        assert!(!handle.has_type(CoordinationType::SpatialZoom));
    }

    #[test]
    fn test_clones_share_state() {
        let space = CoordinationSpace::new();
        let other = space.clone();
        other.set_value(CoordinationType::GeneSelection, "A", json!(["g"]));
        assert_eq!(
            space.get_value(CoordinationType::GeneSelection, "A"),
            json!(["g"])
        );
    }
}
