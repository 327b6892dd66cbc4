//! Scope binding: resolve a view's declared scopes into read/write access.
//!
//! A view declares, per coordination type, the scope name it reads and
//! writes. [`ScopeBinding::bind`] checks every declaration against the
//! space up front and returns a [`Binding`] that exposes a read snapshot
//! and a setter per type.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::error::CoordinationError;
use super::space::CoordinationSpace;
use super::types::CoordinationType;

/// Per-view mapping from coordination type to scope name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordinationScopes {
    scopes: BTreeMap<CoordinationType, String>,
}

impl CoordinationScopes {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scope entry (builder style).
    pub fn with(mut self, coordination_type: CoordinationType, scope: impl Into<String>) -> Self {
        self.insert(coordination_type, scope);
        self
    }

    /// Add or replace a scope entry.
    pub fn insert(&mut self, coordination_type: CoordinationType, scope: impl Into<String>) {
        self.scopes.insert(coordination_type, scope.into());
    }

    /// Scope name declared for a type.
    pub fn get(&self, coordination_type: CoordinationType) -> Option<&str> {
        self.scopes.get(&coordination_type).map(String::as_str)
    }

    /// Iterate over (type, scope) entries in type order.
    pub fn iter(&self) -> impl Iterator<Item = (CoordinationType, &str)> {
        self.scopes.iter().map(|(t, s)| (*t, s.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// True when no scope is declared.
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Parse a document mapping (`{"spatialZoom": "A"}`).
    ///
    /// Unknown type names fail with a configuration error.
    pub fn from_names(names: &BTreeMap<String, String>) -> Result<Self, CoordinationError> {
        let mut scopes = BTreeMap::new();
        for (name, scope) in names {
            let coordination_type: CoordinationType = name.parse()?;
            scopes.insert(coordination_type, scope.clone());
        }
        Ok(Self { scopes })
    }

    /// Document form of the mapping.
    pub fn to_names(&self) -> BTreeMap<String, String> {
        self.scopes
            .iter()
            .map(|(t, s)| (t.as_str().to_string(), s.clone()))
            .collect()
    }
}

impl FromIterator<(CoordinationType, String)> for CoordinationScopes {
    fn from_iter<I: IntoIterator<Item = (CoordinationType, String)>>(iter: I) -> Self {
        Self {
            scopes: iter.into_iter().collect(),
        }
    }
}

/// Entry point for binding views to a space.
pub struct ScopeBinding;

impl ScopeBinding {
    /// Bind `required` types through `scopes`.
    ///
    /// # Errors
    ///
    /// - [`CoordinationError::MissingScope`] if a required type has no
    ///   entry in `scopes`
    /// - [`CoordinationError::Configuration`] if a required type is not
    ///   declared in the space, or its scope name is not declared for it
    pub fn bind(
        space: &CoordinationSpace,
        required: &[CoordinationType],
        scopes: &CoordinationScopes,
    ) -> Result<Binding, CoordinationError> {
        let mut bound = BTreeMap::new();
        for &coordination_type in required {
            let scope = scopes
                .get(coordination_type)
                .ok_or(CoordinationError::MissingScope { coordination_type })?;
            if !space.has_type(coordination_type) {
                return Err(CoordinationError::undeclared_type(coordination_type));
            }
            if !space.has_scope(coordination_type, scope) {
                return Err(CoordinationError::unknown_scope(coordination_type, scope));
            }
            bound.insert(coordination_type, scope.to_string());
        }
        debug!(types = bound.len(), "ScopeBinding::bind: bound view");
        Ok(Binding {
            space: space.clone(),
            scopes: bound,
        })
    }
}

/// Read snapshot of every bound type, taken atomically.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoordinationSnapshot {
    values: BTreeMap<CoordinationType, Value>,
}

impl CoordinationSnapshot {
    /// Raw value of a type.
    pub fn get(&self, coordination_type: CoordinationType) -> Option<&Value> {
        self.values.get(&coordination_type)
    }

    /// Value of a type decoded into `T`.
    ///
    /// Returns `None` when the type is not bound, is null, or does not
    /// decode.
    pub fn get_as<T: DeserializeOwned>(&self, coordination_type: CoordinationType) -> Option<T> {
        match self.values.get(&coordination_type)? {
            Value::Null => None,
            value => serde_json::from_value(value.clone()).ok(),
        }
    }

    /// Numeric value of a type.
    pub fn get_f64(&self, coordination_type: CoordinationType) -> Option<f64> {
        self.values.get(&coordination_type)?.as_f64()
    }

    /// String value of a type.
    pub fn get_str(&self, coordination_type: CoordinationType) -> Option<&str> {
        self.values.get(&coordination_type)?.as_str()
    }

    /// Iterate over (type, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (CoordinationType, &Value)> {
        self.values.iter().map(|(t, v)| (*t, v))
    }
}

/// Setter for one bound (type, scope).
#[derive(Clone)]
pub struct Setter {
    space: CoordinationSpace,
    coordination_type: CoordinationType,
    scope: String,
}

impl Setter {
    /// Replace the bound value.
    pub fn set(&self, value: Value) {
        self.space
            .set_value(self.coordination_type, &self.scope, value);
    }

    /// Bound coordination type.
    pub fn coordination_type(&self) -> CoordinationType {
        self.coordination_type
    }

    /// Bound scope name.
    pub fn scope(&self) -> &str {
        &self.scope
    }
}

impl fmt::Debug for Setter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setter")
            .field("coordination_type", &self.coordination_type)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Setters of a binding, addressable by type or by setter name.
#[derive(Debug, Clone, Default)]
pub struct Setters {
    setters: BTreeMap<CoordinationType, Setter>,
}

impl Setters {
    /// Setter for a type.
    pub fn get(&self, coordination_type: CoordinationType) -> Option<&Setter> {
        self.setters.get(&coordination_type)
    }

    /// Setter by name, e.g. `setCellHighlight`.
    pub fn by_name(&self, name: &str) -> Option<&Setter> {
        self.setters
            .values()
            .find(|s| s.coordination_type.setter_name() == name)
    }

    /// Setter names, in type order.
    pub fn names(&self) -> Vec<String> {
        self.setters.keys().map(|t| t.setter_name()).collect()
    }

    /// Number of setters.
    pub fn len(&self) -> usize {
        self.setters.len()
    }

    /// True when nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.setters.is_empty()
    }
}

/// A view's resolved access to the coordination space.
#[derive(Debug, Clone)]
pub struct Binding {
    space: CoordinationSpace,
    scopes: BTreeMap<CoordinationType, String>,
}

impl Binding {
    /// Current values of every bound type, read under one lock.
    pub fn snapshot(&self) -> CoordinationSnapshot {
        let values = self
            .space
            .read_many(self.scopes.iter().map(|(t, s)| (*t, s.as_str())));
        CoordinationSnapshot { values }
    }

    /// One setter per bound type.
    pub fn setters(&self) -> Setters {
        let setters = self
            .scopes
            .iter()
            .map(|(t, scope)| {
                (
                    *t,
                    Setter {
                        space: self.space.clone(),
                        coordination_type: *t,
                        scope: scope.clone(),
                    },
                )
            })
            .collect();
        Setters { setters }
    }

    /// Current value of one bound type.
    pub fn get(&self, coordination_type: CoordinationType) -> Option<Value> {
        let scope = self.scopes.get(&coordination_type)?;
        Some(self.space.get_value(coordination_type, scope))
    }

    /// Replace the value of one bound type.
    pub fn set(
        &self,
        coordination_type: CoordinationType,
        value: Value,
    ) -> Result<(), CoordinationError> {
        let scope = self
            .scopes
            .get(&coordination_type)
            .ok_or_else(|| CoordinationError::not_bound(coordination_type))?;
        self.space.set_value(coordination_type, scope, value);
        Ok(())
    }

    /// Replace several bound values in one atomic update.
    ///
    /// Fails without writing anything if any type is not bound.
    pub fn set_many<I>(&self, updates: I) -> Result<(), CoordinationError>
    where
        I: IntoIterator<Item = (CoordinationType, Value)>,
    {
        let mut resolved = Vec::new();
        for (coordination_type, value) in updates {
            let scope = self
                .scopes
                .get(&coordination_type)
                .ok_or_else(|| CoordinationError::not_bound(coordination_type))?;
            resolved.push((coordination_type, scope.clone(), value));
        }
        self.space.set_values(resolved);
        Ok(())
    }

    /// Scope bound for a type.
    pub fn scope_of(&self, coordination_type: CoordinationType) -> Option<&str> {
        self.scopes.get(&coordination_type).map(String::as_str)
    }

    /// Bound types, in order.
    pub fn types(&self) -> Vec<CoordinationType> {
        self.scopes.keys().copied().collect()
    }
}
