//! View configuration document types and operations.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use semver::{Version, VersionReq};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::error::ViewConfigError;
use crate::coordination::{
    CoordinationError, CoordinationScopes, CoordinationSpace, CoordinationType, SpaceDocument,
    ViewKind, DEFAULT_SCOPE,
};

/// Document versions this crate reads.
pub const SUPPORTED_VERSIONS: &str = ">=0.1.0, <2.0.0";

/// Version written into new documents.
pub const CURRENT_VERSION: &str = "1.0.0";

/// Coordination space as stored in the document: type name → scope → value.
pub type SpaceNames = BTreeMap<String, BTreeMap<String, Value>>;

/// A session's view configuration.
///
/// Keys this crate does not interpret survive a parse/serialize round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewConfig {
    /// Semantic version of the document schema
    pub version: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
    #[serde(default)]
    pub coordination_space: SpaceNames,
    #[serde(default)]
    pub layout: Vec<ViewComponent>,
    /// Keys this crate does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A dataset and the files it is loaded from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub files: Vec<DatasetFile>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One file of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetFile {
    /// Data type name, e.g. `cells` or `CELL-SETS`
    #[serde(rename = "type")]
    pub data_type: String,
    /// Encoding of the file, e.g. `cells.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A view placed on the layout grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewComponent {
    /// Component name, e.g. `scatterplot`
    pub component: String,
    /// Unique id of the view in this configuration
    #[serde(default)]
    pub uid: String,
    /// Coordination type name → scope name
    #[serde(default)]
    pub coordination_scopes: BTreeMap<String, String>,
    #[serde(default)]
    pub x: u32,
    #[serde(default)]
    pub y: u32,
    #[serde(default = "default_span")]
    pub w: u32,
    #[serde(default = "default_span")]
    pub h: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_span() -> u32 {
    1
}

impl ViewComponent {
    /// A view of `kind` at the origin with no scopes.
    pub fn new(kind: ViewKind, uid: impl Into<String>) -> Self {
        Self {
            component: kind.as_str().to_string(),
            uid: uid.into(),
            coordination_scopes: BTreeMap::new(),
            x: 0,
            y: 0,
            w: default_span(),
            h: default_span(),
            props: None,
            extra: Map::new(),
        }
    }

    /// Resolved component kind.
    pub fn kind(&self) -> Result<ViewKind, ViewConfigError> {
        self.component
            .parse()
            .map_err(|_| ViewConfigError::UnknownComponent {
                uid: self.uid.clone(),
                component: self.component.clone(),
            })
    }

    /// Typed scope mapping of this view.
    pub fn coordination_scopes(&self) -> Result<CoordinationScopes, ViewConfigError> {
        CoordinationScopes::from_names(&self.coordination_scopes)
            .map_err(|e| ViewConfigError::coordination(format!("View '{}'", self.uid), e))
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION.to_string(),
            name: String::new(),
            description: String::new(),
            datasets: Vec::new(),
            coordination_space: SpaceNames::new(),
            layout: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl ViewConfig {
    /// Parse a JSON document. Does not validate; see [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, ViewConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON document from disk.
    pub fn load_from(path: &Path) -> Result<Self, ViewConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ViewConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        debug!(path = %path.display(), views = config.layout.len(), "Loaded view config");
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ViewConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parsed schema version.
    pub fn schema_version(&self) -> Result<Version, ViewConfigError> {
        let version = Version::parse(&self.version).map_err(|e| ViewConfigError::Version {
            version: self.version.clone(),
            reason: e.to_string(),
        })?;
        let supported =
            VersionReq::parse(SUPPORTED_VERSIONS).map_err(|e| ViewConfigError::Version {
                version: self.version.clone(),
                reason: e.to_string(),
            })?;
        if !supported.matches(&version) {
            return Err(ViewConfigError::Version {
                version: self.version.clone(),
                reason: format!("expected {}", SUPPORTED_VERSIONS),
            });
        }
        Ok(version)
    }

    /// Check the document is internally consistent.
    ///
    /// Verifies the version, that coordination type names are known, that
    /// view uids are unique, that components are known, and that every
    /// scope a view names is declared in the coordination space. It does
    /// not require views to name a scope for every type they bind; see
    /// [`with_auto_scopes`](Self::with_auto_scopes).
    pub fn validate(&self) -> Result<(), ViewConfigError> {
        self.schema_version()?;
        let document = self.space_document()?;

        let mut seen = BTreeSet::new();
        for view in &self.layout {
            if !seen.insert(view.uid.as_str()) {
                return Err(ViewConfigError::DuplicateView(view.uid.clone()));
            }
            view.kind()?;
            for (coordination_type, scope) in view.coordination_scopes()?.iter() {
                let declared = document
                    .get(&coordination_type)
                    .is_some_and(|scopes| scopes.contains_key(scope));
                if !declared {
                    return Err(ViewConfigError::coordination(
                        format!("View '{}'", view.uid),
                        CoordinationError::unknown_scope(coordination_type, scope),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Typed form of the document's coordination space.
    pub fn space_document(&self) -> Result<SpaceDocument, ViewConfigError> {
        let mut document = SpaceDocument::new();
        for (name, scopes) in &self.coordination_space {
            let coordination_type: CoordinationType = name
                .parse()
                .map_err(|e| ViewConfigError::coordination("Coordination space", e))?;
            document.insert(coordination_type, scopes.clone());
        }
        Ok(document)
    }

    /// Build a fresh coordination space holding the document's values.
    pub fn coordination_space(&self) -> Result<CoordinationSpace, ViewConfigError> {
        Ok(CoordinationSpace::from_document(self.space_document()?))
    }

    /// Store the current values of `space` into the document.
    pub fn set_coordination_space(&mut self, space: &CoordinationSpace) {
        self.coordination_space = space
            .to_document()
            .into_iter()
            .map(|(t, scopes)| (t.as_str().to_string(), scopes))
            .collect();
    }

    /// Fill in missing scopes for every view.
    ///
    /// Each type a view binds but names no scope for is mapped to the
    /// default scope, which is declared with the type's default value if
    /// the space lacks it. Views therefore link through shared defaults
    /// unless the document says otherwise. Existing scopes are untouched.
    pub fn with_auto_scopes(mut self) -> Result<Self, ViewConfigError> {
        let mut added = 0usize;
        for view in &mut self.layout {
            let kind = view.kind()?;
            for coordination_type in kind.coordination_types() {
                let name = coordination_type.as_str();
                if view.coordination_scopes.contains_key(name) {
                    continue;
                }
                view.coordination_scopes
                    .insert(name.to_string(), DEFAULT_SCOPE.to_string());
                self.coordination_space
                    .entry(name.to_string())
                    .or_default()
                    .entry(DEFAULT_SCOPE.to_string())
                    .or_insert_with(|| coordination_type.default_value());
                added += 1;
            }
        }
        if added > 0 {
            info!(added, "Filled missing coordination scopes with defaults");
        }
        Ok(self)
    }

    /// View by uid.
    pub fn view(&self, uid: &str) -> Option<&ViewComponent> {
        self.layout.iter().find(|v| v.uid == uid)
    }

    /// Dataset by uid.
    pub fn dataset(&self, uid: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.uid == uid)
    }
}
