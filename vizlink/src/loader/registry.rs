//! Loaders and the per-session loader registry.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use futures::future::{self, BoxFuture, FutureExt, Shared};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::types::{DataType, LoadError};
use crate::view_config::ViewConfig;

/// Future resolving to one dataset file's content.
pub type LoadFuture = BoxFuture<'static, Result<Value, LoadError>>;

/// Source of one dataset file.
///
/// Implementations own fetching, retries and format decoding; callers
/// only consume the resolved value.
pub trait Loader: Send + Sync {
    /// Start loading data of `data_type`.
    fn load(&self, data_type: DataType) -> LoadFuture;

    /// Short description for log and status messages.
    fn describe(&self) -> String;
}

/// Loader serving a value already in memory.
#[derive(Debug, Clone)]
pub struct StaticLoader {
    name: String,
    result: Result<Value, LoadError>,
}

impl StaticLoader {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            result: Ok(value),
        }
    }

    /// Loader that always fails with `error`.
    pub fn failing(name: impl Into<String>, error: LoadError) -> Self {
        Self {
            name: name.into(),
            result: Err(error),
        }
    }
}

impl Loader for StaticLoader {
    fn load(&self, _data_type: DataType) -> LoadFuture {
        future::ready(self.result.clone()).boxed()
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

/// Loader reading a JSON file from local disk.
#[derive(Debug, Clone)]
pub struct FileLoader {
    name: String,
    path: PathBuf,
}

impl FileLoader {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Loader for FileLoader {
    fn load(&self, data_type: DataType) -> LoadFuture {
        let name = self.name.clone();
        let path = self.path.clone();
        async move {
            let bytes = tokio::fs::read(&path).await.map_err(|e| {
                warn!(
                    name = %name,
                    data_type = %data_type,
                    path = %path.display(),
                    error = %e,
                    "Fetch failed"
                );
                LoadError::Fetch {
                    name: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            serde_json::from_slice::<Value>(&bytes).map_err(|e| {
                warn!(
                    name = %name,
                    data_type = %data_type,
                    path = %path.display(),
                    error = %e,
                    "Validation failed"
                );
                LoadError::Invalid {
                    name: name.clone(),
                    reason: e.to_string(),
                }
            })
        }
        .boxed()
    }

    fn describe(&self) -> String {
        format!("{} ({})", self.name, self.path.display())
    }
}

/// Registry key: dataset uid and data type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LoaderKey {
    dataset: String,
    data_type: DataType,
}

impl LoaderKey {
    fn new(dataset: &str, data_type: DataType) -> Self {
        Self {
            dataset: dataset.to_string(),
            data_type,
        }
    }
}

/// Loaders for every dataset file of a session, with result caching.
///
/// The first `load` of a key starts the loader; later calls share the
/// same in-flight or finished result, so views asking for the same file
/// trigger one fetch. Failures are cached as well until
/// [`invalidate`](Self::invalidate) is called.
#[derive(Default)]
pub struct LoaderRegistry {
    loaders: DashMap<LoaderKey, Arc<dyn Loader>>,
    results: DashMap<LoaderKey, Shared<LoadFuture>>,
}

impl LoaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register local-file loaders for every dataset file of `config`.
    ///
    /// Relative paths resolve against `base_dir`. Remote URLs and unknown
    /// data types are skipped with a warning; register a loader for them
    /// with [`register`](Self::register).
    pub fn from_config(config: &ViewConfig, base_dir: &Path) -> Self {
        let registry = Self::new();
        for dataset in &config.datasets {
            for file in &dataset.files {
                let data_type: DataType = match file.data_type.parse() {
                    Ok(t) => t,
                    Err(e) => {
                        warn!(dataset = %dataset.uid, error = %e, "Skipping dataset file");
                        continue;
                    }
                };
                let Some(path) = local_path(&file.url, base_dir) else {
                    warn!(
                        dataset = %dataset.uid,
                        url = %file.url,
                        "Skipping remote dataset file, no loader registered"
                    );
                    continue;
                };
                let name = if dataset.name.is_empty() {
                    format!("{} {}", dataset.uid, data_type)
                } else {
                    format!("{} {}", dataset.name, data_type)
                };
                registry.register(
                    &dataset.uid,
                    data_type,
                    Arc::new(FileLoader::new(name, path)),
                );
            }
        }
        info!(loaders = registry.len(), "Loader registry created");
        registry
    }

    /// Register (or replace) the loader for a key. Drops any cached result.
    pub fn register(&self, dataset: &str, data_type: DataType, loader: Arc<dyn Loader>) {
        let key = LoaderKey::new(dataset, data_type);
        debug!(dataset, data_type = %data_type, loader = %loader.describe(), "Registered loader");
        self.results.remove(&key);
        self.loaders.insert(key, loader);
    }

    /// Whether a loader exists for the key.
    pub fn contains(&self, dataset: &str, data_type: DataType) -> bool {
        self.loaders.contains_key(&LoaderKey::new(dataset, data_type))
    }

    /// Number of registered loaders.
    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    /// Load a dataset file, sharing the result with concurrent callers.
    pub fn load(&self, dataset: &str, data_type: DataType) -> LoadFuture {
        let key = LoaderKey::new(dataset, data_type);
        if let Some(cached) = self.results.get(&key) {
            return cached.value().clone().boxed();
        }

        let loader = match self.loaders.get(&key) {
            Some(entry) => Arc::clone(entry.value()),
            None => {
                return future::ready(Err(LoadError::NotRegistered {
                    dataset: dataset.to_string(),
                    data_type,
                }))
                .boxed()
            }
        };

        let shared = self
            .results
            .entry(key)
            .or_insert_with(|| {
                debug!(dataset, data_type = %data_type, "Starting load");
                loader.load(data_type).shared()
            })
            .value()
            .clone();
        shared.boxed()
    }

    /// Forget the cached result for a key so the next load refetches.
    pub fn invalidate(&self, dataset: &str, data_type: DataType) -> bool {
        self.results
            .remove(&LoaderKey::new(dataset, data_type))
            .is_some()
    }

    /// Forget every cached result.
    pub fn invalidate_all(&self) {
        self.results.clear();
    }
}

impl std::fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoaderRegistry")
            .field("loaders", &self.loaders.len())
            .field("cached", &self.results.len())
            .finish()
    }
}

/// Local path for a dataset URL, `None` for remote URLs.
fn local_path(url: &str, base_dir: &Path) -> Option<PathBuf> {
    if url.starts_with("http://") || url.starts_with("https://") {
        return None;
    }
    let path = Path::new(url.strip_prefix("file://").unwrap_or(url));
    if path.is_absolute() {
        Some(path.to_path_buf())
    } else {
        Some(base_dir.join(path))
    }
}
