//! Session: one loaded view configuration and its active views.
//!
//! A session owns the event bus, the coordination space built from the
//! view configuration, and the loader registry shared by every view.
//!
//! ```text
//!                 Session
//!   ┌───────────────┼────────────────┐
//!   │               │                │
//! EventBus   CoordinationSpace   LoaderRegistry
//!   │               │                │
//!   └──── ActiveView (guards, binding, data slots, cancel token)
//! ```
//!
//! Reconfiguring discards the coordination space wholesale; views
//! activated before that keep the old space and should be re-activated.

mod active;
mod error;

pub use active::{data_types, ActiveView, LoadOutcome};
pub use error::SessionError;

use std::sync::Arc;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::coordination::{CoordinationSpace, CoordinationType, ScopeBinding};
use crate::events::EventBus;
use crate::loader::LoaderRegistry;
use crate::view_config::ViewConfig;

/// A loaded view configuration.
pub struct Session {
    bus: Arc<EventBus>,
    space: CoordinationSpace,
    config: ViewConfig,
    registry: Arc<LoaderRegistry>,
    shutdown: CancellationToken,
}

impl Session {
    /// Open a session for `config`.
    ///
    /// The configuration is validated and missing scopes are filled with
    /// the shared defaults, so every view in it can be activated.
    pub fn new(
        config: ViewConfig,
        registry: Arc<LoaderRegistry>,
        bus: Arc<EventBus>,
    ) -> Result<Self, SessionError> {
        let (config, space) = prepare(config)?;
        info!(
            name = %config.name,
            views = config.layout.len(),
            "Opened session"
        );
        Ok(Self {
            bus,
            space,
            config,
            registry,
            shutdown: CancellationToken::new(),
        })
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn space(&self) -> &CoordinationSpace {
        &self.space
    }

    pub fn registry(&self) -> &Arc<LoaderRegistry> {
        &self.registry
    }

    /// Activate a view of the configuration by uid.
    pub fn activate(&self, uid: &str) -> Result<ActiveView, SessionError> {
        let view = self
            .config
            .view(uid)
            .ok_or_else(|| SessionError::UnknownView(uid.to_string()))?;
        let kind = view.kind()?;
        let scopes = view.coordination_scopes()?;
        let binding = ScopeBinding::bind(&self.space, kind.coordination_types(), &scopes)?;

        let dataset = match binding.get(CoordinationType::Dataset) {
            Some(Value::String(uid)) => Some(uid),
            _ => self.config.datasets.first().map(|d| d.uid.clone()),
        };

        Ok(ActiveView::new(
            uid.to_string(),
            kind,
            dataset,
            binding,
            Arc::clone(&self.bus),
            Arc::clone(&self.registry),
            self.shutdown.child_token(),
        ))
    }

    /// Replace the configuration.
    ///
    /// The coordination space is rebuilt from `config`; nothing of the
    /// previous one carries over.
    pub fn reconfigure(
        &mut self,
        config: ViewConfig,
        registry: Arc<LoaderRegistry>,
    ) -> Result<(), SessionError> {
        let (config, space) = prepare(config)?;
        self.shutdown.cancel();
        self.shutdown = CancellationToken::new();
        self.config = config;
        self.space = space;
        self.registry = registry;
        info!(name = %self.config.name, "Reconfigured session");
        Ok(())
    }

    /// The configuration with the space's current values written back.
    pub fn current_config(&self) -> ViewConfig {
        let mut config = self.config.clone();
        config.set_coordination_space(&self.space);
        config
    }

    /// Cancel loads in flight for every view.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

fn prepare(config: ViewConfig) -> Result<(ViewConfig, CoordinationSpace), SessionError> {
    config.validate()?;
    let config = config.with_auto_scopes()?;
    let space = config.coordination_space()?;
    Ok((config, space))
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("name", &self.config.name)
            .field("views", &self.config.layout.len())
            .field("registry", &self.registry)
            .finish()
    }
}
