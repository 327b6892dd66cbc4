//! EventBus: synchronous, topic-addressed publish/subscribe.
//!
//! Delivery is synchronous and best-effort: no queue, no retry, nothing
//! buffered for late subscribers. Publishing with nobody listening is a
//! no-op, so the bus holds no memory beyond its registrations.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, trace};

use super::guard::SubscriptionGuard;
use super::topic::Topic;
use crate::log::{Logger, TracingLogger};
use crate::log_warn;

/// Data carried by a notification.
pub type Payload = Value;

/// Callback invoked for each publish on a subscribed topic.
pub type Handler = Arc<dyn Fn(&Topic, &Payload) + Send + Sync>;

/// Opaque handle identifying one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionToken(u64);

struct Registration {
    token: SubscriptionToken,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    by_topic: HashMap<Topic, Vec<Registration>>,
    topic_of: HashMap<SubscriptionToken, Topic>,
}

/// Outcome of one publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Delivery {
    /// Handlers that ran to completion
    pub delivered: usize,
    /// Handlers that panicked
    pub failed: usize,
}

impl Delivery {
    /// Handlers invoked in total.
    pub fn recipients(&self) -> usize {
        self.delivered + self.failed
    }
}

/// Session-wide notification channel.
///
/// Share it as `Arc<EventBus>`; there is no global instance.
pub struct EventBus {
    registry: Mutex<Registry>,
    next_token: AtomicU64,
    logger: Arc<dyn Logger>,
}

impl EventBus {
    /// Create a bus that reports failed handlers through `tracing`.
    pub fn new() -> Self {
        Self::with_logger(Arc::new(TracingLogger))
    }

    /// Create a bus that reports failed handlers through `logger`.
    pub fn with_logger(logger: Arc<dyn Logger>) -> Self {
        debug!("EventBus::new: creating event bus");
        Self {
            registry: Mutex::new(Registry::default()),
            next_token: AtomicU64::new(1),
            logger,
        }
    }

    /// Register `handler` for `topic`.
    ///
    /// Handlers of one topic run in registration order.
    pub fn subscribe<F>(&self, topic: Topic, handler: F) -> SubscriptionToken
    where
        F: Fn(&Topic, &Payload) + Send + Sync + 'static,
    {
        let token = SubscriptionToken(self.next_token.fetch_add(1, Ordering::Relaxed));
        let mut registry = self.registry.lock();
        debug!(topic = %topic, token = token.0, "EventBus::subscribe");
        registry.topic_of.insert(token, topic.clone());
        registry.by_topic.entry(topic).or_default().push(Registration {
            token,
            handler: Arc::new(handler),
        });
        token
    }

    /// Register `handler` and return a guard that unsubscribes on drop.
    pub fn subscribe_scoped<F>(self: &Arc<Self>, topic: Topic, handler: F) -> SubscriptionGuard
    where
        F: Fn(&Topic, &Payload) + Send + Sync + 'static,
    {
        let token = self.subscribe(topic, handler);
        SubscriptionGuard::new(Arc::clone(self), token)
    }

    /// Remove a subscription.
    ///
    /// Returns `false` for unknown or already removed tokens; this is
    /// never an error.
    pub fn unsubscribe(&self, token: SubscriptionToken) -> bool {
        let mut registry = self.registry.lock();
        let Some(topic) = registry.topic_of.remove(&token) else {
            trace!(token = token.0, "EventBus::unsubscribe: unknown token");
            return false;
        };
        if let Some(registrations) = registry.by_topic.get_mut(&topic) {
            registrations.retain(|r| r.token != token);
            if registrations.is_empty() {
                registry.by_topic.remove(&topic);
            }
        }
        debug!(topic = %topic, token = token.0, "EventBus::unsubscribe");
        true
    }

    /// Deliver `payload` to every handler subscribed to `topic` right now.
    ///
    /// The recipient list is captured before the first handler runs, so
    /// handlers that subscribe or unsubscribe do not change who receives
    /// this publish. A panicking handler is reported and skipped.
    pub fn publish(&self, topic: &Topic, payload: &Payload) -> Delivery {
        let recipients: Vec<Handler> = {
            let registry = self.registry.lock();
            match registry.by_topic.get(topic) {
                Some(registrations) => registrations
                    .iter()
                    .map(|r| Arc::clone(&r.handler))
                    .collect(),
                None => Vec::new(),
            }
        };

        let mut delivery = Delivery::default();
        for handler in recipients {
            match panic::catch_unwind(AssertUnwindSafe(|| handler(topic, payload))) {
                Ok(()) => delivery.delivered += 1,
                Err(cause) => {
                    delivery.failed += 1;
                    log_warn!(
                        self.logger,
                        "handler for '{}' panicked: {}",
                        topic,
                        panic_message(cause.as_ref())
                    );
                }
            }
        }
        trace!(
            topic = %topic,
            delivered = delivery.delivered,
            failed = delivery.failed,
            "EventBus::publish"
        );
        delivery
    }

    /// Number of live subscriptions on a topic.
    pub fn subscriber_count(&self, topic: &Topic) -> usize {
        self.registry
            .lock()
            .by_topic
            .get(topic)
            .map_or(0, |registrations| registrations.len())
    }

    /// Number of live subscriptions across all topics.
    pub fn total_subscriptions(&self) -> usize {
        self.registry.lock().topic_of.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(cause: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = cause.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = cause.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
