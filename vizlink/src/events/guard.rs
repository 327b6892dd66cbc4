//! Scoped subscriptions.

use std::sync::Arc;

use super::bus::{EventBus, SubscriptionToken};

/// Subscription that is released when the guard is dropped.
///
/// Tie it to the lifetime of whatever owns the handler (usually an
/// active view) so no token outlives its owner, including on early
/// returns and unwinding.
#[must_use = "dropping the guard unsubscribes immediately"]
pub struct SubscriptionGuard {
    bus: Arc<EventBus>,
    token: Option<SubscriptionToken>,
}

impl SubscriptionGuard {
    pub(crate) fn new(bus: Arc<EventBus>, token: SubscriptionToken) -> Self {
        Self {
            bus,
            token: Some(token),
        }
    }

    /// Token of the held subscription, `None` once released.
    pub fn token(&self) -> Option<SubscriptionToken> {
        self.token
    }

    /// Unsubscribe now instead of on drop.
    pub fn release(&mut self) {
        if let Some(token) = self.token.take() {
            self.bus.unsubscribe(token);
        }
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for SubscriptionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionGuard")
            .field("token", &self.token)
            .finish()
    }
}
