//! Latest-request-wins tracking for overlapping fetches.

use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket identifying one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Generation counter for one logical resource.
///
/// Every new request supersedes all earlier ones. A result is applied
/// only if its ticket is still the latest when it resolves, so an old
/// response that arrives late can never overwrite a newer one.
#[derive(Debug, Default)]
pub struct LatestRequest {
    generation: AtomicU64,
}

impl LatestRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new request, superseding earlier tickets.
    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.generation.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` is the most recently issued one.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.0
    }

    /// Pass `result` through if `ticket` is current, drop it otherwise.
    pub fn resolve<T>(&self, ticket: RequestTicket, result: T) -> Option<T> {
        self.is_current(ticket).then_some(result)
    }

    /// Supersede every outstanding ticket without issuing a new request.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Generation of the latest ticket.
    pub fn current(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}
