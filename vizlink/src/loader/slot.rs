//! Per-view holder for one piece of asynchronously loaded data.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::debug;

use super::request::{LatestRequest, RequestTicket};
use super::types::LoadError;

/// Load state of a [`DataSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    /// Nothing requested yet
    Empty,
    /// A request is in flight
    Loading,
    /// Data is available
    Ready,
    /// The latest request failed; the view shows "no data"
    Failed,
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SlotStatus::Empty => "empty",
            SlotStatus::Loading => "loading",
            SlotStatus::Ready => "ready",
            SlotStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Data was requested before it resolved, or its load failed.
///
/// Queries that hit this treat it as an empty result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Data unavailable ({status})")]
pub struct DataUnavailable {
    pub status: SlotStatus,
}

/// Outcome of delivering a result to a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotUpdate {
    /// The result was stored
    Applied,
    /// A newer request was issued; the result was discarded
    Stale,
}

enum SlotState<T> {
    Empty,
    Loading,
    Ready(Arc<T>),
    Failed(LoadError),
}

/// Holds the latest loaded value of one data item for one view.
///
/// Requests are ticketed: only the result of the most recently issued
/// request is ever stored.
pub struct DataSlot<T> {
    state: RwLock<SlotState<T>>,
    requests: LatestRequest,
}

impl<T> Default for DataSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DataSlot<T> {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(SlotState::Empty),
            requests: LatestRequest::new(),
        }
    }

    /// Mark a new request in flight and return its ticket.
    ///
    /// Data from an earlier request stays readable until this one
    /// resolves; a failure from an earlier request is cleared.
    pub fn begin(&self) -> RequestTicket {
        let ticket = self.requests.issue();
        let mut state = self.state.write();
        if !matches!(*state, SlotState::Ready(_)) {
            *state = SlotState::Loading;
        }
        ticket
    }

    /// Deliver the result of the request identified by `ticket`.
    pub fn complete(&self, ticket: RequestTicket, result: Result<T, LoadError>) -> SlotUpdate {
        let mut state = self.state.write();
        // Checked under the write lock so begin() cannot interleave
        if !self.requests.is_current(ticket) {
            debug!(
                generation = ticket.generation(),
                current = self.requests.current(),
                "Discarding stale load result"
            );
            return SlotUpdate::Stale;
        }
        *state = match result {
            Ok(value) => SlotState::Ready(Arc::new(value)),
            Err(error) => SlotState::Failed(error),
        };
        SlotUpdate::Applied
    }

    /// Drop any data and supersede outstanding requests.
    pub fn reset(&self) {
        let mut state = self.state.write();
        self.requests.invalidate();
        *state = SlotState::Empty;
    }

    pub fn status(&self) -> SlotStatus {
        match *self.state.read() {
            SlotState::Empty => SlotStatus::Empty,
            SlotState::Loading => SlotStatus::Loading,
            SlotState::Ready(_) => SlotStatus::Ready,
            SlotState::Failed(_) => SlotStatus::Failed,
        }
    }

    /// Current data, `None` while unavailable.
    pub fn get(&self) -> Option<Arc<T>> {
        self.try_get().ok()
    }

    /// Current data, or why it is unavailable.
    pub fn try_get(&self) -> Result<Arc<T>, DataUnavailable> {
        match &*self.state.read() {
            SlotState::Ready(value) => Ok(Arc::clone(value)),
            SlotState::Empty => Err(DataUnavailable {
                status: SlotStatus::Empty,
            }),
            SlotState::Loading => Err(DataUnavailable {
                status: SlotStatus::Loading,
            }),
            SlotState::Failed(_) => Err(DataUnavailable {
                status: SlotStatus::Failed,
            }),
        }
    }

    /// Error of the latest request, if it failed.
    pub fn error(&self) -> Option<LoadError> {
        match &*self.state.read() {
            SlotState::Failed(error) => Some(error.clone()),
            _ => None,
        }
    }
}

impl<T> fmt::Debug for DataSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSlot")
            .field("status", &self.status())
            .field("generation", &self.requests.current())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetch_error() -> LoadError {
        LoadError::Fetch {
            name: "cells".to_string(),
            reason: "timeout".to_string(),
        }
    }

    #[test]
    fn test_lifecycle() {
        let slot: DataSlot<Vec<u32>> = DataSlot::new();
        assert_eq!(slot.status(), SlotStatus::Empty);
        assert!(slot.get().is_none());

        let ticket = slot.begin();
        assert_eq!(slot.status(), SlotStatus::Loading);
        assert_eq!(
            slot.try_get().unwrap_err(),
            DataUnavailable {
                status: SlotStatus::Loading
            }
        );

        assert_eq!(slot.complete(ticket, Ok(vec![1, 2, 3])), SlotUpdate::Applied);
        assert_eq!(slot.status(), SlotStatus::Ready);
        assert_eq!(*slot.get().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_late_stale_result_is_discarded() {
        let slot: DataSlot<&'static str> = DataSlot::new();
        let first = slot.begin();
        let second = slot.begin();

        assert_eq!(slot.complete(second, Ok("new")), SlotUpdate::Applied);
        assert_eq!(slot.complete(first, Ok("old")), SlotUpdate::Stale);
        assert_eq!(*slot.get().unwrap(), "new");
    }

    #[test]
    fn test_stale_failure_does_not_clobber_data() {
        let slot: DataSlot<u8> = DataSlot::new();
        let first = slot.begin();
        let second = slot.begin();
        slot.complete(second, Ok(7));
        assert_eq!(slot.complete(first, Err(fetch_error())), SlotUpdate::Stale);
        assert_eq!(slot.status(), SlotStatus::Ready);
    }

    #[test]
    fn test_failure_is_no_data() {
        let slot: DataSlot<u8> = DataSlot::new();
        let ticket = slot.begin();
        slot.complete(ticket, Err(fetch_error()));
        assert_eq!(slot.status(), SlotStatus::Failed);
        assert!(slot.get().is_none());
        assert_eq!(slot.error(), Some(fetch_error()));
    }

    #[test]
    fn test_refresh_keeps_previous_data_visible() {
        let slot: DataSlot<u8> = DataSlot::new();
        let ticket = slot.begin();
        slot.complete(ticket, Ok(1));
        let _refresh = slot.begin();
        assert_eq!(slot.status(), SlotStatus::Ready);
        assert_eq!(*slot.get().unwrap(), 1);
    }

    #[test]
    fn test_reset_supersedes_in_flight() {
        let slot: DataSlot<u8> = DataSlot::new();
        let ticket = slot.begin();
        slot.reset();
        assert_eq!(slot.complete(ticket, Ok(1)), SlotUpdate::Stale);
        assert_eq!(slot.status(), SlotStatus::Empty);
    }
}
