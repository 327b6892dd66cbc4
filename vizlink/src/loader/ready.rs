//! Readiness of the data items a view waits for.

use std::collections::BTreeMap;

/// Tracks which of a view's data items have loaded.
///
/// A view is ready once every item it waits for has been marked ready,
/// at which point its loading indicator can be cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyTracker {
    items: BTreeMap<String, bool>,
}

impl ReadyTracker {
    /// Track `items`, all initially pending.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(|item| (item.into(), false)).collect(),
        }
    }

    /// Mark an item ready. Returns `false` for items not being tracked.
    pub fn set_ready(&mut self, item: &str) -> bool {
        match self.items.get_mut(item) {
            Some(ready) => {
                *ready = true;
                true
            }
            None => false,
        }
    }

    /// Whether every tracked item is ready.
    pub fn is_ready(&self) -> bool {
        self.items.values().all(|ready| *ready)
    }

    pub fn is_item_ready(&self, item: &str) -> bool {
        self.items.get(item).copied().unwrap_or(false)
    }

    /// Items still pending, in name order.
    pub fn pending(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|(_, ready)| !**ready)
            .map(|(item, _)| item.as_str())
            .collect()
    }

    /// Mark every item pending again (e.g. after the dataset changed).
    pub fn reset(&mut self) {
        for ready in self.items.values_mut() {
            *ready = false;
        }
    }
}
