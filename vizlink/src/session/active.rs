//! An activated view: binding, subscriptions and per-view data.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Weak};

use futures::future::{self, FutureExt};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::coordination::{Binding, CoordinationError, CoordinationType, ViewKind};
use crate::events::{EventBus, Payload, SubscriptionGuard, Topic};
use crate::loader::{
    DataSlot, DataType, DataUnavailable, LoadError, LoaderRegistry, ReadyTracker, SlotStatus,
    SlotUpdate,
};
use crate::quadtree::{QuadtreeIndex, DEFAULT_MIN_CELL_SIZE};
use crate::tiling::Viewport;
use crate::views::{
    index_cells, parse_cells, selection_from_value, selection_to_value, viewport_from_snapshot,
    CellEntry, CellPosition, CellSelection,
};

/// Data files a view of `kind` loads.
pub fn data_types(kind: ViewKind) -> &'static [DataType] {
    match kind {
        ViewKind::Scatterplot => &[DataType::Cells, DataType::CellSets],
        ViewKind::Spatial => &[
            DataType::Cells,
            DataType::CellSets,
            DataType::Raster,
            DataType::Molecules,
        ],
        ViewKind::Heatmap => &[DataType::Cells, DataType::CellSets, DataType::ExpressionMatrix],
        ViewKind::CellSets => &[DataType::CellSets],
        ViewKind::Genes => &[DataType::ExpressionMatrix],
        ViewKind::Description | ViewKind::Status => &[],
    }
}

/// How one [`ActiveView::load`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Data stored in the view's slot
    Applied,
    /// A newer request for the same data was issued meanwhile
    Stale,
    /// The view was deactivated before the data arrived
    Cancelled,
    /// The load failed; the view shows "no data" for it
    Failed,
    /// The view does not use this data type
    Skipped,
}

/// Quadtree built from one loaded `cells` value.
struct CachedCellIndex {
    position: CellPosition,
    source: Arc<Value>,
    index: Arc<QuadtreeIndex<CellEntry>>,
}

/// State shared with the view's bus handlers.
struct ViewState {
    uid: String,
    slots: BTreeMap<DataType, DataSlot<Value>>,
    ready: Mutex<ReadyTracker>,
    cell_indexes: Mutex<Vec<CachedCellIndex>>,
}

impl ViewState {
    fn reset_data(&self) {
        for slot in self.slots.values() {
            slot.reset();
        }
        self.ready.lock().reset();
        self.cell_indexes.lock().clear();
    }
}

/// A view bound to the session.
///
/// Holds its coordination binding, its bus subscriptions and its loaded
/// data. Dropping it deactivates the view: subscriptions are released and
/// loads still in flight are cancelled.
pub struct ActiveView {
    kind: ViewKind,
    dataset: Option<String>,
    binding: Binding,
    bus: Arc<EventBus>,
    registry: Arc<LoaderRegistry>,
    state: Arc<ViewState>,
    guards: Vec<SubscriptionGuard>,
    cancel: CancellationToken,
}

impl ActiveView {
    pub(crate) fn new(
        uid: String,
        kind: ViewKind,
        dataset: Option<String>,
        binding: Binding,
        bus: Arc<EventBus>,
        registry: Arc<LoaderRegistry>,
        cancel: CancellationToken,
    ) -> Self {
        let types = data_types(kind);
        let state = Arc::new(ViewState {
            uid,
            slots: types.iter().map(|t| (*t, DataSlot::new())).collect(),
            ready: Mutex::new(ReadyTracker::new(types.iter().map(DataType::as_str))),
            cell_indexes: Mutex::new(Vec::new()),
        });

        // A reset drops everything the view loaded
        let weak: Weak<ViewState> = Arc::downgrade(&state);
        let reset_guard = bus.subscribe_scoped(Topic::Reset, move |_topic, _payload| {
            if let Some(state) = weak.upgrade() {
                debug!(uid = %state.uid, "Resetting view data");
                state.reset_data();
            }
        });

        info!(uid = %state.uid, kind = %kind.as_str(), "Activated view");
        Self {
            kind,
            dataset,
            binding,
            bus,
            registry,
            state,
            guards: vec![reset_guard],
            cancel,
        }
    }

    pub fn uid(&self) -> &str {
        &self.state.uid
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    /// Dataset the view displays.
    pub fn dataset(&self) -> Option<&str> {
        self.dataset.as_deref()
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    /// Subscribe for as long as the view stays active.
    pub fn subscribe<F>(&mut self, topic: Topic, handler: F)
    where
        F: Fn(&Topic, &Payload) + Send + Sync + 'static,
    {
        self.guards.push(self.bus.subscribe_scoped(topic, handler));
    }

    /// Number of bus subscriptions held by the view.
    pub fn subscription_count(&self) -> usize {
        self.guards.len()
    }

    /// Load one data file into the view.
    ///
    /// Only the latest request per data type is kept. A failure is
    /// reported on `status-info` and leaves only this view without the
    /// data. When the last pending item settles, `clear-please-wait` is
    /// published for the view.
    pub async fn load(&self, data_type: DataType) -> LoadOutcome {
        let Some(slot) = self.state.slots.get(&data_type) else {
            return LoadOutcome::Skipped;
        };
        let ticket = slot.begin();

        let future = match &self.dataset {
            Some(dataset) => self.registry.load(dataset, data_type),
            None => future::ready(Err(LoadError::Invalid {
                name: data_type.to_string(),
                reason: "no dataset selected".to_string(),
            }))
            .boxed(),
        };

        let result = tokio::select! {
            biased;

            _ = self.cancel.cancelled() => {
                debug!(uid = %self.uid(), data_type = %data_type, "Load cancelled");
                return LoadOutcome::Cancelled;
            }

            result = future => result,
        };

        let failure = result.as_ref().err().cloned();
        if slot.complete(ticket, result) == SlotUpdate::Stale {
            return LoadOutcome::Stale;
        }

        let outcome = match failure {
            Some(error) => {
                warn!(uid = %self.uid(), data_type = %data_type, error = %error, "Load failed");
                self.bus.publish(&Topic::StatusInfo, &json!(error.to_string()));
                LoadOutcome::Failed
            }
            None => LoadOutcome::Applied,
        };
        self.settle(data_type);
        outcome
    }

    /// Load every data file the view uses, concurrently.
    pub async fn load_all(&self) -> Vec<(DataType, LoadOutcome)> {
        let types = data_types(self.kind);
        let outcomes = future::join_all(types.iter().map(|t| self.load(*t))).await;
        types.iter().copied().zip(outcomes).collect()
    }

    fn settle(&self, data_type: DataType) {
        let now_ready = {
            let mut ready = self.state.ready.lock();
            let was_ready = ready.is_ready();
            ready.set_ready(data_type.as_str());
            !was_ready && ready.is_ready()
        };
        if now_ready {
            self.bus
                .publish(&Topic::ClearPleaseWait, &json!(self.uid()));
        }
    }

    /// Loaded data, or [`DataUnavailable`] while loading or after a failure.
    pub fn data(&self, data_type: DataType) -> Result<Arc<Value>, DataUnavailable> {
        match self.state.slots.get(&data_type) {
            Some(slot) => slot.try_get(),
            None => Err(DataUnavailable {
                status: SlotStatus::Empty,
            }),
        }
    }

    pub fn status(&self, data_type: DataType) -> SlotStatus {
        self.state
            .slots
            .get(&data_type)
            .map_or(SlotStatus::Empty, DataSlot::status)
    }

    /// Whether every data file the view uses has settled.
    pub fn is_ready(&self) -> bool {
        self.state.ready.lock().is_ready()
    }

    /// Data items still loading.
    pub fn pending(&self) -> Vec<String> {
        self.state
            .ready
            .lock()
            .pending()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Spatial index over the loaded cells under `position`.
    ///
    /// Built once per loaded `cells` value and reused until a load
    /// replaces it. While the cells are loading, failed or not used by
    /// this view, the result is the empty handle.
    pub fn cell_index(&self, position: &CellPosition) -> Arc<QuadtreeIndex<CellEntry>> {
        let Ok(cells) = self.data(DataType::Cells) else {
            return Arc::new(QuadtreeIndex::empty());
        };

        let mut cache = self.state.cell_indexes.lock();
        if let Some(hit) = cache
            .iter()
            .find(|c| c.position == *position && Arc::ptr_eq(&c.source, &cells))
        {
            return Arc::clone(&hit.index);
        }
        // Indexes over superseded cells are never asked for again
        cache.retain(|c| Arc::ptr_eq(&c.source, &cells));

        let index = match parse_cells(&cells) {
            Ok(map) => index_cells(&map, position, DEFAULT_MIN_CELL_SIZE),
            Err(e) => {
                warn!(uid = %self.uid(), error = %e, "Cells data is malformed, no spatial index");
                QuadtreeIndex::empty()
            }
        };
        let index = Arc::new(index);
        debug!(
            uid = %self.uid(),
            position = ?position,
            indexed = index.len(),
            skipped = index.skipped(),
            "Built cell index"
        );
        cache.push(CachedCellIndex {
            position: position.clone(),
            source: cells,
            index: Arc::clone(&index),
        });
        index
    }

    /// Drop loaded data, e.g. after the dataset changed.
    pub fn reset_data(&self) {
        self.state.reset_data();
    }

    /// Current cell selection.
    pub fn selection(&self) -> CellSelection {
        self.binding
            .get(CoordinationType::CellSelection)
            .map(|value| selection_from_value(&value))
            .unwrap_or_default()
    }

    /// Replace the cell selection and announce it.
    pub fn set_selection(&self, selection: &CellSelection) -> Result<(), CoordinationError> {
        let value = selection_to_value(selection);
        self.binding
            .set(CoordinationType::CellSelection, value.clone())?;
        self.bus.publish(&Topic::CellsSelection, &value);
        Ok(())
    }

    /// Viewport from the view's coordinated zoom and target.
    pub fn viewport(&self, width: f64, height: f64) -> Option<Viewport> {
        viewport_from_snapshot(&self.binding.snapshot(), self.kind, width, height)
    }

    /// Cancel loads in flight. Results arriving afterwards are dropped.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Deactivate now instead of on drop.
    pub fn deactivate(self) {
        drop(self);
    }
}

impl Drop for ActiveView {
    fn drop(&mut self) {
        self.cancel.cancel();
        debug!(uid = %self.state.uid, "Deactivated view");
    }
}

impl fmt::Debug for ActiveView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveView")
            .field("uid", &self.state.uid)
            .field("kind", &self.kind)
            .field("dataset", &self.dataset)
            .field("subscriptions", &self.guards.len())
            .finish()
    }
}
