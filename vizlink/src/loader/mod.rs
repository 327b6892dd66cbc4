//! Asynchronous data loading.
//!
//! Dataset files are fetched by [`Loader`]s, registered per session in a
//! [`LoaderRegistry`] that shares one fetch between every view asking for
//! the same file. Each view keeps what it received in a [`DataSlot`],
//! which only ever stores the result of the latest request it issued, and
//! a [`ReadyTracker`] for its loading indicator.
//!
//! ```text
//!  view ── begin() ──► DataSlot ── ticket ─┐
//!                                          ▼
//!  LoaderRegistry ── shared future ──► complete(ticket, result)
//!                                          │
//!                          stale ticket? ──┴─► discarded
//! ```

mod ready;
mod registry;
mod request;
mod slot;
mod types;

pub use ready::ReadyTracker;
pub use registry::{FileLoader, LoadFuture, Loader, LoaderRegistry, StaticLoader};
pub use request::{LatestRequest, RequestTicket};
pub use slot::{DataSlot, DataUnavailable, SlotStatus, SlotUpdate};
pub use types::{DataType, LoadError};
