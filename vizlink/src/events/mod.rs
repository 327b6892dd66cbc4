//! Event bus for transient view notifications.
//!
//! Hover, status, readiness and similar per-frame signals travel over the
//! bus; durable shared state lives in the
//! [coordination space](crate::coordination) instead.
//!
//! # Architecture
//!
//! ```text
//!   scatterplot        spatial          heatmap
//!       │ publish         │ subscribe      │ subscribe
//!       ▼                 ▼                ▼
//! ┌─────────────────────────────────────────────────┐
//! │                   EVENT BUS                      │
//! │   topic → [handler, handler, ...] (in order)    │
//! │   synchronous, snapshot of recipients per call  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use serde_json::json;
//! use vizlink::events::{EventBus, Topic};
//!
//! let bus = Arc::new(EventBus::new());
//! let guard = bus.subscribe_scoped(Topic::StatusInfo, |_topic, payload| {
//!     println!("status: {}", payload);
//! });
//!
//! let delivery = bus.publish(&Topic::StatusInfo, &json!("3 cells selected"));
//! assert_eq!(delivery.delivered, 1);
//!
//! drop(guard);
//! assert_eq!(bus.subscriber_count(&Topic::StatusInfo), 0);
//! ```

mod bus;
mod guard;
mod topic;

pub use bus::{Delivery, EventBus, Handler, Payload, SubscriptionToken};
pub use guard::SubscriptionGuard;
pub use topic::{to_payload, HoverInfo, SelectionMode, Topic, ViewInfo};
