//! Production dashboard Kanban.
//!
//! ## Overview
//!
//! Orders and operational tasks from the MES are shown in three columns each:
//! pending, in progress and completed. Order cards can be dragged one column
//! forward; the MES decides whether the state change goes through.
//!
//! ## Module Map
//!
//! ```text
//!                ┌───────────────────────────────────────────────┐
//!   MES REST <── │ client.rs   (KanbanClient, HttpKanbanClient)  │
//!                │     ^                                         │
//!                │     │ six GETs, joined                        │
//!                │ fetcher.rs  ──> store.rs (BoardState)         │
//!                │                                               │
//!                │ render.rs  (CardRenderer) ──> view.rs          │
//!                │     │                                         │
//!                │     v                                         │
//!                │ document.rs (BoardDocument) <── dropzones.rs   │
//!                │     ^                                         │
//!                │     │ allow_drop / drop                       │
//!                │ dragdrop.rs (DragDropController) ──> PUT      │
//!                │                                               │
//!                │ dashboard.rs (Dashboard facade)               │
//!                │     ^                                         │
//!   Browser  <── │ server.rs / api.rs (axum)                     │
//!                └───────────────────────────────────────────────┘
//! ```
//!
//! ## Supporting Modules
//!
//! | Module       | Responsibility                                          |
//! |--------------|---------------------------------------------------------|
//! | `models`     | Buckets, container ids, MES state codes, entities        |
//! | `translate`  | `Translate` trait and the built-in message bundle        |
//! | `notify`     | `Notifier` trait, in-memory and log-backed sinks         |
//! | `navigation` | Detail-view and tracking-terminal link builders          |

pub mod api;
pub mod client;
pub mod dashboard;
pub mod document;
pub mod dragdrop;
pub mod dropzones;
pub mod fetcher;
pub mod models;
pub mod navigation;
pub mod notify;
pub mod render;
pub mod server;
pub mod store;
pub mod translate;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{HttpKanbanClient, KanbanClient};
pub use dashboard::Dashboard;
pub use document::{BoardDocument, CardId, DropTarget};
pub use dragdrop::DropOutcome;
pub use models::{Bucket, ContainerId, OperationalTask, Order};
pub use notify::{LogNotifier, MemoryNotifier, Notifier};
pub use render::RenderOptions;
pub use translate::{MessageBundle, Translate};
