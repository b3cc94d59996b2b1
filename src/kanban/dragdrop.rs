//! Drag/drop controller for order cards.
//!
//! Orders move forward one column at a time: pending → in progress →
//! completed. Every other combination is refused before the MES is asked.
//! Task cards are never draggable.

use std::sync::Arc;

use serde::Serialize;

use super::client::KanbanClient;
use super::document::{BoardDocument, Card, CardId, DropTarget};
use super::dropzones::update_dropzones;
use super::models::{Bucket, ContainerId, EntityKind, Order};
use super::notify::{MessageType, Notification, Notifier};
use super::render::CardRenderer;
use super::store::BoardState;

const STATE_CHANGE_ERROR_KEY: &str = "basic.dashboard.orderStateChange.error";

/// Result of a drop gesture.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DropOutcome {
    /// Illegal source/target combination; no request was sent.
    Rejected,
    /// The MES confirmed the transition and the card moved.
    Moved { order: Order, to: ContainerId },
    /// The MES answered with a message and kept the order where it was.
    Refused { message: String },
    /// The request failed; nothing moved.
    TransportFailed,
    /// The MES confirmed, but the target or card no longer matched the board.
    Inconsistent,
}

pub fn is_legal_transition(from: Bucket, to: Bucket) -> bool {
    matches!(
        (from, to),
        (Bucket::Pending, Bucket::InProgress) | (Bucket::InProgress, Bucket::Completed)
    )
}

/// The only column a card may be dragged from to land in `target`.
pub fn legal_source(target: ContainerId) -> Option<ContainerId> {
    if target.kind != EntityKind::Orders {
        return None;
    }
    Bucket::ALL
        .into_iter()
        .find(|from| is_legal_transition(*from, target.bucket))
        .map(ContainerId::orders)
}

/// The order id of a drop the board accepts.
fn gate(doc: &BoardDocument, dragged: CardId, target: DropTarget) -> Option<i64> {
    let CardId::Order(order_id) = dragged else {
        return None;
    };
    if target.container.kind != EntityKind::Orders || doc.dropzone(target).is_none() {
        return None;
    }
    let (source, _) = doc.locate(dragged)?;
    if source.kind != EntityKind::Orders {
        return None;
    }
    is_legal_transition(source.bucket, target.container.bucket).then_some(order_id)
}

/// Hover check: marks the placeholder droppable when the drop would be legal.
pub fn allow_drop(doc: &mut BoardDocument, dragged: CardId, target: DropTarget) -> bool {
    if gate(doc, dragged, target).is_none() {
        return false;
    }
    if let Some(zone) = doc.dropzone_mut(target) {
        zone.droppable = true;
    }
    true
}

/// Drag left the placeholder.
pub fn clear_drop(doc: &mut BoardDocument, target: DropTarget) {
    if let Some(zone) = doc.dropzone_mut(target) {
        zone.droppable = false;
    }
}

#[derive(Clone)]
pub struct DragDropController {
    client: Arc<dyn KanbanClient>,
    notifier: Arc<dyn Notifier>,
    renderer: CardRenderer,
}

impl DragDropController {
    pub fn new(
        client: Arc<dyn KanbanClient>,
        notifier: Arc<dyn Notifier>,
        renderer: CardRenderer,
    ) -> Self {
        Self {
            client,
            notifier,
            renderer,
        }
    }

    /// Commit a drop: ask the MES to advance the order, then swap the card
    /// for one rendered from the returned order.
    ///
    /// The store and the document are updated together so that bucket
    /// membership always matches card placement.
    pub async fn drop_card(
        &self,
        state: &mut BoardState,
        doc: &mut BoardDocument,
        dragged: CardId,
        target: DropTarget,
    ) -> DropOutcome {
        let Some(order_id) = gate(doc, dragged, target) else {
            tracing::debug!(card = %dragged, container = %target.container, "drop rejected");
            clear_drop(doc, target);
            return DropOutcome::Rejected;
        };

        let change = match self.client.update_order_state(order_id).await {
            Ok(change) => change,
            Err(e) => {
                tracing::warn!(order_id, error = %e, "order state change failed");
                clear_drop(doc, target);
                return DropOutcome::TransportFailed;
            }
        };

        // an empty message is no refusal
        if let Some(message) = change.message.filter(|m| !m.is_empty()) {
            self.notifier.add_message(Notification {
                kind: MessageType::Failure,
                title: self.renderer.translate(STATE_CHANGE_ERROR_KEY),
                content: message.clone(),
                auto_close: false,
            });
            clear_drop(doc, target);
            return DropOutcome::Refused { message };
        }

        let Some(order) = change.order else {
            tracing::warn!(order_id, "order state change returned no order");
            clear_drop(doc, target);
            return DropOutcome::TransportFailed;
        };

        self.commit(state, doc, dragged, target, order)
    }

    /// Place the confirmed order on the target placeholder and in the
    /// target column's bucket, then recompute dropzones.
    ///
    /// The card lands in the column it was dropped on, so the store entry
    /// goes there too even when the returned state maps elsewhere.
    pub(crate) fn commit(
        &self,
        state: &mut BoardState,
        doc: &mut BoardDocument,
        dragged: CardId,
        target: DropTarget,
        order: Order,
    ) -> DropOutcome {
        let order_id = order.id;
        let card = Card {
            id: CardId::Order(order.id),
            element: self.renderer.order_card(&order),
        };
        let outcome = match doc.move_card_onto(dragged, target, card) {
            Ok(()) => {
                tracing::info!(order_id, to = %target.container, "order moved");
                state.move_order(order.clone(), target.container.bucket);
                DropOutcome::Moved {
                    order,
                    to: target.container,
                }
            }
            Err(e) => {
                tracing::warn!(order_id, error = %e, "can't move the item to the same place");
                DropOutcome::Inconsistent
            }
        };

        update_dropzones(doc);
        outcome
    }
}
