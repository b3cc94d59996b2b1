//! Dropzone maintenance.

use super::document::{BoardDocument, Dropzone, Slot};

/// Re-derive every placeholder on the board.
///
/// All existing placeholders are dropped; one is inserted right after each
/// draggable card, and any column without draggable cards gets a single
/// trailing placeholder. Task columns get one too; the drop gate refuses
/// them. Running it twice in a row yields the same document.
pub fn update_dropzones(doc: &mut BoardDocument) {
    for container in doc.containers_mut() {
        let cards: Vec<Slot> = container
            .slots
            .drain(..)
            .filter(|slot| matches!(slot, Slot::Card(_)))
            .collect();

        let mut slots = Vec::with_capacity(cards.len() * 2 + 1);
        let mut has_draggable = false;
        for slot in cards {
            let draggable = matches!(&slot, Slot::Card(card) if card.is_draggable());
            slots.push(slot);
            if draggable {
                has_draggable = true;
                slots.push(Slot::Dropzone(Dropzone::default()));
            }
        }
        if !has_draggable {
            slots.push(Slot::Dropzone(Dropzone::default()));
        }
        container.slots = slots;
    }
}
