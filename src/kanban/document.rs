//! Board document: the rendered page as six columns of slots.
//!
//! Each column holds cards and dropzone placeholders in display order. The
//! drag/drop controller and the dropzone maintainer mutate this model; the
//! HTML served to the browser is a serialization of it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::dragdrop::legal_source;
use super::models::{ContainerId, EntityKind};
use super::view::Element;
use crate::errors::{DomError, KanbanError};

/// DOM id of a card: `order{id}` or `operationalTask{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardId {
    Order(i64),
    OperationalTask(i64),
}

impl CardId {
    pub fn dom_id(&self) -> String {
        match self {
            CardId::Order(id) => format!("order{}", id),
            CardId::OperationalTask(id) => format!("operationalTask{}", id),
        }
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.dom_id())
    }
}

impl FromStr for CardId {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |rest: &str| rest.parse::<i64>().ok();
        if let Some(id) = s.strip_prefix("operationalTask").and_then(parse) {
            return Ok(CardId::OperationalTask(id));
        }
        if let Some(id) = s.strip_prefix("order").and_then(parse) {
            return Ok(CardId::Order(id));
        }
        Err(KanbanError::UnknownCard(s.to_string()))
    }
}

/// A slot in a column that can receive a dragged card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTarget {
    #[serde(with = "container_serde")]
    pub container: ContainerId,
    pub slot: usize,
}

mod container_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::ContainerId;

    pub fn serialize<S: Serializer>(c: &ContainerId, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&c.dom_id())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<ContainerId, D::Error> {
        let name = String::deserialize(d)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: CardId,
    pub element: Element,
}

impl Card {
    pub fn is_draggable(&self) -> bool {
        self.element.has_class("draggable")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dropzone {
    /// Set while a legal drag hovers over the placeholder.
    pub droppable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Card(Card),
    Dropzone(Dropzone),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub id: ContainerId,
    pub(crate) slots: Vec<Slot>,
}

impl Container {
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.slots.iter().filter_map(|s| match s {
            Slot::Card(card) => Some(card),
            Slot::Dropzone(_) => None,
        })
    }

    /// Slot indices of the placeholders, in display order.
    pub fn dropzones(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s, Slot::Dropzone(_)))
            .map(|(i, _)| i)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardDocument {
    containers: Vec<Container>,
}

impl Default for BoardDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardDocument {
    pub fn new() -> Self {
        Self {
            containers: ContainerId::ALL
                .into_iter()
                .map(|id| Container {
                    id,
                    slots: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn container(&self, id: ContainerId) -> &Container {
        self.containers
            .iter()
            .find(|c| c.id == id)
            .unwrap_or_else(|| unreachable!("every container id is created in new()"))
    }

    pub(crate) fn container_mut(&mut self, id: ContainerId) -> &mut Container {
        self.containers
            .iter_mut()
            .find(|c| c.id == id)
            .unwrap_or_else(|| unreachable!("every container id is created in new()"))
    }

    pub(crate) fn containers_mut(&mut self) -> impl Iterator<Item = &mut Container> {
        self.containers.iter_mut()
    }

    pub fn clear(&mut self) {
        for container in &mut self.containers {
            container.slots.clear();
        }
    }

    pub fn append_card(&mut self, container: ContainerId, card: Card) {
        self.container_mut(container).slots.push(Slot::Card(card));
    }

    pub fn prepend_card(&mut self, container: ContainerId, card: Card) {
        self.container_mut(container).slots.insert(0, Slot::Card(card));
    }

    /// Where a card currently sits.
    pub fn locate(&self, card: CardId) -> Option<(ContainerId, usize)> {
        self.containers.iter().find_map(|c| {
            c.slots.iter().position(|s| matches!(s, Slot::Card(k) if k.id == card)).map(|i| (c.id, i))
        })
    }

    pub fn card(&self, card: CardId) -> Option<&Card> {
        let (container, slot) = self.locate(card)?;
        match &self.container(container).slots[slot] {
            Slot::Card(c) => Some(c),
            Slot::Dropzone(_) => None,
        }
    }

    pub fn remove_card(&mut self, card: CardId) -> Result<Card, DomError> {
        let (container, slot) = self
            .locate(card)
            .ok_or_else(|| DomError::CardNotFound(card.dom_id()))?;
        match self.container_mut(container).slots.remove(slot) {
            Slot::Card(c) => Ok(c),
            Slot::Dropzone(_) => unreachable!("locate only returns card slots"),
        }
    }

    pub fn dropzone(&self, target: DropTarget) -> Option<&Dropzone> {
        match self.container(target.container).slots.get(target.slot) {
            Some(Slot::Dropzone(zone)) => Some(zone),
            _ => None,
        }
    }

    pub(crate) fn dropzone_mut(&mut self, target: DropTarget) -> Option<&mut Dropzone> {
        match self.container_mut(target.container).slots.get_mut(target.slot) {
            Some(Slot::Dropzone(zone)) => Some(zone),
            _ => None,
        }
    }

    /// Move `card` out of its column and put `replacement` where the target
    /// placeholder was. The placeholder itself is consumed.
    ///
    /// Fails without touching the document when the target is no longer a
    /// placeholder or the card is gone.
    pub fn move_card_onto(
        &mut self,
        card: CardId,
        target: DropTarget,
        replacement: Card,
    ) -> Result<(), DomError> {
        if self.dropzone(target).is_none() {
            return Err(DomError::NotADropzone {
                container: target.container.dom_id(),
                slot: target.slot,
            });
        }
        let (source, source_slot) = self
            .locate(card)
            .ok_or_else(|| DomError::CardNotFound(card.dom_id()))?;

        let mut target_slot = target.slot;
        if source == target.container && source_slot < target_slot {
            target_slot -= 1;
        }
        self.remove_card(card)?;
        self.container_mut(target.container).slots[target_slot] = Slot::Card(replacement);
        Ok(())
    }

    pub fn to_element(&self) -> Element {
        let mut board = Element::new("div").id("dashboardKanban");
        for container in &self.containers {
            let mut column = Element::new("div").class("items").id(container.id.dom_id());
            for (index, slot) in container.slots.iter().enumerate() {
                match slot {
                    Slot::Card(card) => {
                        column = column.child(card.element.clone());
                        if container.id.kind == EntityKind::OperationalTasks {
                            column = column.child(Element::new("div").filler());
                        }
                    }
                    Slot::Dropzone(zone) => {
                        column = column.child(dropzone_element(container.id, index, zone));
                    }
                }
            }
            board = board.child(column);
        }
        board
    }

    pub fn to_html(&self) -> String {
        self.to_element().to_html()
    }
}

fn dropzone_element(container: ContainerId, slot: usize, zone: &Dropzone) -> Element {
    let mut el = Element::new("div")
        .class("dropzone rounded")
        .attr("data-container", container.dom_id())
        .attr("data-slot", slot.to_string())
        .filler();
    // the script only offers the drop to cards dragged out of this column
    if let Some(source) = legal_source(container) {
        el.set_attr("data-accepts-from", source.dom_id());
    }
    if zone.droppable {
        el.add_class("droppable");
    }
    el
}
