//! Translation lookup consumed by the card renderer.

use std::collections::HashMap;

/// Resolves a message key to display text.
pub trait Translate: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

/// Built-in English labels for the keys the board uses.
const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    ("basic.dashboard.orders.productionLineNumber.label", "Production line"),
    ("basic.dashboard.orders.product.label", "Product"),
    ("basic.dashboard.orders.plannedQuantity.label", "Planned quantity"),
    ("basic.dashboard.orders.doneQuantity.label", "Done quantity"),
    ("basic.dashboard.orders.companyName.label", "Client"),
    ("basic.dashboard.orders.masterOrderNumber.label", "Master order"),
    ("basic.dashboard.orders.description.label", "Description"),
    ("basic.dashboard.orders.showTerminal.label", "Terminal"),
    ("basic.dashboard.operationalTasks.name.label", "Name"),
    ("basic.dashboard.operationalTasks.orderNumber.label", "Order"),
    ("basic.dashboard.operationalTasks.workstationNumber.label", "Workstation"),
    ("basic.dashboard.operationalTasks.orderProduct.label", "Order product"),
    ("basic.dashboard.operationalTasks.product.label", "Product"),
    ("basic.dashboard.operationalTasks.plannedQuantity.label", "Planned quantity"),
    ("basic.dashboard.operationalTasks.usedQuantity.label", "Used quantity"),
    ("basic.dashboard.operationalTasks.staffName.label", "Staff"),
    ("basic.dashboard.operationalTasks.description.label", "Description"),
    ("basic.dashboard.operationalTasks.showTerminal.label", "Terminal"),
    ("basic.dashboard.orderStateChange.error", "Order state change failed"),
];

/// Key → text table. Unknown keys resolve to themselves.
#[derive(Debug, Clone)]
pub struct MessageBundle {
    messages: HashMap<String, String>,
}

impl Default for MessageBundle {
    fn default() -> Self {
        Self {
            messages: DEFAULT_MESSAGES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl MessageBundle {
    /// Bundle without any messages; every key translates to itself.
    pub fn empty() -> Self {
        Self {
            messages: HashMap::new(),
        }
    }

    /// Defaults overlaid with `overrides`.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut bundle = Self::default();
        bundle
            .messages
            .extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        bundle
    }
}

impl Translate for MessageBundle {
    fn translate(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
