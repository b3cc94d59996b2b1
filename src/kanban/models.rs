use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::KanbanError;

/// Lifecycle bucket shared by orders and operational tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Pending,
    InProgress,
    Completed,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Pending, Bucket::InProgress, Bucket::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Suffix used by the MES for container ids and endpoint names.
    fn suffix(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "InProgress",
            Self::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Orders,
    OperationalTasks,
}

impl EntityKind {
    fn prefix(&self) -> &'static str {
        match self {
            Self::Orders => "orders",
            Self::OperationalTasks => "operationalTasks",
        }
    }
}

/// One of the six board columns, e.g. `ordersInProgress`.
///
/// The same name is used as the DOM id of the column and as the last path
/// segment of the endpoint that populates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId {
    pub kind: EntityKind,
    pub bucket: Bucket,
}

impl ContainerId {
    pub const ALL: [ContainerId; 6] = [
        ContainerId::orders(Bucket::Pending),
        ContainerId::orders(Bucket::InProgress),
        ContainerId::orders(Bucket::Completed),
        ContainerId::tasks(Bucket::Pending),
        ContainerId::tasks(Bucket::InProgress),
        ContainerId::tasks(Bucket::Completed),
    ];

    pub const fn orders(bucket: Bucket) -> Self {
        Self {
            kind: EntityKind::Orders,
            bucket,
        }
    }

    pub const fn tasks(bucket: Bucket) -> Self {
        Self {
            kind: EntityKind::OperationalTasks,
            bucket,
        }
    }

    pub fn dom_id(&self) -> String {
        format!("{}{}", self.kind.prefix(), self.bucket.suffix())
    }
}

impl std::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.dom_id())
    }
}

impl FromStr for ContainerId {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContainerId::ALL
            .into_iter()
            .find(|c| c.dom_id() == s)
            .ok_or_else(|| KanbanError::UnknownContainer(s.to_string()))
    }
}

impl Serialize for ContainerId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.dom_id())
    }
}

/// Order states as coded by the MES.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderState {
    #[serde(rename = "01pending", alias = "pending")]
    Pending,
    #[serde(rename = "02accepted", alias = "accepted")]
    Accepted,
    #[serde(rename = "03inProgress", alias = "inProgress")]
    InProgress,
    #[serde(rename = "04completed", alias = "completed")]
    Completed,
    #[serde(rename = "05declined", alias = "declined")]
    Declined,
    #[serde(rename = "06interrupted", alias = "interrupted")]
    Interrupted,
    #[serde(rename = "07abandoned", alias = "abandoned")]
    Abandoned,
    #[serde(other)]
    Unknown,
}

impl OrderState {
    /// Column an order in this state is shown in, if any.
    pub fn bucket(&self) -> Option<Bucket> {
        match self {
            Self::Pending | Self::Accepted => Some(Bucket::Pending),
            Self::InProgress => Some(Bucket::InProgress),
            Self::Completed => Some(Bucket::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
    #[serde(rename = "01pending", alias = "pending")]
    Pending,
    #[serde(rename = "02started", alias = "started")]
    Started,
    #[serde(rename = "03finished", alias = "finished")]
    Finished,
    #[serde(rename = "04rejected", alias = "rejected")]
    Rejected,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskType {
    #[serde(rename = "01otherCase")]
    OtherCase,
    #[serde(rename = "02executionOperationInOrder")]
    ExecutionOperationInOrder,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordingType {
    #[serde(rename = "01basic")]
    Basic,
    #[serde(rename = "02cumulated")]
    Cumulated,
    #[serde(rename = "03forEach")]
    ForEach,
    #[serde(other)]
    Unknown,
}

/// Which product identifier a card shows. Anything unrecognized falls back
/// to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProductDisplay {
    #[default]
    #[serde(rename = "01number")]
    Number,
    #[serde(rename = "02name")]
    Name,
    #[serde(rename = "03both")]
    Both,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub number: String,
    pub state: OrderState,
    pub product_number: Option<String>,
    pub product_name: Option<String>,
    pub planned_quantity: Option<f64>,
    pub done_quantity: Option<f64>,
    pub product_unit: Option<String>,
    pub production_line_number: Option<String>,
    pub company_name: Option<String>,
    pub master_order_number: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub dashboard_show_description: bool,
    #[serde(default)]
    pub dashboard_show_for_product: ProductDisplay,
    pub type_of_production_recording: Option<RecordingType>,
}

impl Order {
    /// Done quantity, 0 when the MES omits it.
    pub fn done(&self) -> f64 {
        self.done_quantity.unwrap_or(0.0)
    }

    pub fn percent_complete(&self) -> i64 {
        percent_complete(self.done(), self.planned_quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationalTask {
    pub id: i64,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub state: TaskState,
    pub order_id: Option<i64>,
    pub order_number: Option<String>,
    pub order_product_number: Option<String>,
    pub order_product_name: Option<String>,
    pub product_number: Option<String>,
    pub product_name: Option<String>,
    pub workstation_number: Option<String>,
    pub staff_name: Option<String>,
    pub planned_quantity: Option<f64>,
    pub used_quantity: Option<f64>,
    pub product_unit: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub dashboard_show_description: bool,
    #[serde(default)]
    pub dashboard_show_for_product: ProductDisplay,
}

impl OperationalTask {
    pub fn used(&self) -> f64 {
        self.used_quantity.unwrap_or(0.0)
    }

    pub fn percent_complete(&self) -> i64 {
        percent_complete(self.used(), self.planned_quantity)
    }

    pub fn is_execution_in_order(&self) -> bool {
        self.task_type == TaskType::ExecutionOperationInOrder
    }
}

/// `round(done * 100 / planned)`, with no upper clamp.
///
/// A missing, zero or negative planned quantity yields 0.
pub fn percent_complete(done: f64, planned: Option<f64>) -> i64 {
    match planned {
        Some(planned) if planned > 0.0 => {
            let percent = (done * 100.0 / planned).round();
            if percent.is_finite() { percent as i64 } else { 0 }
        }
        _ => 0,
    }
}

pub type OrderBucket = IndexMap<i64, Order>;
pub type TaskBucket = IndexMap<i64, OperationalTask>;

/// Response of `PUT /rest/dashboardKanban/updateOrderState/{id}`.
///
/// A present `message` means the MES refused the transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStateChange {
    pub order: Option<Order>,
    #[serde(default)]
    pub message: Option<String>,
}
