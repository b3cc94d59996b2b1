//! Board state store: the six buckets of orders and operational tasks.

use serde::Serialize;

use super::models::{Bucket, OperationalTask, Order, OrderBucket, TaskBucket};

/// In-memory buckets, keyed by entity id in MES order.
///
/// Reads are public; writes are reserved to the fetcher (whole buckets) and
/// to the drag/drop path (one order moving between buckets), so the store
/// always mirrors what the board document shows.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    orders_pending: OrderBucket,
    orders_in_progress: OrderBucket,
    orders_completed: OrderBucket,
    operational_tasks_pending: TaskBucket,
    operational_tasks_in_progress: TaskBucket,
    operational_tasks_completed: TaskBucket,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orders_pending(&self) -> &OrderBucket {
        &self.orders_pending
    }

    pub fn orders_in_progress(&self) -> &OrderBucket {
        &self.orders_in_progress
    }

    pub fn orders_completed(&self) -> &OrderBucket {
        &self.orders_completed
    }

    pub fn operational_tasks_pending(&self) -> &TaskBucket {
        &self.operational_tasks_pending
    }

    pub fn operational_tasks_in_progress(&self) -> &TaskBucket {
        &self.operational_tasks_in_progress
    }

    pub fn operational_tasks_completed(&self) -> &TaskBucket {
        &self.operational_tasks_completed
    }

    pub fn orders(&self, bucket: Bucket) -> &OrderBucket {
        match bucket {
            Bucket::Pending => &self.orders_pending,
            Bucket::InProgress => &self.orders_in_progress,
            Bucket::Completed => &self.orders_completed,
        }
    }

    pub fn operational_tasks(&self, bucket: Bucket) -> &TaskBucket {
        match bucket {
            Bucket::Pending => &self.operational_tasks_pending,
            Bucket::InProgress => &self.operational_tasks_in_progress,
            Bucket::Completed => &self.operational_tasks_completed,
        }
    }

    /// Bucket currently holding the order, if any.
    pub fn order_bucket(&self, order_id: i64) -> Option<Bucket> {
        Bucket::ALL
            .into_iter()
            .find(|b| self.orders(*b).contains_key(&order_id))
    }

    pub(crate) fn orders_mut(&mut self, bucket: Bucket) -> &mut OrderBucket {
        match bucket {
            Bucket::Pending => &mut self.orders_pending,
            Bucket::InProgress => &mut self.orders_in_progress,
            Bucket::Completed => &mut self.orders_completed,
        }
    }

    pub(crate) fn operational_tasks_mut(&mut self, bucket: Bucket) -> &mut TaskBucket {
        match bucket {
            Bucket::Pending => &mut self.operational_tasks_pending,
            Bucket::InProgress => &mut self.operational_tasks_in_progress,
            Bucket::Completed => &mut self.operational_tasks_completed,
        }
    }

    pub(crate) fn replace_orders(&mut self, bucket: Bucket, orders: OrderBucket) {
        *self.orders_mut(bucket) = orders;
    }

    pub(crate) fn replace_operational_tasks(&mut self, bucket: Bucket, tasks: TaskBucket) {
        *self.operational_tasks_mut(bucket) = tasks;
    }

    /// Move an order out of whichever bucket holds it and append the
    /// server-confirmed version to `to`.
    pub(crate) fn move_order(&mut self, order: Order, to: Bucket) {
        for bucket in Bucket::ALL {
            self.orders_mut(bucket).shift_remove(&order.id);
        }
        self.orders_mut(to).insert(order.id, order);
    }

    pub(crate) fn insert_order(&mut self, bucket: Bucket, order: Order, front: bool) {
        let orders = self.orders_mut(bucket);
        if front {
            orders.shift_insert(0, order.id, order);
        } else {
            orders.insert(order.id, order);
        }
    }

    pub(crate) fn insert_operational_task(
        &mut self,
        bucket: Bucket,
        task: OperationalTask,
        front: bool,
    ) {
        let tasks = self.operational_tasks_mut(bucket);
        if front {
            tasks.shift_insert(0, task.id, task);
        } else {
            tasks.insert(task.id, task);
        }
    }
}
