//! Initial board population.
//!
//! All six bucket requests are issued together and joined before any bucket
//! is written, so page readiness costs one round-trip instead of six.

use serde::Serialize;

use super::client::KanbanClient;
use super::models::{Bucket, ContainerId};
use super::store::BoardState;

/// Which containers were refreshed and which kept their previous contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    pub loaded: Vec<ContainerId>,
    pub failed: Vec<ContainerId>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Fetch every bucket concurrently and overwrite the ones that succeeded.
///
/// A failed bucket is logged and left untouched. Nothing is retried.
pub async fn load_board(client: &dyn KanbanClient, state: &mut BoardState) -> LoadReport {
    let (
        orders_pending,
        orders_in_progress,
        orders_completed,
        tasks_pending,
        tasks_in_progress,
        tasks_completed,
    ) = futures::join!(
        client.orders(Bucket::Pending),
        client.orders(Bucket::InProgress),
        client.orders(Bucket::Completed),
        client.operational_tasks(Bucket::Pending),
        client.operational_tasks(Bucket::InProgress),
        client.operational_tasks(Bucket::Completed),
    );

    let mut report = LoadReport::default();

    for (bucket, result) in Bucket::ALL
        .into_iter()
        .zip([orders_pending, orders_in_progress, orders_completed])
    {
        let container = ContainerId::orders(bucket);
        match result {
            Ok(orders) => {
                tracing::debug!(%container, count = orders.len(), "bucket loaded");
                state.replace_orders(bucket, orders);
                report.loaded.push(container);
            }
            Err(e) => {
                tracing::warn!(%container, error = %e, "failed to load bucket, keeping previous contents");
                report.failed.push(container);
            }
        }
    }

    for (bucket, result) in Bucket::ALL
        .into_iter()
        .zip([tasks_pending, tasks_in_progress, tasks_completed])
    {
        let container = ContainerId::tasks(bucket);
        match result {
            Ok(tasks) => {
                tracing::debug!(%container, count = tasks.len(), "bucket loaded");
                state.replace_operational_tasks(bucket, tasks);
                report.loaded.push(container);
            }
            Err(e) => {
                tracing::warn!(%container, error = %e, "failed to load bucket, keeping previous contents");
                report.failed.push(container);
            }
        }
    }

    report
}
