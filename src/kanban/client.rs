//! MES REST client for the dashboard Kanban endpoints.

use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::models::{
    Bucket, ContainerId, OperationalTask, Order, OrderBucket, OrderStateChange, TaskBucket,
};
use crate::errors::KanbanError;

const KANBAN_PATH: &str = "/rest/dashboardKanban";

/// Operations the board needs from the MES.
#[async_trait]
pub trait KanbanClient: Send + Sync {
    async fn orders(&self, bucket: Bucket) -> Result<OrderBucket, KanbanError>;

    async fn operational_tasks(&self, bucket: Bucket) -> Result<TaskBucket, KanbanError>;

    /// Ask the MES to advance an order to its next state.
    async fn update_order_state(&self, order_id: i64) -> Result<OrderStateChange, KanbanError>;
}

/// Entities that key a bucket by their own id.
trait Keyed {
    fn key(&self) -> i64;
}

impl Keyed for Order {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for OperationalTask {
    fn key(&self) -> i64 {
        self.id
    }
}

/// Bucket payloads arrive either as a list or as an object keyed by id.
#[derive(Deserialize)]
#[serde(untagged)]
enum KeyedPayload<T> {
    List(Vec<T>),
    Map(IndexMap<String, T>),
}

impl<T: Keyed> KeyedPayload<T> {
    fn into_bucket(self) -> IndexMap<i64, T> {
        match self {
            KeyedPayload::List(items) => items.into_iter().map(|e| (e.key(), e)).collect(),
            KeyedPayload::Map(items) => items.into_values().map(|e| (e.key(), e)).collect(),
        }
    }
}

/// `reqwest`-backed client rooted at the MES base URL.
#[derive(Debug, Clone)]
pub struct HttpKanbanClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpKanbanClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, KanbanError> {
        let mut builder = reqwest::Client::builder().user_agent("dashboard-kanban");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(KanbanError::ClientBuild)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn bucket_url(&self, container: ContainerId) -> String {
        format!("{}{}/{}", self.base_url, KANBAN_PATH, container.dom_id())
    }

    fn update_state_url(&self, order_id: i64) -> String {
        format!("{}{}/updateOrderState/{}", self.base_url, KANBAN_PATH, order_id)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<T, KanbanError> {
        let resp = request.send().await.map_err(|source| KanbanError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(KanbanError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        resp.json::<T>().await.map_err(|source| KanbanError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn fetch_bucket<T>(&self, container: ContainerId) -> Result<IndexMap<i64, T>, KanbanError>
    where
        T: Keyed + DeserializeOwned,
    {
        let url = self.bucket_url(container);
        tracing::debug!(%url, "fetching bucket");
        let payload: KeyedPayload<T> = self.send_json(self.http.get(&url), &url).await?;
        Ok(payload.into_bucket())
    }
}

#[async_trait]
impl KanbanClient for HttpKanbanClient {
    async fn orders(&self, bucket: Bucket) -> Result<OrderBucket, KanbanError> {
        self.fetch_bucket(ContainerId::orders(bucket)).await
    }

    async fn operational_tasks(&self, bucket: Bucket) -> Result<TaskBucket, KanbanError> {
        self.fetch_bucket(ContainerId::tasks(bucket)).await
    }

    async fn update_order_state(&self, order_id: i64) -> Result<OrderStateChange, KanbanError> {
        let url = self.update_state_url(order_id);
        tracing::debug!(%url, order_id, "requesting order state change");
        let change: OrderStateChange = self.send_json(self.http.put(&url), &url).await?;
        if change.order.is_none() && change.message.is_none() {
            return Err(KanbanError::EmptyTransition { order_id });
        }
        Ok(change)
    }
}
