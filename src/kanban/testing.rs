//! Fixtures shared by the kanban unit tests: entity builders, an in-memory
//! client and a mock MES served by axum on an ephemeral port.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use serde_json::{Value, json};

use super::client::KanbanClient;
use super::models::{Bucket, OperationalTask, Order, OrderBucket, OrderStateChange, TaskBucket};
use crate::errors::KanbanError;

pub fn order_json(id: i64, state: &str) -> Value {
    json!({
        "id": id,
        "number": format!("O-{}", id),
        "state": state,
        "productNumber": format!("P-{}", id),
        "productName": format!("Product {}", id),
        "plannedQuantity": 100,
        "doneQuantity": 0,
        "productUnit": "pcs",
    })
}

pub fn task_json(id: i64, state: &str) -> Value {
    json!({
        "id": id,
        "number": format!("T-{}", id),
        "name": format!("Task {}", id),
        "type": "02executionOperationInOrder",
        "state": state,
        "orderId": 100 + id,
        "orderNumber": format!("O-{}", 100 + id),
        "orderProductNumber": "OP-1",
        "orderProductName": "Frame",
        "productNumber": "P-1",
        "productName": "Tube",
        "workstationNumber": "WS-1",
        "plannedQuantity": 10,
        "usedQuantity": 4,
        "productUnit": "pcs",
    })
}

pub fn order(id: i64, state: &str) -> Order {
    serde_json::from_value(order_json(id, state)).expect("valid order fixture")
}

pub fn task(id: i64, state: &str) -> OperationalTask {
    serde_json::from_value(task_json(id, state)).expect("valid task fixture")
}

// ── In-memory client ─────────────────────────────────────────────────

/// Scripted client: serves fixed buckets and pops transition responses.
#[derive(Default)]
pub struct FakeClient {
    pub orders: HashMap<Bucket, OrderBucket>,
    pub tasks: HashMap<Bucket, TaskBucket>,
    pub failing: Vec<Bucket>,
    pub transitions: Mutex<Vec<Result<OrderStateChange, KanbanError>>>,
    pub calls: Mutex<Vec<i64>>,
}

impl FakeClient {
    pub fn with_order(mut self, bucket: Bucket, order: Order) -> Self {
        self.orders.entry(bucket).or_default().insert(order.id, order);
        self
    }

    pub fn with_task(mut self, bucket: Bucket, task: OperationalTask) -> Self {
        self.tasks.entry(bucket).or_default().insert(task.id, task);
        self
    }

    pub fn failing_orders(mut self, bucket: Bucket) -> Self {
        self.failing.push(bucket);
        self
    }

    pub fn responding(self, response: Result<OrderStateChange, KanbanError>) -> Self {
        self.transitions.lock().unwrap().push(response);
        self
    }

    pub fn calls(&self) -> Vec<i64> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl KanbanClient for FakeClient {
    async fn orders(&self, bucket: Bucket) -> Result<OrderBucket, KanbanError> {
        if self.failing.contains(&bucket) {
            return Err(KanbanError::Status {
                url: format!("fake://orders/{}", bucket),
                status: 500,
            });
        }
        Ok(self.orders.get(&bucket).cloned().unwrap_or_default())
    }

    async fn operational_tasks(&self, bucket: Bucket) -> Result<TaskBucket, KanbanError> {
        Ok(self.tasks.get(&bucket).cloned().unwrap_or_default())
    }

    async fn update_order_state(&self, order_id: i64) -> Result<OrderStateChange, KanbanError> {
        self.calls.lock().unwrap().push(order_id);
        self.transitions
            .lock()
            .unwrap()
            .pop()
            .unwrap_or(Err(KanbanError::EmptyTransition { order_id }))
    }
}

// ── Mock MES over HTTP ───────────────────────────────────────────────

#[derive(Default, Clone)]
struct MockState {
    buckets: HashMap<String, Value>,
    transition: Option<Value>,
    requests: Arc<Mutex<Vec<i64>>>,
}

#[derive(Default)]
pub struct MockMes {
    state: MockState,
}

pub struct RunningMes {
    addr: std::net::SocketAddr,
    requests: Arc<Mutex<Vec<i64>>>,
}

impl RunningMes {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn transition_requests(&self) -> Vec<i64> {
        self.requests.lock().unwrap().clone()
    }
}

impl MockMes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bucket(mut self, name: &str, body: Value) -> Self {
        self.state.buckets.insert(name.to_string(), body);
        self
    }

    pub fn transition(mut self, body: Value) -> Self {
        self.state.transition = Some(body);
        self
    }

    pub async fn spawn(self) -> RunningMes {
        let requests = self.state.requests.clone();
        let app = Router::new()
            .route("/rest/dashboardKanban/{name}", get(serve_bucket))
            .route(
                "/rest/dashboardKanban/updateOrderState/{id}",
                put(serve_transition),
            )
            .with_state(Arc::new(self.state));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock MES");
        let addr = listener.local_addr().expect("mock MES address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        RunningMes { addr, requests }
    }
}

async fn serve_bucket(State(state): State<Arc<MockState>>, Path(name): Path<String>) -> Response {
    match state.buckets.get(&name) {
        Some(body) => Json(body.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn serve_transition(State(state): State<Arc<MockState>>, Path(id): Path<i64>) -> Response {
    state.requests.lock().unwrap().push(id);
    match &state.transition {
        Some(body) => Json(body.clone()).into_response(),
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
