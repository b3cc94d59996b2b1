use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::dashboard::Dashboard;
use super::document::{CardId, DropTarget};
use super::dragdrop::DropOutcome;
use super::models::ContainerId;
use super::notify::MemoryNotifier;
use crate::errors::KanbanError;

// ── Shared application state ──────────────────────────────────────────

pub struct AppState {
    /// Every gesture locks the board, so concurrent drops queue up.
    pub dashboard: Mutex<Dashboard>,
    pub notifier: Arc<MemoryNotifier>,
}

pub type SharedState = Arc<AppState>;

// ── Request / response payloads ───────────────────────────────────────

#[derive(Deserialize)]
pub struct DropRequest {
    pub card: String,
    pub container: String,
    pub slot: usize,
}

#[derive(Serialize)]
pub struct DropResponse {
    pub outcome: DropOutcome,
    pub html: String,
}

// ── Error handling ────────────────────────────────────────────────────

pub enum ApiError {
    BadRequest(String),
}

// Handlers only surface identifier parsing errors; MES failures become a
// `DropOutcome` instead.
impl From<KanbanError> for ApiError {
    fn from(e: KanbanError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };
        (status, Json(serde_json::json!({"error": message}))).into_response()
    }
}

// ── Router ────────────────────────────────────────────────────────────

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/", get(board_page))
        .route("/api/board", get(board_snapshot))
        .route("/api/drops", post(drop_card))
        .route("/api/notifications", get(list_notifications))
        .route("/health", get(health_check))
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn health_check() -> &'static str {
    "ok"
}

async fn board_page(State(state): State<SharedState>) -> Html<String> {
    Html(state.dashboard.lock().await.page_html())
}

async fn board_snapshot(State(state): State<SharedState>) -> impl IntoResponse {
    let dashboard = state.dashboard.lock().await;
    Json(dashboard.state().clone())
}

async fn drop_card(
    State(state): State<SharedState>,
    Json(req): Json<DropRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let card = CardId::from_str(&req.card)?;
    let target = DropTarget {
        container: ContainerId::from_str(&req.container)?,
        slot: req.slot,
    };

    let mut dashboard = state.dashboard.lock().await;
    let outcome = dashboard.drop_card(card, target).await;
    Ok(Json(DropResponse {
        outcome,
        html: dashboard.to_html(),
    }))
}

/// Each notification is delivered once.
async fn list_notifications(State(state): State<SharedState>) -> impl IntoResponse {
    Json(state.notifier.drain())
}
