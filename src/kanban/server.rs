use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

use super::api::{self, AppState};
use super::dashboard::Dashboard;
use super::notify::MemoryNotifier;

pub const DEFAULT_PORT: u16 = 3142;

/// Configuration for the board server.
pub struct ServerConfig {
    pub port: u16,
    pub dev_mode: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            dev_mode: false,
        }
    }
}

pub fn build_router(state: Arc<AppState>, dev_mode: bool) -> Router {
    let app = api::api_router().with_state(state);
    if dev_mode {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Load the board once, then serve it until Ctrl+C.
///
/// `notifier` must be the sink the dashboard was built with so that
/// `/api/notifications` sees what drops raise.
pub async fn start_server(
    config: ServerConfig,
    mut dashboard: Dashboard,
    notifier: Arc<MemoryNotifier>,
) -> Result<()> {
    let report = dashboard.load().await;
    if !report.is_complete() {
        tracing::warn!(failed = report.failed.len(), "board loaded with missing buckets");
    }

    let state = Arc::new(AppState {
        dashboard: Mutex::new(dashboard),
        notifier,
    });
    let app = build_router(state, config.dev_mode);

    let host = if config.dev_mode { "0.0.0.0" } else { "127.0.0.1" };
    let addr = format!("{}:{}", host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    let local_addr = listener.local_addr()?;
    println!("Dashboard running at http://{}", local_addr);
    tracing::info!(%local_addr, dev_mode = config.dev_mode, "server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    println!("Server shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    println!("\nShutting down...");
}
