//! CLI command implementations.
//!
//! | Module   | Commands handled |
//! |----------|------------------|
//! | `render` | `Render`         |
//! | `serve`  | `Serve`          |
//! | `config` | `Config`         |

pub mod config;
pub mod render;
pub mod serve;

pub use config::cmd_config;
pub use render::cmd_render;
pub use serve::cmd_serve;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use dashboard_kanban::config::DashboardConfig;
use dashboard_kanban::kanban::{Dashboard, HttpKanbanClient, Notifier};

use crate::Cli;

/// Resolve configuration with the global CLI overrides applied.
pub fn load_config(cli: &Cli, project_dir: PathBuf) -> Result<DashboardConfig> {
    DashboardConfig::with_cli_args(project_dir, cli.base_url.clone(), cli.enable_orders_link)
}

/// Build an unloaded dashboard talking to the configured MES.
pub fn build_dashboard(config: &DashboardConfig, notifier: Arc<dyn Notifier>) -> Result<Dashboard> {
    let base_url = config.base_url();
    let client = HttpKanbanClient::new(&base_url, config.request_timeout())
        .with_context(|| format!("Failed to create MES client for {}", base_url))?;
    tracing::debug!(%base_url, "MES client ready");
    Ok(Dashboard::new(
        Arc::new(client),
        notifier,
        Arc::new(config.translator()),
        config.render_options(),
    )
    .with_mes_url(base_url))
}
