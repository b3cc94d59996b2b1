//! Board server command: `dashboard-kanban serve`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use dashboard_kanban::kanban::MemoryNotifier;
use dashboard_kanban::kanban::server::{ServerConfig, start_server};

use super::{build_dashboard, load_config};
use crate::Cli;

pub async fn cmd_serve(
    cli: &Cli,
    project_dir: PathBuf,
    port: Option<u16>,
    open: bool,
    dev: bool,
) -> Result<()> {
    let config = load_config(cli, project_dir)?;
    for warning in config.validate() {
        tracing::warn!("{}", warning);
    }

    let notifier = Arc::new(MemoryNotifier::new());
    let dashboard = build_dashboard(&config, notifier.clone())?;
    let port = config.port(port);
    let dev_mode = config.dev_mode(dev);

    // No browser inside containers, which is where dev mode runs.
    if open && !dev_mode {
        let url = format!("http://localhost:{}", port);
        tokio::spawn(async move {
            // give the listener a moment to bind
            tokio::time::sleep(tokio::time::Duration::from_millis(500)).await;
            if let Err(e) = open::that(&url) {
                eprintln!("Failed to open browser: {}", e);
            }
        });
    }

    start_server(ServerConfig { port, dev_mode }, dashboard, notifier).await
}
