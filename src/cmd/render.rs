//! One-shot board rendering: `dashboard-kanban render`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use dashboard_kanban::kanban::LogNotifier;

use super::{build_dashboard, load_config};
use crate::Cli;

pub async fn cmd_render(
    cli: &Cli,
    project_dir: PathBuf,
    output: Option<&Path>,
    page: bool,
) -> Result<()> {
    let config = load_config(cli, project_dir)?;
    let mut dashboard = build_dashboard(&config, Arc::new(LogNotifier))?;

    let report = dashboard.load().await;
    for container in &report.failed {
        eprintln!("Warning: could not load {}", container);
    }

    let html = if page {
        dashboard.page_html()
    } else {
        dashboard.to_html()
    };

    match output {
        Some(path) => {
            std::fs::write(path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Board written to {}", path.display());
        }
        None => println!("{}", html),
    }

    Ok(())
}
