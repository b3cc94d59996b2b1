use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;

#[derive(Parser)]
#[command(name = "dashboard-kanban")]
#[command(version, about = "Production dashboard: orders and operational tasks on a Kanban board")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Directory holding .dashboard/dashboard.toml (defaults to the current directory)
    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// MES base URL. Overrides MES_BASE_URL and dashboard.toml.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Render card titles as links to MES detail views
    #[arg(long, global = true)]
    pub enable_orders_link: Option<bool>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the board once and print it as HTML
    Render {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Wrap the board in a standalone page
        #[arg(long)]
        page: bool,
    },
    /// Serve the board with drag-and-drop over HTTP
    Serve {
        /// Port to listen on (defaults to [server] port)
        #[arg(long)]
        port: Option<u16>,
        /// Open the board in a browser
        #[arg(long)]
        open: bool,
        /// Listen on all interfaces and allow cross-origin requests
        #[arg(long)]
        dev: bool,
    },
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration file
    Validate,
    /// Create a default dashboard.toml
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = dashboard_kanban::logging::init(cli.verbose, cli.json_logs) {
        eprintln!("Warning: {}", e);
    }

    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match &cli.command {
        Commands::Render { output, page } => {
            cmd::cmd_render(&cli, project_dir, output.as_deref(), *page).await?
        }
        Commands::Serve { port, open, dev } => {
            cmd::cmd_serve(&cli, project_dir, *port, *open, *dev).await?
        }
        Commands::Config { command } => cmd::cmd_config(&cli, &project_dir, command.clone())?,
    }

    Ok(())
}
