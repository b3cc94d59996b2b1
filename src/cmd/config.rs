//! Configuration view and validation commands: `dashboard-kanban config`.

use anyhow::Result;
use dashboard_kanban::config::{CONFIG_FILE, DashboardToml};

use super::load_config;
use crate::{Cli, ConfigCommands};

pub fn cmd_config(
    cli: &Cli,
    project_dir: &std::path::Path,
    command: Option<ConfigCommands>,
) -> Result<()> {
    let config = load_config(cli, project_dir.to_path_buf())?;
    let config_path = config.config_path();

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Dashboard Configuration");
            println!("=======================");
            println!();

            if config_path.exists() {
                println!("Config file: {}", config_path.display());
            } else {
                println!("No {} found at {}", CONFIG_FILE, config_path.display());
                println!("Using default configuration.");
            }
            println!();

            let toml = &config.toml;
            println!("[mes]");
            println!("  base_url = \"{}\"", toml.mes.base_url);
            if let Some(secs) = toml.mes.request_timeout_secs {
                println!("  request_timeout_secs = {}", secs);
            }
            println!();
            println!("[display]");
            println!("  enable_orders_link = {}", toml.display.enable_orders_link);
            println!();
            println!("[server]");
            println!("  port = {}", toml.server.port);
            println!("  dev_mode = {}", toml.server.dev_mode);
            println!();

            if !toml.translations.is_empty() {
                println!("[translations]");
                let mut keys: Vec<&String> = toml.translations.keys().collect();
                keys.sort();
                for key in keys {
                    println!("  \"{}\" = \"{}\"", key, toml.translations[key]);
                }
                println!();
            }

            println!("Effective values (with env/CLI overrides):");
            println!("  base_url = \"{}\"", config.base_url());
            println!("  enable_orders_link = {}", config.enable_orders_link());
            println!();
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if !config_path.exists() {
                println!("No {} found. Using defaults (valid).", CONFIG_FILE);
                return Ok(());
            }

            let warnings = config.validate();
            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("{} already exists at {}", CONFIG_FILE, config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            std::fs::create_dir_all(&config.config_dir)?;
            DashboardToml::default().save(&config_path)?;

            println!("Created {} at {}", CONFIG_FILE, config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [mes] base_url, request_timeout_secs");
            println!("  - [display] enable_orders_link");
            println!("  - [server] port, dev_mode");
            println!("  - [translations] label overrides");
            println!();
        }
    }

    Ok(())
}
