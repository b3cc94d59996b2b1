//! Configuration for the dashboard, read from `.dashboard/dashboard.toml`.
//!
//! Values are layered file → environment → CLI, later layers winning.
//!
//! # Configuration File Format
//!
//! ```toml
//! [mes]
//! base_url = "http://localhost:8080"
//! request_timeout_secs = 10
//!
//! [display]
//! enable_orders_link = true
//!
//! [server]
//! port = 3142
//! dev_mode = false
//!
//! [translations]
//! "basic.dashboard.orders.product.label" = "Produkt"
//! ```
//!
//! Environment overrides: `MES_BASE_URL`, `DASHBOARD_ENABLE_ORDERS_LINK`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::kanban::render::RenderOptions;
use crate::kanban::server::DEFAULT_PORT;
use crate::kanban::translate::MessageBundle;

pub const CONFIG_DIR: &str = ".dashboard";
pub const CONFIG_FILE: &str = "dashboard.toml";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

const ENV_BASE_URL: &str = "MES_BASE_URL";
const ENV_ENABLE_ORDERS_LINK: &str = "DASHBOARD_ENABLE_ORDERS_LINK";

/// Where the MES lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MesSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// No timeout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for MesSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplaySection {
    /// Render card titles as links to MES detail views.
    #[serde(default)]
    pub enable_orders_link: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub dev_mode: bool,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: default_port(),
            dev_mode: false,
        }
    }
}

/// The complete dashboard.toml structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardToml {
    #[serde(default)]
    pub mes: MesSection,
    #[serde(default)]
    pub display: DisplaySection,
    #[serde(default)]
    pub server: ServerSection,
    /// Message key → label overrides on top of the built-in English text.
    #[serde(default)]
    pub translations: HashMap<String, String>,
}

impl DashboardToml {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse dashboard.toml")
    }

    /// Load `dashboard.toml` from `config_dir`, or defaults if it is absent.
    pub fn load_or_default(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize dashboard.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        match url::Url::parse(&self.mes.base_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => warnings.push(format!(
                "Unsupported scheme '{}' in mes.base_url: expected http or https",
                parsed.scheme()
            )),
            Err(e) => warnings.push(format!(
                "Invalid mes.base_url '{}': {}",
                self.mes.base_url, e
            )),
        }

        if self.mes.request_timeout_secs == Some(0) {
            warnings.push("mes.request_timeout_secs = 0 fails every request".to_string());
        }

        if self.server.port == 0 {
            warnings.push("server.port = 0 binds a random port".to_string());
        }

        let mut keys: Vec<&String> = self
            .translations
            .keys()
            .filter(|k| !k.starts_with("basic.dashboard."))
            .collect();
        keys.sort();
        for key in keys {
            warnings.push(format!("Translation key '{}' is never used by the board", key));
        }

        warnings
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Resolved configuration: dashboard.toml, environment and CLI flags.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub project_dir: PathBuf,
    pub config_dir: PathBuf,
    pub toml: DashboardToml,
    pub cli_base_url: Option<String>,
    pub cli_enable_orders_link: Option<bool>,
}

impl DashboardConfig {
    pub fn new(project_dir: PathBuf) -> Result<Self> {
        let project_dir = project_dir
            .canonicalize()
            .context("Failed to resolve project directory")?;
        let config_dir = project_dir.join(CONFIG_DIR);
        let toml = DashboardToml::load_or_default(&config_dir)?;

        Ok(Self {
            project_dir,
            config_dir,
            toml,
            cli_base_url: None,
            cli_enable_orders_link: None,
        })
    }

    pub fn with_cli_args(
        project_dir: PathBuf,
        base_url: Option<String>,
        enable_orders_link: Option<bool>,
    ) -> Result<Self> {
        let mut config = Self::new(project_dir)?;
        config.cli_base_url = base_url;
        config.cli_enable_orders_link = enable_orders_link;
        Ok(config)
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// MES base URL (CLI → env → file → default).
    pub fn base_url(&self) -> String {
        self.cli_base_url
            .clone()
            .or_else(|| std::env::var(ENV_BASE_URL).ok().filter(|v| !v.is_empty()))
            .unwrap_or_else(|| self.toml.mes.base_url.clone())
    }

    /// Deep-link switch (CLI → env → file).
    pub fn enable_orders_link(&self) -> bool {
        if let Some(flag) = self.cli_enable_orders_link {
            return flag;
        }
        if let Ok(raw) = std::env::var(ENV_ENABLE_ORDERS_LINK) {
            match parse_flag(&raw) {
                Some(flag) => return flag,
                None => tracing::warn!(
                    value = %raw,
                    "ignoring {} (expected true or false)",
                    ENV_ENABLE_ORDERS_LINK
                ),
            }
        }
        self.toml.display.enable_orders_link
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.toml.mes.request_timeout_secs.map(Duration::from_secs)
    }

    /// Server port (CLI → file → default).
    pub fn port(&self, cli_port: Option<u16>) -> u16 {
        cli_port.unwrap_or(self.toml.server.port)
    }

    pub fn dev_mode(&self, cli_dev: bool) -> bool {
        cli_dev || self.toml.server.dev_mode
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            enable_orders_link: self.enable_orders_link(),
        }
    }

    pub fn translator(&self) -> MessageBundle {
        MessageBundle::with_overrides(&self.toml.translations)
    }

    pub fn validate(&self) -> Vec<String> {
        self.toml.validate()
    }
}
