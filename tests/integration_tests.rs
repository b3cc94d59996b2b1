//! Integration tests for the dashboard-kanban binary.
//!
//! The MES is replaced by a small axum app on an ephemeral port.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

/// Helper to create a dashboard-kanban Command
fn dashboard() -> Command {
    let mut cmd = cargo_bin_cmd!("dashboard-kanban");
    cmd.env_remove("MES_BASE_URL")
        .env_remove("DASHBOARD_ENABLE_ORDERS_LINK")
        .env("RUST_LOG", "warn");
    cmd
}

fn create_temp_project() -> TempDir {
    TempDir::new().unwrap()
}

async fn mes_bucket(Path(name): Path<String>) -> Response {
    let body = match name.as_str() {
        "ordersPending" => json!([{
            "id": 7,
            "number": "ORD-7",
            "state": "01pending",
            "productNumber": "PRD-1",
            "productName": "Bolt <M8>",
            "plannedQuantity": 50,
            "productUnit": "pcs"
        }]),
        "operationalTasksInProgress" => json!({
            "3": {
                "id": 3,
                "number": "TSK-3",
                "name": "Cutting",
                "type": "01otherCase",
                "state": "02started",
                "workstationNumber": "WS-2"
            }
        }),
        "ordersInProgress" | "ordersCompleted" | "operationalTasksPending"
        | "operationalTasksCompleted" => json!([]),
        _ => return StatusCode::NOT_FOUND.into_response(),
    };
    Json(body).into_response()
}

/// Start a mock MES and return its base URL.
async fn spawn_mes() -> String {
    let app = Router::new().route("/rest/dashboardKanban/{name}", get(mes_bucket));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

// =============================================================================
// Basic CLI Tests
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_help() {
        dashboard()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("render"))
            .stdout(predicate::str::contains("serve"));
    }

    #[test]
    fn test_version() {
        dashboard().arg("--version").assert().success();
    }

    #[test]
    fn test_unknown_command_fails() {
        dashboard().arg("frobnicate").assert().failure();
    }
}

// =============================================================================
// Config Command Tests
// =============================================================================

mod config_command {
    use super::*;

    #[test]
    fn test_config_init_creates_file() {
        let dir = create_temp_project();

        dashboard()
            .current_dir(dir.path())
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Created dashboard.toml"));

        let content = fs::read_to_string(dir.path().join(".dashboard/dashboard.toml")).unwrap();
        assert!(content.contains("base_url"));
        assert!(content.contains("enable_orders_link"));
    }

    #[test]
    fn test_config_init_does_not_overwrite() {
        let dir = create_temp_project();
        fs::create_dir_all(dir.path().join(".dashboard")).unwrap();
        fs::write(
            dir.path().join(".dashboard/dashboard.toml"),
            "[server]\nport = 9999\n",
        )
        .unwrap();

        dashboard()
            .current_dir(dir.path())
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already exists"));

        let content = fs::read_to_string(dir.path().join(".dashboard/dashboard.toml")).unwrap();
        assert!(content.contains("9999"));
    }

    #[test]
    fn test_config_show_defaults() {
        let dir = create_temp_project();

        dashboard()
            .current_dir(dir.path())
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("http://localhost:8080"))
            .stdout(predicate::str::contains("port = 3142"));
    }

    #[test]
    fn test_config_show_applies_overrides() {
        let dir = create_temp_project();

        dashboard()
            .current_dir(dir.path())
            .env("MES_BASE_URL", "http://from-env:8080")
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("base_url = \"http://from-env:8080\""));

        dashboard()
            .current_dir(dir.path())
            .env("MES_BASE_URL", "http://from-env:8080")
            .args(["--base-url", "http://from-cli:8080", "config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("base_url = \"http://from-cli:8080\""));
    }

    #[test]
    fn test_config_validate_reports_warnings() {
        let dir = create_temp_project();
        fs::create_dir_all(dir.path().join(".dashboard")).unwrap();
        fs::write(
            dir.path().join(".dashboard/dashboard.toml"),
            "[mes]\nbase_url = \"ftp://mes\"\n",
        )
        .unwrap();

        dashboard()
            .current_dir(dir.path())
            .args(["config", "validate"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration warnings"));
    }

    #[test]
    fn test_malformed_config_fails() {
        let dir = create_temp_project();
        fs::create_dir_all(dir.path().join(".dashboard")).unwrap();
        fs::write(dir.path().join(".dashboard/dashboard.toml"), "[server\nport =").unwrap();

        dashboard()
            .current_dir(dir.path())
            .args(["config", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("dashboard.toml"));
    }
}

// =============================================================================
// Render Command Tests
// =============================================================================

mod render_command {
    use super::*;

    #[test]
    fn test_render_with_unreachable_mes_prints_empty_board() {
        let dir = create_temp_project();

        dashboard()
            .current_dir(dir.path())
            .args(["--base-url", "http://127.0.0.1:9", "render"])
            .assert()
            .success()
            .stdout(predicate::str::contains("id=\"dashboardKanban\""))
            .stdout(predicate::str::contains("id=\"ordersPending\""))
            .stderr(predicate::str::contains("could not load"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_render_against_mock_mes() {
        let base_url = spawn_mes().await;
        let dir = create_temp_project();

        dashboard()
            .current_dir(dir.path())
            .args(["--base-url", &base_url, "render"])
            .assert()
            .success()
            .stdout(predicate::str::contains("id=\"order7\""))
            .stdout(predicate::str::contains("ORD-7"))
            .stdout(predicate::str::contains("PRD-1"))
            .stdout(predicate::str::contains("id=\"operationalTask3\""))
            .stdout(predicate::str::contains("Cutting"))
            .stdout(predicate::str::contains("could not load").not());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_render_page_to_file() {
        let base_url = spawn_mes().await;
        let dir = create_temp_project();
        let out = dir.path().join("board.html");

        dashboard()
            .current_dir(dir.path())
            .args(["--base-url", &base_url, "render", "--page", "--output"])
            .arg(&out)
            .assert()
            .success()
            .stdout(predicate::str::contains("Board written to"));

        let html = fs::read_to_string(&out).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("/api/drops"));
        assert!(html.contains(&format!("<body data-mes-url=\"{}\">", base_url)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_render_with_orders_link() {
        let base_url = spawn_mes().await;
        let dir = create_temp_project();

        dashboard()
            .current_dir(dir.path())
            .args([
                "--base-url",
                &base_url,
                "--enable-orders-link",
                "true",
                "render",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("orders/orderDetails.html?context="));
    }
}
