//! Link targets for cards: MES detail views and the tracking terminal.

use serde::Serialize;
use url::form_urlencoded;

const ORDER_DETAILS_PAGE: &str = "orders/orderDetails.html";
const OPERATIONAL_TASK_DETAILS_PAGE: &str = "orders/operationalTaskDetails.html";
const TRACKING_TERMINAL_PAGE: &str = "/productionRegistrationTerminal.html";

/// A page the host frame can navigate to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageLink {
    pub url: String,
    /// True for MES form pages, false for standalone views.
    pub is_page: bool,
}

/// What the tracking terminal should open with.
#[derive(Debug, Clone, PartialEq)]
pub enum TerminalTarget<'a> {
    Order(i64),
    OperationalTask {
        id: i64,
        workstation_number: Option<&'a str>,
    },
}

fn form_context(page: &str, id: i64) -> String {
    let context = serde_json::json!({ "form.id": id, "form.undefined": null }).to_string();
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("context", &context)
        .finish();
    format!("{}?{}", page, query)
}

pub fn order_details(id: i64) -> PageLink {
    PageLink {
        url: form_context(ORDER_DETAILS_PAGE, id),
        is_page: true,
    }
}

pub fn operational_task_details(id: i64) -> PageLink {
    PageLink {
        url: form_context(OPERATIONAL_TASK_DETAILS_PAGE, id),
        is_page: true,
    }
}

pub fn tracking_terminal(target: TerminalTarget<'_>) -> PageLink {
    let mut query = form_urlencoded::Serializer::new(String::new());
    match target {
        TerminalTarget::Order(id) => {
            query.append_pair("orderId", &id.to_string());
        }
        TerminalTarget::OperationalTask {
            id,
            workstation_number,
        } => {
            query.append_pair("operationalTaskId", &id.to_string());
            if let Some(ws) = workstation_number.filter(|ws| !ws.is_empty()) {
                query.append_pair("workstationNumber", ws);
            }
        }
    }
    PageLink {
        url: format!("{}?{}", TRACKING_TERMINAL_PAGE, query.finish()),
        is_page: false,
    }
}
