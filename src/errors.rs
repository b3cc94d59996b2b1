//! Typed error hierarchy for the dashboard.
//!
//! - `KanbanError`: MES client failures and board identifier parsing
//! - `DomError`: board document operations that found the page in an
//!   unexpected shape (a stale drop target, a vanished card)

use thiserror::Error;

/// Errors raised while talking to the MES or parsing board identifiers.
#[derive(Debug, Error)]
pub enum KanbanError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("State change for order {order_id} returned neither an order nor a message")]
    EmptyTransition { order_id: i64 },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Unknown board container '{0}'")]
    UnknownContainer(String),

    #[error("Unknown card id '{0}'")]
    UnknownCard(String),
}

/// Errors from mutating the board document.
#[derive(Debug, Error, PartialEq)]
pub enum DomError {
    #[error("Slot {slot} of {container} is not a dropzone")]
    NotADropzone { container: String, slot: usize },

    #[error("Card {0} is not on the board")]
    CardNotFound(String),
}
