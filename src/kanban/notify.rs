//! Notification sink for messages the board surfaces to the user.

use std::sync::Mutex;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Success,
    Info,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: MessageType,
    pub title: String,
    pub content: String,
    pub auto_close: bool,
}

pub trait Notifier: Send + Sync {
    fn add_message(&self, notification: Notification);
}

/// Keeps notifications until someone reads them, e.g. the HTTP front end.
/// Reading empties the queue.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    messages: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending notification, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.messages.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl Notifier for MemoryNotifier {
    fn add_message(&self, notification: Notification) {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification);
    }
}

/// Writes notifications to the log; used by one-shot commands.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn add_message(&self, notification: Notification) {
        match notification.kind {
            MessageType::Failure => {
                tracing::warn!(title = %notification.title, "{}", notification.content)
            }
            _ => tracing::info!(title = %notification.title, "{}", notification.content),
        }
    }
}
