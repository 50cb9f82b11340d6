//! User-visible notices

use std::sync::Mutex;

/// Sink for the messages a user should see when a request fails
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Emits notices as tracing warnings
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::warn!(target: "library_client::notice", "{}", message);
    }
}

/// Keeps every notice in memory, in arrival order
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn last(&self) -> Option<String> {
        self.messages().pop()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.to_string());
    }
}
