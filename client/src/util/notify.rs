//! Notification and navigation seams.
//!
//! SYSTEM CONTEXT
//! ==============
//! A browser front end shows a toast and changes `location`; a native caller
//! decides for itself. The pipeline only talks to these traits.

use std::sync::{Mutex, PoisonError};

/// User-visible error notification (the "toast").
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Forced navigation to an entry point such as `/login`.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Emits notifications as `tracing` error events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::error!(message, "request failed");
    }
}

/// Logs navigation requests; there is no location to change.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, path: &str) {
        tracing::warn!(path, "navigation requested");
    }
}

/// Keeps every notification and navigation in order of arrival.
///
/// Useful for embedding callers that render messages later, and for tests
/// that count side effects.
#[derive(Debug, Default)]
pub struct Recorder {
    messages: Mutex<Vec<String>>,
    paths: Mutex<Vec<String>>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Notifier for Recorder {
    fn error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_owned());
    }
}

impl Navigator for Recorder {
    fn navigate(&self, path: &str) {
        self.paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_owned());
    }
}
