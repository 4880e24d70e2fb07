//! # Notifications
//!
//! Fire-and-forget toasts raised after each user action.
//!
//! ```text
//! command ──► notifier.notify(Notification { level, message })
//!                  │
//!                  ├── LogNotifier        tracing events
//!                  ├── ConsoleNotifier    stderr lines (CLI)
//!                  └── RecordingNotifier  kept in memory (tests)
//! ```
//!
//! Nothing is returned to the caller; a notifier never fails.

use serde::Serialize;
use std::sync::{Mutex, PoisonError};
use tracing::{info, warn};

use crate::error::ApiError;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
    Info,
}

/// A single toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Notification {
            level,
            message: message.into(),
        }
    }
}

/// Receives notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn success(&self, message: &str) {
        self.notify(Notification::new(Level::Success, message));
    }

    fn error(&self, message: &str) {
        self.notify(Notification::new(Level::Error, message));
    }

    fn info(&self, message: &str) {
        self.notify(Notification::new(Level::Info, message));
    }
}

/// Raises `success` on `Ok`, or an error toast with the error's message.
pub fn notify_outcome<T>(notifier: &dyn Notifier, result: &Result<T, ApiError>, success: &str) {
    match result {
        Ok(_) => notifier.success(success),
        Err(err) => notifier.error(&err.message),
    }
}

// =============================================================================
// Implementations
// =============================================================================

/// Emits notifications as tracing events.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Error => warn!(text = %notification.message, "notification"),
            level => info!(?level, text = %notification.message, "notification"),
        }
    }
}

/// Prints notifications to stderr, keeping stdout for command output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let marker = match notification.level {
            Level::Success => "✓",
            Level::Error => "✗",
            Level::Info => "ℹ",
        };
        eprintln!("{} {}", marker, notification.message);
    }
}

/// Collects notifications in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent notification, if any.
    pub fn last(&self) -> Option<Notification> {
        self.notifications().pop()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.success("Added to cart!");
        notifier.info("Artist profile feature coming soon!");

        let seen = notifier.notifications();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], Notification::new(Level::Success, "Added to cart!"));
        assert_eq!(notifier.last().map(|n| n.level), Some(Level::Info));
    }

    #[test]
    fn test_notify_outcome() {
        let notifier = RecordingNotifier::new();

        notify_outcome(&notifier, &Ok::<(), ApiError>(()), "Logged out successfully");
        notify_outcome(
            &notifier,
            &Err::<(), _>(ApiError::cart("Your cart is empty")),
            "unused",
        );

        let seen = notifier.notifications();
        assert_eq!(seen[0].level, Level::Success);
        assert_eq!(seen[1], Notification::new(Level::Error, "Your cart is empty"));
    }
}
