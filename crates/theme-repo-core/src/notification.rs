//! Single-slot notification channel.
//!
//! States are `empty` and `showing(n)`. A push always overwrites, dismiss
//! always empties, and a notification older than the timeout is cleared on
//! the next [`NotificationChannel::tick`]. There is no queue: the last push
//! wins.

use std::time::{Duration, Instant};

/// How long a notification stays up when nobody dismisses it.
pub const DEFAULT_NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }
}

impl From<&crate::FetchError> for Notification {
    fn from(err: &crate::FetchError) -> Self {
        Self::error(err.to_string())
    }
}

#[derive(Debug)]
pub struct NotificationChannel {
    slot: Option<Showing>,
    timeout: Duration,
    pushed: u64,
}

#[derive(Debug)]
struct Showing {
    notification: Notification,
    shown_at: Instant,
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TIMEOUT)
    }
}

impl NotificationChannel {
    pub fn new(timeout: Duration) -> Self {
        Self {
            slot: None,
            timeout,
            pushed: 0,
        }
    }

    /// Show `notification`, replacing whatever was showing.
    pub fn push(&mut self, notification: Notification, now: Instant) {
        self.pushed += 1;
        self.slot = Some(Showing {
            notification,
            shown_at: now,
        });
    }

    pub fn dismiss(&mut self) {
        self.slot = None;
    }

    /// Clear the slot if the current notification has timed out.
    /// Returns `true` when something was cleared.
    pub fn tick(&mut self, now: Instant) -> bool {
        let expired = self
            .slot
            .as_ref()
            .is_some_and(|s| now.saturating_duration_since(s.shown_at) >= self.timeout);
        if expired {
            self.slot = None;
        }
        expired
    }

    pub fn current(&self) -> Option<&Notification> {
        self.slot.as_ref().map(|s| &s.notification)
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Number of pushes since creation, including overwritten ones.
    pub fn pushed_count(&self) -> u64 {
        self.pushed
    }
}
