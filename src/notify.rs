//! Transient notification (toast) model.
//!
//! DESIGN
//! ======
//! At most one toast is visible; a new `show` replaces it. Each toast gets a
//! fresh id so an auto-hide timer started for an older toast can only close
//! that toast, never its replacement.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use std::fmt;

/// How long a toast stays up without interaction.
pub const AUTO_HIDE_MS: u32 = 6000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a close was requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseReason {
    /// Explicit close button.
    Dismissed,
    /// Auto-hide timer elapsed.
    Timeout,
    /// Click somewhere outside the toast; ignored.
    ClickAway,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

/// Notification state shared through UI context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotificationState {
    pub current: Option<Notification>,
    next_id: u64,
}

impl NotificationState {
    /// Replace the visible toast and return its id.
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.next_id += 1;
        let notification = Notification { id: self.next_id, message: message.into(), severity };
        tracing::debug!(id = notification.id, severity = %severity, message = %notification.message, "notification shown");
        self.current = Some(notification);
        self.next_id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.show(message, Severity::Success)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.show(message, Severity::Error)
    }

    /// Close the visible toast unless the reason is a click-away.
    pub fn close(&mut self, reason: CloseReason) {
        if reason == CloseReason::ClickAway {
            return;
        }
        self.current = None;
    }

    /// Close toast `id` if it is still the visible one.
    ///
    /// Used by auto-hide timers; a stale id is a no-op.
    pub fn close_if_current(&mut self, id: u64, reason: CloseReason) {
        if self.current.as_ref().is_some_and(|n| n.id == id) {
            self.close(reason);
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }
}
