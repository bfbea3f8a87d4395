//! Transient notifications shown to the user.

use std::time::Duration;

/// How long a notification stays up before dismissing itself.
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(2);

/// Label of the dismiss action.
pub const DISMISS_ACTION: &str = "OK";

/// A short, auto-dismissing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub action: String,
    pub duration: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            action: DISMISS_ACTION.to_string(),
            duration: NOTIFICATION_DURATION,
        }
    }
}

/// Surface that renders notifications (a snackbar, a terminal line, ...).
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
