use std::time::{Duration, Instant};

/// Kind of transient feedback shown in the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

impl NotificationKind {
    fn timeout(&self) -> Duration {
        match self {
            NotificationKind::Info => Duration::from_secs(3),
            NotificationKind::Error => Duration::from_secs(8),
        }
    }
}

/// A short-lived message with auto-dismiss, checked each frame.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    shown_at: Instant,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Info)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Error)
    }

    fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
        }
    }

    pub fn should_dismiss(&self) -> bool {
        self.shown_at.elapsed() > self.kind.timeout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_notification_is_not_dismissed() {
        let notification = Notification::info("Saved to favorites");
        assert!(!notification.should_dismiss());
    }

    #[test]
    fn test_errors_linger_longer_than_info() {
        assert!(NotificationKind::Error.timeout() > NotificationKind::Info.timeout());
    }
}
