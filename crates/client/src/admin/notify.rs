//! Transient toast notifications.

use std::time::{Duration, Instant};

/// How long a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    /// CSS modifier class of the toast.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "notification-success",
            Self::Error => "notification-error",
            Self::Info => "notification-info",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub shown_at: Instant,
}

impl Notification {
    pub fn is_visible(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < NOTIFICATION_TTL
    }
}

/// Queue of notifications that dismiss themselves after [`NOTIFICATION_TTL`].
#[derive(Debug, Default)]
pub struct Notifier {
    items: Vec<Notification>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.push_at(kind, message, Instant::now());
    }

    pub fn push_at(&mut self, kind: NotificationKind, message: impl Into<String>, now: Instant) {
        let message = message.into();
        match kind {
            NotificationKind::Error => tracing::warn!(%message, "Admin notification"),
            _ => tracing::debug!(%message, "Admin notification"),
        }
        self.items.push(Notification {
            kind,
            message,
            shown_at: now,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Error, message);
    }

    /// Notifications still on screen at `now`.
    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &Notification> {
        self.items.iter().filter(move |n| n.is_visible(now))
    }

    /// Drop dismissed notifications.
    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|n| n.is_visible(now));
    }

    /// The most recent notification, dismissed or not.
    pub fn last(&self) -> Option<&Notification> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
