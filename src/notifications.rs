//! Toast notifications shown in the corner of the TUI.

use std::time::{Duration, Instant};
use uuid::Uuid;

/// How long a toast stays on screen unless dismissed
pub const NOTIFICATION_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Success => "✓",
            Severity::Error => "✕",
            Severity::Info => "ℹ",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    pub created_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant, lifetime: Duration) -> bool {
        now.saturating_duration_since(self.created_at) >= lifetime
    }
}

/// Queue of live toasts, oldest first. No cap and no coalescing of repeats.
#[derive(Debug)]
pub struct NotificationQueue {
    entries: Vec<Notification>,
    lifetime: Duration,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(NOTIFICATION_LIFETIME)
    }
}

impl NotificationQueue {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            entries: Vec::new(),
            lifetime,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, severity: Severity) -> Uuid {
        self.push_at(message, severity, Instant::now())
    }

    pub fn push_at(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        created_at: Instant,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.push(Notification {
            id,
            message: message.into(),
            severity,
            created_at,
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> Uuid {
        self.push(message, Severity::Success)
    }

    pub fn error(&mut self, message: impl Into<String>) -> Uuid {
        self.push(message, Severity::Error)
    }

    pub fn info(&mut self, message: impl Into<String>) -> Uuid {
        self.push(message, Severity::Info)
    }

    /// Returns whether an entry was removed
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|n| n.id != id);
        self.entries.len() != before
    }

    /// Dismisses the newest toast, if any
    pub fn dismiss_latest(&mut self) -> bool {
        self.entries.pop().is_some()
    }

    /// Drops every entry whose lifetime has run out; returns how many went
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let lifetime = self.lifetime;
        self.entries.retain(|n| !n.is_expired(now, lifetime));
        before - self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_expire_after_lifetime() {
        let mut queue = NotificationQueue::default();
        let start = Instant::now();
        queue.push_at("saved", Severity::Success, start);
        queue.push_at("later", Severity::Info, start + Duration::from_secs(2));

        assert_eq!(queue.expire(start + Duration::from_millis(2999)), 0);
        assert_eq!(queue.expire(start + Duration::from_secs(3)), 1);
        assert_eq!(queue.iter().next().map(|n| n.message.as_str()), Some("later"));
        assert_eq!(queue.expire(start + Duration::from_secs(5)), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn dismiss_removes_only_the_given_entry() {
        let mut queue = NotificationQueue::default();
        let first = queue.error("boom");
        let second = queue.error("boom");
        assert_ne!(first, second);
        assert_eq!(queue.len(), 2);

        assert!(queue.dismiss(first));
        assert!(!queue.dismiss(first));
        assert_eq!(queue.iter().next().map(|n| n.id), Some(second));
    }

    #[test]
    fn dismiss_latest_pops_newest() {
        let mut queue = NotificationQueue::default();
        queue.info("one");
        queue.info("two");
        assert!(queue.dismiss_latest());
        assert_eq!(queue.iter().next().map(|n| n.message.as_str()), Some("one"));
    }
}
