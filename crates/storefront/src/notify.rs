//! Ephemeral user-facing notifications.
//!
//! Notifications are raised by state transitions and dismiss themselves
//! after a fixed duration. Nothing here is persisted.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

/// Default auto-dismiss duration.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_millis(3000);

/// Notification messages raised by selection-list transitions.
pub mod messages {
    pub const WISHLIST_ADDED: &str = "Added to wishlist!";
    pub const WISHLIST_REMOVED: &str = "Removed from wishlist";
    pub const COMPARE_ADDED: &str = "Added to compare!";
    pub const COMPARE_REMOVED: &str = "Removed from compare";
    pub const COMPARE_FULL: &str = "Remove one product first (max 2)";
    pub const LOAD_FAILED: &str = "Failed to load data. Please refresh.";

    /// Message for a product added to the cart.
    #[must_use]
    pub fn cart_added(name: &str) -> String {
        format!("{name} added to cart!")
    }
}

/// Visual treatment of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// A raised notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub raised_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    /// Whether the notification is still showing at `now`.
    #[must_use]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Queue of showing notifications.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    dismiss_after: TimeDelta,
    active: VecDeque<Notification>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_DISMISS_AFTER)
    }
}

impl NotificationCenter {
    /// Create a center whose notifications last `dismiss_after`.
    #[must_use]
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            dismiss_after: TimeDelta::from_std(dismiss_after).unwrap_or(TimeDelta::MAX),
            active: VecDeque::new(),
        }
    }

    /// Raise a notification now.
    pub fn raise(&mut self, kind: NotificationKind, message: impl Into<String>) -> Notification {
        self.raise_at(kind, message, Utc::now())
    }

    /// Raise a notification at an explicit instant.
    pub fn raise_at(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Notification {
        self.prune(now);
        let notification = Notification {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            raised_at: now,
            expires_at: now.checked_add_signed(self.dismiss_after).unwrap_or(now),
        };
        self.active.push_back(notification.clone());
        notification
    }

    /// Notifications still showing at `now`, oldest first.
    pub fn active_at(&mut self, now: DateTime<Utc>) -> Vec<Notification> {
        self.prune(now);
        self.active.iter().cloned().collect()
    }

    /// Dismiss one notification early. Returns whether it was showing.
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.active.len();
        self.active.retain(|n| n.id != id);
        self.active.len() != before
    }

    fn prune(&mut self, now: DateTime<Utc>) {
        self.active.retain(|n| n.is_active_at(now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_expires_after_duration() {
        let mut center = NotificationCenter::new(Duration::from_millis(3000));
        let t0 = Utc::now();
        center.raise_at(NotificationKind::Success, "hello", t0);

        assert_eq!(center.active_at(t0 + TimeDelta::milliseconds(2999)).len(), 1);
        assert!(center.active_at(t0 + TimeDelta::milliseconds(3000)).is_empty());
    }

    #[test]
    fn test_notifications_stack_in_order() {
        let mut center = NotificationCenter::default();
        let t0 = Utc::now();
        center.raise_at(NotificationKind::Info, "first", t0);
        center.raise_at(NotificationKind::Error, "second", t0 + TimeDelta::seconds(1));

        let active = center.active_at(t0 + TimeDelta::seconds(2));
        let messages: Vec<&str> = active.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);

        // Only the second is still showing 3.5s after the first.
        let active = center.active_at(t0 + TimeDelta::milliseconds(3500));
        assert_eq!(active.len(), 1);
    }

    #[test]
    fn test_dismiss_removes_early() {
        let mut center = NotificationCenter::default();
        let t0 = Utc::now();
        let n = center.raise_at(NotificationKind::Info, "bye", t0);
        assert!(center.dismiss(n.id));
        assert!(!center.dismiss(n.id));
        assert!(center.active_at(t0).is_empty());
    }

    #[test]
    fn test_cart_added_message() {
        assert_eq!(messages::cart_added("Pixel 8"), "Pixel 8 added to cart!");
    }
}
