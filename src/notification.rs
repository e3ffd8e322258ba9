//! Document diagnostics.
//!
//! Non-fatal events raised while the document is edited (a cascade fell back
//! to a default entry, a best-effort `clear` skipped a referenced entry) are
//! collected as `Notification` items instead of being silently dropped or
//! turned into hard errors.
//!
//! After a batch of edits the caller can inspect
//! [`CadDocument::notifications`](crate::CadDocument::notifications).

use std::fmt;

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// A missing reference was replaced by a default entry.
    Fallback,
    /// An entry was left in place because it is reserved or still referenced.
    RemovalSkipped,
    /// Non-fatal warning.
    Warning,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fallback => write!(f, "Fallback"),
            Self::RemovalSkipped => write!(f, "RemovalSkipped"),
            Self::Warning => write!(f, "Warning"),
        }
    }
}

/// A single notification.
#[derive(Debug, Clone)]
pub struct Notification {
    /// The category.
    pub notification_type: NotificationType,
    /// A human-readable description.
    pub message: String,
}

impl Notification {
    /// Create a new notification.
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        Self {
            notification_type,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.notification_type, self.message)
    }
}

/// Collects notifications for one document.
#[derive(Debug, Clone, Default)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a notification.
    pub fn notify(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        self.items.push(Notification::new(notification_type, message));
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over all notifications.
    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Get all notifications of a specific type.
    pub fn of_type(&self, nt: NotificationType) -> Vec<&Notification> {
        self.items.iter().filter(|n| n.notification_type == nt).collect()
    }

    /// Check whether any notification of the given type exists.
    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.items.iter().any(|n| n.notification_type == nt)
    }

    /// Drop every recorded notification.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_basics() {
        let mut c = NotificationCollection::new();
        assert!(c.is_empty());

        c.notify(NotificationType::Fallback, "line type DASHDOT missing");
        c.notify(NotificationType::RemovalSkipped, "layer 0 is reserved");
        c.notify(NotificationType::Fallback, "line type HIDDEN missing");

        assert_eq!(c.len(), 3);
        assert_eq!(c.of_type(NotificationType::Fallback).len(), 2);
        assert!(c.has_type(NotificationType::RemovalSkipped));
        assert!(!c.has_type(NotificationType::Warning));

        c.clear();
        assert!(c.is_empty());
    }

    #[test]
    fn test_display() {
        let n = Notification::new(NotificationType::RemovalSkipped, "Continuous");
        assert_eq!(format!("{}", n), "[RemovalSkipped] Continuous");
    }
}
