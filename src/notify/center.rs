//! In-memory notification list.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::time::Instant;
use uuid::Uuid;

use super::{Notification, Notifier, Severity};

#[derive(Debug)]
struct Entry {
    created: Instant,
    notification: Notification,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now.duration_since(self.created) < Duration::from_millis(self.notification.duration_ms)
    }
}

/// Keeps active notifications in arrival order.
///
/// An entry drops out once its `duration_ms` has elapsed. Clones share the
/// same list, so one handle can be given to the client as its
/// [`Notifier`] while another drives the display.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    items: Arc<Mutex<Vec<Entry>>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a notification and return its id.
    pub fn add(&self, notification: Notification) -> Uuid {
        let id = notification.id;
        self.lock().push(Entry {
            created: Instant::now(),
            notification,
        });
        id
    }

    pub fn remove(&self, id: Uuid) {
        self.lock().retain(|e| e.notification.id != id);
    }

    pub fn clear_all(&self) {
        self.lock().clear();
    }

    pub fn success(&self, title: impl Into<String>, message: impl Into<String>) -> Uuid {
        self.add(Notification::new(Severity::Success, title, message))
    }

    pub fn error(&self, title: impl Into<String>, message: impl Into<String>) -> Uuid {
        self.add(Notification::new(Severity::Error, title, message))
    }

    pub fn warning(&self, title: impl Into<String>, message: impl Into<String>) -> Uuid {
        self.add(Notification::new(Severity::Warning, title, message))
    }

    pub fn info(&self, title: impl Into<String>, message: impl Into<String>) -> Uuid {
        self.add(Notification::new(Severity::Info, title, message))
    }

    /// Snapshot of the unexpired notifications.
    pub fn all(&self) -> Vec<Notification> {
        self.lock()
            .iter()
            .map(|e| e.notification.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Lock the list with expired entries already removed.
    fn lock(&self) -> MutexGuard<'_, Vec<Entry>> {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        items.retain(|e| e.is_live(now));
        items
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, notification: Notification) {
        self.add(notification);
    }
}
