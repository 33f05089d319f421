//! Turns response statuses into notifications and session effects.

use std::sync::Arc;

use crate::notify::{Notification, Notifier};
use crate::session::SessionStore;

/// Classifies every response and reports it to the user.
#[derive(Clone)]
pub struct StatusInterpreter {
    notifier: Arc<dyn Notifier>,
    session: SessionStore,
    notify_success: bool,
}

impl std::fmt::Debug for StatusInterpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusInterpreter")
            .field("session", &self.session)
            .field("notify_success", &self.notify_success)
            .finish_non_exhaustive()
    }
}

impl StatusInterpreter {
    pub fn new(notifier: Arc<dyn Notifier>, session: SessionStore, notify_success: bool) -> Self {
        Self {
            notifier,
            session,
            notify_success,
        }
    }

    /// Notify for a response. A bare 401 also ends the session.
    pub fn observe(&self, status: u16, status_text: &str, body: Option<&serde_json::Value>) {
        self.announce(status, status_text, body);
        if status == 401 {
            tracing::warn!("Unauthorized response outside refresh, clearing session");
            self.session.logout();
        }
    }

    /// Notify without touching the session.
    pub fn announce(&self, status: u16, status_text: &str, body: Option<&serde_json::Value>) {
        if !self.notify_success && (200..300).contains(&status) {
            return;
        }
        self.notifier
            .notify(Notification::for_status(status, status_text, body));
    }
}
