//! Session store and route guarding.

pub mod guard;

pub use guard::{MemoryNavigator, Navigator, RouteDecision, RouteGuard, StaticNavigator};

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};

const EVENT_CAPACITY: usize = 64;

/// The authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// A change to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn(Identity),
    LoggedOut,
}

/// Holds the current identity (or none).
///
/// Constructed once at startup and handed to the HTTP client and to route
/// guards. Clones share the same state.
///
/// # Example
/// ```
/// use realty_console::session::{Identity, SessionStore};
///
/// let session = SessionStore::new();
/// session.login(Identity {
///     id: "1".into(),
///     name: "Admin".into(),
///     email: "admin@example.com".into(),
/// });
/// assert!(session.is_authenticated());
/// session.logout();
/// assert!(session.current().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct SessionStore {
    identity: watch::Sender<Option<Identity>>,
    events: broadcast::Sender<SessionEvent>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let (identity, _) = watch::channel(None);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { identity, events }
    }

    pub fn login(&self, identity: Identity) {
        tracing::info!(user_id = %identity.id, "Session started");
        self.identity.send_replace(Some(identity.clone()));
        let _ = self.events.send(SessionEvent::LoggedIn(identity));
    }

    /// Clear the session. Every call publishes [`SessionEvent::LoggedOut`].
    pub fn logout(&self) {
        let previous = self.identity.send_replace(None);
        tracing::info!(
            user_id = previous.as_ref().map(|i| i.id.as_str()),
            "Session cleared"
        );
        let _ = self.events.send(SessionEvent::LoggedOut);
    }

    pub fn current(&self) -> Option<Identity> {
        self.identity.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.borrow().is_some()
    }

    /// Watch the current identity.
    pub fn watch(&self) -> watch::Receiver<Option<Identity>> {
        self.identity.subscribe()
    }

    /// Subscribe to login/logout events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
