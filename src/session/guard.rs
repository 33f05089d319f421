//! Location abstraction and private-route guarding.

use std::sync::{Arc, Mutex};

use super::SessionStore;

/// Where the user currently is, and how to send them elsewhere.
pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;
    fn navigate(&self, path: &str);
}

/// Navigator that records navigation in memory.
#[derive(Debug, Clone)]
pub struct MemoryNavigator {
    path: Arc<Mutex<String>>,
    history: Arc<Mutex<Vec<String>>>,
}

impl MemoryNavigator {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            path: Arc::new(Mutex::new(start.into())),
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Paths navigated to, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.path.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn navigate(&self, path: &str) {
        *self.path.lock().unwrap_or_else(|e| e.into_inner()) = path.to_string();
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(path.to_string());
    }
}

/// Navigator with a fixed location that ignores navigation.
#[derive(Debug, Clone)]
pub struct StaticNavigator(pub String);

impl Navigator for StaticNavigator {
    fn current_path(&self) -> String {
        self.0.clone()
    }

    fn navigate(&self, path: &str) {
        tracing::debug!(path, "Navigation requested");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(String),
}

/// Redirects unauthenticated users away from private routes.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    session: SessionStore,
    public_root: String,
}

impl RouteGuard {
    pub fn new(session: SessionStore, public_root: impl Into<String>) -> Self {
        Self {
            session,
            public_root: public_root.into(),
        }
    }

    pub fn check(&self) -> RouteDecision {
        if self.session.is_authenticated() {
            RouteDecision::Allow
        } else {
            RouteDecision::Redirect(self.public_root.clone())
        }
    }

    /// Check and, on redirect, navigate.
    pub fn enforce(&self, navigator: &dyn Navigator) -> RouteDecision {
        let decision = self.check();
        if let RouteDecision::Redirect(path) = &decision {
            navigator.navigate(path);
        }
        decision
    }
}
