//! Convenience re-exports for common use.

pub use crate::api::{
    ConsoleApi, LoginRequest, Owner, PagedResult, Property, PropertySearch, User, UserSearch,
};
pub use crate::config::ClientConfig;
pub use crate::error::{ConsoleError, ErrorKind, Result};
pub use crate::feed::{PropertyFeed, PropertyFilters};
pub use crate::http::{HttpClient, RequestOptions};
pub use crate::notify::{Notification, NotificationCenter, Notifier, Severity};
pub use crate::session::{Identity, Navigator, SessionEvent, SessionStore};
