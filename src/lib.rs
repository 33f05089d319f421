//! realty-console: client core for the real-estate administration console
//!
//! Provides an authenticated JSON client for the console backend with
//! transparent single-flight session refresh, per-response notifications,
//! a shared session store, and typed clients for owners, properties and
//! users.
//!
//! # Quick Start
//!
//! ```no_run
//! use realty_console::prelude::*;
//!
//! # async fn example() -> realty_console::error::Result<()> {
//! let config = ClientConfig::from_env()?;
//! let session = SessionStore::new();
//! let api = ConsoleApi::new(HttpClient::new(config, session.clone())?);
//!
//! api.auth.login(&LoginRequest {
//!     email: "admin@example.com".into(),
//!     password: "secret1".into(),
//! }).await?;
//! for owner in api.owners.list().await? {
//!     println!("{}", owner.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod feed;
pub mod http;
pub mod notify;
pub mod prelude;
pub mod session;
pub mod util;
pub mod validation;

#[cfg(feature = "cli")]
pub mod cli;
