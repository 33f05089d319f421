//! Error types for the console client.

pub mod kind;

pub use kind::{ApiErrorBody, ErrorKind, RefreshFailure};

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Primary error type for all client operations.
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        body: Option<ApiErrorBody>,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Session refresh failed: {0}")]
    RefreshFailed(RefreshFailure),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ConsoleError {
    /// Create an API error without a decoded body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
            body: None,
        }
    }

    /// Build an API error from a non-2xx status and its raw body.
    ///
    /// The message prefers the body's `message` field and falls back to the
    /// raw text.
    pub fn from_response(status: u16, raw: &str) -> Self {
        let body = serde_json::from_str::<ApiErrorBody>(raw).ok();
        let message = body
            .as_ref()
            .and_then(|b| b.message.clone())
            .unwrap_or_else(|| raw.to_string());
        Self::Api {
            status,
            message,
            body,
        }
    }

    /// Classify this error into the transport taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(err) if err.is_timeout() => ErrorKind::Timeout,
            Self::Network(_) => ErrorKind::NetworkFailure,
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::Api { status, .. } => ErrorKind::from_status(*status),
            Self::RefreshFailed(_) => ErrorKind::AuthExpired,
            _ => ErrorKind::Unclassified,
        }
    }

    /// HTTP status attached to this error, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RefreshFailed(failure) => failure.status,
            Self::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Backend error code (e.g. `Owner.HasAssociatedProperties`), if any.
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api {
                body: Some(body), ..
            } => body.code.as_deref(),
            _ => None,
        }
    }

    /// Whether this failure ended the session.
    pub fn is_session_expired(&self) -> bool {
        self.kind() == ErrorKind::AuthExpired
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ConsoleError>;
