//! Error classification and shared error payloads.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::Display;

/// Broad failure class used to route recovery logic.
///
/// Only [`ErrorKind::AuthExpired`] participates in the session refresh
/// protocol; every other kind reaches the caller unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// No response was received.
    NetworkFailure,
    Timeout,
    /// 4xx other than 401.
    ClientError,
    /// 401.
    AuthExpired,
    /// 5xx.
    ServerError,
    Unclassified,
}

impl ErrorKind {
    /// Classify an HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::AuthExpired,
            400..=499 => Self::ClientError,
            500..=599 => Self::ServerError,
            _ => Self::Unclassified,
        }
    }
}

/// Error envelope returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Outcome of a failed session refresh, shared by every request queued
/// behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshFailure {
    /// Status returned by the refresh endpoint, `None` when no response
    /// arrived.
    pub status: Option<u16>,
    pub message: String,
}

impl RefreshFailure {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// The refresh driver went away before settling.
    pub fn abandoned() -> Self {
        Self::new(None, "refresh abandoned before completion")
    }
}

impl fmt::Display for RefreshFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "status {status}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}
