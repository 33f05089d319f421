//! Response notifications: status classification and delivery.

pub mod center;

pub use center::NotificationCenter;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Default on-screen duration, in milliseconds.
pub const DEFAULT_DURATION_MS: u64 = 4500;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

/// HTTP status band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StatusClass {
    #[strum(serialize = "Informational")]
    Informational,
    #[strum(serialize = "Success")]
    Success,
    #[strum(serialize = "Redirection")]
    Redirection,
    #[strum(serialize = "Client Error")]
    ClientError,
    #[strum(serialize = "Server Error")]
    ServerError,
    #[strum(serialize = "Unknown Status Code")]
    Unknown,
}

impl StatusClass {
    pub fn of(status: u16) -> Self {
        match status {
            100..=199 => Self::Informational,
            200..=299 => Self::Success,
            300..=399 => Self::Redirection,
            400..=499 => Self::ClientError,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Self::Informational => Severity::Info,
            Self::Success => Severity::Success,
            Self::Redirection => Severity::Warning,
            Self::ClientError | Self::ServerError | Self::Unknown => Severity::Error,
        }
    }
}

/// Screen corner a toast is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Position {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

/// A transient user-facing notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub duration_ms: u64,
    pub closable: bool,
    pub pause_on_hover: bool,
    pub position: Position,
}

impl Notification {
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            severity,
            title: title.into(),
            message: message.into(),
            duration_ms: DEFAULT_DURATION_MS,
            closable: true,
            pause_on_hover: true,
            position: Position::default(),
        }
    }

    /// Build the notification for an HTTP response.
    ///
    /// The message is the status text, else the body's `message` field,
    /// else empty.
    ///
    /// ```
    /// use realty_console::notify::{Notification, Severity};
    ///
    /// let body = serde_json::json!({ "message": "Owner not found" });
    /// let n = Notification::for_status(404, "", Some(&body));
    /// assert_eq!(n.severity, Severity::Error);
    /// assert_eq!(n.title, "Client Error 404");
    /// assert_eq!(n.message, "Owner not found");
    /// ```
    pub fn for_status(status: u16, status_text: &str, body: Option<&serde_json::Value>) -> Self {
        let class = StatusClass::of(status);
        let message = if !status_text.is_empty() {
            status_text.to_string()
        } else {
            body.and_then(|b| b.get("message"))
                .and_then(|m| m.as_str())
                .unwrap_or_default()
                .to_string()
        };
        Self::new(class.severity(), format!("{class} {status}"), message)
    }
}

/// Sink for notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Forwards notifications to `tracing` at a level matching their severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, n: Notification) {
        match n.severity {
            Severity::Error => {
                tracing::error!(title = %n.title, message = %n.message, "Notification")
            }
            Severity::Warning => {
                tracing::warn!(title = %n.title, message = %n.message, "Notification")
            }
            Severity::Success | Severity::Info => {
                tracing::info!(title = %n.title, message = %n.message, "Notification")
            }
        }
    }
}
