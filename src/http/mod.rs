//! Authenticated HTTP transport.
//!
//! [`HttpClient`] sends JSON requests to the configured backend with a
//! cookie store, reports every outcome through the [`StatusInterpreter`],
//! and recovers from an expired session by running the single-flight
//! refresh protocol in [`refresh`].

pub mod interpreter;
pub mod refresh;

pub use interpreter::StatusInterpreter;
pub use refresh::{Admission, QueuedReplay, RefreshCoordinator, RefreshLease};
pub use reqwest::Method;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{ConsoleError, RefreshFailure, Result};
use crate::notify::{Notifier, TracingNotifier};
use crate::session::{Navigator, SessionStore, StaticNavigator};
use crate::util::timeout::with_timeout;

/// Per-call request settings.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    /// Overrides [`ClientConfig::timeout`].
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn queries(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Everything needed to send (and replay) one request.
#[derive(Debug, Clone)]
struct OutgoingRequest {
    method: Method,
    path: String,
    body: Option<serde_json::Value>,
    options: RequestOptions,
    retried: bool,
}

#[derive(Debug)]
struct RawResponse {
    status: StatusCode,
    body: String,
}

impl RawResponse {
    fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.body).ok()
    }

    fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("")
    }
}

/// JSON client for the console backend.
///
/// Clones share the cookie jar, session, and refresh state.
///
/// # Example
/// ```no_run
/// use realty_console::config::ClientConfig;
/// use realty_console::http::{HttpClient, RequestOptions};
/// use realty_console::session::SessionStore;
///
/// # async fn example() -> realty_console::error::Result<()> {
/// let config = ClientConfig::builder()
///     .base_url("http://localhost:5000".to_string())
///     .build();
/// let client = HttpClient::new(config, SessionStore::new())?;
/// let owners: serde_json::Value = client.get("/api/Owners", RequestOptions::new()).await?;
/// println!("{owners}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
    interpreter: StatusInterpreter,
    coordinator: Arc<RefreshCoordinator>,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("session", &self.session)
            .field("coordinator", &self.coordinator)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Build a client. Notifications go to `tracing` and navigation is a
    /// no-op until replaced with [`with_notifier`](Self::with_notifier) and
    /// [`with_navigator`](Self::with_navigator).
    pub fn new(config: ClientConfig, session: SessionStore) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .pool_max_idle_per_host(10)
            .build()?;

        let interpreter = StatusInterpreter::new(
            Arc::new(TracingNotifier),
            session.clone(),
            config.notify_success,
        );
        let navigator = Arc::new(StaticNavigator(config.public_root.clone()));

        Ok(Self {
            http,
            config: Arc::new(config),
            session,
            navigator,
            interpreter,
            coordinator: Arc::new(RefreshCoordinator::new()),
        })
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.interpreter =
            StatusInterpreter::new(notifier, self.session.clone(), self.config.notify_success);
        self
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn coordinator(&self) -> &RefreshCoordinator {
        &self.coordinator
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        self.request(Method::GET, path, None, options).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B, options: RequestOptions) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.request(Method::POST, path, Some(body), options).await
    }

    /// POST without a body.
    pub async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        self.request(Method::POST, path, None, options).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B, options: RequestOptions) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.request(Method::PUT, path, Some(body), options).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B, options: RequestOptions) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.request(Method::PATCH, path, Some(body), options).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        self.request(Method::DELETE, path, None, options).await
    }

    /// Send a request and decode a 2xx body into `T`.
    ///
    /// Every outcome is reported to the interpreter before returning. A
    /// failure without a response is reported as status 500.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        options: RequestOptions,
    ) -> Result<T> {
        let request = OutgoingRequest {
            method,
            path: path.to_string(),
            body,
            options,
            retried: false,
        };

        match self.send(request).await {
            Ok(response) => {
                let status = response.status.as_u16();
                self.interpreter
                    .observe(status, response.status_text(), response.json().as_ref());
                if response.status.is_success() {
                    decode(&response.body)
                } else {
                    Err(ConsoleError::from_response(status, &response.body))
                }
            }
            Err(ConsoleError::RefreshFailed(failure)) => {
                // The coordinator already ended the session.
                let body = serde_json::json!({ "message": failure.message });
                self.interpreter
                    .announce(failure.status.unwrap_or(500), "", Some(&body));
                Err(ConsoleError::RefreshFailed(failure))
            }
            Err(err) => {
                self.interpreter.observe(500, "", None);
                Err(err)
            }
        }
    }

    /// Call the refresh endpoint once, outside the refresh protocol.
    pub(crate) async fn refresh_session(&self) -> std::result::Result<(), RefreshFailure> {
        let request = OutgoingRequest {
            method: Method::POST,
            path: self.config.refresh_path.clone(),
            body: None,
            options: RequestOptions::default(),
            retried: true,
        };

        match self.dispatch(&request).await {
            Ok(response) if response.status.is_success() => Ok(()),
            Ok(response) => {
                let message = response
                    .json()
                    .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
                    .unwrap_or_else(|| response.status_text().to_string());
                Err(RefreshFailure::new(Some(response.status.as_u16()), message))
            }
            Err(err) => Err(RefreshFailure::new(None, err.to_string())),
        }
    }

    /// Clear the session and leave any private location.
    pub(crate) fn end_session(&self) {
        self.session.logout();
        let root = self.config.public_root.as_str();
        if self.navigator.current_path() != root {
            tracing::info!(to = root, "Redirecting to public root");
            self.navigator.navigate(root);
        }
    }

    /// Dispatch with 401 recovery.
    async fn send(&self, mut request: OutgoingRequest) -> Result<RawResponse> {
        let response = self.dispatch(&request).await?;
        if response.status != StatusCode::UNAUTHORIZED
            || request.retried
            || self.config.is_refresh_path(&request.path)
        {
            return Ok(response);
        }

        match self.coordinator.admit() {
            Admission::Queued(ticket) => {
                ticket.wait().await.map_err(ConsoleError::RefreshFailed)?;
                request.retried = true;
                tracing::debug!(path = %request.path, "Replaying queued request");
                self.dispatch(&request).await
            }
            Admission::Leader(lease) => {
                request.retried = true;
                tracing::info!(path = %request.path, "Session expired, refreshing");
                match self.refresh_session().await {
                    Ok(()) => {
                        let released = lease.resolve();
                        tracing::info!(released, "Session refreshed");
                        self.dispatch(&request).await
                    }
                    Err(failure) => {
                        let released = lease.reject(failure.clone());
                        tracing::warn!(released, error = %failure, "Session refresh failed, logging out");
                        self.end_session();
                        Err(ConsoleError::RefreshFailed(failure))
                    }
                }
            }
        }
    }

    /// One network round trip. Any HTTP status is `Ok`.
    async fn dispatch(&self, request: &OutgoingRequest) -> Result<RawResponse> {
        let url = self.url(&request.path)?;
        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .headers(request.options.headers.clone());
        if !request.options.query.is_empty() {
            builder = builder.query(&request.options.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let timeout = request.options.timeout.unwrap_or(self.config.timeout);
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            retried = request.retried,
            "Sending request"
        );

        let response = with_timeout(timeout, async move {
            let response = builder.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok(RawResponse { status, body })
        })
        .await?;

        tracing::debug!(
            status = response.status.as_u16(),
            path = %request.path,
            "Response received"
        );
        Ok(response)
    }

    fn url(&self, path: &str) -> Result<reqwest::Url> {
        let joined = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        reqwest::Url::parse(&joined).map_err(|err| {
            ConsoleError::InvalidArgument(format!("Invalid request path {path:?}: {err}"))
        })
    }
}

/// Decode a 2xx body. An empty body decodes as JSON `null`.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    if body.trim().is_empty() {
        Ok(serde_json::from_value(serde_json::Value::Null)?)
    } else {
        Ok(serde_json::from_str(body)?)
    }
}
