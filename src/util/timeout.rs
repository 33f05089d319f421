//! Timeout helper.

use std::future::Future;
use std::time::Duration;

use crate::error::{ConsoleError, Result};

/// Run a request future under a deadline, mapping expiry to
/// [`ConsoleError::Timeout`].
pub async fn with_timeout<T>(
    duration: Duration,
    future: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(ConsoleError::Timeout(duration.as_millis() as u64)),
    }
}
