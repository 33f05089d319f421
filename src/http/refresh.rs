//! Single-flight session refresh coordination.
//!
//! The first request to see a 401 becomes the leader and performs the
//! refresh. Requests that see a 401 while the leader is refreshing are
//! queued and released together, in arrival order, with the leader's
//! outcome.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use tokio::sync::oneshot;

use crate::error::RefreshFailure;

type Outcome = Result<(), RefreshFailure>;

#[derive(Debug, Default)]
struct RefreshState {
    refreshing: bool,
    pending: VecDeque<oneshot::Sender<Outcome>>,
}

/// Owns the refresh-in-flight flag and the pending request queue.
#[derive(Debug, Default)]
pub struct RefreshCoordinator {
    state: Mutex<RefreshState>,
}

/// Result of [`RefreshCoordinator::admit`].
#[derive(Debug)]
pub enum Admission<'a> {
    /// No refresh was running; the caller must perform it and settle the
    /// lease.
    Leader(RefreshLease<'a>),
    /// A refresh is running; wait on the ticket for its outcome.
    Queued(QueuedReplay),
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the protocol after a 401.
    ///
    /// The flag is set before this returns, so any later caller is queued
    /// even if the leader has not yet started its refresh call.
    pub fn admit(&self) -> Admission<'_> {
        let mut state = self.lock();
        if state.refreshing {
            let (tx, rx) = oneshot::channel();
            state.pending.push_back(tx);
            tracing::debug!(queued = state.pending.len(), "Refresh in flight, request queued");
            Admission::Queued(QueuedReplay { rx })
        } else {
            state.refreshing = true;
            Admission::Leader(RefreshLease {
                coordinator: self,
                settled: false,
            })
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.lock().refreshing
    }

    /// Number of requests waiting on the current refresh.
    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    /// Reopen the gate and release every queued request with `outcome`.
    fn drain(&self, outcome: Outcome) -> usize {
        let pending = {
            let mut state = self.lock();
            state.refreshing = false;
            std::mem::take(&mut state.pending)
        };
        let released = pending.len();
        for tx in pending {
            let _ = tx.send(outcome.clone());
        }
        released
    }

    fn lock(&self) -> MutexGuard<'_, RefreshState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Leadership of one refresh attempt.
///
/// Dropping an unsettled lease rejects the queue with
/// [`RefreshFailure::abandoned`] and reopens the gate.
#[derive(Debug)]
pub struct RefreshLease<'a> {
    coordinator: &'a RefreshCoordinator,
    settled: bool,
}

impl RefreshLease<'_> {
    /// Release queued requests for replay. Returns how many were waiting.
    pub fn resolve(mut self) -> usize {
        self.settle(Ok(()))
    }

    /// Fail every queued request with `failure`.
    pub fn reject(mut self, failure: RefreshFailure) -> usize {
        self.settle(Err(failure))
    }

    fn settle(&mut self, outcome: Outcome) -> usize {
        self.settled = true;
        self.coordinator.drain(outcome)
    }
}

impl Drop for RefreshLease<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("Refresh leader dropped before settling");
            self.coordinator.drain(Err(RefreshFailure::abandoned()));
        }
    }
}

/// A request parked behind an in-flight refresh.
#[derive(Debug)]
pub struct QueuedReplay {
    rx: oneshot::Receiver<Outcome>,
}

impl QueuedReplay {
    /// Wait for the refresh outcome. `Ok` means the request may be replayed.
    pub async fn wait(self) -> Outcome {
        self.rx
            .await
            .unwrap_or_else(|_| Err(RefreshFailure::abandoned()))
    }
}
