//! Teardown signalling for views.
//!
//! A view owns one [`CancellationToken`] and runs every backend call through
//! [`CancellationToken::run`]. Once the view is torn down the pending call resolves
//! to [`Cancelled`] instead of its result, so nothing is written into a dead view.

use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

/// Returned in place of a result when the owning view was torn down.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("operation cancelled")]
pub struct Cancelled;

/// Cloneable cancellation flag backed by a `watch` channel.
#[derive(Clone, Debug)]
pub struct CancellationToken {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Signals every clone of this token. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once [`cancel`](Self::cancel) has been called.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so `wait_for` cannot fail here.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Drives `fut` to completion unless the token fires first.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, Cancelled>
    where
        F: Future,
    {
        if self.is_cancelled() {
            return Err(Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.cancelled() => Err(Cancelled),
            out = fut => Ok(out),
        }
    }
}
