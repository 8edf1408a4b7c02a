//! Cooperative cancellation context.

use quill_error::{SequelError, SequelErrorKind};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

/// Shared cancellation signal for one workflow.
///
/// Clones observe the same signal. Workflows must call [`check`](Self::check)
/// before every remote call, and should wrap in-flight calls in
/// [`run_until_cancelled`](Self::run_until_cancelled) so the call is dropped
/// as soon as cancellation is requested.
///
/// # Examples
///
/// ```
/// use quill_interface::CancellationToken;
///
/// let token = CancellationToken::new();
/// let handle = token.clone();
/// assert!(token.check("Creating title").is_ok());
///
/// handle.cancel();
/// assert!(token.is_cancelled());
/// assert!(token.check("Creating title").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CancellationToken {
    signal: Arc<watch::Sender<bool>>,
}

impl CancellationToken {
    /// Create a token that has not fired.
    pub fn new() -> Self {
        let (signal, _) = watch::channel(false);
        Self {
            signal: Arc::new(signal),
        }
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.signal.send_replace(true);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        *self.signal.borrow()
    }

    /// Fail with `SequelErrorKind::Cancelled` if cancellation was requested.
    ///
    /// `step` names the work that is about to start.
    #[track_caller]
    pub fn check(&self, step: &str) -> Result<(), SequelError> {
        if self.is_cancelled() {
            Err(SequelError::new(SequelErrorKind::Cancelled(step.to_string())))
        } else {
            Ok(())
        }
    }

    /// Resolves once cancellation is requested.
    pub async fn cancelled(&self) {
        let mut receiver = self.signal.subscribe();
        // The sender lives as long as `self`, so this cannot observe a closed channel.
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }

    /// Drive `future` to completion unless cancellation fires first.
    ///
    /// Returns `None` when cancelled; the future is dropped, aborting
    /// whatever request it had in flight.
    pub async fn run_until_cancelled<F>(&self, future: F) -> Option<F::Output>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            _ = self.cancelled() => None,
            output = future => Some(output),
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
