//! Handle to a pipeline run spawned on the runtime.

use crate::{SequelEvent, SequelOutcome};
use quill_error::{BackendError, QuillResult};
use quill_interface::CancellationToken;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Controls a spawned sequel run.
///
/// Dropping the handle does not stop the run; call [`cancel`](Self::cancel).
#[derive(Debug)]
pub struct SequelHandle {
    session_id: Uuid,
    token: CancellationToken,
    events: UnboundedReceiver<SequelEvent>,
    task: JoinHandle<QuillResult<SequelOutcome>>,
}

impl SequelHandle {
    pub(crate) fn new(
        session_id: Uuid,
        token: CancellationToken,
        events: UnboundedReceiver<SequelEvent>,
        task: JoinHandle<QuillResult<SequelOutcome>>,
    ) -> Self {
        Self {
            session_id,
            token,
            events,
            task,
        }
    }

    /// Id of the session driving the run.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Request cancellation of the run.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// A clone of the run's cancellation token.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Next progress or failure event. `None` once the run has ended and
    /// every event was read.
    pub async fn next_event(&mut self) -> Option<SequelEvent> {
        self.events.recv().await
    }

    /// Wait for the run to end.
    ///
    /// # Errors
    ///
    /// Returns the run's failure, or a `BackendError` if the task panicked.
    pub async fn join(self) -> QuillResult<SequelOutcome> {
        self.task
            .await
            .map_err(|e| BackendError::new(format!("Sequel task failed: {}", e)))?
    }
}
