//! Ephemeral state of one sequel generation run.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use quill_core::{SequelState, SequelStep, StoryId};
use quill_error::{SequelError, SequelErrorKind};
use quill_interface::CancellationToken;
use uuid::Uuid;

/// One run of the sequel pipeline for one target story.
///
/// A session starts `Idle`, moves through the pipeline states, and ends in
/// `Completed`, `Cancelled`, or `Failed`. A finished session cannot be
/// started again; open a new one instead.
///
/// # Examples
///
/// ```
/// use quill_core::SequelState;
/// use quill_sequel::GenerationSession;
///
/// let session = GenerationSession::new("S1".into());
/// assert_eq!(*session.state(), SequelState::Idle);
///
/// session.cancel();
/// assert!(session.token().is_cancelled());
/// ```
#[derive(Debug, Clone, Getters)]
pub struct GenerationSession {
    /// Session identity
    id: Uuid,
    /// Story the sequel continues
    target: StoryId,
    /// Current lifecycle state
    state: SequelState,
    /// Step being run, or about to run when cancellation was observed
    current_step: Option<SequelStep>,
    /// Human-readable message of the failure that ended the run
    last_error: Option<String>,
    /// Sequel row written by the saving step, if it got that far
    saved_story: Option<StoryId>,
    /// Cancellation context shared with every remote call
    token: CancellationToken,
    /// When the pipeline was started
    started_at: Option<DateTime<Utc>>,
}

impl GenerationSession {
    /// Open a session for `target` with a fresh cancellation token.
    pub fn new(target: StoryId) -> Self {
        Self::with_token(target, CancellationToken::new())
    }

    /// Open a session sharing an existing cancellation token.
    pub fn with_token(target: StoryId, token: CancellationToken) -> Self {
        Self {
            id: Uuid::new_v4(),
            target,
            state: SequelState::Idle,
            current_step: None,
            last_error: None,
            saved_story: None,
            token,
            started_at: None,
        }
    }

    /// Request cancellation of the run.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Zero-based index of the current step.
    pub fn step_index(&self) -> Option<usize> {
        self.current_step.map(SequelStep::index)
    }

    /// Whether the session reached a terminal state.
    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Mark the session started.
    ///
    /// # Errors
    ///
    /// Returns `SequelErrorKind::SessionFinished` unless the session is idle.
    pub(crate) fn begin(&mut self) -> Result<(), SequelError> {
        if self.state != SequelState::Idle {
            return Err(SequelError::new(SequelErrorKind::SessionFinished(
                self.state.to_string(),
            )));
        }
        self.started_at = Some(Utc::now());
        Ok(())
    }

    /// Record the step about to run.
    pub(crate) fn prepare(&mut self, step: SequelStep) {
        self.current_step = Some(step);
    }

    /// Record the sequel row once it is written.
    pub(crate) fn record_saved(&mut self, id: StoryId) {
        self.saved_story = Some(id);
    }

    /// Move to `next`, enforcing the pipeline's transition rules.
    pub(crate) fn transition(&mut self, next: SequelState) -> Result<(), SequelError> {
        if !self.state.can_transition_to(next) {
            return Err(SequelError::new(SequelErrorKind::InvalidTransition {
                from: self.state.to_string(),
                to: next.to_string(),
            }));
        }
        self.state = next;
        Ok(())
    }

    /// End the run as failed with a user-facing message.
    pub(crate) fn fail(&mut self, message: String) {
        if self.state.can_transition_to(SequelState::Failed) {
            self.state = SequelState::Failed;
        }
        self.last_error = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finished_session_rejects_begin() {
        let mut session = GenerationSession::new("S1".into());
        session.begin().unwrap();
        session.transition(SequelState::Cancelled).unwrap();

        let err = session.begin().unwrap_err();
        assert!(matches!(err.kind, SequelErrorKind::SessionFinished(_)));
    }

    #[test]
    fn test_transition_rejects_skipping_steps() {
        let mut session = GenerationSession::new("S1".into());
        let err = session.transition(SequelState::Saving).unwrap_err();
        assert!(matches!(err.kind, SequelErrorKind::InvalidTransition { .. }));
        assert_eq!(session.state, SequelState::Idle);
    }

    #[test]
    fn test_fail_records_message() {
        let mut session = GenerationSession::new("S1".into());
        session.transition(SequelState::GeneratingIdea).unwrap();
        session.fail("Generating story idea failed: 503".to_string());

        assert_eq!(session.state, SequelState::Failed);
        assert!(session.is_finished());
        assert_eq!(session.last_error.as_deref(), Some("Generating story idea failed: 503"));
    }
}
