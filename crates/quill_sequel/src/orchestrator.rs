//! The sequel generation pipeline.

use crate::{GenerationSession, SequelHandle, SequelObserver, SeriesMembershipManager};
use quill_core::{Progress, SequelState, SequelStep, SeriesId, Story, StoryDraft, StoryId};
use quill_error::{
    QuillError, QuillResult, SequelError, SequelErrorKind, StoreError, StoreErrorKind,
};
use quill_interface::{CancellationToken, GenerationClient, SeriesStore, StoryStore};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// How a pipeline run ended, other than by failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequelOutcome {
    /// The sequel was saved
    Completed {
        /// The new sequel's id
        story_id: StoryId,
        /// The series the sequel joined, if any
        series_id: Option<SeriesId>,
    },
    /// The run stopped on a cancellation request
    Cancelled {
        /// Step that was running or about to start
        step: Option<SequelStep>,
        /// The sequel row, when cancellation came after it was written
        saved_story: Option<StoryId>,
    },
}

impl SequelOutcome {
    /// The new sequel's id, if the run completed.
    pub fn story_id(&self) -> Option<&StoryId> {
        match self {
            SequelOutcome::Completed { story_id, .. } => Some(story_id),
            SequelOutcome::Cancelled { .. } => None,
        }
    }

    /// Whether the run was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SequelOutcome::Cancelled { .. })
    }
}

/// Runs the six-step sequel pipeline.
///
/// Collaborators are injected once and shared by every run. Runs are
/// independent: each gets its own [`GenerationSession`].
///
/// Steps, in order: generate a premise, a title, an outline, and characters;
/// resolve the series; save the sequel and append it to the series. The
/// cancellation token is checked before every remote call, and generation
/// calls in flight are dropped when it fires. Nothing already written is
/// rolled back on failure or cancellation.
#[derive(Clone)]
pub struct SequelOrchestrator {
    stories: Arc<dyn StoryStore>,
    series: Arc<dyn SeriesStore>,
    generation: Arc<dyn GenerationClient>,
    membership: SeriesMembershipManager,
}

impl std::fmt::Debug for SequelOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequelOrchestrator")
            .field("membership", &self.membership)
            .finish_non_exhaustive()
    }
}

impl SequelOrchestrator {
    /// Create an orchestrator over the given collaborators.
    pub fn new(
        stories: Arc<dyn StoryStore>,
        series: Arc<dyn SeriesStore>,
        generation: Arc<dyn GenerationClient>,
    ) -> Self {
        let membership = SeriesMembershipManager::new(stories.clone(), series.clone());
        Self {
            stories,
            series,
            generation,
            membership,
        }
    }

    /// Limit how far the series resolution walks up a sequel chain.
    pub fn with_max_ancestor_depth(mut self, depth: usize) -> Self {
        self.membership = self.membership.with_max_ancestor_depth(depth);
        self
    }

    /// The series membership manager used by the resolving step.
    pub fn membership(&self) -> &SeriesMembershipManager {
        &self.membership
    }

    /// Run the pipeline for `original` within `session`.
    ///
    /// Progress is reported to `observer` as each step starts. On failure the
    /// message is recorded in the session and reported once.
    ///
    /// # Errors
    ///
    /// Returns `SequelErrorKind::SessionFinished` for a session that already
    /// ran, and `SequelErrorKind::StepFailed` naming the step that failed.
    /// Cancellation is not an error; it yields [`SequelOutcome::Cancelled`].
    #[instrument(
        skip(self, original, session, observer),
        fields(story_id = %original.id(), session_id = %session.id())
    )]
    pub async fn start(
        &self,
        original: &Story,
        session: &mut GenerationSession,
        observer: &dyn SequelObserver,
    ) -> QuillResult<SequelOutcome> {
        session.begin()?;
        let token = session.token().clone();

        match self.run(original, session, &token, observer).await {
            Ok(outcome) => Ok(outcome),
            Err(e) if e.is_cancellation() => {
                info!(step = ?session.current_step(), "Sequel generation cancelled");
                session.transition(SequelState::Cancelled)?;
                Ok(SequelOutcome::Cancelled {
                    step: *session.current_step(),
                    saved_story: session.saved_story().clone(),
                })
            }
            Err(e) => {
                let message = e.message();
                error!(error = %message, "Sequel generation failed");
                session.fail(message.clone());
                observer.on_failure(&message);
                Err(e)
            }
        }
    }

    /// Run the pipeline on the tokio runtime.
    ///
    /// The returned handle streams progress events, cancels the run, and
    /// yields its outcome.
    pub fn spawn(&self, original: Story) -> SequelHandle {
        let (events, receiver) = tokio::sync::mpsc::unbounded_channel();
        let mut session = GenerationSession::new(original.id().clone());
        let token = session.token().clone();
        let session_id = *session.id();
        let orchestrator = self.clone();

        let task = tokio::spawn(async move {
            orchestrator
                .start(&original, &mut session, &events)
                .await
        });

        SequelHandle::new(session_id, token, receiver, task)
    }

    async fn run(
        &self,
        original: &Story,
        session: &mut GenerationSession,
        token: &CancellationToken,
        observer: &dyn SequelObserver,
    ) -> QuillResult<SequelOutcome> {
        let idea = self
            .generate(session, token, observer, SequelStep::GeneratingIdea, |token| {
                self.generation.generate_sequel_idea(original, token)
            })
            .await?;

        let title = self
            .generate(session, token, observer, SequelStep::GeneratingTitle, |token| {
                self.generation.create_title(&idea, token)
            })
            .await?;

        let outline = self
            .generate(session, token, observer, SequelStep::GeneratingOutline, |token| {
                self.generation.create_outline(&idea, token)
            })
            .await?;

        let characters = self
            .generate(session, token, observer, SequelStep::GeneratingCharacters, |token| {
                self.generation.generate_characters(&outline, token)
            })
            .await?;

        self.enter(session, token, observer, SequelStep::ResolvingSeries)?;
        let resolution = self
            .membership
            .resolve(original, token)
            .await
            .map_err(|e| step_failure(SequelStep::ResolvingSeries, e))?;
        let series_id = resolution.series_id().cloned();

        self.enter(session, token, observer, SequelStep::Saving)?;
        let draft = StoryDraft::sequel_of(original, title, idea, outline, characters);
        let story_id = self
            .stories
            .save(&draft)
            .await
            .map_err(|e| step_failure(SequelStep::Saving, e))?;
        session.record_saved(story_id.clone());
        debug!(story_id = %story_id, "Saved sequel");

        if let Some(series_id) = &series_id {
            self.append_to_series(series_id, &story_id, token)
                .await
                .map_err(|e| step_failure(SequelStep::Saving, e))?;
        }

        session.transition(SequelState::Completed)?;
        info!(story_id = %story_id, series_id = ?series_id, "Sequel generation completed");
        Ok(SequelOutcome::Completed {
            story_id,
            series_id,
        })
    }

    /// Check cancellation, move the session into `step`, and report it.
    fn enter(
        &self,
        session: &mut GenerationSession,
        token: &CancellationToken,
        observer: &dyn SequelObserver,
        step: SequelStep,
    ) -> QuillResult<()> {
        session.prepare(step);
        token.check(&step.label())?;
        session.transition(step.into())?;
        debug!(step = %step, index = step.index(), "Entering step");
        observer.on_progress(&Progress::for_step(step));
        Ok(())
    }

    /// Run one generation step, dropping the call if the token fires.
    async fn generate<'a, T, F, Fut>(
        &self,
        session: &mut GenerationSession,
        token: &'a CancellationToken,
        observer: &dyn SequelObserver,
        step: SequelStep,
        call: F,
    ) -> QuillResult<T>
    where
        F: FnOnce(&'a CancellationToken) -> Fut,
        Fut: Future<Output = QuillResult<T>>,
    {
        self.enter(session, token, observer, step)?;
        match token.run_until_cancelled(call(token)).await {
            Some(result) => result.map_err(|e| step_failure(step, e)),
            None => Err(SequelError::new(SequelErrorKind::Cancelled(step.label())).into()),
        }
    }

    /// Append the saved sequel after the series' current last member.
    async fn append_to_series(
        &self,
        series_id: &SeriesId,
        story_id: &StoryId,
        token: &CancellationToken,
    ) -> QuillResult<()> {
        let label = SequelStep::Saving.label();
        token.check(&label)?;
        let current = self.series.get_series_with_stories(series_id).await?;
        let position = current.next_position().ok_or_else(|| {
            StoreError::new(StoreErrorKind::Conflict(format!(
                "series {} has no position free after {}",
                series_id,
                u32::MAX
            )))
        })?;

        token.check(&label)?;
        self.series
            .add_story_to_series(series_id, story_id, Some(position))
            .await?;
        debug!(series_id = %series_id, position, "Appended sequel to series");
        Ok(())
    }
}

/// Wrap a step error with the step's label, leaving cancellation untouched.
fn step_failure(step: SequelStep, error: QuillError) -> QuillError {
    if error.is_cancellation() {
        return error;
    }
    SequelError::new(SequelErrorKind::StepFailed {
        step: step.label(),
        message: error.message(),
    })
    .into()
}
