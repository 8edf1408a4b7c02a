//! Scripted generation client.

use async_trait::async_trait;
use quill_core::{Character, OutlineBeat, PlotOutline, SequelStep, Story};
use quill_error::{GenerationError, GenerationErrorKind, QuillResult};
use quill_interface::{CancellationToken, GenerationClient};
use std::collections::HashMap;
use std::sync::Mutex;

/// How one generation step behaves.
#[derive(Debug, Clone)]
pub enum StepBehavior {
    /// Return the default scripted output
    Succeed,
    /// Fail with this error
    Fail(GenerationErrorKind),
    /// Cancel the token, as a user would mid-call, then wait for the abort
    CancelDuring,
    /// Succeed, with the user cancelling just as the call returns
    CancelAfter,
    /// Ignore the token and never resolve
    Hang,
}

/// Generation client returning fixed outputs, with per-step overrides.
#[derive(Debug, Default)]
pub struct ScriptedGeneration {
    behaviors: HashMap<SequelStep, StepBehavior>,
    outline: Option<PlotOutline>,
    calls: Mutex<Vec<SequelStep>>,
}

impl ScriptedGeneration {
    /// Client where every step succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override one step's behavior.
    pub fn with_step(mut self, step: SequelStep, behavior: StepBehavior) -> Self {
        self.behaviors.insert(step, behavior);
        self
    }

    /// Replace the scripted outline.
    #[allow(dead_code)]
    pub fn with_outline(mut self, outline: PlotOutline) -> Self {
        self.outline = Some(outline);
        self
    }

    /// Steps called, in order.
    pub fn calls(&self) -> Vec<SequelStep> {
        self.calls.lock().unwrap().clone()
    }

    async fn perform<T>(
        &self,
        step: SequelStep,
        cancel: &CancellationToken,
        output: T,
    ) -> QuillResult<T> {
        self.calls.lock().unwrap().push(step);
        if cancel.is_cancelled() {
            return Err(GenerationError::new(GenerationErrorKind::Aborted).into());
        }

        match self.behaviors.get(&step).cloned().unwrap_or(StepBehavior::Succeed) {
            StepBehavior::Succeed => Ok(output),
            StepBehavior::Fail(kind) => Err(GenerationError::new(kind).into()),
            StepBehavior::CancelDuring => {
                cancel.cancel();
                cancel.cancelled().await;
                Err(GenerationError::new(GenerationErrorKind::Aborted).into())
            }
            StepBehavior::CancelAfter => {
                cancel.cancel();
                Ok(output)
            }
            StepBehavior::Hang => std::future::pending().await,
        }
    }
}

#[async_trait]
impl GenerationClient for ScriptedGeneration {
    async fn generate_sequel_idea(
        &self,
        story: &Story,
        cancel: &CancellationToken,
    ) -> QuillResult<String> {
        let idea = format!("What happened after {}", story.title());
        self.perform(SequelStep::GeneratingIdea, cancel, idea).await
    }

    async fn create_title(&self, _idea: &str, cancel: &CancellationToken) -> QuillResult<String> {
        self.perform(SequelStep::GeneratingTitle, cancel, "The Return".to_string())
            .await
    }

    async fn create_outline(
        &self,
        _idea: &str,
        cancel: &CancellationToken,
    ) -> QuillResult<PlotOutline> {
        let outline = self.outline.clone().unwrap_or_else(|| {
            PlotOutline::new(vec![OutlineBeat::new("Homecoming", "The crew lands")])
        });
        self.perform(SequelStep::GeneratingOutline, cancel, outline)
            .await
    }

    async fn generate_characters(
        &self,
        _outline: &PlotOutline,
        cancel: &CancellationToken,
    ) -> QuillResult<Vec<Character>> {
        let characters = vec![Character::new("Ada", "captain", "Older now")];
        self.perform(SequelStep::GeneratingCharacters, cancel, characters)
            .await
    }
}
