//! AI generation seams.

use crate::CancellationToken;
use async_trait::async_trait;
use quill_core::{Character, CompletionRequest, PlotOutline, Story};
use quill_error::QuillResult;

/// The four generation calls the sequel pipeline consumes.
///
/// Each call receives the workflow's cancellation token and must fail with
/// `GenerationErrorKind::Aborted` when it observes cancellation, so callers
/// can tell an abort from a failure.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// A premise for a new story continuing `story`.
    async fn generate_sequel_idea(
        &self,
        story: &Story,
        cancel: &CancellationToken,
    ) -> QuillResult<String>;

    /// A title for the given premise.
    async fn create_title(&self, idea: &str, cancel: &CancellationToken) -> QuillResult<String>;

    /// A structured outline for the given premise.
    async fn create_outline(
        &self,
        idea: &str,
        cancel: &CancellationToken,
    ) -> QuillResult<PlotOutline>;

    /// Characters for the given outline. An empty outline is allowed.
    async fn generate_characters(
        &self,
        outline: &PlotOutline,
        cancel: &CancellationToken,
    ) -> QuillResult<Vec<Character>>;
}

/// Core trait that text-generation backends implement.
#[async_trait]
pub trait TextDriver: Send + Sync {
    /// Produce a completion for a single-turn request.
    async fn complete(&self, request: &CompletionRequest) -> QuillResult<String>;

    /// Provider name (e.g., "openai", "groq").
    fn provider_name(&self) -> &str;

    /// Model identifier.
    fn model_name(&self) -> &str;
}
