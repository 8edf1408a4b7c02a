//! Repository traits for stories and series.
//!
//! Implementations may be in-memory, a local library file, or a hosted
//! backend. The stores are externally synchronized: they enforce their own
//! row-level integrity and callers must not assume exclusive access.

use async_trait::async_trait;
use quill_core::{
    Series, SeriesId, SeriesMembership, SeriesUpdate, SeriesWithStories, Story, StoryDraft,
    StoryId, StoryUpdate,
};
use quill_error::QuillResult;

/// Repository for stories.
#[async_trait]
pub trait StoryStore: Send + Sync {
    /// Fetch a story by id. `Ok(None)` when no such row exists.
    async fn get_by_id(&self, id: &StoryId) -> QuillResult<Option<Story>>;

    /// Persist a new story and return the identity the store assigned.
    async fn save(&self, draft: &StoryDraft) -> QuillResult<StoryId>;

    /// Apply a partial update and return the stored result.
    ///
    /// # Errors
    ///
    /// Returns `StoreErrorKind::NotFound` if the story does not exist.
    async fn update(&self, id: &StoryId, update: &StoryUpdate) -> QuillResult<Story>;

    /// All stories, oldest first.
    async fn list_stories(&self) -> QuillResult<Vec<Story>>;
}

/// Repository for series and their membership links.
///
/// Positions are chosen by the caller; the store only appends on its own
/// when `add_story_to_series` is given no position.
#[async_trait]
pub trait SeriesStore: Send + Sync {
    /// The series a story belongs to, if any.
    ///
    /// A story in several series yields the earliest-created one.
    async fn get_series_for_story(&self, story_id: &StoryId) -> QuillResult<Option<Series>>;

    /// Create an empty series.
    async fn create_series(&self, title: &str, description: &str) -> QuillResult<Series>;

    /// Attach a story to a series.
    ///
    /// With `position = None` the story is appended one past the highest
    /// existing position (0 for an empty series).
    ///
    /// # Errors
    ///
    /// Returns `StoreErrorKind::Conflict` if the story is already a member,
    /// and `StoreErrorKind::NotFound` if the series does not exist.
    async fn add_story_to_series(
        &self,
        series_id: &SeriesId,
        story_id: &StoryId,
        position: Option<u32>,
    ) -> QuillResult<SeriesMembership>;

    /// A series with its member stories ordered by position.
    ///
    /// Members whose story row no longer exists are skipped.
    async fn get_series_with_stories(&self, series_id: &SeriesId)
        -> QuillResult<SeriesWithStories>;

    /// All series, oldest first.
    async fn list_series(&self) -> QuillResult<Vec<Series>>;

    /// Apply a partial update and return the stored result.
    async fn update_series(&self, series_id: &SeriesId, update: &SeriesUpdate)
        -> QuillResult<Series>;

    /// Delete a series and its membership links. Member stories are untouched.
    async fn delete_series(&self, series_id: &SeriesId) -> QuillResult<()>;

    /// Remove one story from a series. Removing a non-member is a no-op.
    async fn remove_story_from_series(
        &self,
        series_id: &SeriesId,
        story_id: &StoryId,
    ) -> QuillResult<()>;

    /// Rewrite positions so `ordered` occupies positions `0..ordered.len()`.
    ///
    /// # Errors
    ///
    /// Returns `StoreErrorKind::NotFound` if any id is not a member.
    async fn reorder_series(&self, series_id: &SeriesId, ordered: &[StoryId]) -> QuillResult<()>;
}
