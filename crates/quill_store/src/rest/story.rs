//! REST-backed story store.

use super::client::{RestClient, eq};
use super::rows::{NewStoryRow, StoryPatch, StoryRow};
use async_trait::async_trait;
use quill_core::{Story, StoryDraft, StoryId, StoryUpdate};
use quill_error::{QuillResult, StoreError, StoreErrorKind};
use quill_interface::StoryStore;
use tracing::{debug, instrument};

const STORIES: &str = "stories";

/// Story store over the hosted `stories` table.
#[derive(Debug, Clone)]
pub struct RestStoryStore {
    client: RestClient,
}

impl RestStoryStore {
    /// Create a store sharing `client`.
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StoryStore for RestStoryStore {
    #[instrument(skip(self), fields(story_id = %id))]
    async fn get_by_id(&self, id: &StoryId) -> QuillResult<Option<Story>> {
        let rows: Vec<StoryRow> = self
            .client
            .select(
                STORIES,
                &[("id", eq(id)), ("limit", "1".to_string())],
            )
            .await?;
        rows.into_iter().next().map(StoryRow::into_story).transpose()
    }

    #[instrument(skip(self, draft), fields(title = %draft.title, is_sequel = draft.is_sequel))]
    async fn save(&self, draft: &StoryDraft) -> QuillResult<StoryId> {
        let row = NewStoryRow::from_draft(draft)?;
        let inserted: Vec<StoryRow> = self.client.insert(STORIES, &row).await?;
        let stored = inserted.into_iter().next().ok_or_else(|| {
            StoreError::new(StoreErrorKind::Decode(
                "insert returned no story row".to_string(),
            ))
        })?;
        debug!(story_id = %stored.id, "Saved story");
        Ok(StoryId::new(stored.id))
    }

    #[instrument(skip(self, update), fields(story_id = %id))]
    async fn update(&self, id: &StoryId, update: &StoryUpdate) -> QuillResult<Story> {
        if update.is_empty() {
            return self.get_by_id(id).await?.ok_or_else(|| {
                StoreError::new(StoreErrorKind::NotFound(format!("story {}", id))).into()
            });
        }

        let patch = StoryPatch::from_update(update)?;
        let rows: Vec<StoryRow> = self
            .client
            .patch(STORIES, &[("id", eq(id))], &patch)
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::new(StoreErrorKind::NotFound(format!("story {}", id))))?
            .into_story()
    }

    async fn list_stories(&self) -> QuillResult<Vec<Story>> {
        let rows: Vec<StoryRow> = self
            .client
            .select(STORIES, &[("order", "created_at.asc".to_string())])
            .await?;
        rows.into_iter().map(StoryRow::into_story).collect()
    }
}
