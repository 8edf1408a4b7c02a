//! In-memory implementations of the story and series stores.
//!
//! Both stores keep their rows behind an `RwLock` and are cheap to clone;
//! clones share the same rows. All data is lost when the last clone is dropped.

use async_trait::async_trait;
use chrono::Utc;
use quill_core::{
    next_free_position, Series, SeriesEntry, SeriesId, SeriesMembership, SeriesUpdate,
    SeriesWithStories, Story, StoryDraft, StoryId, StoryUpdate,
};
use quill_error::{QuillResult, StoreError, StoreErrorKind};
use quill_interface::{SeriesStore, StoryStore};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

#[derive(Debug, Default)]
struct StoryTable {
    rows: HashMap<StoryId, Story>,
    /// Insertion order, for stable listing
    order: Vec<StoryId>,
}

impl StoryTable {
    fn insert(&mut self, story: Story) {
        let id = story.id().clone();
        if self.rows.insert(id.clone(), story).is_none() {
            self.order.push(id);
        }
    }
}

/// In-memory story store.
///
/// # Example
/// ```no_run
/// use quill_store::InMemoryStoryStore;
///
/// #[tokio::main]
/// async fn main() {
///     let store = InMemoryStoryStore::new();
///     assert!(store.is_empty().await);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStoryStore {
    table: Arc<RwLock<StoryTable>>,
}

impl InMemoryStoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with existing stories, keeping their ids.
    pub fn with_stories(stories: impl IntoIterator<Item = Story>) -> Self {
        let mut table = StoryTable::default();
        for story in stories {
            table.insert(story);
        }
        Self {
            table: Arc::new(RwLock::new(table)),
        }
    }

    /// Insert or replace a story, keeping its id.
    pub async fn insert(&self, story: Story) {
        self.table.write().await.insert(story);
    }

    /// Number of stored stories.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    /// Whether the store holds no stories.
    pub async fn is_empty(&self) -> bool {
        self.table.read().await.rows.is_empty()
    }

    /// All stories in insertion order.
    pub async fn snapshot(&self) -> Vec<Story> {
        let table = self.table.read().await;
        table
            .order
            .iter()
            .filter_map(|id| table.rows.get(id).cloned())
            .collect()
    }
}

#[async_trait]
impl StoryStore for InMemoryStoryStore {
    #[instrument(skip(self), fields(story_id = %id))]
    async fn get_by_id(&self, id: &StoryId) -> QuillResult<Option<Story>> {
        Ok(self.table.read().await.rows.get(id).cloned())
    }

    #[instrument(skip(self, draft), fields(title = %draft.title, is_sequel = draft.is_sequel))]
    async fn save(&self, draft: &StoryDraft) -> QuillResult<StoryId> {
        let id = StoryId::new(uuid::Uuid::new_v4().to_string());
        let story = Story::from_draft(id.clone(), draft.clone(), Utc::now());
        self.table.write().await.insert(story);
        debug!(story_id = %id, "Saved story");
        Ok(id)
    }

    #[instrument(skip(self, update), fields(story_id = %id))]
    async fn update(&self, id: &StoryId, update: &StoryUpdate) -> QuillResult<Story> {
        let mut table = self.table.write().await;
        let current = table.rows.remove(id).ok_or_else(|| {
            StoreError::new(StoreErrorKind::NotFound(format!("story {}", id)))
        })?;
        let updated = current.apply(update.clone());
        table.rows.insert(id.clone(), updated.clone());
        Ok(updated)
    }

    async fn list_stories(&self) -> QuillResult<Vec<Story>> {
        Ok(self.snapshot().await)
    }
}

#[derive(Debug, Default)]
struct SeriesTable {
    series: Vec<Series>,
    memberships: Vec<SeriesMembership>,
}

impl SeriesTable {
    fn require_series(&self, series_id: &SeriesId) -> Result<&Series, StoreError> {
        self.series
            .iter()
            .find(|s| &s.id == series_id)
            .ok_or_else(|| StoreError::new(StoreErrorKind::NotFound(format!("series {}", series_id))))
    }

    fn members_of(&self, series_id: &SeriesId) -> impl Iterator<Item = &SeriesMembership> {
        self.memberships
            .iter()
            .filter(move |m| &m.series_id == series_id)
    }
}

/// In-memory series store.
///
/// Resolves member stories through a shared [`InMemoryStoryStore`] handle.
/// Enforces the membership uniqueness invariant: a story appears at most
/// once per series.
#[derive(Debug, Clone)]
pub struct InMemorySeriesStore {
    table: Arc<RwLock<SeriesTable>>,
    stories: InMemoryStoryStore,
}

impl InMemorySeriesStore {
    /// Create an empty series store reading stories from `stories`.
    pub fn new(stories: InMemoryStoryStore) -> Self {
        Self {
            table: Arc::new(RwLock::new(SeriesTable::default())),
            stories,
        }
    }

    /// Create a store seeded with existing rows.
    pub fn with_rows(
        stories: InMemoryStoryStore,
        series: Vec<Series>,
        memberships: Vec<SeriesMembership>,
    ) -> Self {
        Self {
            table: Arc::new(RwLock::new(SeriesTable {
                series,
                memberships,
            })),
            stories,
        }
    }

    /// Number of series rows.
    pub async fn series_count(&self) -> usize {
        self.table.read().await.series.len()
    }

    /// All membership rows in insertion order.
    pub async fn memberships(&self) -> Vec<SeriesMembership> {
        self.table.read().await.memberships.clone()
    }

    /// All series rows in insertion order.
    pub async fn series_rows(&self) -> Vec<Series> {
        self.table.read().await.series.clone()
    }
}

#[async_trait]
impl SeriesStore for InMemorySeriesStore {
    #[instrument(skip(self), fields(story_id = %story_id))]
    async fn get_series_for_story(&self, story_id: &StoryId) -> QuillResult<Option<Series>> {
        let table = self.table.read().await;
        let found = table
            .series
            .iter()
            .find(|series| {
                table
                    .members_of(&series.id)
                    .any(|m| &m.story_id == story_id)
            })
            .cloned();
        Ok(found)
    }

    #[instrument(skip(self, description), fields(title = %title))]
    async fn create_series(&self, title: &str, description: &str) -> QuillResult<Series> {
        let series = Series {
            id: SeriesId::new(uuid::Uuid::new_v4().to_string()),
            title: title.to_string(),
            description: description.to_string(),
            created_at: Utc::now(),
        };
        self.table.write().await.series.push(series.clone());
        debug!(series_id = %series.id, "Created series");
        Ok(series)
    }

    #[instrument(skip(self), fields(series_id = %series_id, story_id = %story_id, ?position))]
    async fn add_story_to_series(
        &self,
        series_id: &SeriesId,
        story_id: &StoryId,
        position: Option<u32>,
    ) -> QuillResult<SeriesMembership> {
        let mut table = self.table.write().await;
        table.require_series(series_id)?;

        if table.members_of(series_id).any(|m| &m.story_id == story_id) {
            return Err(StoreError::new(StoreErrorKind::Conflict(format!(
                "story {} is already in series {}",
                story_id, series_id
            )))
            .into());
        }

        let position = match position {
            Some(position) => position,
            None => next_free_position(table.members_of(series_id).map(|m| m.position))
                .ok_or_else(|| {
                    StoreError::new(StoreErrorKind::Conflict(format!(
                        "series {} has no position free after {}",
                        series_id,
                        u32::MAX
                    )))
                })?,
        };

        let membership = SeriesMembership {
            series_id: series_id.clone(),
            story_id: story_id.clone(),
            position,
        };
        table.memberships.push(membership.clone());
        Ok(membership)
    }

    #[instrument(skip(self), fields(series_id = %series_id))]
    async fn get_series_with_stories(
        &self,
        series_id: &SeriesId,
    ) -> QuillResult<SeriesWithStories> {
        let (series, members) = {
            let table = self.table.read().await;
            let series = table.require_series(series_id)?.clone();
            let members: Vec<SeriesMembership> = table.members_of(series_id).cloned().collect();
            (series, members)
        };

        let mut entries = Vec::with_capacity(members.len());
        for member in members {
            match self.stories.get_by_id(&member.story_id).await? {
                Some(story) => entries.push(SeriesEntry {
                    position: member.position,
                    story,
                }),
                None => warn!(story_id = %member.story_id, "Series member has no story row"),
            }
        }
        Ok(SeriesWithStories::new(series, entries))
    }

    async fn list_series(&self) -> QuillResult<Vec<Series>> {
        Ok(self.series_rows().await)
    }

    #[instrument(skip(self, update), fields(series_id = %series_id))]
    async fn update_series(
        &self,
        series_id: &SeriesId,
        update: &SeriesUpdate,
    ) -> QuillResult<Series> {
        let mut table = self.table.write().await;
        let series = table
            .series
            .iter_mut()
            .find(|s| &s.id == series_id)
            .ok_or_else(|| StoreError::new(StoreErrorKind::NotFound(format!("series {}", series_id))))?;
        if let Some(title) = &update.title {
            series.title = title.clone();
        }
        if let Some(description) = &update.description {
            series.description = description.clone();
        }
        Ok(series.clone())
    }

    #[instrument(skip(self), fields(series_id = %series_id))]
    async fn delete_series(&self, series_id: &SeriesId) -> QuillResult<()> {
        let mut table = self.table.write().await;
        table.require_series(series_id)?;
        table.series.retain(|s| &s.id != series_id);
        table.memberships.retain(|m| &m.series_id != series_id);
        debug!("Deleted series and its memberships");
        Ok(())
    }

    #[instrument(skip(self), fields(series_id = %series_id, story_id = %story_id))]
    async fn remove_story_from_series(
        &self,
        series_id: &SeriesId,
        story_id: &StoryId,
    ) -> QuillResult<()> {
        self.table
            .write()
            .await
            .memberships
            .retain(|m| !(&m.series_id == series_id && &m.story_id == story_id));
        Ok(())
    }

    #[instrument(skip(self, ordered), fields(series_id = %series_id, count = ordered.len()))]
    async fn reorder_series(&self, series_id: &SeriesId, ordered: &[StoryId]) -> QuillResult<()> {
        let mut table = self.table.write().await;
        table.require_series(series_id)?;

        if let Some(missing) = ordered
            .iter()
            .find(|id| !table.members_of(series_id).any(|m| &m.story_id == *id))
        {
            return Err(StoreError::new(StoreErrorKind::NotFound(format!(
                "story {} is not in series {}",
                missing, series_id
            )))
            .into());
        }

        // Members missing from `ordered` keep their relative order after the listed ones.
        let mut unlisted: Vec<(u32, StoryId)> = table
            .members_of(series_id)
            .filter(|m| !ordered.contains(&m.story_id))
            .map(|m| (m.position, m.story_id.clone()))
            .collect();
        unlisted.sort();

        for membership in table
            .memberships
            .iter_mut()
            .filter(|m| &m.series_id == series_id)
        {
            let listed = ordered.iter().position(|id| id == &membership.story_id);
            let index = listed.or_else(|| {
                unlisted
                    .iter()
                    .position(|(_, id)| id == &membership.story_id)
                    .map(|i| ordered.len() + i)
            });
            if let Some(index) = index {
                membership.position = index as u32;
            }
        }
        Ok(())
    }
}
