//! Store wrappers that count writes and inject failures.

use async_trait::async_trait;
use quill_core::{
    Series, SeriesId, SeriesMembership, SeriesUpdate, SeriesWithStories, Story, StoryDraft,
    StoryId, StoryUpdate,
};
use quill_error::{QuillResult, StoreError, StoreErrorKind};
use quill_interface::{CancellationToken, SeriesStore, StoryStore};
use quill_store::{InMemorySeriesStore, InMemoryStoryStore};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

fn unavailable(what: &str) -> quill_error::QuillError {
    StoreError::new(StoreErrorKind::Unavailable(what.to_string())).into()
}

/// Story store that counts saves and can fail chosen reads or every save.
#[derive(Debug, Default)]
pub struct RecordingStoryStore {
    inner: InMemoryStoryStore,
    failing_reads: HashSet<StoryId>,
    fail_saves: bool,
    saves: AtomicUsize,
    reads: AtomicUsize,
}

impl RecordingStoryStore {
    /// Wrap an in-memory store.
    pub fn new(inner: InMemoryStoryStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    /// Make `get_by_id` fail for this id.
    #[allow(dead_code)]
    pub fn failing_read(mut self, id: &str) -> Self {
        self.failing_reads.insert(StoryId::from(id));
        self
    }

    /// Make every save fail.
    #[allow(dead_code)]
    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Number of reads issued.
    #[allow(dead_code)]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StoryStore for RecordingStoryStore {
    async fn get_by_id(&self, id: &StoryId) -> QuillResult<Option<Story>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.failing_reads.contains(id) {
            return Err(unavailable("story read"));
        }
        self.inner.get_by_id(id).await
    }

    async fn save(&self, draft: &StoryDraft) -> QuillResult<StoryId> {
        if self.fail_saves {
            return Err(unavailable("story save"));
        }
        let id = self.inner.save(draft).await?;
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(id)
    }

    async fn update(&self, id: &StoryId, update: &StoryUpdate) -> QuillResult<Story> {
        self.inner.update(id, update).await
    }

    async fn list_stories(&self) -> QuillResult<Vec<Story>> {
        self.inner.list_stories().await
    }
}

/// Series store that counts writes and can fail lookups or attaches.
#[derive(Debug)]
pub struct RecordingSeriesStore {
    inner: InMemorySeriesStore,
    fail_lookup: bool,
    fail_add_after: Option<usize>,
    cancel_after_adds: Option<(usize, CancellationToken)>,
    creates: AtomicUsize,
    adds: AtomicUsize,
}

impl RecordingSeriesStore {
    /// Wrap an in-memory store.
    pub fn new(inner: InMemorySeriesStore) -> Self {
        Self {
            inner,
            fail_lookup: false,
            fail_add_after: None,
            cancel_after_adds: None,
            creates: AtomicUsize::new(0),
            adds: AtomicUsize::new(0),
        }
    }

    /// Make `get_series_for_story` fail.
    #[allow(dead_code)]
    pub fn failing_lookup(mut self) -> Self {
        self.fail_lookup = true;
        self
    }

    /// Let `count` attaches succeed, then fail the rest.
    #[allow(dead_code)]
    pub fn failing_add_after(mut self, count: usize) -> Self {
        self.fail_add_after = Some(count);
        self
    }

    /// Cancel `token` once `count` attaches have succeeded.
    #[allow(dead_code)]
    pub fn cancel_after_adds(mut self, count: usize, token: CancellationToken) -> Self {
        self.cancel_after_adds = Some((count, token));
        self
    }

    /// Number of series created.
    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    /// Number of memberships added.
    pub fn adds(&self) -> usize {
        self.adds.load(Ordering::SeqCst)
    }

    /// Total writes issued.
    pub fn writes(&self) -> usize {
        self.creates() + self.adds()
    }

    /// The wrapped store.
    pub fn inner(&self) -> &InMemorySeriesStore {
        &self.inner
    }
}

#[async_trait]
impl SeriesStore for RecordingSeriesStore {
    async fn get_series_for_story(&self, story_id: &StoryId) -> QuillResult<Option<Series>> {
        if self.fail_lookup {
            return Err(unavailable("series lookup"));
        }
        self.inner.get_series_for_story(story_id).await
    }

    async fn create_series(&self, title: &str, description: &str) -> QuillResult<Series> {
        let series = self.inner.create_series(title, description).await?;
        self.creates.fetch_add(1, Ordering::SeqCst);
        Ok(series)
    }

    async fn add_story_to_series(
        &self,
        series_id: &SeriesId,
        story_id: &StoryId,
        position: Option<u32>,
    ) -> QuillResult<SeriesMembership> {
        if self
            .fail_add_after
            .is_some_and(|limit| self.adds() >= limit)
        {
            return Err(unavailable("series attach"));
        }
        let membership = self
            .inner
            .add_story_to_series(series_id, story_id, position)
            .await?;
        let adds = self.adds.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some((count, token)) = &self.cancel_after_adds
            && adds == *count
        {
            token.cancel();
        }
        Ok(membership)
    }

    async fn get_series_with_stories(&self, series_id: &SeriesId) -> QuillResult<SeriesWithStories> {
        self.inner.get_series_with_stories(series_id).await
    }

    async fn list_series(&self) -> QuillResult<Vec<Series>> {
        self.inner.list_series().await
    }

    async fn update_series(&self, series_id: &SeriesId, update: &SeriesUpdate) -> QuillResult<Series> {
        self.inner.update_series(series_id, update).await
    }

    async fn delete_series(&self, series_id: &SeriesId) -> QuillResult<()> {
        self.inner.delete_series(series_id).await
    }

    async fn remove_story_from_series(&self, series_id: &SeriesId, story_id: &StoryId) -> QuillResult<()> {
        self.inner.remove_story_from_series(series_id, story_id).await
    }

    async fn reorder_series(&self, series_id: &SeriesId, ordered: &[StoryId]) -> QuillResult<()> {
        self.inner.reorder_series(series_id, ordered).await
    }
}
