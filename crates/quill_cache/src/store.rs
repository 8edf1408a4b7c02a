//! Caching decorator over a story store.

use crate::{StoryCache, StoryCacheConfig};
use async_trait::async_trait;
use quill_core::{Story, StoryDraft, StoryId, StoryUpdate};
use quill_error::QuillResult;
use quill_interface::StoryStore;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

/// A [`StoryStore`] that serves `get_by_id` from a [`StoryCache`].
///
/// Misses fall through to the inner store and populate the cache. `update`
/// refreshes the cached copy and `save` primes it when the inner store can
/// return the saved row. Priming is best effort: once the inner save has
/// committed, a failed read-back is logged and the new id is still returned.
/// Listing always goes to the inner store.
#[derive(Debug)]
pub struct CachedStoryStore<S> {
    inner: S,
    cache: Mutex<StoryCache>,
}

impl<S: StoryStore> CachedStoryStore<S> {
    /// Wrap `inner` with a cache built from `config`.
    pub fn new(inner: S, config: StoryCacheConfig) -> Self {
        Self {
            inner,
            cache: Mutex::new(StoryCache::new(config)),
        }
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of cached stories.
    pub async fn cached(&self) -> usize {
        self.cache.lock().await.len()
    }

    /// Drop every cached story.
    pub async fn clear(&self) {
        self.cache.lock().await.clear();
    }
}

#[async_trait]
impl<S: StoryStore> StoryStore for CachedStoryStore<S> {
    #[instrument(skip(self), fields(story_id = %id))]
    async fn get_by_id(&self, id: &StoryId) -> QuillResult<Option<Story>> {
        if let Some(entry) = self.cache.lock().await.get(id) {
            return Ok(Some(entry.story().clone()));
        }

        let story = self.inner.get_by_id(id).await?;
        if let Some(story) = &story {
            debug!("Cache miss, populating");
            self.cache.lock().await.insert(story.clone(), None);
        }
        Ok(story)
    }

    #[instrument(skip(self, draft))]
    async fn save(&self, draft: &StoryDraft) -> QuillResult<StoryId> {
        let id = self.inner.save(draft).await?;
        match self.inner.get_by_id(&id).await {
            Ok(Some(story)) => self.cache.lock().await.insert(story, None),
            Ok(None) => warn!(story_id = %id, "Saved story not readable, cache not primed"),
            Err(e) => warn!(story_id = %id, error = %e, "Failed to prime cache after save"),
        }
        Ok(id)
    }

    #[instrument(skip(self, update), fields(story_id = %id))]
    async fn update(&self, id: &StoryId, update: &StoryUpdate) -> QuillResult<Story> {
        let result = self.inner.update(id, update).await;
        let mut cache = self.cache.lock().await;
        cache.invalidate(id);
        let story = result?;
        cache.insert(story.clone(), None);
        Ok(story)
    }

    async fn list_stories(&self) -> QuillResult<Vec<Story>> {
        self.inner.list_stories().await
    }
}
