//! Story cache implementation.

use derive_getters::Getters;
use quill_core::{Story, StoryId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

/// A cached story with its freshness window.
#[derive(Debug, Clone, Getters)]
pub struct CacheEntry {
    story: Story,
    cached_at: Instant,
    ttl: Duration,
    /// Logical clock value of the last read or write
    #[getter(skip)]
    last_used: u64,
}

impl CacheEntry {
    /// Whether the entry outlived its TTL.
    pub fn is_expired(&self) -> bool {
        self.age() > self.ttl
    }

    /// Time since the story was cached.
    pub fn age(&self) -> Duration {
        self.cached_at.elapsed()
    }

    /// Freshness left, or `None` once expired.
    pub fn time_remaining(&self) -> Option<Duration> {
        self.ttl.checked_sub(self.age())
    }
}

/// Configuration for the story cache.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct StoryCacheConfig {
    /// Default TTL for cached entries (seconds)
    #[serde(default = "default_ttl")]
    #[builder(default = "default_ttl()")]
    default_ttl: u64,

    /// Maximum cache size (number of entries)
    #[serde(default = "default_max_size")]
    #[builder(default = "default_max_size()")]
    max_size: usize,

    /// Whether caching is enabled
    #[serde(default = "default_enabled")]
    #[builder(default = "default_enabled()")]
    enabled: bool,
}

fn default_ttl() -> u64 {
    300
}

fn default_max_size() -> usize {
    500
}

fn default_enabled() -> bool {
    true
}

impl Default for StoryCacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: default_ttl(),
            max_size: default_max_size(),
            enabled: default_enabled(),
        }
    }
}

impl StoryCacheConfig {
    /// Creates a new config builder.
    pub fn builder() -> StoryCacheConfigBuilder {
        StoryCacheConfigBuilder::default()
    }
}

/// Cache of stories keyed by id.
///
/// Entries expire after their TTL; when full, the least recently used entry
/// is evicted.
///
/// # Example
///
/// ```
/// use quill_cache::{StoryCache, StoryCacheConfig};
/// use quill_core::Story;
///
/// let mut cache = StoryCache::new(StoryCacheConfig::default());
/// let story = Story::builder().id("S1").title("The Saga").build().unwrap();
///
/// cache.insert(story, None);
///
/// let hit = cache.get(&"S1".into()).map(|entry| entry.story().title().clone());
/// assert_eq!(hit.as_deref(), Some("The Saga"));
/// ```
#[derive(Debug)]
pub struct StoryCache {
    config: StoryCacheConfig,
    stories: HashMap<StoryId, CacheEntry>,
    clock: u64,
}

impl StoryCache {
    /// Create a cache with the given configuration.
    pub fn new(config: StoryCacheConfig) -> Self {
        debug!(
            default_ttl = config.default_ttl,
            max_size = config.max_size,
            enabled = config.enabled,
            "Creating story cache"
        );
        Self {
            config,
            stories: HashMap::new(),
            clock: 0,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &StoryCacheConfig {
        &self.config
    }

    /// Insert a story, replacing any cached copy.
    ///
    /// `ttl_seconds` overrides the configured default.
    #[instrument(
        skip(self, story),
        fields(story_id = %story.id(), ttl_seconds, cached = self.stories.len())
    )]
    pub fn insert(&mut self, story: Story, ttl_seconds: Option<u64>) {
        if !self.config.enabled {
            return;
        }

        let id = story.id().clone();
        if !self.stories.contains_key(&id) {
            while self.stories.len() >= self.config.max_size.max(1) {
                if !self.evict_least_recent() {
                    break;
                }
            }
        }

        let last_used = self.tick();
        let ttl = Duration::from_secs(ttl_seconds.unwrap_or(self.config.default_ttl));
        self.stories.insert(
            id,
            CacheEntry {
                story,
                cached_at: Instant::now(),
                ttl,
                last_used,
            },
        );
    }

    /// A fresh cached story, marking it as recently used.
    ///
    /// Expired entries are dropped on the way. Always `None` while disabled.
    #[instrument(skip(self), fields(story_id = %id))]
    pub fn get(&mut self, id: &StoryId) -> Option<&CacheEntry> {
        if !self.config.enabled {
            return None;
        }

        if self.stories.get(id)?.is_expired() {
            debug!("Cached story expired");
            self.stories.remove(id);
            return None;
        }

        let now = self.tick();
        let entry = self.stories.get_mut(id)?;
        entry.last_used = now;
        debug!(time_remaining = ?entry.time_remaining(), "Story cache hit");
        Some(entry)
    }

    /// Drop one story. Returns whether it was cached.
    pub fn invalidate(&mut self, id: &StoryId) -> bool {
        self.stories.remove(id).is_some()
    }

    /// Drop every expired story and return how many went.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.stories.len();
        self.stories.retain(|_, entry| !entry.is_expired());
        let removed = before - self.stories.len();
        if removed > 0 {
            info!(removed, remaining = self.stories.len(), "Dropped expired stories");
        }
        removed
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        let count = self.stories.len();
        self.stories.clear();
        info!(cleared = count, "Cleared story cache");
    }

    /// Number of cached stories.
    pub fn len(&self) -> usize {
        self.stories.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn evict_least_recent(&mut self) -> bool {
        let oldest = self
            .stories
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(id, _)| id.clone());
        match oldest {
            Some(id) => {
                debug!(story_id = %id, "Evicting least recently used story");
                self.stories.remove(&id);
                true
            }
            None => false,
        }
    }
}

impl Default for StoryCache {
    fn default() -> Self {
        Self::new(StoryCacheConfig::default())
    }
}
