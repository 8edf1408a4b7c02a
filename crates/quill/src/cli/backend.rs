//! Store selection for CLI commands.

use quill::{
    CachedStoryStore, InMemorySeriesStore, InMemoryStoryStore, Library, QuillConfig, QuillResult,
    RestClient, RestSeriesStore, RestStoryStore, SeriesStore, StoryStore,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

struct LocalLibrary {
    path: PathBuf,
    stories: InMemoryStoryStore,
    series: InMemorySeriesStore,
}

/// The story and series stores a command runs against.
pub struct Backend {
    stories: Arc<dyn StoryStore>,
    series: Arc<dyn SeriesStore>,
    local: Option<LocalLibrary>,
}

impl Backend {
    /// Open the local library at `library`, or the hosted backend from config.
    pub fn open(config: &QuillConfig, library: Option<&Path>) -> QuillResult<Self> {
        match library {
            Some(path) => Self::open_library(path),
            None => Self::open_rest(config),
        }
    }

    fn open_library(path: &Path) -> QuillResult<Self> {
        let (stories, series) = Library::load(path)?.into_stores();
        info!(path = %path.display(), "Using local library");
        Ok(Self {
            stories: Arc::new(stories.clone()),
            series: Arc::new(series.clone()),
            local: Some(LocalLibrary {
                path: path.to_path_buf(),
                stories,
                series,
            }),
        })
    }

    fn open_rest(config: &QuillConfig) -> QuillResult<Self> {
        let client = RestClient::new(config.store().rest_config()?)?;
        let story_store = RestStoryStore::new(client.clone());
        let stories: Arc<dyn StoryStore> = if *config.cache().enabled() {
            debug!(max_size = *config.cache().max_size(), "Caching story reads");
            Arc::new(CachedStoryStore::new(story_store, config.cache().clone()))
        } else {
            Arc::new(story_store)
        };
        info!(base_url = %config.store().base_url(), "Using hosted backend");
        Ok(Self {
            stories,
            series: Arc::new(RestSeriesStore::new(client)),
            local: None,
        })
    }

    /// Shared story store.
    pub fn stories(&self) -> Arc<dyn StoryStore> {
        self.stories.clone()
    }

    /// Shared series store.
    pub fn series(&self) -> Arc<dyn SeriesStore> {
        self.series.clone()
    }

    /// Write a local library back to disk. Hosted stores persist on their own.
    pub async fn persist(&self) -> QuillResult<()> {
        if let Some(local) = &self.local {
            Library::capture(&local.stories, &local.series)
                .await
                .save(&local.path)?;
            debug!(path = %local.path.display(), "Library written");
        }
        Ok(())
    }
}
