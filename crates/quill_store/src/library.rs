//! JSON library snapshots.
//!
//! A library is the full contents of the story and series stores written to a
//! single JSON file, used by the CLI when no hosted backend is configured.

use crate::{InMemorySeriesStore, InMemoryStoryStore};
use quill_core::{Series, SeriesMembership, Story};
use quill_error::{BackendError, JsonError, QuillResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// Serializable snapshot of every story, series, and membership row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Library {
    /// Story rows
    #[serde(default)]
    pub stories: Vec<Story>,
    /// Series rows
    #[serde(default)]
    pub series: Vec<Series>,
    /// Membership rows
    #[serde(default)]
    pub memberships: Vec<SeriesMembership>,
}

impl Library {
    /// Read a library from a JSON file. A missing file is an empty library.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> QuillResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("Library file not found, starting empty");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            BackendError::new(format!("Failed to read library {}: {}", path.display(), e))
        })?;
        let library: Library = serde_json::from_str(&text).map_err(|e| {
            JsonError::new(format!("Failed to parse library {}: {}", path.display(), e))
        })?;
        debug!(
            stories = library.stories.len(),
            series = library.series.len(),
            "Loaded library"
        );
        Ok(library)
    }

    /// Write the library to a JSON file, replacing any existing content.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> QuillResult<()> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| JsonError::new(format!("Failed to serialize library: {}", e)))?;
        std::fs::write(path, text).map_err(|e| {
            BackendError::new(format!("Failed to write library {}: {}", path.display(), e))
        })?;
        Ok(())
    }

    /// Load the rows into fresh in-memory stores sharing one story table.
    pub fn into_stores(self) -> (InMemoryStoryStore, InMemorySeriesStore) {
        let stories = InMemoryStoryStore::with_stories(self.stories);
        let series = InMemorySeriesStore::with_rows(stories.clone(), self.series, self.memberships);
        (stories, series)
    }

    /// Capture the current contents of in-memory stores.
    pub async fn capture(stories: &InMemoryStoryStore, series: &InMemorySeriesStore) -> Self {
        Self {
            stories: stories.snapshot().await,
            series: series.series_rows().await,
            memberships: series.memberships().await,
        }
    }
}
