//! Series membership resolution for sequel chains.

use quill_core::{SeriesId, Story, StoryId};
use quill_error::QuillResult;
use quill_interface::{CancellationToken, SeriesStore, StoryStore};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Ancestor hops followed before the walk gives up and treats the last
/// fetched story as the root.
pub const DEFAULT_MAX_ANCESTOR_DEPTH: usize = 64;

const STEP: &str = "Linking series";

/// Which series a sequel should join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesResolution {
    /// The original story already belongs to this series
    Existing(SeriesId),
    /// A series was created for the chain and seeded with its root
    Created(SeriesId),
    /// The original is a standalone story; the sequel joins no series
    None,
}

impl SeriesResolution {
    /// The series id, if the sequel joins one.
    pub fn series_id(&self) -> Option<&SeriesId> {
        match self {
            SeriesResolution::Existing(id) | SeriesResolution::Created(id) => Some(id),
            SeriesResolution::None => None,
        }
    }
}

/// Decides which series a sequel joins and makes sure the chain's root (and
/// the story being continued) are members of it.
///
/// Lookup failures degrade gracefully: a failed series lookup counts as
/// "no series", and a broken ancestor link ends the walk with the last
/// fetched story as root. Write failures propagate.
#[derive(Clone)]
pub struct SeriesMembershipManager {
    stories: Arc<dyn StoryStore>,
    series: Arc<dyn SeriesStore>,
    max_ancestor_depth: usize,
}

impl std::fmt::Debug for SeriesMembershipManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeriesMembershipManager")
            .field("max_ancestor_depth", &self.max_ancestor_depth)
            .finish_non_exhaustive()
    }
}

impl SeriesMembershipManager {
    /// Create a manager over the given stores.
    pub fn new(stories: Arc<dyn StoryStore>, series: Arc<dyn SeriesStore>) -> Self {
        Self {
            stories,
            series,
            max_ancestor_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
        }
    }

    /// Limit how many parent links the ancestor walk follows.
    pub fn with_max_ancestor_depth(mut self, depth: usize) -> Self {
        self.max_ancestor_depth = depth;
        self
    }

    /// The configured ancestor walk limit.
    pub fn max_ancestor_depth(&self) -> usize {
        self.max_ancestor_depth
    }

    /// Resolve the series a sequel of `original` should join.
    ///
    /// 1. If `original` is already in a series, reuse it and write nothing.
    /// 2. If `original` is a sequel or has a parent, walk to the chain's root,
    ///    create `"<root title> Series"`, attach the root at position 0 and,
    ///    when it is not the root, `original` at position 1.
    /// 3. Otherwise the sequel joins no series.
    ///
    /// The token is checked before every store call.
    ///
    /// # Errors
    ///
    /// Returns `SequelErrorKind::Cancelled` when the token fires, and any
    /// store error from creating the series or attaching its members.
    #[instrument(skip(self, original, cancel), fields(story_id = %original.id()))]
    pub async fn resolve(
        &self,
        original: &Story,
        cancel: &CancellationToken,
    ) -> QuillResult<SeriesResolution> {
        cancel.check(STEP)?;
        match self.series.get_series_for_story(original.id()).await {
            Ok(Some(series)) => {
                debug!(series_id = %series.id, "Reusing existing series");
                return Ok(SeriesResolution::Existing(series.id));
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Series lookup failed, treating story as unlinked"),
        }

        if !original.is_sequel_or_child() {
            debug!("Standalone story, no series needed");
            return Ok(SeriesResolution::None);
        }

        let root = self.find_root(original, cancel).await?;

        cancel.check(STEP)?;
        let series = self
            .series
            .create_series(
                &format!("{} Series", root.title()),
                &format!("Series containing \"{}\" and its sequels", root.title()),
            )
            .await?;
        info!(series_id = %series.id, root_id = %root.id(), "Created series for sequel chain");

        cancel.check(STEP)?;
        self.series
            .add_story_to_series(&series.id, root.id(), Some(0))
            .await?;

        if root.id() != original.id() {
            cancel.check(STEP)?;
            self.series
                .add_story_to_series(&series.id, original.id(), Some(1))
                .await?;
        }

        Ok(SeriesResolution::Created(series.id))
    }

    /// Walk `parent_story_id` links back from `original` to the chain's root.
    ///
    /// Stops early, returning the last fetched story, when a lookup fails or
    /// finds nothing, when a link loops back, or after `max_ancestor_depth`
    /// hops.
    ///
    /// # Errors
    ///
    /// Only cancellation is reported; lookup problems end the walk instead.
    #[instrument(skip(self, original, cancel), fields(story_id = %original.id()))]
    pub async fn find_root(
        &self,
        original: &Story,
        cancel: &CancellationToken,
    ) -> QuillResult<Story> {
        let mut current = original.clone();
        let mut visited: HashSet<StoryId> = HashSet::from([current.id().clone()]);
        let mut depth = 0;

        while let Some(parent_id) = current.parent_story_id().clone() {
            if visited.contains(&parent_id) {
                warn!(parent_id = %parent_id, "Ancestor chain loops, stopping walk");
                break;
            }
            if depth >= self.max_ancestor_depth {
                warn!(depth, "Ancestor chain too deep, stopping walk");
                break;
            }

            cancel.check(STEP)?;
            match self.stories.get_by_id(&parent_id).await {
                Ok(Some(parent)) => {
                    visited.insert(parent_id);
                    current = parent;
                    depth += 1;
                }
                Ok(None) => {
                    warn!(parent_id = %parent_id, "Ancestor missing, treating current story as root");
                    break;
                }
                Err(e) => {
                    warn!(parent_id = %parent_id, error = %e, "Ancestor lookup failed, treating current story as root");
                    break;
                }
            }
        }

        debug!(root_id = %current.id(), depth, "Resolved chain root");
        Ok(current)
    }
}
