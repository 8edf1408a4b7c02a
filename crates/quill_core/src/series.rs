//! Series and their ordered membership links.

use crate::{SeriesId, Story, StoryId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named grouping of stories.
///
/// A series references its stories through [`SeriesMembership`] links only;
/// deleting a series never deletes a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    /// Store-assigned identity
    pub id: SeriesId,
    /// Display title
    pub title: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Link placing a story in a series at a zero-based position.
///
/// A story appears at most once per series. Positions order the display
/// ("Part 1", "Part 2", ...) and need not be contiguous.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesMembership {
    /// Series the story belongs to
    pub series_id: SeriesId,
    /// Member story
    pub story_id: StoryId,
    /// Zero-based ordering position
    pub position: u32,
}

/// Partial update to a series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesUpdate {
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
}

impl SeriesUpdate {
    /// An update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A member story together with its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesEntry {
    /// Position within the series
    pub position: u32,
    /// The member story
    pub story: Story,
}

/// A series with its member stories ordered by position.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use quill_core::{Series, SeriesEntry, SeriesWithStories, Story};
///
/// let series = Series {
///     id: "X".into(),
///     title: "Saga Series".to_string(),
///     description: String::new(),
///     created_at: Utc::now(),
/// };
/// let root = Story::builder().id("S1").title("Saga").build().unwrap();
/// let view = SeriesWithStories::new(series, vec![SeriesEntry { position: 0, story: root }]);
///
/// assert_eq!(view.next_position(), Some(1));
/// assert_eq!(view.part_label(0), "Part 1");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesWithStories {
    /// The series row
    pub series: Series,
    /// Members sorted by ascending position
    pub entries: Vec<SeriesEntry>,
}

impl SeriesWithStories {
    /// Build the view, sorting entries by position.
    pub fn new(series: Series, mut entries: Vec<SeriesEntry>) -> Self {
        entries.sort_by_key(|entry| entry.position);
        Self { series, entries }
    }

    /// Member stories in display order.
    pub fn stories(&self) -> impl Iterator<Item = &Story> {
        self.entries.iter().map(|entry| &entry.story)
    }

    /// Whether the given story is a member.
    pub fn contains(&self, story_id: &StoryId) -> bool {
        self.entries.iter().any(|entry| entry.story.id() == story_id)
    }

    /// The next free position: one past the highest position, or 0 when empty.
    ///
    /// `None` when a member already sits at `u32::MAX`.
    pub fn next_position(&self) -> Option<u32> {
        next_free_position(self.entries.iter().map(|entry| entry.position))
    }

    /// Display label for the entry at `index` in display order.
    pub fn part_label(&self, index: usize) -> String {
        format!("Part {}", index + 1)
    }
}

/// One past the highest of `positions`, or 0 when there are none.
///
/// Returns `None` when the highest position is `u32::MAX`.
///
/// ```
/// use quill_core::next_free_position;
///
/// assert_eq!(next_free_position([]), Some(0));
/// assert_eq!(next_free_position([0, 7, 3]), Some(8));
/// assert_eq!(next_free_position([u32::MAX]), None);
/// ```
pub fn next_free_position(positions: impl IntoIterator<Item = u32>) -> Option<u32> {
    match positions.into_iter().max() {
        Some(max) => max.checked_add(1),
        None => Some(0),
    }
}
