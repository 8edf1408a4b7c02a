//! Stories and the payloads used to create or update them.

use crate::{Character, PlotOutline, StoryId};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// A user's written work, possibly a sequel to another story.
///
/// `parent_story_id` is a weak reference: the parent may have been deleted
/// since this story was created, and readers must tolerate that.
///
/// # Examples
///
/// ```
/// use quill_core::{Story, StoryId};
///
/// let story = Story::builder()
///     .id("S2")
///     .title("The Second Voyage")
///     .is_sequel(true)
///     .parent_story_id("S1")
///     .build()
///     .unwrap();
///
/// assert!(story.is_sequel_or_child());
/// assert_eq!(story.parent_story_id().as_ref(), Some(&StoryId::from("S1")));
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters, derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(setter(into))]
pub struct Story {
    /// Store-assigned identity
    id: StoryId,
    /// Display title
    title: String,
    /// Free-text premise
    #[builder(default)]
    #[serde(default)]
    story_idea: String,
    /// Ordered scene/beat descriptors
    #[builder(default)]
    #[serde(default)]
    plot_outline: PlotOutline,
    /// Character list
    #[builder(default)]
    #[serde(default)]
    characters: Vec<Character>,
    /// Whether the story was created as a sequel
    #[builder(default)]
    #[serde(default)]
    is_sequel: bool,
    /// The story this one continues, if any
    #[builder(default, setter(into, strip_option))]
    #[serde(default)]
    parent_story_id: Option<StoryId>,
    /// Creation time as recorded by the store
    #[builder(default, setter(into, strip_option))]
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl Story {
    /// Creates a new story builder.
    pub fn builder() -> StoryBuilder {
        StoryBuilder::default()
    }

    /// Materialise a persisted story from a draft and the identity the store assigned.
    pub fn from_draft(id: StoryId, draft: StoryDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            story_idea: draft.story_idea,
            plot_outline: draft.plot_outline,
            characters: draft.characters,
            is_sequel: draft.is_sequel,
            parent_story_id: draft.parent_story_id,
            created_at: Some(created_at),
        }
    }

    /// Whether this story carries either sequel marker.
    ///
    /// Stories with either marker are part of a chain that should be grouped
    /// into a series when extended.
    pub fn is_sequel_or_child(&self) -> bool {
        self.is_sequel || self.parent_story_id.is_some()
    }

    /// Apply a partial update.
    pub fn apply(self, update: StoryUpdate) -> Self {
        let StoryUpdate {
            title,
            story_idea,
            plot_outline,
            characters,
        } = update;
        let mut story = self;
        if let Some(title) = title {
            story = story.with_title(title);
        }
        if let Some(idea) = story_idea {
            story = story.with_story_idea(idea);
        }
        if let Some(outline) = plot_outline {
            story = story.with_plot_outline(outline);
        }
        if let Some(characters) = characters {
            story = story.with_characters(characters);
        }
        story
    }
}

/// The fields of a story that does not exist yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryDraft {
    /// Display title
    pub title: String,
    /// Free-text premise
    pub story_idea: String,
    /// Ordered scene/beat descriptors
    pub plot_outline: PlotOutline,
    /// Character list
    pub characters: Vec<Character>,
    /// Whether the story is a sequel
    pub is_sequel: bool,
    /// The story this one continues
    pub parent_story_id: Option<StoryId>,
}

impl StoryDraft {
    /// A draft for a sequel continuing `parent`.
    ///
    /// Always sets `is_sequel` and links `parent_story_id` to the parent's id.
    pub fn sequel_of(
        parent: &Story,
        title: impl Into<String>,
        story_idea: impl Into<String>,
        plot_outline: PlotOutline,
        characters: Vec<Character>,
    ) -> Self {
        Self {
            title: title.into(),
            story_idea: story_idea.into(),
            plot_outline,
            characters,
            is_sequel: true,
            parent_story_id: Some(parent.id.clone()),
        }
    }
}

/// Partial update to an existing story.
///
/// All fields are optional; `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryUpdate {
    /// New title
    pub title: Option<String>,
    /// New premise
    pub story_idea: Option<String>,
    /// New outline
    pub plot_outline: Option<PlotOutline>,
    /// New character list
    pub characters: Option<Vec<Character>>,
}

impl StoryUpdate {
    /// An update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the premise.
    pub fn with_story_idea<S: Into<String>>(mut self, idea: S) -> Self {
        self.story_idea = Some(idea.into());
        self
    }

    /// Set the outline.
    pub fn with_plot_outline(mut self, outline: PlotOutline) -> Self {
        self.plot_outline = Some(outline);
        self
    }

    /// Set the character list.
    pub fn with_characters(mut self, characters: Vec<Character>) -> Self {
        self.characters = Some(characters);
        self
    }

    /// Whether applying this update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.story_idea.is_none()
            && self.plot_outline.is_none()
            && self.characters.is_none()
    }
}
