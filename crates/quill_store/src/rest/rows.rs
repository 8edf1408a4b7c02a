//! Wire rows for the REST tables and their conversions.

use chrono::{DateTime, Utc};
use quill_core::{
    Character, PlotOutline, Series, SeriesId, SeriesMembership, Story, StoryDraft, StoryId,
    StoryUpdate,
};
use quill_error::{QuillResult, StoreError, StoreErrorKind};
use serde::{Deserialize, Serialize};

/// A row of the `stories` table.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StoryRow {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub story_idea: Option<String>,
    #[serde(default)]
    pub plot_outline: Option<String>,
    #[serde(default)]
    pub characters: Option<String>,
    #[serde(default)]
    pub is_sequel: Option<bool>,
    #[serde(default)]
    pub parent_story_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl StoryRow {
    /// Convert into the domain type, parsing the serialized columns.
    pub fn into_story(self) -> QuillResult<Story> {
        let decode = |field: &str, e: quill_error::QuillError| {
            StoreError::new(StoreErrorKind::Decode(format!(
                "story {} column {}: {}",
                self.id,
                field,
                e.message()
            )))
        };
        let plot_outline = PlotOutline::from_serialized(self.plot_outline.as_deref().unwrap_or(""))
            .map_err(|e| decode("plot_outline", e))?;
        let characters = Character::parse_list(self.characters.as_deref().unwrap_or(""))
            .map_err(|e| decode("characters", e))?;

        let mut builder = Story::builder();
        builder
            .id(self.id.as_str())
            .title(self.title.clone())
            .story_idea(self.story_idea.clone().unwrap_or_default())
            .plot_outline(plot_outline)
            .characters(characters)
            .is_sequel(self.is_sequel.unwrap_or(false));
        if let Some(parent) = &self.parent_story_id {
            builder.parent_story_id(parent.as_str());
        }
        if let Some(created_at) = self.created_at {
            builder.created_at(created_at);
        }
        builder.build().map_err(|e| {
            StoreError::new(StoreErrorKind::Decode(format!("story {}: {}", self.id, e))).into()
        })
    }
}

/// Insert payload for the `stories` table.
#[derive(Debug, Serialize)]
pub(crate) struct NewStoryRow<'a> {
    pub title: &'a str,
    pub story_idea: &'a str,
    pub plot_outline: String,
    pub characters: String,
    pub is_sequel: bool,
    pub parent_story_id: Option<&'a str>,
}

impl<'a> NewStoryRow<'a> {
    pub fn from_draft(draft: &'a StoryDraft) -> QuillResult<Self> {
        Ok(Self {
            title: &draft.title,
            story_idea: &draft.story_idea,
            plot_outline: draft.plot_outline.to_serialized()?,
            characters: Character::serialize_list(&draft.characters)?,
            is_sequel: draft.is_sequel,
            parent_story_id: draft.parent_story_id.as_ref().map(StoryId::as_str),
        })
    }
}

/// Patch payload for the `stories` table. Absent fields are left unchanged.
#[derive(Debug, Default, Serialize)]
pub(crate) struct StoryPatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_idea: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_outline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,
}

impl<'a> StoryPatch<'a> {
    pub fn from_update(update: &'a StoryUpdate) -> QuillResult<Self> {
        Ok(Self {
            title: update.title.as_deref(),
            story_idea: update.story_idea.as_deref(),
            plot_outline: update
                .plot_outline
                .as_ref()
                .map(PlotOutline::to_serialized)
                .transpose()?,
            characters: update
                .characters
                .as_deref()
                .map(Character::serialize_list)
                .transpose()?,
        })
    }
}

/// A row of the `series` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SeriesRow {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<SeriesRow> for Series {
    fn from(row: SeriesRow) -> Self {
        Series {
            id: SeriesId::new(row.id),
            title: row.title,
            description: row.description.unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

/// Insert payload for the `series` table.
#[derive(Debug, Serialize)]
pub(crate) struct NewSeriesRow<'a> {
    pub title: &'a str,
    pub description: &'a str,
}

/// Patch payload for the `series` table.
#[derive(Debug, Serialize)]
pub(crate) struct SeriesPatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

/// A row of the `series_stories` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct MembershipRow {
    pub series_id: String,
    pub story_id: String,
    pub position: u32,
}

impl From<MembershipRow> for SeriesMembership {
    fn from(row: MembershipRow) -> Self {
        SeriesMembership {
            series_id: SeriesId::new(row.series_id),
            story_id: StoryId::new(row.story_id),
            position: row.position,
        }
    }
}

/// Patch payload for a membership position.
#[derive(Debug, Serialize)]
pub(crate) struct PositionPatch {
    pub position: u32,
}
