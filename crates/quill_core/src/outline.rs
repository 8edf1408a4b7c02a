//! Structured plot outlines.

use quill_error::{JsonError, QuillResult};
use serde::{Deserialize, Serialize};

/// A single scene or beat in a plot outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineBeat {
    /// Short name of the beat
    #[serde(alias = "name", alias = "scene")]
    pub title: String,
    /// What happens in the beat
    #[serde(default, alias = "summary")]
    pub description: String,
}

impl OutlineBeat {
    /// Create a beat from its title and description.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Ordered sequence of beats describing a story's plot.
///
/// Persisted as serialized JSON text by remote stores.
///
/// # Examples
///
/// ```
/// use quill_core::{OutlineBeat, PlotOutline};
///
/// let outline = PlotOutline::new(vec![OutlineBeat::new("Arrival", "The heir returns.")]);
/// let text = outline.to_serialized().unwrap();
/// assert_eq!(PlotOutline::from_serialized(&text).unwrap(), outline);
///
/// // Stores may hold an empty column for stories without an outline.
/// assert!(PlotOutline::from_serialized("").unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlotOutline(Vec<OutlineBeat>);

impl PlotOutline {
    /// Create an outline from its beats.
    pub fn new(beats: Vec<OutlineBeat>) -> Self {
        Self(beats)
    }

    /// The beats in order.
    pub fn beats(&self) -> &[OutlineBeat] {
        &self.0
    }

    /// Number of beats.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the outline has no beats.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize to the text form stored in a story row.
    pub fn to_serialized(&self) -> QuillResult<String> {
        serde_json::to_string(&self.0)
            .map_err(|e| JsonError::new(format!("Failed to serialize outline: {}", e)).into())
    }

    /// Parse the text form stored in a story row.
    ///
    /// # Errors
    ///
    /// Returns a `JsonError` when the text is neither blank nor a JSON array of beats.
    pub fn from_serialized(text: &str) -> QuillResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(text)
            .map(Self)
            .map_err(|e| JsonError::new(format!("Failed to parse outline: {}", e)).into())
    }

    /// Render the outline as numbered plain-text lines, for prompts and display.
    pub fn to_plain_text(&self) -> String {
        self.0
            .iter()
            .enumerate()
            .map(|(i, beat)| {
                if beat.description.is_empty() {
                    format!("{}. {}", i + 1, beat.title)
                } else {
                    format!("{}. {}: {}", i + 1, beat.title, beat.description)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<Vec<OutlineBeat>> for PlotOutline {
    fn from(beats: Vec<OutlineBeat>) -> Self {
        Self(beats)
    }
}
