//! Story characters.

use quill_error::{JsonError, QuillResult};
use serde::{Deserialize, Serialize};

/// A character appearing in a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Character name
    pub name: String,
    /// Narrative role (protagonist, mentor, ...)
    #[serde(default)]
    pub role: String,
    /// Free-text description
    #[serde(default, alias = "bio")]
    pub description: String,
}

impl Character {
    /// Create a character.
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            description: description.into(),
        }
    }

    /// Serialize a character list to the text form stored in a story row.
    pub fn serialize_list(characters: &[Character]) -> QuillResult<String> {
        serde_json::to_string(characters)
            .map_err(|e| JsonError::new(format!("Failed to serialize characters: {}", e)).into())
    }

    /// Parse the text form stored in a story row. Blank text is an empty list.
    pub fn parse_list(text: &str) -> QuillResult<Vec<Character>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(text)
            .map_err(|e| JsonError::new(format!("Failed to parse characters: {}", e)).into())
    }
}
