//! Text completion request type.

use serde::{Deserialize, Serialize};

/// A single-turn text completion request sent to a `TextDriver`.
///
/// # Examples
///
/// ```
/// use quill_core::CompletionRequest;
///
/// let request = CompletionRequest::builder()
///     .prompt("Suggest a title")
///     .max_tokens(Some(32))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.prompt, "Suggest a title");
/// assert!(request.system.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct CompletionRequest {
    /// Optional system instruction
    #[builder(default)]
    pub system: Option<String>,
    /// The user prompt
    pub prompt: String,
    /// Model override
    #[builder(default)]
    pub model: Option<String>,
    /// Sampling temperature
    #[builder(default)]
    pub temperature: Option<f32>,
    /// Maximum number of tokens to generate
    #[builder(default)]
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    /// Creates a new request builder.
    pub fn builder() -> CompletionRequestBuilder {
        CompletionRequestBuilder::default()
    }
}
