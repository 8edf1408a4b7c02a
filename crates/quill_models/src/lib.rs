//! Text generation for Quill.
//!
//! This crate provides:
//!
//! - **`ChatCompletionDriver`**: a [`TextDriver`](quill_interface::TextDriver)
//!   for any OpenAI-compatible `/chat/completions` endpoint
//! - **`PromptedGenerationClient`**: the sequel pipeline's
//!   [`GenerationClient`](quill_interface::GenerationClient), built from
//!   prompts sent to a `TextDriver`
//! - **Extraction utilities**: pulling JSON out of chatty model output
//!
//! # Example
//!
//! ```rust,no_run
//! use quill_models::{ChatCompletionConfig, ChatCompletionDriver, PromptedGenerationClient};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ChatCompletionConfig::builder()
//!     .base_url("https://api.openai.com/v1")
//!     .model("gpt-4o-mini")
//!     .api_key(Some(std::env::var("OPENAI_API_KEY").unwrap_or_default()))
//!     .build()?;
//! let client = PromptedGenerationClient::new(ChatCompletionDriver::new(config)?);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chat;
mod extraction;
mod prompted;

pub use chat::{
    ChatCompletionConfig, ChatCompletionConfigBuilder, ChatCompletionDriver,
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice,
};
pub use extraction::{extract_json, parse_json};
pub use prompted::PromptedGenerationClient;
