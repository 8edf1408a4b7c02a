//! OpenAI-compatible chat completion driver.

mod driver;
mod dto;

pub use driver::{ChatCompletionConfig, ChatCompletionConfigBuilder, ChatCompletionDriver};
pub use dto::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice};
