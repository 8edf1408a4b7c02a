//! HTTP driver for OpenAI-compatible providers.

use super::dto::{ChatCompletionRequest, ChatCompletionResponse};
use async_trait::async_trait;
use derive_getters::Getters;
use quill_core::CompletionRequest;
use quill_error::{
    GenerationError, GenerationErrorKind, HttpError, JsonError, QuillError, QuillResult,
};
use quill_interface::TextDriver;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Connection settings for a chat completion provider.
#[derive(Debug, Clone, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ChatCompletionConfig {
    /// API root, e.g. `https://api.openai.com/v1`
    base_url: String,
    /// Default model
    model: String,
    /// Bearer token; local servers often need none
    #[builder(default)]
    api_key: Option<String>,
    /// Default sampling temperature
    #[builder(default)]
    temperature: Option<f32>,
    /// Default completion length limit
    #[builder(default)]
    max_tokens: Option<u32>,
    /// Request timeout
    #[builder(default = "Duration::from_secs(120)")]
    timeout: Duration,
    /// Name reported by `provider_name`
    #[builder(default = "\"openai-compatible\".to_string()")]
    provider: String,
}

impl ChatCompletionConfig {
    /// Creates a new config builder.
    pub fn builder() -> ChatCompletionConfigBuilder {
        ChatCompletionConfigBuilder::default()
    }
}

/// [`TextDriver`] for any endpoint speaking the `/chat/completions` protocol.
#[derive(Debug, Clone)]
pub struct ChatCompletionDriver {
    config: ChatCompletionConfig,
    client: reqwest::Client,
}

impl ChatCompletionDriver {
    /// Creates a new driver.
    ///
    /// # Errors
    ///
    /// Returns an `HttpError` if the HTTP client cannot be built.
    #[instrument(skip(config), fields(base_url = %config.base_url(), model = %config.model()))]
    pub fn new(config: ChatCompletionConfig) -> QuillResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(*config.timeout())
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;
        debug!("Creating chat completion driver");
        Ok(Self { config, client })
    }

    /// The driver configuration.
    pub fn config(&self) -> &ChatCompletionConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url().trim_end_matches('/')
        )
    }
}

#[async_trait]
impl TextDriver for ChatCompletionDriver {
    #[instrument(
        skip(self, request),
        fields(provider = %self.config.provider(), model = %self.config.model(), prompt_len = request.prompt.len())
    )]
    async fn complete(&self, request: &CompletionRequest) -> QuillResult<String> {
        let body = ChatCompletionRequest::from_completion(
            request,
            self.config.model(),
            *self.config.temperature(),
            *self.config.max_tokens(),
        );

        let mut req = self.client.post(self.endpoint()).json(&body);
        if let Some(api_key) = self.config.api_key() {
            req = req.bearer_auth(api_key);
        }

        let response = req.send().await.map_err(|e| {
            error!("Request failed: {}", e);
            HttpError::new(format!("Request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, "Provider returned error");
            return Err(GenerationError::new(GenerationErrorKind::Failed(format!(
                "{} returned {}: {}",
                self.config.provider(),
                status,
                message
            )))
            .into());
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!("Failed to parse response: {}", e);
            JsonError::new(format!("Failed to parse chat completion: {}", e))
        })?;

        let content = parsed.first_content().ok_or_else(|| {
            QuillError::from(GenerationError::new(GenerationErrorKind::EmptyResponse(
                self.config.provider().clone(),
            )))
        })?;
        debug!(response_len = content.len(), "Chat completion successful");
        Ok(content.to_string())
    }

    fn provider_name(&self) -> &str {
        self.config.provider()
    }

    fn model_name(&self) -> &str {
        self.config.model()
    }
}
