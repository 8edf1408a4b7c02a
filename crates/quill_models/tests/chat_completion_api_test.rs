//! Live tests against an OpenAI-compatible provider.
//!
//! Run with `--features api` and `OPENAI_API_KEY` set (a `.env` file works).

use quill_core::CompletionRequest;
use quill_interface::{CancellationToken, GenerationClient, TextDriver};
use quill_models::{ChatCompletionConfig, ChatCompletionDriver, PromptedGenerationClient};

fn live_driver() -> Result<ChatCompletionDriver, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let api_key = std::env::var("OPENAI_API_KEY")?;
    let config = ChatCompletionConfig::builder()
        .base_url("https://api.openai.com/v1")
        .model("gpt-4o-mini")
        .api_key(Some(api_key))
        .max_tokens(Some(64))
        .build()?;
    Ok(ChatCompletionDriver::new(config)?)
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_live_completion() -> Result<(), Box<dyn std::error::Error>> {
    let driver = live_driver()?;
    let request = CompletionRequest::builder()
        .prompt("Reply with the single word: lantern")
        .build()?;

    let text = driver.complete(&request).await?;
    assert!(text.to_lowercase().contains("lantern"));
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_live_title() -> Result<(), Box<dyn std::error::Error>> {
    let client = PromptedGenerationClient::new(live_driver()?);
    let title = client
        .create_title(
            "Two sisters run a lighthouse on a moon that keeps drifting",
            &CancellationToken::new(),
        )
        .await?;

    assert!(!title.is_empty());
    assert!(!title.starts_with('#'));
    Ok(())
}
