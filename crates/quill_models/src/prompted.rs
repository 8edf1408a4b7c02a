//! Generation client built from prompts sent to a text driver.

use crate::{extract_json, parse_json};
use async_trait::async_trait;
use quill_core::{Character, CompletionRequest, OutlineBeat, PlotOutline, Story};
use quill_error::{
    BuilderError, BuilderErrorKind, GenerationError, GenerationErrorKind, QuillResult,
};
use quill_interface::{CancellationToken, GenerationClient, TextDriver};
use tracing::{debug, instrument};

const SYSTEM_PROMPT: &str = "You are a creative writing assistant helping an author plan stories. \
Follow the requested output format exactly.";

/// [`GenerationClient`] that asks a [`TextDriver`] for each field.
///
/// Every driver call races the cancellation token; a fired token drops the
/// in-flight request and fails with `GenerationErrorKind::Aborted`.
#[derive(Debug, Clone)]
pub struct PromptedGenerationClient<D> {
    driver: D,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl<D: TextDriver> PromptedGenerationClient<D> {
    /// Wrap a driver, using its own sampling defaults.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Override the sampling temperature for every call.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Override the completion length limit for every call.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// The wrapped driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    async fn ask(&self, prompt: String, cancel: &CancellationToken) -> QuillResult<String> {
        if cancel.is_cancelled() {
            return Err(GenerationError::new(GenerationErrorKind::Aborted).into());
        }

        let request = CompletionRequest::builder()
            .system(Some(SYSTEM_PROMPT.to_string()))
            .prompt(prompt)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| BuilderError::new(BuilderErrorKind::MissingField(e.to_string())))?;

        let text = cancel
            .run_until_cancelled(self.driver.complete(&request))
            .await
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::Aborted))??;

        if text.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyResponse(
                self.driver.provider_name().to_string(),
            ))
            .into());
        }
        Ok(text)
    }
}

/// First non-empty line, without a `Title:` label, quotes, or markdown emphasis.
fn clean_title(text: &str) -> Option<String> {
    let line = text.lines().map(str::trim).find(|line| !line.is_empty())?;
    let line = line.trim_start_matches('#').trim();
    let line = match line.get(..6) {
        Some(prefix) if prefix.eq_ignore_ascii_case("title:") => line[6..].trim(),
        _ => line,
    };
    let title = line
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '*' | '“' | '”' | '_'))
        .trim();
    (!title.is_empty()).then(|| title.to_string())
}

fn story_summary(story: &Story) -> String {
    let mut summary = format!("Title: {}\n", story.title());
    if !story.story_idea().trim().is_empty() {
        summary.push_str(&format!("Premise: {}\n", story.story_idea()));
    }
    if !story.plot_outline().is_empty() {
        summary.push_str("Outline:\n");
        summary.push_str(&story.plot_outline().to_plain_text());
        summary.push('\n');
    }
    if !story.characters().is_empty() {
        summary.push_str("Characters:\n");
        for character in story.characters() {
            summary.push_str(&format!("- {} ({}): {}\n", character.name, character.role, character.description));
        }
    }
    summary
}

#[async_trait]
impl<D: TextDriver> GenerationClient for PromptedGenerationClient<D> {
    #[instrument(skip(self, story, cancel), fields(story_id = %story.id(), provider = %self.driver.provider_name()))]
    async fn generate_sequel_idea(
        &self,
        story: &Story,
        cancel: &CancellationToken,
    ) -> QuillResult<String> {
        let prompt = format!(
            "Here is a story the author has finished:\n\n{}\n\
             Write a premise for its sequel in one or two paragraphs. \
             Continue the characters and consequences of the original. \
             Respond with the premise only.",
            story_summary(story)
        );
        let idea = self.ask(prompt, cancel).await?;
        Ok(idea.trim().to_string())
    }

    #[instrument(skip(self, idea, cancel), fields(idea_len = idea.len()))]
    async fn create_title(&self, idea: &str, cancel: &CancellationToken) -> QuillResult<String> {
        let prompt = format!(
            "Suggest a title for a story with this premise:\n\n{}\n\n\
             Respond with the title only, on a single line.",
            idea
        );
        let response = self.ask(prompt, cancel).await?;
        let title = clean_title(&response).ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::Malformed(
                "title response contained no title".to_string(),
            ))
        })?;
        debug!(title = %title, "Created title");
        Ok(title)
    }

    #[instrument(skip(self, idea, cancel), fields(idea_len = idea.len()))]
    async fn create_outline(
        &self,
        idea: &str,
        cancel: &CancellationToken,
    ) -> QuillResult<PlotOutline> {
        let prompt = format!(
            "Create a plot outline for a story with this premise:\n\n{}\n\n\
             Output ONLY valid JSON: an array of objects with \"title\" and \
             \"description\" string fields, one per scene, in story order.",
            idea
        );
        let response = self.ask(prompt, cancel).await?;
        let beats: Vec<OutlineBeat> = parse_json(&extract_json(&response)?)?;
        debug!(beats = beats.len(), "Created outline");
        Ok(PlotOutline::new(beats))
    }

    #[instrument(skip(self, outline, cancel), fields(beats = outline.len()))]
    async fn generate_characters(
        &self,
        outline: &PlotOutline,
        cancel: &CancellationToken,
    ) -> QuillResult<Vec<Character>> {
        if outline.is_empty() {
            debug!("Empty outline, no characters to generate");
            return Ok(Vec::new());
        }

        let prompt = format!(
            "Here is a plot outline:\n\n{}\n\n\
             List the characters this story needs. Output ONLY valid JSON: an \
             array of objects with \"name\", \"role\", and \"description\" string fields.",
            outline.to_plain_text()
        );
        let response = self.ask(prompt, cancel).await?;
        let characters: Vec<Character> = parse_json(&extract_json(&response)?)?;
        debug!(characters = characters.len(), "Generated characters");
        Ok(characters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_title_strips_decoration() {
        assert_eq!(clean_title("\n  \"The Return\"  \nmore").as_deref(), Some("The Return"));
        assert_eq!(clean_title("Title: **Tides of Ash**").as_deref(), Some("Tides of Ash"));
        assert_eq!(clean_title("# TITLE: Ember").as_deref(), Some("Ember"));
        assert_eq!(clean_title("   \n\"\"").as_deref(), None);
    }
}
