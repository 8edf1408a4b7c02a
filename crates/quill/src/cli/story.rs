//! The `story` commands.

use super::{Backend, OutputFormat, StoryCommands};
use quill::{JsonError, QuillResult, StoreError, StoreErrorKind, Story, StoryId};

/// Handle story subcommands.
pub async fn handle_story_command(cmd: StoryCommands, backend: &Backend) -> QuillResult<()> {
    match cmd {
        StoryCommands::Show { id, format } => show_story(backend, StoryId::new(id), format).await,
        StoryCommands::List { format } => list_stories(backend, format).await,
    }
}

async fn show_story(backend: &Backend, id: StoryId, format: OutputFormat) -> QuillResult<()> {
    let story = backend
        .stories()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| StoreError::new(StoreErrorKind::NotFound(format!("story {}", id))))?;

    match format {
        OutputFormat::Json => print_json(&story)?,
        OutputFormat::Human => print_story(&story),
    }
    Ok(())
}

async fn list_stories(backend: &Backend, format: OutputFormat) -> QuillResult<()> {
    let stories = backend.stories().list_stories().await?;

    match format {
        OutputFormat::Json => print_json(&stories)?,
        OutputFormat::Human => {
            for story in &stories {
                let marker = if story.is_sequel_or_child() { " (sequel)" } else { "" };
                println!("{}  {}{}", story.id(), story.title(), marker);
            }
            println!("Total: {} stories", stories.len());
        }
    }
    Ok(())
}

fn print_story(story: &Story) {
    println!("{}", story.title());
    println!("{:-<80}", "");
    println!("Id: {}", story.id());
    if let Some(parent) = story.parent_story_id() {
        println!("Sequel to: {}", parent);
    }
    if !story.story_idea().is_empty() {
        println!();
        println!("{}", story.story_idea());
    }
    if !story.plot_outline().is_empty() {
        println!();
        println!("Outline:");
        println!("{}", story.plot_outline().to_plain_text());
    }
    if !story.characters().is_empty() {
        println!();
        println!("Characters:");
        for character in story.characters() {
            println!("  {} ({}): {}", character.name, character.role, character.description);
        }
    }
}

pub(super) fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> QuillResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| JsonError::new(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
