//! Quill CLI binary.
//!
//! - Generate sequels to stored stories
//! - Browse stories and series

use clap::Parser;
use quill::{ObservabilityConfig, QuillConfig, StoryId, init_observability};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Backend, Cli, Commands, handle_series_command, handle_story_command, run_sequel};

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => QuillConfig::from_file(path)?,
        None => QuillConfig::load()?,
    };

    let mut observability = ObservabilityConfig::from_section(config.logging());
    if cli.verbose {
        observability = observability.verbose();
    }
    init_observability(&observability)?;

    let backend = Backend::open(&config, cli.library.as_deref())?;

    match cli.command {
        Commands::Sequel { story_id } => {
            run_sequel(&config, &backend, StoryId::new(story_id)).await?;
        }

        Commands::Story(story_cmd) => {
            handle_story_command(story_cmd, &backend).await?;
        }

        Commands::Series(series_cmd) => {
            handle_series_command(series_cmd, &backend).await?;
        }
    }

    Ok(())
}
