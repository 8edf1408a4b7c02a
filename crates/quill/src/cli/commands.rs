//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Quill - generate story sequels and keep them grouped into series
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(about = "Generate story sequels and keep them grouped into series", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Load configuration from this file instead of the default locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Use a local JSON library instead of the hosted backend
    #[arg(long, global = true)]
    pub library: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a sequel to a story
    Sequel {
        /// Id of the story to continue
        story_id: String,
    },

    /// Story commands
    #[command(subcommand)]
    Story(StoryCommands),

    /// Series commands
    #[command(subcommand)]
    Series(SeriesCommands),
}

/// Story subcommands
#[derive(Subcommand, Debug)]
pub enum StoryCommands {
    /// Show a single story
    Show {
        /// Story id
        id: String,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// List all stories
    List {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },
}

/// Series subcommands
#[derive(Subcommand, Debug)]
pub enum SeriesCommands {
    /// Show a series with its stories in order
    Show {
        /// Series id
        id: String,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// List all series
    List {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
