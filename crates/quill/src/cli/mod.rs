//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the quill binary.

mod backend;
mod commands;
mod sequel;
mod series;
mod story;

pub use backend::Backend;
pub use commands::{Cli, Commands, OutputFormat, SeriesCommands, StoryCommands};
pub use sequel::run_sequel;
pub use series::handle_series_command;
pub use story::handle_story_command;
