//! The `series` commands.

use super::story::print_json;
use super::{Backend, OutputFormat, SeriesCommands};
use quill::{QuillResult, SeriesId};

/// Handle series subcommands.
pub async fn handle_series_command(cmd: SeriesCommands, backend: &Backend) -> QuillResult<()> {
    match cmd {
        SeriesCommands::Show { id, format } => {
            let view = backend
                .series()
                .get_series_with_stories(&SeriesId::new(id))
                .await?;
            match format {
                OutputFormat::Json => print_json(&view)?,
                OutputFormat::Human => {
                    println!("{}", view.series.title);
                    println!("{:-<80}", "");
                    if !view.series.description.is_empty() {
                        println!("{}", view.series.description);
                        println!();
                    }
                    for (index, story) in view.stories().enumerate() {
                        println!("{}: {}  {}", view.part_label(index), story.title(), story.id());
                    }
                }
            }
        }
        SeriesCommands::List { format } => {
            let series = backend.series().list_series().await?;
            match format {
                OutputFormat::Json => print_json(&series)?,
                OutputFormat::Human => {
                    for row in &series {
                        println!("{}  {}", row.id, row.title);
                    }
                    println!("Total: {} series", series.len());
                }
            }
        }
    }
    Ok(())
}
