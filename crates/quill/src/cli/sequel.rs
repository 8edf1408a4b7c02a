//! The `sequel` command.

use super::Backend;
use quill::{
    ChatCompletionDriver, PromptedGenerationClient, QuillConfig, QuillResult, SequelEvent,
    SequelOrchestrator, SequelOutcome, SequelStep, StoreError, StoreErrorKind, StoryId,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Generate a sequel to `story_id`, printing progress as it runs.
///
/// Ctrl-C cancels the run. Whatever was written before the cancellation
/// stays written, and a local library is saved either way.
pub async fn run_sequel(config: &QuillConfig, backend: &Backend, story_id: StoryId) -> QuillResult<()> {
    let original = backend
        .stories()
        .get_by_id(&story_id)
        .await?
        .ok_or_else(|| StoreError::new(StoreErrorKind::NotFound(format!("story {}", story_id))))?;

    let driver = ChatCompletionDriver::new(config.generation().driver_config()?)?;
    let generation = Arc::new(PromptedGenerationClient::new(driver));
    let orchestrator = SequelOrchestrator::new(backend.stories(), backend.series(), generation)
        .with_max_ancestor_depth(*config.sequel().max_ancestor_depth());

    println!("Writing a sequel to \"{}\"", original.title());
    let mut handle = orchestrator.spawn(original);
    info!(session_id = %handle.session_id(), "Sequel generation started");

    let mut interrupted = false;
    loop {
        tokio::select! {
            event = handle.next_event() => match event {
                Some(SequelEvent::Progress(progress)) => {
                    println!(
                        "[{}/{}] {}",
                        progress.step_index + 1,
                        SequelStep::total(),
                        progress.step_label
                    );
                }
                Some(SequelEvent::Failed(message)) => eprintln!("Failed: {}", message),
                None => break,
            },
            signal = tokio::signal::ctrl_c(), if !interrupted => {
                if let Err(e) = signal {
                    warn!(error = %e, "Failed to listen for Ctrl-C");
                }
                eprintln!("Cancelling...");
                handle.cancel();
                interrupted = true;
            }
        }
    }

    let result = handle.join().await;
    backend.persist().await?;

    match result? {
        SequelOutcome::Completed {
            story_id,
            series_id,
        } => {
            println!("Sequel saved: {}", story_id);
            if let Some(series_id) = series_id {
                println!("Series: {}", series_id);
            }
        }
        SequelOutcome::Cancelled { step, saved_story } => {
            match step {
                Some(step) => println!("Cancelled during: {}", step.label()),
                None => println!("Cancelled before the first step"),
            }
            if let Some(saved) = saved_story {
                println!("The sequel was already saved: {}", saved);
            }
        }
    }
    Ok(())
}
