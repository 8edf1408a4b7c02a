//! Test utilities for quill_sequel tests.
//!
//! Mock collaborators for the sequel pipeline: a scripted generation client
//! and store wrappers that count writes and inject failures.

pub mod mock_generation;
pub mod recording_store;

#[allow(unused_imports)]
pub use mock_generation::{ScriptedGeneration, StepBehavior};
#[allow(unused_imports)]
pub use recording_store::{RecordingSeriesStore, RecordingStoryStore};

use quill_core::Story;

/// A story with no sequel markers.
#[allow(dead_code)]
pub fn original(id: &str, title: &str) -> Story {
    Story::builder().id(id).title(title).build().unwrap()
}

/// A sequel story continuing `parent`.
#[allow(dead_code)]
pub fn sequel(id: &str, title: &str, parent: &str) -> Story {
    Story::builder()
        .id(id)
        .title(title)
        .is_sequel(true)
        .parent_story_id(parent)
        .build()
        .unwrap()
}
