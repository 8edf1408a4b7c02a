//! Trait definitions for the Quill story-writing toolkit.
//!
//! The sequel pipeline consumes its collaborators only through the traits
//! defined here: the story and series stores, the generation client, and the
//! text driver that backs generation. Every remote operation is async; the
//! [`CancellationToken`] is the cancellation context threaded through them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cancellation;
mod generation;
mod store;

pub use cancellation::CancellationToken;
pub use generation::{GenerationClient, TextDriver};
pub use store::{SeriesStore, StoryStore};
