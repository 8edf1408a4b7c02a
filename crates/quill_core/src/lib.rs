//! Core data types for the Quill story-writing toolkit.
//!
//! This crate holds the domain model shared by every other Quill crate:
//! stories and their generated fields, series and their ordered membership
//! links, and the states of the sequel-generation pipeline.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod character;
mod ids;
mod outline;
mod request;
mod sequel;
mod series;
mod story;

pub use character::Character;
pub use ids::{SeriesId, StoryId};
pub use outline::{OutlineBeat, PlotOutline};
pub use request::{CompletionRequest, CompletionRequestBuilder, CompletionRequestBuilderError};
pub use sequel::{Progress, SequelState, SequelStep};
pub use series::{
    next_free_position, Series, SeriesEntry, SeriesMembership, SeriesUpdate, SeriesWithStories,
};
pub use story::{Story, StoryBuilder, StoryBuilderError, StoryDraft, StoryUpdate};
