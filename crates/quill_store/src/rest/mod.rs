//! Stores backed by a PostgREST-style hosted database.
//!
//! Tables: `stories`, `series`, and `series_stories` (the membership links).
//! Outline and character columns hold serialized JSON text.

mod client;
mod rows;
mod series;
mod story;

pub use client::{RestClient, RestConfig, RestConfigBuilder};
pub use series::RestSeriesStore;
pub use story::RestStoryStore;
