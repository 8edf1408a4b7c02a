//! Story and series stores for Quill.
//!
//! This crate provides the implementations of the `StoryStore` and
//! `SeriesStore` traits:
//!
//! - **In-memory stores**: `HashMap`-backed stores for tests and local use
//! - **Library**: a JSON snapshot that loads into and saves from the in-memory stores
//! - **REST stores**: clients for a PostgREST-style hosted backend
//!
//! # Example
//!
//! ```rust,ignore
//! use quill_store::{InMemorySeriesStore, InMemoryStoryStore};
//!
//! let stories = InMemoryStoryStore::new();
//! let series = InMemorySeriesStore::new(stories.clone());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod in_memory;
mod library;
mod rest;

pub use in_memory::{InMemorySeriesStore, InMemoryStoryStore};
pub use library::Library;
pub use rest::{RestClient, RestConfig, RestConfigBuilder, RestSeriesStore, RestStoryStore};
