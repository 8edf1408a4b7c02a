//! Story lookup caching with TTL support.
//!
//! This crate keeps recently fetched stories in memory so repeated lookups
//! (the sequel pipeline walks parent chains on every run) avoid a round trip
//! to the backend.

#![warn(missing_docs)]

mod cache;
mod store;

pub use cache::{CacheEntry, StoryCache, StoryCacheConfig, StoryCacheConfigBuilder};
pub use store::CachedStoryStore;
