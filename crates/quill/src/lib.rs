//! Quill - sequels and series for LLM-assisted fiction
//!
//! Quill turns an existing story into a generated sequel and keeps sequel
//! chains grouped into ordered series.
//!
//! # Architecture
//!
//! - `quill-error` - Error types
//! - `quill-core` - Stories, series, and sequel pipeline states
//! - `quill-interface` - Store and generation traits, cancellation
//! - `quill-store` - In-memory, JSON library, and REST stores
//! - `quill-cache` - Read-through story cache
//! - `quill-models` - Chat completion driver and prompted generation client
//! - `quill-sequel` - Sequel orchestrator and series membership manager
//!
//! This crate re-exports everything for convenience and hosts the `quill`
//! binary's configuration and logging setup.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use quill::{GenerationSession, NoopObserver, SequelOrchestrator};
//!
//! let orchestrator = SequelOrchestrator::new(stories, series, generation);
//! let mut session = GenerationSession::new(original.id().clone());
//! let outcome = orchestrator.start(&original, &mut session, &NoopObserver).await?;
//! println!("Sequel: {:?}", outcome.story_id());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod observability;

pub use config::{
    GenerationSection, LoggingSection, QuillConfig, SequelSection, StoreSection,
};
pub use observability::{ObservabilityConfig, init_observability};

pub use quill_cache::*;
pub use quill_core::*;
pub use quill_error::*;
pub use quill_interface::*;
pub use quill_models::*;
pub use quill_sequel::*;
pub use quill_store::*;
