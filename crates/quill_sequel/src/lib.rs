//! Sequel generation for Quill.
//!
//! Turns an existing story into a new sequel story through a fixed six-step
//! pipeline, grouping sequel chains into series along the way.
//!
//! - [`SequelOrchestrator`] runs the pipeline against injected stores and a
//!   generation client, reporting progress to a [`SequelObserver`]
//! - [`SeriesMembershipManager`] decides which series a sequel joins,
//!   creating one for a chain that has none yet
//! - [`GenerationSession`] holds the ephemeral state of one run
//!
//! Persistence is not transactional: a series created before a failure or
//! cancellation stays in place, and nothing is rolled back.
//!
//! # Example
//!
//! ```rust,ignore
//! use quill_sequel::{GenerationSession, NoopObserver, SequelOrchestrator};
//!
//! let orchestrator = SequelOrchestrator::new(stories, series, generation);
//! let mut session = GenerationSession::new(original.id().clone());
//! let outcome = orchestrator.start(&original, &mut session, &NoopObserver).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod handle;
mod membership;
mod observer;
mod orchestrator;
mod session;

pub use handle::SequelHandle;
pub use membership::{DEFAULT_MAX_ANCESTOR_DEPTH, SeriesMembershipManager, SeriesResolution};
pub use observer::{NoopObserver, SequelEvent, SequelObserver};
pub use orchestrator::{SequelOrchestrator, SequelOutcome};
pub use session::GenerationSession;
