//! Progress reporting for the sequel pipeline.

use quill_core::Progress;
use tokio::sync::mpsc::UnboundedSender;

/// Something the pipeline reports to its observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequelEvent {
    /// A step started
    Progress(Progress),
    /// The run failed with this message
    Failed(String),
}

/// Receives pipeline progress.
///
/// Progress is emitted after every step transition. A failure is reported
/// once with a human-readable message. Cancellation emits nothing further.
pub trait SequelObserver: Send + Sync {
    /// A step started.
    fn on_progress(&self, progress: &Progress);

    /// The run failed.
    fn on_failure(&self, _message: &str) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SequelObserver for NoopObserver {
    fn on_progress(&self, _progress: &Progress) {}
}

impl<F> SequelObserver for F
where
    F: Fn(SequelEvent) + Send + Sync,
{
    fn on_progress(&self, progress: &Progress) {
        self(SequelEvent::Progress(progress.clone()));
    }

    fn on_failure(&self, message: &str) {
        self(SequelEvent::Failed(message.to_string()));
    }
}

impl SequelObserver for UnboundedSender<SequelEvent> {
    fn on_progress(&self, progress: &Progress) {
        // A dropped receiver only means nobody is listening
        let _ = self.send(SequelEvent::Progress(progress.clone()));
    }

    fn on_failure(&self, message: &str) {
        let _ = self.send(SequelEvent::Failed(message.to_string()));
    }
}
