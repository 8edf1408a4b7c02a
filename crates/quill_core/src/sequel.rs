//! States and progress of the sequel-generation pipeline.

use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter, IntoEnumIterator};

/// One of the six fixed steps of the sequel pipeline, in execution order.
///
/// # Examples
///
/// ```
/// use quill_core::SequelStep;
///
/// assert_eq!(SequelStep::GeneratingIdea.index(), 0);
/// assert_eq!(SequelStep::Saving.index(), 5);
/// assert_eq!(SequelStep::GeneratingTitle.next(), Some(SequelStep::GeneratingOutline));
/// assert_eq!(SequelStep::Saving.next(), None);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumCount,
    strum::Display,
)]
pub enum SequelStep {
    /// Generate a premise continuing the original story
    #[strum(to_string = "Generating story idea")]
    GeneratingIdea,
    /// Derive a title from the premise
    #[strum(to_string = "Creating title")]
    GeneratingTitle,
    /// Derive a structured outline from the premise
    #[strum(to_string = "Creating outline")]
    GeneratingOutline,
    /// Derive a character list from the outline
    #[strum(to_string = "Generating characters")]
    GeneratingCharacters,
    /// Decide which series the sequel joins
    #[strum(to_string = "Linking series")]
    ResolvingSeries,
    /// Persist the sequel and attach it to its series
    #[strum(to_string = "Saving sequel")]
    Saving,
}

impl SequelStep {
    /// Zero-based position in the pipeline.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human-readable label reported to observers.
    pub fn label(self) -> String {
        self.to_string()
    }

    /// The step that follows this one, if any.
    pub fn next(self) -> Option<SequelStep> {
        SequelStep::iter().nth(self.index() + 1)
    }

    /// Whether the step calls the generation client.
    pub fn is_generation(self) -> bool {
        self.index() <= SequelStep::GeneratingCharacters.index()
    }

    /// Total number of steps.
    pub fn total() -> usize {
        SequelStep::COUNT
    }
}

/// Lifecycle state of a generation session.
///
/// Linear: `Idle`, then each [`SequelStep`] in order, then `Completed`.
/// `Cancelled` is reachable from every non-terminal state and `Failed` from
/// every step. Terminal states are absorbing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum SequelState {
    /// Session created, pipeline not started
    Idle,
    /// Step 0
    GeneratingIdea,
    /// Step 1
    GeneratingTitle,
    /// Step 2
    GeneratingOutline,
    /// Step 3
    GeneratingCharacters,
    /// Step 4
    ResolvingSeries,
    /// Step 5
    Saving,
    /// Sequel saved
    Completed,
    /// Stopped by a cancellation request
    Cancelled,
    /// Stopped by a step failure
    Failed,
}

impl SequelState {
    /// The pipeline step this state represents, if it is a step.
    pub fn step(self) -> Option<SequelStep> {
        match self {
            SequelState::GeneratingIdea => Some(SequelStep::GeneratingIdea),
            SequelState::GeneratingTitle => Some(SequelStep::GeneratingTitle),
            SequelState::GeneratingOutline => Some(SequelStep::GeneratingOutline),
            SequelState::GeneratingCharacters => Some(SequelStep::GeneratingCharacters),
            SequelState::ResolvingSeries => Some(SequelStep::ResolvingSeries),
            SequelState::Saving => Some(SequelStep::Saving),
            SequelState::Idle
            | SequelState::Completed
            | SequelState::Cancelled
            | SequelState::Failed => None,
        }
    }

    /// Whether no further transition is possible.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SequelState::Completed | SequelState::Cancelled | SequelState::Failed
        )
    }

    /// Whether the pipeline may move from this state to `next`.
    ///
    /// ```
    /// use quill_core::SequelState;
    ///
    /// assert!(SequelState::Idle.can_transition_to(SequelState::GeneratingIdea));
    /// assert!(SequelState::GeneratingOutline.can_transition_to(SequelState::Cancelled));
    /// assert!(!SequelState::GeneratingIdea.can_transition_to(SequelState::Saving));
    /// assert!(!SequelState::Completed.can_transition_to(SequelState::Cancelled));
    /// ```
    pub fn can_transition_to(self, next: SequelState) -> bool {
        if self.is_terminal() {
            return false;
        }
        match (self, next) {
            (_, SequelState::Cancelled) => true,
            (SequelState::Idle, SequelState::GeneratingIdea) => true,
            (SequelState::Idle, _) => false,
            (SequelState::Saving, SequelState::Completed) => true,
            (current, SequelState::Failed) => current.step().is_some(),
            (current, candidate) => match (current.step(), candidate.step()) {
                (Some(from), Some(to)) => from.next() == Some(to),
                _ => false,
            },
        }
    }
}

impl From<SequelStep> for SequelState {
    fn from(step: SequelStep) -> Self {
        match step {
            SequelStep::GeneratingIdea => SequelState::GeneratingIdea,
            SequelStep::GeneratingTitle => SequelState::GeneratingTitle,
            SequelStep::GeneratingOutline => SequelState::GeneratingOutline,
            SequelStep::GeneratingCharacters => SequelState::GeneratingCharacters,
            SequelStep::ResolvingSeries => SequelState::ResolvingSeries,
            SequelStep::Saving => SequelState::Saving,
        }
    }
}

/// Progress notification emitted after every pipeline transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Step index, 0 through 5
    pub step_index: usize,
    /// Human-readable step label
    pub step_label: String,
}

impl Progress {
    /// Progress for entering `step`.
    pub fn for_step(step: SequelStep) -> Self {
        Self {
            step_index: step.index(),
            step_label: step.label(),
        }
    }
}
