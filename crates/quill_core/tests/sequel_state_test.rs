use quill_core::{Progress, SequelState, SequelStep};
use strum::IntoEnumIterator;

#[test]
fn test_steps_are_ordered_zero_through_five() {
    let indices: Vec<usize> = SequelStep::iter().map(|s| s.index()).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(SequelStep::total(), 6);
}

#[test]
fn test_linear_walk_reaches_completed() {
    let mut state = SequelState::Idle;
    for step in SequelStep::iter() {
        let next = SequelState::from(step);
        assert!(state.can_transition_to(next), "{state} -> {next}");
        state = next;
    }
    assert!(state.can_transition_to(SequelState::Completed));
}

#[test]
fn test_cancelled_reachable_from_every_non_terminal_state() {
    assert!(SequelState::Idle.can_transition_to(SequelState::Cancelled));
    for step in SequelStep::iter() {
        assert!(SequelState::from(step).can_transition_to(SequelState::Cancelled));
    }
}

#[test]
fn test_failed_reachable_from_steps_only() {
    assert!(!SequelState::Idle.can_transition_to(SequelState::Failed));
    for step in SequelStep::iter() {
        assert!(SequelState::from(step).can_transition_to(SequelState::Failed));
    }
}

#[test]
fn test_terminal_states_are_absorbing() {
    for terminal in [SequelState::Completed, SequelState::Cancelled, SequelState::Failed] {
        assert!(terminal.is_terminal());
        assert!(!terminal.can_transition_to(SequelState::Cancelled));
        assert!(!terminal.can_transition_to(SequelState::GeneratingIdea));
    }
}

#[test]
fn test_steps_cannot_be_skipped() {
    assert!(!SequelState::GeneratingTitle.can_transition_to(SequelState::GeneratingCharacters));
    assert!(!SequelState::ResolvingSeries.can_transition_to(SequelState::Completed));
    assert!(!SequelState::GeneratingOutline.can_transition_to(SequelState::GeneratingTitle));
}

#[test]
fn test_progress_labels() {
    let progress = Progress::for_step(SequelStep::GeneratingCharacters);
    assert_eq!(progress.step_index, 3);
    assert_eq!(progress.step_label, "Generating characters");
    assert!(SequelStep::GeneratingCharacters.is_generation());
    assert!(!SequelStep::ResolvingSeries.is_generation());
}
