/// Action tokens and the per-controller action tracker
///
/// Input observers record tokens here; step predicates query them.

use std::collections::HashSet;

/// Whether a token survives step changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionScope {
    /// Cleared whenever a new step is entered
    Step,

    /// Survives across steps
    Persistent,
}

/// A recognized user action or game event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Confirmation after a step's condition is met
    Confirm,
    EarthView,
    SpaceshipView,
    Zoomed,
    Thrusted,
    Paused,
    AppliedVelocity,

    /// The whole flow is finished (completed or skipped)
    Finished,
}

impl Action {
    pub fn scope(&self) -> ActionScope {
        match self {
            Action::Finished => ActionScope::Persistent,
            _ => ActionScope::Step,
        }
    }

    /// Stable token name
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Confirm => "confirm",
            Action::EarthView => "earthView",
            Action::SpaceshipView => "spaceshipView",
            Action::Zoomed => "zoomed",
            Action::Thrusted => "thrusted",
            Action::Paused => "paused",
            Action::AppliedVelocity => "appliedVelocity",
            Action::Finished => "tutorialFinished",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Set of actions recorded so far
#[derive(Debug, Clone, Default)]
pub struct ActionTracker {
    recorded: HashSet<Action>,
}

impl ActionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an action. Returns true if it was not already present.
    pub fn record(&mut self, action: Action) -> bool {
        self.recorded.insert(action)
    }

    pub fn has(&self, action: Action) -> bool {
        self.recorded.contains(&action)
    }

    /// Remove the given actions
    pub fn clear(&mut self, actions: &[Action]) {
        for action in actions {
            self.recorded.remove(action);
        }
    }

    /// Remove every step-scoped action, keeping persistent ones
    pub fn clear_step_scoped(&mut self) {
        self.recorded
            .retain(|action| action.scope() == ActionScope::Persistent);
    }

    pub fn clear_all(&mut self) {
        self.recorded.clear();
    }

    pub fn len(&self) -> usize {
        self.recorded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recorded.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Action; 8] = [
        Action::Confirm,
        Action::EarthView,
        Action::SpaceshipView,
        Action::Zoomed,
        Action::Thrusted,
        Action::Paused,
        Action::AppliedVelocity,
        Action::Finished,
    ];

    #[test]
    fn test_record_and_has() {
        let mut tracker = ActionTracker::new();
        assert!(!tracker.has(Action::EarthView));

        assert!(tracker.record(Action::EarthView));
        assert!(!tracker.record(Action::EarthView));
        assert!(tracker.has(Action::EarthView));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_clear_selected() {
        let mut tracker = ActionTracker::new();
        tracker.record(Action::Zoomed);
        tracker.record(Action::Confirm);

        tracker.clear(&[Action::Confirm]);
        assert!(tracker.has(Action::Zoomed));
        assert!(!tracker.has(Action::Confirm));
    }

    #[test]
    fn test_clear_step_scoped_keeps_persistent() {
        let mut tracker = ActionTracker::new();
        for action in ALL {
            tracker.record(action);
        }

        tracker.clear_step_scoped();
        assert_eq!(tracker.len(), 1);
        assert!(tracker.has(Action::Finished));

        tracker.clear_all();
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_only_finished_is_persistent() {
        let persistent: Vec<_> = ALL
            .into_iter()
            .filter(|a| a.scope() == ActionScope::Persistent)
            .collect();
        assert_eq!(persistent, vec![Action::Finished]);
        assert_eq!(Action::AppliedVelocity.to_string(), "appliedVelocity");
    }
}
