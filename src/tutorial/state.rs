/// Tutorial state
///
/// Current step index and lifecycle flags of a tutorial run.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TutorialState {
    /// Index into the step registry
    current_step_index: usize,

    /// A run is in progress
    is_active: bool,

    /// Panel hidden by the host (presentation only)
    is_paused: bool,

    /// A transition is scheduled and has not fired yet
    is_transitioning: bool,

    /// The current step's primary action was recognized
    step_completed: bool,
}

impl TutorialState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    pub fn step_completed(&self) -> bool {
        self.step_completed
    }

    /// Whether `tick` should evaluate the current step
    pub fn is_evaluating(&self) -> bool {
        self.is_active && !self.is_paused && !self.is_transitioning
    }

    /// Begin a fresh run at step 0
    pub fn reset(&mut self) {
        *self = Self {
            is_active: true,
            ..Self::default()
        };
    }

    /// Move to `index` with the completion flag cleared
    pub fn enter(&mut self, index: usize) {
        self.current_step_index = index;
        self.step_completed = false;
    }

    pub fn mark_step_completed(&mut self) {
        self.step_completed = true;
    }

    pub fn set_transitioning(&mut self, transitioning: bool) {
        self.is_transitioning = transitioning;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
    }

    /// End the run. The index is kept for progress reporting.
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.is_transitioning = false;
    }

    /// Completion progress (0.0-1.0) for a registry of `total` steps
    pub fn progress(&self, total: usize) -> f32 {
        if total == 0 {
            return 1.0;
        }
        (self.current_step_index as f32 / total as f32).min(1.0)
    }
}
