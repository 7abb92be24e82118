/// Tutorial step definitions
///
/// Every step of the flight tutorial, its presentation text, the input it
/// recognizes and the predicate that completes it.

use super::actions::{Action, ActionTracker};
use super::camera;
use super::input::InputEvent;
use crate::config::KeyBindings;
use crate::context::GameContext;

/// Behavior hooks of a step.
///
/// Predicates only read the context and tracker; directives and completion
/// hooks may mutate the context.
pub trait StepBehavior {
    /// Reposition the camera on step entry
    fn camera_setup(&self, _ctx: &mut GameContext) {}

    /// Whether the step's goal is met
    fn check_completion(&self, ctx: &GameContext, tracker: &ActionTracker) -> bool;

    /// One-shot side effect when the step is satisfied
    fn on_complete(&self, _ctx: &mut GameContext) {}
}

/// Tutorial step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepId {
    /// Introduction
    Welcome,

    /// Number keys switch camera views
    CameraNumbers,

    /// Snap the camera to the spaceship
    ViewSpaceship,

    /// Mouse wheel zoom
    ZoomCamera,

    /// Thrust keys
    ThrustControls,

    /// Pause the simulation
    PauseGame,

    /// Plan and commit a burn while paused
    ApplyVelocity,

    /// Fly to the checkpoint
    ReachCheckpoint,

    /// Finish
    Complete,
}

impl StepId {
    /// Stable identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::Welcome => "welcome",
            StepId::CameraNumbers => "camera_numbers",
            StepId::ViewSpaceship => "view_spaceship",
            StepId::ZoomCamera => "zoom_camera",
            StepId::ThrustControls => "thrust_controls",
            StepId::PauseGame => "pause_game",
            StepId::ApplyVelocity => "apply_velocity",
            StepId::ReachCheckpoint => "reach_checkpoint",
            StepId::Complete => "complete",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            StepId::Welcome => "Welcome, Pilot",
            StepId::CameraNumbers => "Camera Views",
            StepId::ViewSpaceship => "Find Your Ship",
            StepId::ZoomCamera => "Zoom",
            StepId::ThrustControls => "Thrust",
            StepId::PauseGame => "Pause the Simulation",
            StepId::ApplyVelocity => "Plan a Burn",
            StepId::ReachCheckpoint => "Reach the Checkpoint",
            StepId::Complete => "Tutorial Complete",
        }
    }

    /// Step text; some steps describe the live game state
    pub fn message(&self, ctx: &GameContext) -> String {
        match self {
            StepId::Welcome => {
                "This short tutorial covers the camera, your engines and orbital maneuvers."
                    .to_string()
            }
            StepId::CameraNumbers => {
                "The number keys switch between preset views. Try the Earth view.".to_string()
            }
            StepId::ViewSpaceship => {
                "Your spaceship is easy to lose in orbit. Snap the camera back to it.".to_string()
            }
            StepId::ZoomCamera => format!(
                "Scroll the mouse wheel to zoom. Current distance: {:.1}",
                ctx.camera.distance
            ),
            StepId::ThrustControls => {
                "Fire your engines forward or backward to change your orbit.".to_string()
            }
            StepId::PauseGame => {
                "Pausing freezes the simulation so you can plan without pressure.".to_string()
            }
            StepId::ApplyVelocity => {
                if ctx.is_paused {
                    "Drag the velocity arrow to plan a burn, then commit it.".to_string()
                } else {
                    "Maneuvers are planned while paused. Resume when you are done.".to_string()
                }
            }
            StepId::ReachCheckpoint => {
                "Use what you learned to fly through the checkpoint ring.".to_string()
            }
            StepId::Complete => "You are ready for your first mission.".to_string(),
        }
    }

    pub fn hint(&self, bindings: &KeyBindings) -> String {
        match self {
            StepId::Welcome | StepId::Complete => {
                format!("Press [{}] to continue", KeyBindings::label(&bindings.confirm))
            }
            StepId::CameraNumbers => format!(
                "Press [{}] for the Earth view",
                KeyBindings::label(&bindings.earth_view)
            ),
            StepId::ViewSpaceship => format!(
                "Press [{}] to view your spaceship",
                KeyBindings::label(&bindings.spaceship_view)
            ),
            StepId::ZoomCamera => "Scroll the mouse wheel".to_string(),
            StepId::ThrustControls => format!(
                "Press [{}] or [{}] to thrust",
                KeyBindings::label(&bindings.thrust_forward),
                KeyBindings::label(&bindings.thrust_backward)
            ),
            StepId::PauseGame => "Press [SPACE] to pause".to_string(),
            StepId::ApplyVelocity => "Commit a burn or resume the game".to_string(),
            StepId::ReachCheckpoint => "Fly into the checkpoint ring".to_string(),
        }
    }

    /// Notification shown once when the primary action is recognized
    pub fn feedback(&self) -> Option<&'static str> {
        match self {
            StepId::CameraNumbers => Some("Earth view selected."),
            StepId::ViewSpaceship => Some("There she is."),
            StepId::ZoomCamera => Some("Nice zoom."),
            StepId::ThrustControls => Some("Engines fired."),
            StepId::PauseGame => Some("Simulation paused."),
            StepId::ApplyVelocity => Some("Burn committed."),
            StepId::Welcome | StepId::ReachCheckpoint | StepId::Complete => None,
        }
    }

    /// Action whose recognition marks the step's condition as met
    pub fn primary_action(&self) -> Option<Action> {
        match self {
            StepId::Welcome => Some(Action::Confirm),
            StepId::CameraNumbers => Some(Action::EarthView),
            StepId::ViewSpaceship => Some(Action::SpaceshipView),
            StepId::ZoomCamera => Some(Action::Zoomed),
            StepId::ThrustControls => Some(Action::Thrusted),
            StepId::PauseGame => Some(Action::Paused),
            StepId::ApplyVelocity => Some(Action::AppliedVelocity),
            StepId::ReachCheckpoint => None,
            StepId::Complete => Some(Action::Finished),
        }
    }

    /// Whether a separate confirm is needed after the condition is met
    pub fn requires_confirm(&self) -> bool {
        matches!(
            self,
            StepId::CameraNumbers
                | StepId::ViewSpaceship
                | StepId::ZoomCamera
                | StepId::ThrustControls
        )
    }

    /// Whether `action` is part of this step's predicate surface
    pub fn accepts(&self, action: Action) -> bool {
        self.primary_action() == Some(action)
            || (action == Action::Confirm && self.requires_confirm())
    }

    /// Translate a raw input event into the action this step recognizes
    pub fn recognize(&self, event: &InputEvent, bindings: &KeyBindings) -> Option<Action> {
        let is_confirm = |key: &String| KeyBindings::matches(&bindings.confirm, key);

        match (self, event) {
            (StepId::Welcome, InputEvent::Key(key)) if is_confirm(key) => Some(Action::Confirm),
            (StepId::Complete, InputEvent::Key(key)) if is_confirm(key) => Some(Action::Finished),

            (StepId::CameraNumbers, InputEvent::Key(key))
                if KeyBindings::matches(&bindings.earth_view, key) =>
            {
                Some(Action::EarthView)
            }
            (StepId::ViewSpaceship, InputEvent::Key(key))
                if KeyBindings::matches(&bindings.spaceship_view, key) =>
            {
                Some(Action::SpaceshipView)
            }
            (StepId::ZoomCamera, InputEvent::Wheel { delta }) if *delta != 0.0 => {
                Some(Action::Zoomed)
            }
            (StepId::ThrustControls, InputEvent::Key(key))
                if KeyBindings::matches(&bindings.thrust_forward, key)
                    || KeyBindings::matches(&bindings.thrust_backward, key) =>
            {
                Some(Action::Thrusted)
            }
            (StepId::PauseGame, InputEvent::PauseToggled { paused: true }) => Some(Action::Paused),
            (StepId::ApplyVelocity, InputEvent::VelocityApplied) => Some(Action::AppliedVelocity),

            (step, InputEvent::Key(key)) if step.requires_confirm() && is_confirm(key) => {
                Some(Action::Confirm)
            }

            _ => None,
        }
    }

    /// Whether entering this step repositions the camera
    pub fn has_camera_setup(&self) -> bool {
        matches!(
            self,
            StepId::Welcome
                | StepId::ZoomCamera
                | StepId::ThrustControls
                | StepId::ApplyVelocity
                | StepId::ReachCheckpoint
        )
    }
}

impl StepBehavior for StepId {
    fn camera_setup(&self, ctx: &mut GameContext) {
        match self {
            StepId::Welcome => camera::overview_earth(ctx),
            StepId::ZoomCamera => camera::follow_spaceship(ctx),
            StepId::ThrustControls => camera::chase_spaceship(ctx),
            StepId::ApplyVelocity => camera::top_down_spaceship(ctx),
            StepId::ReachCheckpoint => camera::look_at_earth(ctx),
            _ => {}
        }
    }

    fn check_completion(&self, ctx: &GameContext, tracker: &ActionTracker) -> bool {
        match self {
            StepId::Welcome => tracker.has(Action::Confirm),
            StepId::CameraNumbers => {
                tracker.has(Action::EarthView) && tracker.has(Action::Confirm)
            }
            StepId::ViewSpaceship => {
                tracker.has(Action::SpaceshipView) && tracker.has(Action::Confirm)
            }
            StepId::ZoomCamera => tracker.has(Action::Zoomed) && tracker.has(Action::Confirm),
            StepId::ThrustControls => {
                tracker.has(Action::Thrusted) && tracker.has(Action::Confirm)
            }
            StepId::PauseGame => tracker.has(Action::Paused),
            // Either an explicit burn or resuming the game completes the step
            StepId::ApplyVelocity => tracker.has(Action::AppliedVelocity) || !ctx.is_paused,
            StepId::ReachCheckpoint => ctx.checkpoint_collected,
            StepId::Complete => tracker.has(Action::Finished),
        }
    }

    fn on_complete(&self, ctx: &mut GameContext) {
        match self {
            StepId::ReachCheckpoint => ctx.checkpoint_collected = false,
            StepId::Complete => ctx.tutorial_mode = false,
            _ => {}
        }
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable ordered list of steps
#[derive(Debug, Clone)]
pub struct StepRegistry {
    steps: Vec<StepId>,
}

impl StepRegistry {
    /// The standard flight tutorial
    pub fn standard() -> Self {
        Self::from_steps(vec![
            StepId::Welcome,
            StepId::CameraNumbers,
            StepId::ViewSpaceship,
            StepId::ZoomCamera,
            StepId::ThrustControls,
            StepId::PauseGame,
            StepId::ApplyVelocity,
            StepId::ReachCheckpoint,
            StepId::Complete,
        ])
    }

    /// A custom sequence (duplicates are dropped, first occurrence wins)
    pub fn from_steps(steps: Vec<StepId>) -> Self {
        let mut unique = Vec::with_capacity(steps.len());
        for step in steps {
            if !unique.contains(&step) {
                unique.push(step);
            }
        }
        Self { steps: unique }
    }

    /// Step at `index`, or None past the end
    pub fn get(&self, index: usize) -> Option<StepId> {
        self.steps.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = StepId> + '_ {
        self.steps.iter().copied()
    }
}

impl Default for StepRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_order() {
        let registry = StepRegistry::standard();
        assert_eq!(registry.len(), 9);
        assert_eq!(registry.get(0), Some(StepId::Welcome));
        assert_eq!(registry.get(8), Some(StepId::Complete));
        assert_eq!(registry.get(9), None);
        assert_eq!(registry.iter().position(|s| s == StepId::ApplyVelocity), Some(6));
    }

    #[test]
    fn test_step_ids_are_unique() {
        let registry = StepRegistry::standard();
        let mut ids: Vec<_> = registry.iter().map(|s| s.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), registry.len());
    }

    #[test]
    fn test_from_steps_drops_duplicates() {
        let registry = StepRegistry::from_steps(vec![
            StepId::Welcome,
            StepId::Complete,
            StepId::Welcome,
        ]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_shared_key_recognized_per_step() {
        let bindings = KeyBindings::default();
        let s = InputEvent::key("s");

        assert_eq!(
            StepId::ViewSpaceship.recognize(&s, &bindings),
            Some(Action::SpaceshipView)
        );
        assert_eq!(
            StepId::ThrustControls.recognize(&s, &bindings),
            Some(Action::Thrusted)
        );
        assert_eq!(StepId::CameraNumbers.recognize(&s, &bindings), None);
    }

    #[test]
    fn test_confirm_key_per_step() {
        let bindings = KeyBindings::default();
        let enter = InputEvent::key("enter");

        assert_eq!(StepId::Welcome.recognize(&enter, &bindings), Some(Action::Confirm));
        assert_eq!(StepId::ZoomCamera.recognize(&enter, &bindings), Some(Action::Confirm));
        assert_eq!(StepId::Complete.recognize(&enter, &bindings), Some(Action::Finished));
        assert_eq!(StepId::PauseGame.recognize(&enter, &bindings), None);
    }

    #[test]
    fn test_confirm_steps_need_both_flags() {
        let ctx = GameContext::new();
        let mut tracker = ActionTracker::new();

        tracker.record(Action::EarthView);
        assert!(!StepId::CameraNumbers.check_completion(&ctx, &tracker));

        tracker.record(Action::Confirm);
        assert!(StepId::CameraNumbers.check_completion(&ctx, &tracker));
    }

    #[test]
    fn test_apply_velocity_dual_predicate() {
        let tracker = ActionTracker::new();
        let mut ctx = GameContext::new();
        ctx.is_paused = true;
        assert!(!StepId::ApplyVelocity.check_completion(&ctx, &tracker));

        ctx.is_paused = false;
        assert!(StepId::ApplyVelocity.check_completion(&ctx, &tracker));

        let mut tracker = ActionTracker::new();
        tracker.record(Action::AppliedVelocity);
        ctx.is_paused = true;
        assert!(StepId::ApplyVelocity.check_completion(&ctx, &tracker));
    }

    #[test]
    fn test_checkpoint_consumed_on_complete() {
        let mut ctx = GameContext::new();
        ctx.checkpoint_collected = true;
        assert!(StepId::ReachCheckpoint.check_completion(&ctx, &ActionTracker::new()));

        StepId::ReachCheckpoint.on_complete(&mut ctx);
        assert!(!ctx.checkpoint_collected);
    }

    #[test]
    fn test_dynamic_messages() {
        let mut ctx = GameContext::new();
        ctx.camera.distance = 42.0;
        assert!(StepId::ZoomCamera.message(&ctx).contains("42.0"));

        ctx.is_paused = true;
        let paused = StepId::ApplyVelocity.message(&ctx);
        ctx.is_paused = false;
        assert_ne!(paused, StepId::ApplyVelocity.message(&ctx));
    }

    #[test]
    fn test_accepts_matches_predicate_surface() {
        assert!(StepId::CameraNumbers.accepts(Action::EarthView));
        assert!(StepId::CameraNumbers.accepts(Action::Confirm));
        assert!(!StepId::CameraNumbers.accepts(Action::Thrusted));
        assert!(!StepId::PauseGame.accepts(Action::Confirm));
        assert!(!StepId::ReachCheckpoint.accepts(Action::Confirm));
    }
}
