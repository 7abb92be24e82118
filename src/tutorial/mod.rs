/// Flight tutorial module
///
/// Walks a new pilot through the controls, one gated step at a time.
///
/// ## Architecture
///
/// ```text
/// TutorialController
///   ├── StepRegistry (ordered StepIds, each a StepBehavior)
///   ├── ActionTracker (recognized actions, step-scoped or persistent)
///   ├── TutorialState (index, active/paused/transitioning, step completed)
///   ├── CameraGuard (suppresses camera directives mid-maneuver)
///   └── RenderSink (host panel)
/// ```
///
/// ## Usage
///
/// ```rust,ignore
/// use tutorial::{StepRegistry, TutorialController};
///
/// let mut controller = TutorialController::new(StepRegistry::standard(), config, sink);
/// controller.start(&mut ctx);
///
/// // Each input event from the host
/// controller.handle_input(&InputEvent::key("enter"));
///
/// // Each frame
/// controller.tick(dt, &mut ctx);
/// ```
///
/// ## Completion
///
/// Most steps complete in two tiers: the step's own action marks its
/// condition as met, then a confirm advances. Steps whose predicate is the
/// goal itself (pausing, committing a burn, reaching the checkpoint) advance
/// as soon as it holds. Every advance waits out a short transition delay.

pub mod actions;
pub mod camera;
pub mod controller;
pub mod input;
pub mod persistence;
pub mod render;
pub mod state;
pub mod steps;

// Re-export commonly used types
pub use actions::{Action, ActionScope, ActionTracker};
pub use camera::{CameraGuard, SuppressReason};
pub use controller::TutorialController;
pub use input::InputEvent;
pub use persistence::TutorialProgress;
pub use render::{RecordingSink, RenderPayload, RenderSink};
pub use state::TutorialState;
pub use steps::{StepBehavior, StepId, StepRegistry};
