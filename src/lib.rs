/// Interactive flight tutorial engine.
///
/// A step state machine that gates each instructional step on a real player
/// action, tracks recognized actions per step, debounces transitions and keeps
/// camera directives from interrupting the player.

pub mod config;
pub mod context;
pub mod error;
pub mod messaging;
pub mod timer;
pub mod tutorial;

pub use config::{KeyBindings, TutorialConfig};
pub use context::{Body, CameraState, CameraTarget, GameContext};
pub use messaging::{EventBus, TutorialEvent};
pub use tutorial::{
    Action, ActionTracker, InputEvent, RenderPayload, RenderSink, StepId, StepRegistry,
    TutorialController, TutorialProgress,
};
