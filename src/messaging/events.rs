/// Tutorial lifecycle events
///
/// Events describe things that already happened and are broadcast to every
/// subscriber of the event bus.

use crate::tutorial::camera::SuppressReason;
use crate::tutorial::steps::StepId;

#[derive(Debug, Clone, PartialEq)]
pub enum TutorialEvent {
    /// A run started at step 0
    Started { total_steps: usize },

    /// A step became the current step
    StepEntered { index: usize, id: StepId },

    /// The current step's primary action was recognized
    StepSatisfied { id: StepId },

    /// The completion predicate held; the next step is scheduled
    TransitionScheduled { from: usize, to: usize },

    /// A camera directive was skipped on step entry
    CameraSuppressed { id: StepId, reason: SuppressReason },

    /// The panel was hidden by the host
    Paused,

    /// The panel was shown again
    Resumed,

    /// The run ended; `finished` is set when completed or skipped
    Ended { finished: bool },
}

impl TutorialEvent {
    /// Short description for logging
    pub fn description(&self) -> String {
        match self {
            TutorialEvent::Started { total_steps } => {
                format!("Tutorial started ({} steps)", total_steps)
            }
            TutorialEvent::StepEntered { index, id } => {
                format!("Entered step {} ({})", index, id)
            }
            TutorialEvent::StepSatisfied { id } => format!("Step {} satisfied", id),
            TutorialEvent::TransitionScheduled { from, to } => {
                format!("Transition scheduled {} -> {}", from, to)
            }
            TutorialEvent::CameraSuppressed { id, reason } => {
                format!("Camera setup for {} suppressed: {}", id, reason.description())
            }
            TutorialEvent::Paused => "Tutorial panel hidden".to_string(),
            TutorialEvent::Resumed => "Tutorial panel shown".to_string(),
            TutorialEvent::Ended { finished } => {
                format!("Tutorial ended (finished: {})", finished)
            }
        }
    }
}
