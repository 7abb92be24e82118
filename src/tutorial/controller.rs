/// Tutorial controller
///
/// The step state machine: owns the step index and lifecycle flags, observes
/// recognized actions, evaluates the active step once per frame and schedules
/// transitions.
use std::time::Duration;

use tracing::{debug, info};

use super::actions::{Action, ActionTracker};
use super::camera::CameraGuard;
use super::input::InputEvent;
use super::render::{RenderPayload, RenderSink};
use super::state::TutorialState;
use super::steps::{StepBehavior, StepId, StepRegistry};
use crate::config::{KeyBindings, TutorialConfig};
use crate::context::GameContext;
use crate::messaging::{EventBus, TutorialEvent};
use crate::timer::{Scheduler, TimerHandle};

/// Work deferred to a later frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    EnterStep(usize),
    ExpireFeedback,
}

pub struct TutorialController<S: RenderSink> {
    registry: StepRegistry,
    config: TutorialConfig,
    guard: CameraGuard,
    state: TutorialState,
    tracker: ActionTracker,
    scheduler: Scheduler<Deferred>,
    pending_transition: Option<TimerHandle>,
    pending_feedback: Option<TimerHandle>,
    message: String,
    hint: String,
    feedback: Option<String>,
    sink: S,
    events: Option<EventBus>,
}

impl<S: RenderSink> TutorialController<S> {
    pub fn new(registry: StepRegistry, config: TutorialConfig, sink: S) -> Self {
        let guard = CameraGuard::new(config.maneuver_epsilon);

        Self {
            registry,
            config,
            guard,
            state: TutorialState::new(),
            tracker: ActionTracker::new(),
            scheduler: Scheduler::new(),
            pending_transition: None,
            pending_feedback: None,
            message: String::new(),
            hint: String::new(),
            feedback: None,
            sink,
            events: None,
        }
    }

    /// Publish lifecycle events on `bus`
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn state(&self) -> &TutorialState {
        &self.state
    }

    pub fn tracker(&self) -> &ActionTracker {
        &self.tracker
    }

    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    pub fn config(&self) -> &TutorialConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Whether the flow was completed or skipped
    pub fn is_finished(&self) -> bool {
        self.tracker.has(Action::Finished)
    }

    /// The current step while a run is active
    pub fn current_step(&self) -> Option<StepId> {
        if !self.state.is_active() {
            return None;
        }
        self.registry.get(self.state.current_step_index())
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Completion progress (0.0-1.0)
    pub fn progress(&self) -> f32 {
        if self.is_finished() {
            return 1.0;
        }
        self.state.progress(self.registry.len())
    }

    /// Start (or restart) the flow at the first step
    pub fn start(&mut self, ctx: &mut GameContext) {
        self.scheduler.cancel_all();
        self.pending_transition = None;
        self.pending_feedback = None;

        self.state.reset();
        self.tracker.clear_all();
        ctx.tutorial_mode = true;

        info!("Tutorial started ({} steps)", self.registry.len());
        self.publish(TutorialEvent::Started {
            total_steps: self.registry.len(),
        });

        self.sink.show();
        self.enter_step(0, ctx);
    }

    /// Advance one frame.
    ///
    /// Fires due deferred work first, then evaluates the active step unless
    /// inactive, paused or already transitioning.
    pub fn tick(&mut self, dt: f32, ctx: &mut GameContext) {
        if !self.state.is_active() {
            return;
        }

        let elapsed = Duration::try_from_secs_f32(dt.max(0.0)).unwrap_or(Duration::ZERO);
        for (handle, deferred) in self.scheduler.advance(elapsed) {
            if !self.state.is_active() {
                break;
            }

            match deferred {
                Deferred::EnterStep(index) => {
                    if self.pending_transition != Some(handle) {
                        continue;
                    }
                    self.pending_transition = None;
                    self.enter_step(index, ctx);
                    self.state.set_transitioning(false);
                }
                Deferred::ExpireFeedback => {
                    if self.pending_feedback == Some(handle) {
                        self.pending_feedback = None;
                        self.feedback = None;
                        self.render(ctx);
                    }
                }
            }
        }

        if !self.state.is_evaluating() {
            return;
        }

        let index = self.state.current_step_index();
        let Some(step) = self.registry.get(index) else {
            return;
        };

        if !step.check_completion(ctx, &self.tracker) {
            return;
        }

        self.state.set_transitioning(true);
        step.on_complete(ctx);

        debug!("Step {} complete, next step in {:?}", step, self.config.transition_delay());
        self.publish(TutorialEvent::TransitionScheduled {
            from: index,
            to: index + 1,
        });

        let handle = self
            .scheduler
            .schedule(self.config.transition_delay(), Deferred::EnterStep(index + 1));
        self.pending_transition = Some(handle);
    }

    /// Translate a raw input event for the active step and observe it
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let Some(step) = self.current_step() else {
            return false;
        };

        match step.recognize(event, &self.config.bindings) {
            Some(action) => self.observe(action),
            None => false,
        }
    }

    /// Record `action` if the active step accepts it right now.
    ///
    /// The step's primary action is taken only before the step is completed;
    /// a confirm is taken only after. Returns whether the action was recorded.
    pub fn observe(&mut self, action: Action) -> bool {
        let Some(step) = self.current_step() else {
            return false;
        };

        if !step.accepts(action) {
            debug!("Ignoring {} during step {}", action, step);
            return false;
        }

        if action == Action::Confirm && step.requires_confirm() {
            if !self.state.step_completed() {
                return false;
            }
            self.tracker.record(Action::Confirm);
            debug!("Step {} confirmed", step);
            return true;
        }

        if self.state.step_completed() {
            return false;
        }

        self.tracker.record(action);
        if step.primary_action() == Some(action) {
            self.state.mark_step_completed();
            self.satisfy(step);
        }

        true
    }

    /// Finish immediately, bypassing the remaining steps
    pub fn skip(&mut self, ctx: &mut GameContext) {
        info!("Tutorial skipped");
        self.tracker.record(Action::Finished);
        self.end(ctx);
    }

    /// Stop the flow and hide the panel
    pub fn end(&mut self, ctx: &mut GameContext) {
        self.scheduler.cancel_all();
        self.pending_transition = None;
        self.pending_feedback = None;

        let was_active = self.state.is_active();
        self.state.deactivate();
        ctx.tutorial_mode = false;
        self.sink.hide();

        if was_active {
            let finished = self.is_finished();
            info!("Tutorial ended (finished: {})", finished);
            self.publish(TutorialEvent::Ended { finished });
        }
    }

    /// Hide the panel without touching progress
    pub fn pause(&mut self) {
        if !self.state.is_active() || self.state.is_paused() {
            return;
        }
        self.state.set_paused(true);
        self.sink.hide();
        self.publish(TutorialEvent::Paused);
    }

    /// Show the panel again
    pub fn resume(&mut self, ctx: &GameContext) {
        if !self.state.is_active() || !self.state.is_paused() {
            return;
        }
        self.state.set_paused(false);
        self.sink.show();
        self.render(ctx);
        self.publish(TutorialEvent::Resumed);
    }

    /// Make `index` the current step; past the end this ends the flow
    fn enter_step(&mut self, index: usize, ctx: &mut GameContext) {
        let Some(step) = self.registry.get(index) else {
            self.end(ctx);
            return;
        };

        self.state.enter(index);
        self.tracker.clear_step_scoped();
        self.clear_feedback();
        self.hint = step.hint(&self.config.bindings);

        if step.has_camera_setup() {
            match self.guard.check(ctx) {
                None => step.camera_setup(ctx),
                Some(reason) => {
                    debug!("Camera setup for {} suppressed: {}", step, reason.description());
                    self.publish(TutorialEvent::CameraSuppressed { id: step, reason });
                }
            }
        }

        info!("Step {}/{}: {}", index + 1, self.registry.len(), step);
        self.publish(TutorialEvent::StepEntered { index, id: step });
        self.render(ctx);
    }

    /// First recognition of the step's primary action
    fn satisfy(&mut self, step: StepId) {
        if let Some(text) = step.feedback() {
            self.clear_feedback();
            self.feedback = Some(text.to_string());
            let handle = self
                .scheduler
                .schedule(self.config.feedback_duration(), Deferred::ExpireFeedback);
            self.pending_feedback = Some(handle);
        }

        if step.requires_confirm() {
            self.hint = format!(
                "Press [{}] to continue",
                KeyBindings::label(&self.config.bindings.confirm)
            );
        }

        debug!("Step {} condition met", step);
        self.publish(TutorialEvent::StepSatisfied { id: step });
        self.render_current();
    }

    fn clear_feedback(&mut self) {
        if let Some(handle) = self.pending_feedback.take() {
            self.scheduler.cancel(handle);
        }
        self.feedback = None;
    }

    fn payload(&self, step: StepId) -> RenderPayload {
        RenderPayload {
            step_id: step.as_str(),
            step_number: self.state.current_step_index() + 1,
            total_steps: self.registry.len(),
            title: step.title().to_string(),
            message: self.message.clone(),
            hint: self.hint.clone(),
            feedback: self.feedback.clone(),
        }
    }

    /// Recompute the step message from the context and push the payload
    fn render(&mut self, ctx: &GameContext) {
        if let Some(step) = self.current_step() {
            self.message = step.message(ctx);
        }
        self.render_current();
    }

    /// Push the payload with the last computed message
    fn render_current(&mut self) {
        if self.state.is_paused() {
            return;
        }
        if let Some(step) = self.current_step() {
            let payload = self.payload(step);
            self.sink.render(&payload);
        }
    }

    fn publish(&self, event: TutorialEvent) {
        if let Some(bus) = &self.events {
            bus.publish(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Body, CameraState, CameraTarget};
    use crate::tutorial::camera::SuppressReason;
    use crate::tutorial::render::RecordingSink;
    use crossbeam_channel::Receiver;
    use glam::Vec3;

    fn controller(registry: StepRegistry) -> TutorialController<RecordingSink> {
        TutorialController::new(registry, TutorialConfig::default(), RecordingSink::new())
    }

    fn controller_with_events(
        registry: StepRegistry,
    ) -> (TutorialController<RecordingSink>, Receiver<TutorialEvent>) {
        let bus = EventBus::new();
        let (rx, _id) = bus.subscribe();
        (controller(registry).with_event_bus(bus), rx)
    }

    fn game() -> GameContext {
        GameContext::new()
            .with_spaceship(Body::new("Shuttle", Vec3::new(0.0, 0.0, 70.0), 0.5))
            .with_earth(Body::new("Earth", Vec3::ZERO, 63.7))
    }

    fn entered(rx: &Receiver<TutorialEvent>) -> Vec<usize> {
        rx.try_iter()
            .filter_map(|event| match event {
                TutorialEvent::StepEntered { index, .. } => Some(index),
                _ => None,
            })
            .collect()
    }

    fn press(c: &mut TutorialController<RecordingSink>, key: &str) -> bool {
        c.handle_input(&InputEvent::key(key))
    }

    #[test]
    fn test_start_resets_everything() {
        let mut ctx = game();
        let mut c = controller(StepRegistry::standard());

        c.start(&mut ctx);
        press(&mut c, "enter");
        c.tick(0.0, &mut ctx);
        c.tick(0.5, &mut ctx);
        assert_eq!(c.current_step(), Some(StepId::CameraNumbers));
        press(&mut c, "1");

        c.start(&mut ctx);
        assert!(c.is_active());
        assert!(ctx.tutorial_mode);
        assert_eq!(c.state().current_step_index(), 0);
        assert!(!c.state().is_transitioning());
        assert!(!c.state().step_completed());
        assert!(c.tracker().is_empty());
        assert!(c.sink().visible);
    }

    #[test]
    fn test_transition_fires_exactly_once() {
        let mut ctx = game();
        let (mut c, rx) = controller_with_events(StepRegistry::standard());
        c.start(&mut ctx);
        assert_eq!(entered(&rx), vec![0]);

        assert!(press(&mut c, "enter"));
        c.tick(0.0, &mut ctx);
        assert!(c.state().is_transitioning());

        // Predicate still holds, but nothing new is scheduled
        c.tick(0.2, &mut ctx);
        c.tick(0.2, &mut ctx);
        assert_eq!(c.state().current_step_index(), 0);
        assert!(entered(&rx).is_empty());

        c.tick(0.2, &mut ctx);
        assert_eq!(c.state().current_step_index(), 1);
        assert!(!c.state().is_transitioning());

        c.tick(1.0, &mut ctx);
        assert_eq!(entered(&rx), vec![1]);
    }

    #[test]
    fn test_flags_cleared_on_step_entry() {
        let mut ctx = game();
        let mut c = controller(StepRegistry::from_steps(vec![
            StepId::CameraNumbers,
            StepId::ViewSpaceship,
        ]));
        c.start(&mut ctx);

        press(&mut c, "1");
        press(&mut c, "enter");
        assert!(c.tracker().has(Action::EarthView));

        c.tick(0.0, &mut ctx);
        c.tick(0.5, &mut ctx);
        assert_eq!(c.current_step(), Some(StepId::ViewSpaceship));
        assert!(!c.tracker().has(Action::EarthView));
        assert!(!c.tracker().has(Action::Confirm));
        assert!(!c.state().step_completed());
    }

    #[test]
    fn test_confirm_before_condition_is_ignored() {
        let mut ctx = game();
        let mut c = controller(StepRegistry::from_steps(vec![StepId::CameraNumbers]));
        c.start(&mut ctx);

        assert!(!press(&mut c, "enter"));
        assert!(!c.tracker().has(Action::Confirm));

        assert!(press(&mut c, "1"));
        assert!(!press(&mut c, "1"));
        assert!(press(&mut c, "enter"));
    }

    #[test]
    fn test_camera_suppressed_while_maneuvering() {
        let mut ctx = game();
        ctx.is_paused = true;
        ctx.velocity_adjustment = Vec3::new(0.5, 0.0, 0.0);

        let (mut c, rx) = controller_with_events(StepRegistry::from_steps(vec![StepId::ZoomCamera]));
        c.start(&mut ctx);

        assert_eq!(ctx.camera, CameraState::default());
        assert!(rx.try_iter().any(|e| matches!(
            e,
            TutorialEvent::CameraSuppressed {
                id: StepId::ZoomCamera,
                reason: SuppressReason::Maneuvering
            }
        )));
    }

    #[test]
    fn test_camera_suppressed_after_collision() {
        let mut ctx = game();
        ctx.recent_collision_time = 1.5;

        let mut c = controller(StepRegistry::from_steps(vec![StepId::ThrustControls]));
        c.start(&mut ctx);
        assert_eq!(ctx.camera, CameraState::default());
    }

    #[test]
    fn test_camera_applied_when_idle() {
        let mut ctx = game();
        let mut c = controller(StepRegistry::from_steps(vec![StepId::ZoomCamera]));
        c.start(&mut ctx);

        assert_eq!(ctx.camera.follow_target, CameraTarget::Spaceship);
        assert_eq!(ctx.camera.distance, 25.0);
    }

    #[test]
    fn test_skip_cancels_pending_transition() {
        let mut ctx = game();
        let (mut c, rx) = controller_with_events(StepRegistry::standard());
        c.start(&mut ctx);

        press(&mut c, "enter");
        c.tick(0.0, &mut ctx);
        assert!(c.state().is_transitioning());
        let camera_before = ctx.camera.clone();

        c.skip(&mut ctx);
        assert!(!c.is_active());
        assert!(c.is_finished());
        assert!(!ctx.tutorial_mode);
        assert!(!c.sink().visible);

        c.tick(1.0, &mut ctx);
        assert_eq!(ctx.camera, camera_before);
        assert_eq!(c.state().current_step_index(), 0);

        let events: Vec<_> = rx.try_iter().collect();
        assert!(events.contains(&TutorialEvent::Ended { finished: true }));
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, TutorialEvent::StepEntered { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_registry_exhaustion_ends_flow() {
        let mut ctx = game();
        let (mut c, rx) = controller_with_events(StepRegistry::from_steps(vec![StepId::Complete]));
        c.start(&mut ctx);

        assert!(press(&mut c, "enter"));
        assert!(c.tracker().has(Action::Finished));
        c.tick(0.0, &mut ctx);
        c.tick(0.5, &mut ctx);

        assert!(!c.is_active());
        assert!(c.is_finished());
        assert_eq!(c.progress(), 1.0);
        assert!(rx.try_iter().any(|e| e == TutorialEvent::Ended { finished: true }));
    }

    #[test]
    fn test_end_without_finishing() {
        let mut ctx = game();
        let (mut c, rx) = controller_with_events(StepRegistry::standard());
        c.start(&mut ctx);

        c.end(&mut ctx);
        assert!(!c.is_active());
        assert!(!c.is_finished());
        assert!(rx.try_iter().any(|e| e == TutorialEvent::Ended { finished: false }));

        // Inactive controller ignores everything
        assert!(!press(&mut c, "enter"));
        c.tick(1.0, &mut ctx);
        assert!(c.current_step().is_none());
    }

    #[test]
    fn test_pause_blocks_evaluation_and_keeps_progress() {
        let mut ctx = game();
        let mut c = controller(StepRegistry::standard());
        c.start(&mut ctx);
        press(&mut c, "enter");

        c.pause();
        assert!(c.state().is_paused());
        assert!(!c.sink().visible);

        c.tick(1.0, &mut ctx);
        assert!(!c.state().is_transitioning());
        assert_eq!(c.state().current_step_index(), 0);
        assert!(c.tracker().has(Action::Confirm));

        let rendered = c.sink().payloads.len();
        c.resume(&ctx);
        assert!(c.sink().visible);
        assert_eq!(c.sink().payloads.len(), rendered + 1);

        c.tick(0.0, &mut ctx);
        assert!(c.state().is_transitioning());
    }

    #[test]
    fn test_feedback_shown_then_expires() {
        let mut ctx = game();
        let mut c = controller(StepRegistry::from_steps(vec![StepId::CameraNumbers]));
        c.start(&mut ctx);

        press(&mut c, "1");
        assert_eq!(c.feedback(), Some("Earth view selected."));
        assert_eq!(c.sink().last().and_then(|p| p.feedback.as_deref()), Some("Earth view selected."));

        c.tick(1.0, &mut ctx);
        assert!(c.feedback().is_some());
        c.tick(1.0, &mut ctx);
        assert!(c.feedback().is_none());
        assert_eq!(c.sink().last().and_then(|p| p.feedback.clone()), None);
    }

    #[test]
    fn test_payload_reflects_step() {
        let mut ctx = game();
        let mut c = controller(StepRegistry::standard());
        c.start(&mut ctx);

        let payload = c.sink().last().cloned().unwrap();
        assert_eq!(payload.step_id, "welcome");
        assert_eq!(payload.step_number, 1);
        assert_eq!(payload.total_steps, 9);
        assert_eq!(payload.title, StepId::Welcome.title());
        assert_eq!(payload.hint, "Press [ENTER] to continue");
    }

    #[test]
    fn test_observe_rejects_foreign_actions() {
        let mut ctx = game();
        let mut c = controller(StepRegistry::standard());
        c.start(&mut ctx);

        assert!(!c.observe(Action::Thrusted));
        assert!(!c.observe(Action::Finished));
        assert!(c.tracker().is_empty());
    }

    #[test]
    fn test_transition_completes_while_hidden() {
        let mut ctx = game();
        let mut c = controller(StepRegistry::standard());
        c.start(&mut ctx);
        press(&mut c, "enter");
        c.tick(0.0, &mut ctx);
        assert!(c.state().is_transitioning());

        c.pause();
        let rendered = c.sink().payloads.len();

        // Deferred transition still fires, but nothing is drawn while hidden
        c.tick(0.6, &mut ctx);
        assert_eq!(c.current_step(), Some(StepId::CameraNumbers));
        assert!(!c.state().is_transitioning());
        assert_eq!(c.sink().payloads.len(), rendered);
        assert!(!c.sink().visible);

        c.resume(&ctx);
        assert!(c.sink().visible);
        assert_eq!(c.sink().payloads.len(), rendered + 1);
        assert_eq!(c.sink().last().map(|p| p.step_id), Some("camera_numbers"));
    }

    #[test]
    fn test_huge_frame_delta_does_not_panic() {
        let mut ctx = game();
        let mut c = controller(StepRegistry::standard());
        c.start(&mut ctx);
        press(&mut c, "enter");

        c.tick(1.0e19, &mut ctx);
        c.tick(1.0e19, &mut ctx);
        c.tick(f32::MAX, &mut ctx);
        assert_eq!(c.current_step(), Some(StepId::CameraNumbers));
    }
}
