/// Render sink interface
///
/// The host's tutorial panel. It only displays what the controller pushes and
/// never feeds state back except through input events.

use serde::Serialize;

/// Everything the panel shows for the current step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPayload {
    pub step_id: &'static str,
    pub step_number: usize,
    pub total_steps: usize,
    pub title: String,
    pub message: String,
    pub hint: String,
    pub feedback: Option<String>,
}

pub trait RenderSink {
    /// Display (or refresh) the panel contents
    fn render(&mut self, payload: &RenderPayload);

    /// Make the panel visible
    fn show(&mut self);

    /// Hide the panel
    fn hide(&mut self);
}

/// Sink that keeps what it was given, for tests and tooling
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub payloads: Vec<RenderPayload>,
    pub visible: bool,
    pub hide_count: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&RenderPayload> {
        self.payloads.last()
    }
}

impl RenderSink for RecordingSink {
    fn render(&mut self, payload: &RenderPayload) {
        self.payloads.push(payload.clone());
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
        self.hide_count += 1;
    }
}
