/// Messaging module for tutorial events
///
/// The controller publishes lifecycle events; host components (progress
/// persistence, logging, analytics) subscribe to them.
///
/// ```text
/// ┌────────────┐     Event      ┌─────────────┐
/// │ Controller │ ─────────────> │  Event Bus  │
/// └────────────┘                └─────────────┘
///                                      │
///                                      │ Publishes
///                                      ▼
///                                ┌──────────┐
///                                │ Handlers │
///                                └──────────┘
/// ```
///
/// ## Usage
///
/// ```rust,ignore
/// let event_bus = EventBus::new();
/// let (rx, _id) = event_bus.subscribe();
///
/// let mut controller = TutorialController::new(registry, config, sink)
///     .with_event_bus(event_bus.clone());
///
/// while let Ok(event) = rx.try_recv() {
///     if let TutorialEvent::Ended { finished: true } = event {
///         // persist progress
///     }
/// }
/// ```

pub mod events;
pub mod bus;

// Re-export commonly used types
pub use events::TutorialEvent;
pub use bus::{EventBus, SubscriberId};
