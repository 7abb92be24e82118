use crossbeam_channel::{unbounded, Receiver, Sender, TrySendError};
use parking_lot::RwLock;
/// Event bus for tutorial events
///
/// Fan-out of every published event to all live subscribers.
use std::sync::Arc;

use super::events::TutorialEvent;

/// Subscriber ID for tracking subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(usize);

struct Subscriber {
    id: SubscriberId,
    sender: Sender<TutorialEvent>,
}

#[derive(Default)]
struct BusInner {
    subscribers: Vec<Subscriber>,
    next_id: usize,
}

/// Cloneable handle; clones share subscribers
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<RwLock<BusInner>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to events, returns a receiver and subscription ID
    pub fn subscribe(&self) -> (Receiver<TutorialEvent>, SubscriberId) {
        let (tx, rx) = unbounded();

        let mut inner = self.inner.write();
        let id = SubscriberId(inner.next_id);
        inner.next_id += 1;
        inner.subscribers.push(Subscriber { id, sender: tx });

        (rx, id)
    }

    pub fn unsubscribe(&self, id: SubscriberId) {
        self.inner.write().subscribers.retain(|s| s.id != id);
    }

    /// Publish an event to all subscribers without blocking.
    /// Subscribers whose receiver was dropped are removed.
    pub fn publish(&self, event: TutorialEvent) {
        tracing::trace!("Publishing: {}", event.description());

        let mut disconnected = Vec::new();
        {
            let inner = self.inner.read();
            for subscriber in inner.subscribers.iter() {
                if let Err(TrySendError::Disconnected(_)) =
                    subscriber.sender.try_send(event.clone())
                {
                    disconnected.push(subscriber.id);
                }
            }
        }

        if !disconnected.is_empty() {
            self.inner
                .write()
                .subscribers
                .retain(|s| !disconnected.contains(&s.id));
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.read().subscribers.len()
    }

    pub fn clear(&self) {
        self.inner.write().subscribers.clear();
    }
}
