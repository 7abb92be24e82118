use std::time::Duration;

/// Handle to a scheduled action, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

struct Scheduled<T> {
    handle: TimerHandle,
    due: Duration,
    action: T,
}

/// Frame-driven scheduler for delayed actions.
///
/// Time only moves when the owner calls `advance` with the frame delta, so a
/// scheduled action can never fire in the middle of another operation.
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Schedule `action` to fire once `delay` has elapsed
    pub fn schedule(&mut self, delay: Duration, action: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;

        self.pending.push(Scheduled {
            handle,
            due: self.now.saturating_add(delay),
            action,
        });

        handle
    }

    /// Cancel a pending action. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.handle != handle);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Advance the clock and return every action that became due, earliest first
    pub fn advance(&mut self, dt: Duration) -> Vec<(TimerHandle, T)> {
        self.now = self.now.saturating_add(dt);

        let now = self.now;
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.due <= now);
        self.pending = pending;

        // Ties keep scheduling order
        due.sort_by_key(|s| (s.due, s.handle.0));
        due.into_iter().map(|s| (s.handle, s.action)).collect()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
