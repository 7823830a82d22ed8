use std::time::Duration;

/// Work the engine defers to a later point on its timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// one second of the question countdown has elapsed
    CountdownTick,
    /// feedback has been shown long enough; draw the next question
    DrawNext,
    /// the post-draw hold is over; accept input again
    ReleaseInput,
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    due: Duration,
    generation: u64,
    action: Deferred,
}

/// Single deferred-action queue driven by an explicit clock.
///
/// Every entry carries the generation it was scheduled under; bumping the
/// generation invalidates everything queued before it.
#[derive(Debug, Default)]
pub struct Timers {
    now: Duration,
    generation: u64,
    queue: Vec<Scheduled>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, action: Deferred) {
        self.queue.push(Scheduled {
            due: self.now + delay,
            generation: self.generation,
            action,
        });
    }

    /// Drops every pending entry of one kind.
    pub fn cancel(&mut self, action: Deferred) {
        self.queue.retain(|s| s.action != action);
    }

    /// Drops everything and starts a new generation.
    pub fn cancel_all(&mut self) {
        self.generation += 1;
        self.queue.clear();
    }

    /// Pops the earliest live entry due at or before `until`, moving the
    /// clock to its due time. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<Deferred> {
        let generation = self.generation;
        self.queue.retain(|s| s.generation == generation);

        let idx = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= until)
            .min_by_key(|(i, s)| (s.due, *i))
            .map(|(i, _)| i)?;

        let entry = self.queue.remove(idx);
        self.now = self.now.max(entry.due);
        Some(entry.action)
    }

    /// Moves the clock to `until` once nothing else is due.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
