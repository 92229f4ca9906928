//! Explicit tick scheduler.
//!
//! Replaces a free-running polling timer: the owner asks which tick
//! boundaries have passed and drives the tank with each one in order.

use aquarium_logic::config::IndicatorConfig;
use aquarium_logic::indicators::Timestamp;

/// Default cap on boundaries returned by one [`TickScheduler::due_ticks`] call.
pub const DEFAULT_MAX_CATCH_UP: usize = 600;

/// Fixed-interval tick boundaries.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    tick_ms: i64,
    next_due: Timestamp,
    max_catch_up: usize,
}

impl TickScheduler {
    /// First tick is due one interval after `start`. A zero interval is
    /// treated as 1 ms.
    pub fn new(tick_ms: u64, start: Timestamp) -> Self {
        let tick_ms = i64::try_from(tick_ms).unwrap_or(i64::MAX).max(1);
        Self {
            tick_ms,
            next_due: start.saturating_add(tick_ms),
            max_catch_up: DEFAULT_MAX_CATCH_UP,
        }
    }

    /// Scheduler using the config's suggested polling interval.
    pub fn from_config(config: &IndicatorConfig, start: Timestamp) -> Self {
        Self::new(config.tick_ms, start)
    }

    pub fn with_max_catch_up(mut self, max_catch_up: usize) -> Self {
        self.max_catch_up = max_catch_up.max(1);
        self
    }

    pub fn tick_ms(&self) -> i64 {
        self.tick_ms
    }

    pub fn next_due(&self) -> Timestamp {
        self.next_due
    }

    /// Every tick boundary at or before `now` not yet returned, oldest first.
    ///
    /// After a long stall only the newest `max_catch_up` boundaries are
    /// returned. The first of them absorbs the skipped time, since decay is
    /// interpolated from the previous snapshot.
    pub fn due_ticks(&mut self, now: Timestamp) -> Vec<Timestamp> {
        if now < self.next_due {
            return Vec::new();
        }

        let behind = (now - self.next_due) / self.tick_ms + 1;
        let count = usize::try_from(behind).unwrap_or(usize::MAX);
        let last = self.next_due + (behind - 1) * self.tick_ms;

        let yielded = count.min(self.max_catch_up);
        if yielded < count {
            log::warn!(
                "Scheduler {} ticks behind, coalescing {} into the next tick",
                count,
                count - yielded
            );
        }

        let first = last - (yielded as i64 - 1) * self.tick_ms;
        let ticks = (0..yielded as i64)
            .map(|i| first + i * self.tick_ms)
            .collect();
        self.next_due = last + self.tick_ms;
        ticks
    }
}
