//! Cancellable repeating tasks driven by elapsed time.
//!
//! The host calls `advance(dt)` with wall-clock time; a task accumulates it
//! and reports how many whole periods elapsed, carrying the remainder
//! forward. Stopping is immediate and discards the remainder.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatingTask {
    interval_ms: u64,
    accumulator: u64,
    running: bool,
}

impl RepeatingTask {
    /// A stopped task. A zero interval is clamped to 1 ms.
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            accumulator: 0,
            running: false,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start from a fresh period. No effect on a running task.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.accumulator = 0;
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0;
    }

    /// Add elapsed time; returns the number of periods that completed.
    pub fn advance(&mut self, dt_ms: u64) -> u64 {
        if !self.running {
            return 0;
        }
        self.accumulator = self.accumulator.saturating_add(dt_ms);
        let fired = self.accumulator / self.interval_ms;
        self.accumulator %= self.interval_ms;
        fired
    }

    /// Time carried toward the next period.
    pub fn pending_ms(&self) -> u64 {
        self.accumulator
    }
}
