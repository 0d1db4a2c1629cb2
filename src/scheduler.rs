//! Poll pacing.
//!
//! The session loop runs one synchronous iteration (poll, process, maybe
//! flush) and then waits a fixed interval before the next one.  A slow
//! flush therefore delays the next poll; there is no overlap between file
//! writes and device reads.
//!
//! ```text
//!   ┌──────── iteration ────────┐           ┌──────── iteration ────────┐
//!   │ poll → buffer → (flush)   │── pause ──│ poll → buffer → (flush)   │── …
//!   └───────────────────────────┘  interval └───────────────────────────┘
//! ```

use std::thread;
use std::time::Duration;

/// Fixed-delay schedule between loop iterations.
#[derive(Debug, Clone, Copy)]
pub struct PollSchedule {
    interval: Duration,
    iterations: u64,
}

impl PollSchedule {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            iterations: 0,
        }
    }

    /// Iterations completed so far.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Mark an iteration complete and sleep for the interval.
    pub fn pause(&mut self) {
        self.iterations += 1;
        if !self.interval.is_zero() {
            thread::sleep(self.interval);
        }
    }
}
