//! Session counters.
//!
//! Collected by the service as it runs and reported once when the session
//! stops, so an operator can see at a glance how much was captured and
//! how noisy the line was.

use core::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    /// Lines that parsed as a number.
    pub readings: u64,
    /// Lines that did not.
    pub invalid_lines: u64,
    /// Rows handed to the sink.
    pub rows_written: u64,
    /// Non-empty flushes performed.
    pub flushes: u64,
}

impl SessionStats {
    /// Records accepted but not yet written.
    pub fn pending(&self) -> u64 {
        self.readings.saturating_sub(self.rows_written)
    }
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} reading(s), {} invalid line(s), {} row(s) written in {} flush(es)",
            self.readings, self.invalid_lines, self.rows_written, self.flushes
        )
    }
}
