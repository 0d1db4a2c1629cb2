//! In-memory record buffer and flush policy.
//!
//! Records accumulate in a fixed-capacity vector sized to the flush
//! threshold.  The buffer is drained into a [`RecordSink`] either when it
//! fills up or when the session shuts down.  A failed write leaves every
//! record in place so nothing is dropped silently.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::app::ports::RecordSink;
use crate::config::FLUSH_THRESHOLD;
use crate::error::SinkError;

/// Row timestamp format, e.g. `2024-03-05 02:07:09 PM`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %I:%M:%S %p";

/// One CSV row: when the value was logged and the value itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    pub timestamp: String,
    pub value: f64,
}

impl LogRecord {
    pub fn new(at: NaiveDateTime, value: f64) -> Self {
        Self {
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            value,
        }
    }
}

/// Why a flush happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushReason {
    /// The buffer reached [`FLUSH_THRESHOLD`].
    Threshold,
    /// The session is stopping.
    Drain,
    /// Explicitly requested.
    Manual,
}

/// Append-only buffer, drained in insertion order.
#[derive(Debug, Default)]
pub struct RecordBuffer {
    records: heapless::Vec<LogRecord, FLUSH_THRESHOLD>,
}

impl RecordBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.  Returns `Err(record)` if the buffer is already
    /// full, which only happens when a previous flush failed.
    pub fn push(&mut self, record: LogRecord) -> Result<(), LogRecord> {
        self.records.push(record)
    }

    /// Whether the threshold flush is due.
    pub fn is_full(&self) -> bool {
        self.records.is_full()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// Write every buffered record to `sink`, then clear.
    ///
    /// Returns the number of rows written.  On error the buffer is left
    /// untouched.
    pub fn flush(&mut self, sink: &mut impl RecordSink) -> Result<usize, SinkError> {
        if self.records.is_empty() {
            return Ok(0);
        }
        sink.append(&self.records)?;
        let written = self.records.len();
        self.records.clear();
        Ok(written)
    }
}
