//! Mock adapters for integration tests.
//!
//! A scripted serial source, an in-memory record sink, a stepping clock
//! and an event recorder, so whole sessions can run without a device or
//! a file system.

use std::cell::Cell;
use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use sensorlog::app::events::AppEvent;
use sensorlog::app::ports::{Clock, EventSink, ReadingSource, RecordSink};
use sensorlog::buffer::LogRecord;
use sensorlog::error::{PortError, SinkError};

// ── Scripted serial source ────────────────────────────────────

#[derive(Debug, Clone)]
pub enum Scripted {
    /// A line arrives (as sent, including the line ending).
    Line(String),
    /// Nothing waiting on this poll.
    Idle,
    /// The device fails.
    Fail(io::ErrorKind),
}

/// Replays a script, then raises its stop flag once everything has been
/// consumed (like an operator pressing Ctrl-C after the last reading).
pub struct ScriptedSource {
    script: VecDeque<Scripted>,
    stop: Arc<AtomicBool>,
    pub polls: usize,
}

#[allow(dead_code)]
impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            script: script.into_iter().collect(),
            stop: Arc::new(AtomicBool::new(false)),
            polls: 0,
        }
    }

    /// One `Line` per entry, each terminated with `\r\n`.
    pub fn lines(lines: &[&str]) -> Self {
        Self::new(lines.iter().map(|l| Scripted::Line(format!("{l}\r\n"))))
    }

    /// Flag raised when the script runs out.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }
}

impl ReadingSource for ScriptedSource {
    fn poll_line(&mut self) -> Result<Option<String>, PortError> {
        self.polls += 1;
        let next = self.script.pop_front();
        if self.script.is_empty() {
            self.stop.store(true, Ordering::Release);
        }
        match next {
            Some(Scripted::Line(line)) => Ok(Some(line)),
            Some(Scripted::Idle) | None => Ok(None),
            Some(Scripted::Fail(kind)) => Err(PortError::Io(io::Error::from(kind))),
        }
    }
}

// ── In-memory sink ────────────────────────────────────────────

#[derive(Default)]
pub struct MemorySink {
    pub rows: Vec<LogRecord>,
    /// Size of each successful append, in call order.
    pub batches: Vec<usize>,
    /// Fail every append once this many have succeeded.
    pub fail_after: Option<usize>,
}

#[allow(dead_code)]
impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(appends: usize) -> Self {
        Self {
            fail_after: Some(appends),
            ..Self::default()
        }
    }

    pub fn values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.value).collect()
    }
}

impl RecordSink for MemorySink {
    fn append(&mut self, records: &[LogRecord]) -> Result<(), SinkError> {
        if self.fail_after.is_some_and(|n| self.batches.len() >= n) {
            return Err(SinkError::Io(io::Error::other("disk full")));
        }
        self.rows.extend_from_slice(records);
        self.batches.push(records.len());
        Ok(())
    }
}

// ── Stepping clock ────────────────────────────────────────────

/// Starts at 2024-03-05 02:07:09 PM and advances 100 ms per call.
pub struct SteppingClock {
    now: Cell<NaiveDateTime>,
}

impl SteppingClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(
                NaiveDate::from_ymd_opt(2024, 3, 5)
                    .unwrap()
                    .and_hms_opt(14, 7, 9)
                    .unwrap(),
            ),
        }
    }
}

impl Default for SteppingClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> NaiveDateTime {
        let now = self.now.get();
        self.now.set(now + TimeDelta::milliseconds(100));
        now
    }
}

// ── Event recorder ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingEvents {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalid_lines(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::InvalidReading(invalid) => Some(invalid.line.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingEvents {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
