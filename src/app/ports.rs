//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ LoggerService (domain)
//! ```
//!
//! Driven adapters (serial port, CSV file, clock, interrupt flag, event
//! log) implement these traits.  The [`LoggerService`](super::service::LoggerService)
//! consumes them via generics, so the domain core never touches a device
//! or a file directly.

use core::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDateTime;

use crate::buffer::LogRecord;
use crate::error::{PortError, SinkError};

// ───────────────────────────────────────────────────────────────
// Reading source (driven adapter: device → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain polls this for the next line of text.
pub trait ReadingSource {
    /// Return the next available line, or `None` if no data is waiting.
    ///
    /// Must not block for longer than the device's read timeout.
    fn poll_line(&mut self) -> Result<Option<String>, PortError>;
}

// ───────────────────────────────────────────────────────────────
// Record sink (driven adapter: domain → output file)
// ───────────────────────────────────────────────────────────────

/// Write-side port: persists batches of records.
pub trait RecordSink {
    /// Append `records` in order.  Either all rows are handed to the OS
    /// or an error is returned.
    fn append(&mut self, records: &[LogRecord]) -> Result<(), SinkError>;
}

// ───────────────────────────────────────────────────────────────
// Clock
// ───────────────────────────────────────────────────────────────

/// Wall-clock source for record timestamps.
pub trait Clock {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;
}

// ───────────────────────────────────────────────────────────────
// Stop signal (external cancellation)
// ───────────────────────────────────────────────────────────────

/// Polled once per loop iteration to decide whether to start draining.
pub trait StopSignal {
    fn stop_requested(&self) -> bool;
}

impl StopSignal for AtomicBool {
    fn stop_requested(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
