//! Outbound application events.
//!
//! The [`LoggerService`](super::service::LoggerService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::buffer::{FlushReason, LogRecord};
use crate::diagnostics::SessionStats;
use crate::fsm::StateId;
use crate::sensors::InvalidReading;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started (carries initial state).
    Started(StateId),

    /// A line arrived that is not a number.  Emitted exactly once per line.
    InvalidReading(InvalidReading),

    /// A reading was accepted and buffered.
    Recorded(LogRecord),

    /// Buffered rows were written to the sink.
    Flushed { rows: usize, reason: FlushReason },

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// The session reached `Stopped`.
    Stopped(SessionStats),
}
