//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events through the
//! `log` facade.  The binary routes the logger to stdout, so invalid-line
//! diagnostics and the shutdown summary appear on the console.

use log::{Level, log};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        if let Some((level, message)) = render(event) {
            log!(level, "{}", message);
        }
    }
}

/// Level and text for `event`, or `None` if it is not worth a line.
pub fn render(event: &AppEvent) -> Option<(Level, String)> {
    let line = match event {
        AppEvent::Started(state) => (Level::Info, format!("START | initial_state={:?}", state)),
        AppEvent::InvalidReading(invalid) => (Level::Warn, invalid.to_string()),
        AppEvent::Recorded(record) => (
            Level::Debug,
            format!("READ  | {} | {}", record.timestamp, record.value),
        ),
        AppEvent::Flushed { rows: 0, .. } => return None,
        AppEvent::Flushed { rows, reason } => {
            (Level::Info, format!("FLUSH | {} row(s) ({:?})", rows, reason))
        }
        AppEvent::StateChanged { from, to } => {
            (Level::Info, format!("STATE | {:?} -> {:?}", from, to))
        }
        AppEvent::Stopped(stats) if stats.pending() > 0 => (
            Level::Warn,
            format!("STOP  | {} ({} never written)", stats, stats.pending()),
        ),
        AppEvent::Stopped(stats) => (Level::Info, format!("STOP  | {}", stats)),
    };
    Some(line)
}
