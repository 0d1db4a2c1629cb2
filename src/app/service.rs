//! Application service, the hexagonal core.
//!
//! [`LoggerService`] owns the FSM, the record buffer and the session
//! counters.  All I/O flows through port traits passed in at call sites,
//! making the whole session loop testable with mock adapters.
//!
//! ```text
//!  ReadingSource ──▶ ┌────────────────────────┐ ──▶ RecordSink
//!  Clock         ──▶ │     LoggerService      │ ──▶ EventSink
//!  StopSignal    ──▶ │  FSM · Buffer · Stats  │
//!                    └────────────────────────┘
//! ```

use log::{error, info, warn};

use crate::buffer::{FlushReason, LogRecord, RecordBuffer};
use crate::config::{SessionConfig, ValueMode};
use crate::diagnostics::SessionStats;
use crate::error::Result;
use crate::fsm::context::FsmContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::scheduler::PollSchedule;
use crate::sensors::Reading;
use crate::sensors::calibration::Calibration;

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{Clock, EventSink, ReadingSource, RecordSink, StopSignal};

// ───────────────────────────────────────────────────────────────
// LoggerService
// ───────────────────────────────────────────────────────────────

/// Orchestrates one logging session.
pub struct LoggerService {
    fsm: Fsm,
    ctx: FsmContext,
    buffer: RecordBuffer,
    calibration: Calibration,
    mode: ValueMode,
    stats: SessionStats,
}

impl LoggerService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM; call [`start`](Self::start) next.
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            fsm: Fsm::new(build_state_table(), StateId::Running),
            ctx: FsmContext::new(),
            buffer: RecordBuffer::new(),
            calibration: config.calibration,
            mode: config.value_mode,
            stats: SessionStats::default(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, events: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        events.emit(&AppEvent::Started(self.fsm.current_state()));
        info!(
            "LoggerService started: mode={:?} slope={} intercept={}",
            self.mode, self.calibration.slope, self.calibration.intercept
        );
    }

    /// Drive the session until it reaches `Stopped`.
    ///
    /// Sleeps `schedule`'s interval after every `Running` iteration.  Once
    /// a stop is observed the drain happens on the very next step, without
    /// waiting out another interval.
    pub fn run(
        &mut self,
        source: &mut impl ReadingSource,
        sink: &mut impl RecordSink,
        clock: &impl Clock,
        stop: &impl StopSignal,
        schedule: &mut PollSchedule,
        events: &mut impl EventSink,
    ) -> Result<SessionStats> {
        loop {
            match self.step(source, sink, clock, stop, events)? {
                StateId::Running => schedule.pause(),
                StateId::Draining => {}
                StateId::Stopped => return Ok(self.stats),
            }
        }
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// Run one iteration of the current state and return the state the
    /// FSM is in afterwards.
    pub fn step(
        &mut self,
        source: &mut impl ReadingSource,
        sink: &mut impl RecordSink,
        clock: &impl Clock,
        stop: &impl StopSignal,
        events: &mut impl EventSink,
    ) -> Result<StateId> {
        let prev_state = self.fsm.current_state();

        match prev_state {
            StateId::Running => {
                match source.poll_line() {
                    Ok(Some(line)) => self.process_line(&line, clock, sink, events)?,
                    Ok(None) => {}
                    Err(e) => {
                        error!("Serial read failed: {}", e);
                        self.salvage(sink, events);
                        return Err(e.into());
                    }
                }
                if stop.stop_requested() {
                    self.ctx.stop_requested = true;
                }
            }
            StateId::Draining => {
                self.flush(sink, FlushReason::Drain, events)?;
                self.ctx.drained = true;
            }
            StateId::Stopped => return Ok(StateId::Stopped),
        }

        self.ctx.buffered = self.buffer.len();
        self.fsm.tick(&mut self.ctx);

        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            events.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
            if new_state == StateId::Stopped {
                events.emit(&AppEvent::Stopped(self.stats));
            }
        }
        Ok(new_state)
    }

    /// Decode one line and, if it is a number, buffer the resulting record.
    /// Flushes when the buffer reaches the threshold.
    pub fn process_line(
        &mut self,
        line: &str,
        clock: &impl Clock,
        sink: &mut impl RecordSink,
        events: &mut impl EventSink,
    ) -> Result<()> {
        let reading = match Reading::from_line(line) {
            Ok(reading) => reading,
            Err(invalid) => {
                self.stats.invalid_lines += 1;
                events.emit(&AppEvent::InvalidReading(invalid));
                return Ok(());
            }
        };

        if self.buffer.is_full() {
            // Left full by an earlier failed flush.  If the retry fails too
            // the reading is rejected before it is counted or announced.
            self.flush(sink, FlushReason::Threshold, events)?;
        }

        let value = reading.value(self.mode, &self.calibration);
        let record = LogRecord::new(clock.now(), value);
        if let Err(record) = self.buffer.push(record) {
            warn!("Record buffer full, dropping {:?}", record);
            return Ok(());
        }
        self.stats.readings += 1;
        if let Some(record) = self.buffer.records().last() {
            events.emit(&AppEvent::Recorded(record.clone()));
        }

        if self.buffer.is_full() {
            self.flush(sink, FlushReason::Threshold, events)?;
        }
        Ok(())
    }

    // ── Command handling ──────────────────────────────────────

    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        sink: &mut impl RecordSink,
        events: &mut impl EventSink,
    ) -> Result<()> {
        match cmd {
            AppCommand::RequestStop => {
                if self.fsm.current_state() == StateId::Running {
                    info!("Stop requested");
                    self.ctx.stop_requested = true;
                }
            }
            AppCommand::FlushNow => {
                self.flush(sink, FlushReason::Manual, events)?;
            }
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Records accepted but not yet written.
    pub fn buffered(&self) -> &[LogRecord] {
        self.buffer.records()
    }

    pub fn value_mode(&self) -> ValueMode {
        self.mode
    }

    // ── Internal ──────────────────────────────────────────────

    fn flush(
        &mut self,
        sink: &mut impl RecordSink,
        reason: FlushReason,
        events: &mut impl EventSink,
    ) -> Result<usize> {
        let rows = self.buffer.flush(sink)?;
        if rows > 0 {
            self.stats.rows_written += rows as u64;
            self.stats.flushes += 1;
        }
        events.emit(&AppEvent::Flushed { rows, reason });
        Ok(rows)
    }

    /// Last-chance drain after a fatal read error.  Failures are logged
    /// rather than returned so the read error stays the reported cause.
    fn salvage(&mut self, sink: &mut impl RecordSink, events: &mut impl EventSink) {
        if self.buffer.is_empty() {
            return;
        }
        if let Err(e) = self.flush(sink, FlushReason::Drain, events) {
            error!(
                "Could not write {} buffered record(s): {}",
                self.buffer.len(),
                e
            );
        }
    }
}
