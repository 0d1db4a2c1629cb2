//! Integration tests for the LoggerService → FSM → sink pipeline.
//!
//! These run on the host and drive complete sessions through mock
//! adapters: scripted serial lines in, in-memory rows out.

use std::io;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use sensorlog::app::commands::AppCommand;
use sensorlog::app::events::AppEvent;
use sensorlog::app::service::LoggerService;
use sensorlog::buffer::FlushReason;
use sensorlog::config::{SessionConfig, ValueMode};
use sensorlog::error::{Error, PortError};
use sensorlog::fsm::StateId;
use sensorlog::scheduler::PollSchedule;

use super::mock_hw::{MemorySink, RecordingEvents, Scripted, ScriptedSource, SteppingClock};

fn expected(raw: f64) -> f64 {
    (raw - 0.1312) / 1.2961
}

fn make_app(mode: ValueMode) -> (LoggerService, RecordingEvents) {
    let mut config = SessionConfig::new("/dev/ttyUSB0");
    config.value_mode = mode;
    let mut app = LoggerService::new(&config);
    let mut events = RecordingEvents::new();
    app.start(&mut events);
    (app, events)
}

fn run_session(
    app: &mut LoggerService,
    source: &mut ScriptedSource,
    sink: &mut MemorySink,
    events: &mut RecordingEvents,
) -> sensorlog::Result<sensorlog::diagnostics::SessionStats> {
    let stop = source.stop_flag();
    let clock = SteppingClock::new();
    let mut schedule = PollSchedule::new(Duration::ZERO);
    app.run(source, sink, &clock, &*stop, &mut schedule, events)
}

// ── End-to-end: ten valid readings with noise in between ─────

#[test]
fn ten_readings_with_two_invalid_lines() {
    let (mut app, mut events) = make_app(ValueMode::Calibrated);
    let raws = [5.0, 5.5, 6.0, 6.5, 7.0, 7.5, 8.0, 8.5, 9.0, 9.5];
    let mut lines: Vec<String> = raws.iter().map(|r| format!("{r:.1}")).collect();
    lines.insert(1, "abc".into());
    lines.insert(6, "--".into());
    let lines: Vec<&str> = lines.iter().map(String::as_str).collect();

    let mut source = ScriptedSource::lines(&lines);
    let mut sink = MemorySink::new();
    let stats = run_session(&mut app, &mut source, &mut sink, &mut events).unwrap();

    assert_eq!(events.invalid_lines(), vec!["abc", "--"]);
    assert_eq!(sink.rows.len(), 10);
    assert_eq!(sink.batches, vec![10], "threshold flush only; drain finds nothing");
    for (row, raw) in sink.rows.iter().zip(raws) {
        assert_eq!(row.value, expected(raw));
    }
    assert_eq!(stats.readings, 10);
    assert_eq!(stats.invalid_lines, 2);
    assert_eq!(stats.rows_written, 10);
    assert_eq!(app.state(), StateId::Stopped);
}

#[test]
fn rows_are_timestamped_in_arrival_order() {
    let (mut app, mut events) = make_app(ValueMode::Calibrated);
    let mut source = ScriptedSource::lines(&["1", "2"]);
    let mut sink = MemorySink::new();
    run_session(&mut app, &mut source, &mut sink, &mut events).unwrap();

    assert_eq!(sink.rows[0].timestamp, "2024-03-05 02:07:09 PM");
    assert!(sink.rows[0].timestamp <= sink.rows[1].timestamp);
}

// ── Interrupt drains everything that was buffered ────────────

#[test]
fn interrupt_drains_partial_buffer_in_order() {
    let (mut app, mut events) = make_app(ValueMode::Raw);
    let lines: Vec<String> = (0..13).map(|i| i.to_string()).collect();
    let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
    let mut source = ScriptedSource::lines(&lines);
    let mut sink = MemorySink::new();

    run_session(&mut app, &mut source, &mut sink, &mut events).unwrap();

    assert_eq!(sink.batches, vec![10, 3]);
    let expected: Vec<f64> = (0..13).map(f64::from).collect();
    assert_eq!(sink.values(), expected);
    assert!(app.buffered().is_empty());

    let drain_flushes = events
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::Flushed { rows: 3, reason: FlushReason::Drain }))
        .count();
    assert_eq!(drain_flushes, 1);
}

#[test]
fn stop_with_empty_buffer_walks_every_state() {
    let (mut app, mut events) = make_app(ValueMode::Calibrated);
    let mut source = ScriptedSource::new([Scripted::Idle]);
    let mut sink = MemorySink::new();

    let stats = run_session(&mut app, &mut source, &mut sink, &mut events).unwrap();

    assert!(sink.rows.is_empty());
    assert_eq!(stats.flushes, 0);
    let transitions: Vec<(StateId, StateId)> = events
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::StateChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        transitions,
        vec![
            (StateId::Running, StateId::Draining),
            (StateId::Draining, StateId::Stopped)
        ]
    );
    assert!(matches!(events.events.last(), Some(AppEvent::Stopped(_))));
}

#[test]
fn idle_polls_keep_running() {
    let (mut app, mut events) = make_app(ValueMode::Calibrated);
    let mut source = ScriptedSource::new([Scripted::Idle, Scripted::Idle, Scripted::Idle]);
    let mut sink = MemorySink::new();
    let clock = SteppingClock::new();
    let never = AtomicBool::new(false);

    for _ in 0..3 {
        let state = app
            .step(&mut source, &mut sink, &clock, &never, &mut events)
            .unwrap();
        assert_eq!(state, StateId::Running);
    }
    assert_eq!(source.polls, 3);
    assert!(app.buffered().is_empty());
}

// ── Invalid lines ─────────────────────────────────────────────

#[test]
fn invalid_line_buffers_nothing_and_reports_once() {
    let (mut app, mut events) = make_app(ValueMode::Calibrated);
    let mut sink = MemorySink::new();
    let clock = SteppingClock::new();

    app.process_line("abc\r\n", &clock, &mut sink, &mut events)
        .unwrap();

    assert!(app.buffered().is_empty());
    assert_eq!(events.invalid_lines(), vec!["abc"]);
    assert_eq!(app.stats().invalid_lines, 1);
}

// ── Commands ──────────────────────────────────────────────────

#[test]
fn request_stop_command_drains_and_stops() {
    let (mut app, mut events) = make_app(ValueMode::Raw);
    let mut source = ScriptedSource::new([
        Scripted::Line("4.2\n".into()),
        Scripted::Idle,
        Scripted::Idle,
    ]);
    let mut sink = MemorySink::new();
    let clock = SteppingClock::new();
    let never = AtomicBool::new(false);

    assert_eq!(
        app.step(&mut source, &mut sink, &clock, &never, &mut events)
            .unwrap(),
        StateId::Running
    );
    app.handle_command(AppCommand::RequestStop, &mut sink, &mut events)
        .unwrap();
    assert_eq!(
        app.step(&mut source, &mut sink, &clock, &never, &mut events)
            .unwrap(),
        StateId::Draining
    );
    assert_eq!(
        app.step(&mut source, &mut sink, &clock, &never, &mut events)
            .unwrap(),
        StateId::Stopped
    );
    assert_eq!(sink.values(), vec![4.2]);
}

// ── Failure paths ─────────────────────────────────────────────

#[test]
fn read_failure_salvages_buffered_records() {
    let (mut app, mut events) = make_app(ValueMode::Raw);
    let mut source = ScriptedSource::new([
        Scripted::Line("1.0\n".into()),
        Scripted::Line("2.0\n".into()),
        Scripted::Fail(io::ErrorKind::BrokenPipe),
        Scripted::Idle,
    ]);
    let mut sink = MemorySink::new();

    let err = run_session(&mut app, &mut source, &mut sink, &mut events).unwrap_err();

    assert!(matches!(err, Error::Port(PortError::Io(_))));
    assert_eq!(sink.values(), vec![1.0, 2.0]);
}

#[test]
fn sink_failure_keeps_records_buffered() {
    let (mut app, mut events) = make_app(ValueMode::Raw);
    let lines: Vec<String> = (0..10).map(|i| i.to_string()).collect();
    let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
    let mut source = ScriptedSource::lines(&lines);
    let mut sink = MemorySink::failing_after(0);

    let err = run_session(&mut app, &mut source, &mut sink, &mut events).unwrap_err();

    assert!(matches!(err, Error::Sink(_)));
    assert_eq!(app.buffered().len(), 10);
    assert!(sink.rows.is_empty());
}

#[test]
fn failed_retry_rejects_reading_before_counting_it() {
    let (mut app, mut events) = make_app(ValueMode::Raw);
    let mut sink = MemorySink::failing_after(0);
    let clock = SteppingClock::new();

    let failures = (0..12)
        .map(|i| app.process_line(&format!("{i}\n"), &clock, &mut sink, &mut events))
        .filter(Result::is_err)
        .count();

    // The tenth line fails the threshold flush, the last two fail the retry.
    assert_eq!(failures, 3);
    assert_eq!(app.buffered().len(), 10);
    assert_eq!(app.stats().readings, app.buffered().len() as u64);
    assert_eq!(app.stats().pending(), 10);
    let recorded = events
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::Recorded(_)))
        .count();
    assert_eq!(recorded, 10);
}

#[test]
fn raw_mode_logs_values_unchanged() {
    let (mut app, mut events) = make_app(ValueMode::Raw);
    assert_eq!(app.value_mode(), ValueMode::Raw);
    let mut source = ScriptedSource::lines(&["5.0", "-1.25"]);
    let mut sink = MemorySink::new();
    run_session(&mut app, &mut source, &mut sink, &mut events).unwrap();
    assert_eq!(sink.values(), vec![5.0, -1.25]);
}
