//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (the interrupt
//! handler, tests) that the [`LoggerService`](super::service::LoggerService)
//! interprets and acts upon.

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Stop polling, drain the buffer and shut down.
    RequestStop,

    /// Write whatever is buffered right now, without waiting for the threshold.
    FlushNow,
}
