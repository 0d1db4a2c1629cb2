//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to.  The service updates it before each tick with what it has
//! observed (stop signal, buffer occupancy, drain outcome); handlers only
//! decide transitions.

#[derive(Debug, Clone, Default)]
pub struct FsmContext {
    /// Monotonic total tick count.
    pub total_ticks: u64,

    // -- Inputs from the service --
    /// The external stop signal has fired (or a stop command was handled).
    pub stop_requested: bool,
    /// Records currently held in the buffer.
    pub buffered: usize,
    /// The drain flush has completed.
    pub drained: bool,
}

impl FsmContext {
    pub fn new() -> Self {
        Self::default()
    }
}
