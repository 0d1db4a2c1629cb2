//! State handlers and the table that wires them up.
//!
//! ```text
//!  RUNNING ──[stop requested]──▶ DRAINING ──[buffer written]──▶ STOPPED
//! ```

use log::info;

use super::context::FsmContext;
use super::{StateEntry, StateId, StateTable};

pub fn build_state_table() -> StateTable {
    [
        StateEntry {
            id: StateId::Running,
            enter: Some(enter_running),
            update: update_running,
        },
        StateEntry {
            id: StateId::Draining,
            enter: Some(enter_draining),
            update: update_draining,
        },
        StateEntry {
            id: StateId::Stopped,
            enter: Some(enter_stopped),
            update: |_| None,
        },
    ]
}

// ── Running ───────────────────────────────────────────────────

fn enter_running(ctx: &mut FsmContext) {
    ctx.stop_requested = false;
    ctx.drained = false;
    info!("RUNNING: polling for readings");
}

fn update_running(ctx: &mut FsmContext) -> Option<StateId> {
    ctx.stop_requested.then_some(StateId::Draining)
}

// ── Draining ──────────────────────────────────────────────────

fn enter_draining(ctx: &mut FsmContext) {
    ctx.drained = false;
    info!("DRAINING: {} buffered record(s) to write", ctx.buffered);
}

fn update_draining(ctx: &mut FsmContext) -> Option<StateId> {
    ctx.drained.then_some(StateId::Stopped)
}

// ── Stopped ───────────────────────────────────────────────────

fn enter_stopped(ctx: &mut FsmContext) {
    info!("STOPPED: after {} tick(s)", ctx.total_ticks);
}
