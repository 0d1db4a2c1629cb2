//! Table-driven session state machine.
//!
//! ```text
//!   StateId    enter            update
//!   ─────────  ───────────────  ──────────────────────────────
//!   Running    clear flags      stop_requested ─▶ Draining
//!   Draining   log backlog      drained        ─▶ Stopped
//!   Stopped    log total ticks  (terminal)
//! ```
//!
//! The service writes what it observed into [`FsmContext`] and calls
//! [`Fsm::tick`].  The current state's `update` handler decides whether to
//! move; on a move the engine runs the next state's `enter` handler.
//! Handlers are plain `fn` pointers in a fixed array indexed by
//! [`StateId`].

pub mod context;
pub mod states;

use context::FsmContext;
use log::debug;

/// Session states, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Running = 0,
    Draining = 1,
    Stopped = 2,
}

impl StateId {
    pub const COUNT: usize = 3;
    pub const ALL: [Self; Self::COUNT] = [Self::Running, Self::Draining, Self::Stopped];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Draining => "Draining",
            Self::Stopped => "Stopped",
        }
    }
}

/// Runs once when a state becomes current.
pub type EnterFn = fn(&mut FsmContext);

/// Runs every tick; `Some(next)` requests a transition.
pub type UpdateFn = fn(&mut FsmContext) -> Option<StateId>;

/// One row of the state table.
#[derive(Clone, Copy)]
pub struct StateEntry {
    pub id: StateId,
    pub enter: Option<EnterFn>,
    pub update: UpdateFn,
}

pub type StateTable = [StateEntry; StateId::COUNT];

pub struct Fsm {
    table: StateTable,
    current: StateId,
    ticks: u64,
}

impl Fsm {
    pub fn new(table: StateTable, initial: StateId) -> Self {
        debug_assert!(
            table.iter().zip(StateId::ALL).all(|(row, id)| row.id == id),
            "state table out of order"
        );
        Self {
            table,
            current: initial,
            ticks: 0,
        }
    }

    /// Enter the initial state.  Call once before the first tick.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        debug!("FSM starting in {}", self.current.name());
        self.enter(ctx);
    }

    pub fn tick(&mut self, ctx: &mut FsmContext) {
        self.ticks += 1;
        ctx.total_ticks = self.ticks;

        if let Some(next) = (self.row().update)(ctx) {
            if next != self.current {
                debug!("FSM {} -> {}", self.current.name(), next.name());
                self.current = next;
                self.enter(ctx);
            }
        }
    }

    pub fn current_state(&self) -> StateId {
        self.current
    }

    fn row(&self) -> &StateEntry {
        &self.table[self.current.index()]
    }

    fn enter(&mut self, ctx: &mut FsmContext) {
        if let Some(enter) = self.row().enter {
            enter(ctx);
        }
    }
}
