//! Local wall-clock adapter.
//!
//! Record timestamps and the output file name use local time, matching
//! what an operator sees on the bench clock.

use chrono::{Local, NaiveDateTime};

use crate::app::ports::Clock;

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl LocalClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
