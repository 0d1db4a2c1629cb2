//! Ctrl-C stop signal.
//!
//! The handler thread installed by `ctrlc` only raises an atomic flag; the
//! session loop samples it once per iteration through [`StopSignal`] and
//! performs the drain itself.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::info;

use crate::app::ports::StopSignal;

#[derive(Debug, Clone, Default)]
pub struct InterruptSignal {
    flag: Arc<AtomicBool>,
}

impl InterruptSignal {
    /// Install the process-wide Ctrl-C handler.  Can only succeed once per
    /// process.
    pub fn install() -> Result<Self, ctrlc::Error> {
        let signal = Self::default();
        let flag = Arc::clone(&signal.flag);
        ctrlc::set_handler(move || {
            if !flag.swap(true, Ordering::AcqRel) {
                info!("Interrupt received, stopping after current iteration");
            }
        })?;
        Ok(signal)
    }

    /// Raise the flag without a signal.
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::Release);
    }
}

impl StopSignal for InterruptSignal {
    fn stop_requested(&self) -> bool {
        self.flag.stop_requested()
    }
}
