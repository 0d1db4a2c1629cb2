//! Reading pipeline: line decoding and calibration.
//!
//! A [`Reading`] is produced from one line of serial text and, depending
//! on the session's [`ValueMode`], turned into the value that gets logged.

pub mod calibration;
pub mod line;

use crate::config::ValueMode;
use calibration::Calibration;

pub use line::{InvalidReading, parse_reading};

/// One numeric sample decoded from the serial stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub raw: f64,
}

impl Reading {
    /// Decode a reading from one line of text.
    pub fn from_line(line: &str) -> Result<Self, InvalidReading> {
        parse_reading(line).map(|raw| Self { raw })
    }

    /// The value to log for this reading under `mode`.
    ///
    /// Only the value that is actually logged is computed.
    pub fn value(&self, mode: ValueMode, cal: &Calibration) -> f64 {
        match mode {
            ValueMode::Calibrated => cal.apply(self.raw),
            ValueMode::Raw => self.raw,
        }
    }
}
