//! Linear sensor calibration.
//!
//! Converts a raw reading into a physical value by inverting the sensor's
//! linear response `raw = slope * expected + intercept`:
//!
//! ```text
//! expected = (raw - intercept) / slope
//! ```

use serde::{Deserialize, Serialize};

/// Calibration constants for a linear sensor response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Gain of the sensor response (raw units per physical unit).
    pub slope: f64,
    /// Raw reading at a physical value of zero.
    pub intercept: f64,
}

impl Calibration {
    /// Bench-measured constants for the default probe.
    pub const DEFAULT: Self = Self {
        slope: 1.2961,
        intercept: 0.1312,
    };

    pub const fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Convert a raw reading into the calibrated value.
    ///
    /// A zero slope yields an infinite or NaN result; sessions reject such
    /// constants up front in [`SessionConfig::validate`](crate::config::SessionConfig::validate).
    #[inline]
    pub fn apply(&self, raw: f64) -> f64 {
        calibrate(raw, self.slope, self.intercept)
    }

    /// Derive constants from two `(raw, expected)` reference points.
    ///
    /// Returns `None` when both points share the same expected value,
    /// since no slope can be derived from them.
    pub fn from_two_points(raw1: f64, expected1: f64, raw2: f64, expected2: f64) -> Option<Self> {
        let span = expected2 - expected1;
        if span == 0.0 {
            return None;
        }
        let slope = (raw2 - raw1) / span;
        let intercept = raw1 - slope * expected1;
        Some(Self { slope, intercept })
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// `(raw - intercept) / slope`
#[inline]
pub fn calibrate(raw: f64, slope: f64, intercept: f64) -> f64 {
    (raw - intercept) / slope
}
