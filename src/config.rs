//! Session configuration parameters
//!
//! Everything a logging session needs to know before it opens the port.
//! Built from command-line arguments; there is no configuration file.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sensors::calibration::Calibration;

/// Fixed serial baud rate.
pub const BAUD_RATE: u32 = 9600;

/// Per-read hardware timeout on the serial connection.
pub const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Delay between loop iterations.
pub const POLL_INTERVAL_MS: u64 = 100;

/// Number of buffered records that triggers a write to the CSV file.
pub const FLUSH_THRESHOLD: usize = 10;

/// What gets written into the value column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValueMode {
    /// Apply the calibration transform before logging.
    #[default]
    Calibrated,
    /// Log the raw reading as received.
    Raw,
}

impl ValueMode {
    /// Header of the value column in the CSV file.
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::Calibrated => "Expected Value",
            Self::Raw => "Value",
        }
    }
}

/// Core session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Serial device path or identifier (e.g. `/dev/ttyUSB0`, `COM3`)
    pub port: String,
    /// Calibration constants applied in [`ValueMode::Calibrated`]
    pub calibration: Calibration,
    /// Raw or calibrated logging
    pub value_mode: ValueMode,
    /// Directory the CSV file is created in
    pub output_dir: PathBuf,
    /// Delay between loop iterations (milliseconds)
    pub poll_interval_ms: u64,
}

impl SessionConfig {
    /// Configuration for `port` with default calibration and timing.
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            calibration: Calibration::default(),
            value_mode: ValueMode::default(),
            output_dir: PathBuf::from("."),
            poll_interval_ms: POLL_INTERVAL_MS,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Reject configurations that cannot produce meaningful output.
    ///
    /// The calibration is checked even in raw mode so a typo on the
    /// command line is caught regardless of the selected mode.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port.trim().is_empty() {
            return Err(ConfigError::MissingPort);
        }
        let Calibration { slope, intercept } = self.calibration;
        if !slope.is_finite() || !intercept.is_finite() {
            return Err(ConfigError::NonFiniteCalibration { slope, intercept });
        }
        if slope == 0.0 {
            return Err(ConfigError::ZeroSlope);
        }
        Ok(())
    }
}
