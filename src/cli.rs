//! Command-line surface.
//!
//! ```text
//! sensorlog COM_PORT [SLOPE] [INTERCEPT] [--raw] [--output-dir DIR]
//! sensorlog --list-ports
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::config::{SessionConfig, ValueMode};
use crate::error::ConfigError;
use crate::sensors::calibration::Calibration;

/// Poll a serial sensor and log calibrated readings to CSV.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, allow_negative_numbers = true)]
pub struct Args {
    /// Serial device to read from (e.g. /dev/ttyUSB0, COM3)
    #[arg(value_name = "COM_PORT", required_unless_present = "list_ports")]
    pub port: Option<String>,

    /// Calibration slope
    #[arg(default_value_t = Calibration::DEFAULT.slope)]
    pub slope: f64,

    /// Calibration intercept
    #[arg(default_value_t = Calibration::DEFAULT.intercept)]
    pub intercept: f64,

    /// Log raw readings instead of calibrated values
    #[arg(long)]
    pub raw: bool,

    /// Directory to write the CSV file into
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// List available serial ports and exit
    #[arg(long)]
    pub list_ports: bool,
}

impl Args {
    /// Build and validate the session configuration.
    pub fn session_config(&self) -> Result<SessionConfig, ConfigError> {
        let port = self.port.clone().ok_or(ConfigError::MissingPort)?;
        let mut config = SessionConfig::new(port);
        config.calibration = Calibration::new(self.slope, self.intercept);
        config.value_mode = if self.raw {
            ValueMode::Raw
        } else {
            ValueMode::Calibrated
        };
        config.output_dir.clone_from(&self.output_dir);
        config.validate()?;
        Ok(config)
    }
}
