//! Unified error types for the logger.
//!
//! A single `Error` enum that every subsystem converts into, so the
//! session loop and the binary handle failures uniformly.  Each subsystem
//! keeps its own narrower enum for callers that want to match on it.

use core::fmt;
use std::io;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug)]
pub enum Error {
    /// The session configuration was rejected before any I/O.
    Config(ConfigError),
    /// The serial connection could not be opened or read.
    Port(PortError),
    /// The CSV output could not be created or appended to.
    Sink(SinkError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Port(e) => write!(f, "port: {e}"),
            Self::Sink(e) => write!(f, "sink: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(_) => None,
            Self::Port(e) => Some(e),
            Self::Sink(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Slope is zero, which would make every calibrated value infinite.
    ZeroSlope,
    /// A calibration constant is NaN or infinite.
    NonFiniteCalibration { slope: f64, intercept: f64 },
    /// The port name is empty.
    MissingPort,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSlope => write!(f, "calibration slope must not be zero"),
            Self::NonFiniteCalibration { slope, intercept } => write!(
                f,
                "calibration constants must be finite (slope={slope}, intercept={intercept})"
            ),
            Self::MissingPort => write!(f, "no serial port given"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Serial port errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum PortError {
    /// Opening the device failed.
    Open {
        port: String,
        source: serialport::Error,
    },
    /// Querying or reading the open device failed.
    Io(io::Error),
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { port, source } => write!(f, "failed to open {port}: {source}"),
            Self::Io(e) => write!(f, "read failed: {e}"),
        }
    }
}

impl std::error::Error for PortError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for PortError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serialport::Error> for PortError {
    fn from(e: serialport::Error) -> Self {
        Self::Io(e.into())
    }
}

impl From<PortError> for Error {
    fn from(e: PortError) -> Self {
        Self::Port(e)
    }
}

// ---------------------------------------------------------------------------
// Sink errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum SinkError {
    /// Creating, opening or flushing the output file failed.
    Io(io::Error),
    /// The CSV writer rejected a record.
    Csv(csv::Error),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Csv(e) => write!(f, "CSV error: {e}"),
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Csv(e) => Some(e),
        }
    }
}

impl From<io::Error> for SinkError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<csv::Error> for SinkError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

impl From<SinkError> for Error {
    fn from(e: SinkError) -> Self {
        Self::Sink(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
