//! Text line → raw reading decoder.
//!
//! The probe firmware prints one decimal number per line.  Anything that
//! does not parse as a float (noise, partial lines after a timeout, boot
//! banners) is rejected with the offending text attached so the caller
//! can report it.

use core::fmt;

/// A line that could not be parsed as a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidReading {
    /// The line as received, with surrounding whitespace removed.
    pub line: String,
}

impl fmt::Display for InvalidReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid data: {}", self.line)
    }
}

impl std::error::Error for InvalidReading {}

/// Decode raw bytes from the port as UTF-8 text.
///
/// Invalid sequences are replaced with U+FFFD, which then fails to parse
/// and is reported like any other bad line.
pub fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Parse one line of serial text into a raw reading.
pub fn parse_reading(line: &str) -> Result<f64, InvalidReading> {
    let trimmed = line.trim();
    trimmed.parse::<f64>().map_err(|_| InvalidReading {
        line: trimmed.to_owned(),
    })
}
