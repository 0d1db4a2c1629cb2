//! Fuzz target: serial line decoding and parsing
//!
//! Feeds arbitrary bytes through `decode` and `parse_reading` the way the
//! session does for every line read from the port.  Accepted lines must
//! round-trip through the calibration transform without panicking, and
//! rejected lines must carry their trimmed text.
//!
//! cargo fuzz run fuzz_reading_line

#![no_main]

use libfuzzer_sys::fuzz_target;
use sensorlog::sensors::calibration::Calibration;
use sensorlog::sensors::line::{decode, parse_reading};

fuzz_target!(|data: &[u8]| {
    let line = decode(data);
    match parse_reading(&line) {
        Ok(raw) => {
            let _ = Calibration::DEFAULT.apply(raw);
        }
        Err(invalid) => {
            assert_eq!(invalid.line, line.trim());
        }
    }
});
