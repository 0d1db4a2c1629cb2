//! Serial port adapter.
//!
//! Implements [`ReadingSource`] on top of the `serialport` crate.  The
//! port is opened at the fixed baud rate with a one-second read timeout;
//! each poll checks for pending bytes first so an idle line never blocks
//! the loop.  Dropping the adapter closes the port.

use std::io::{self, BufRead, BufReader};

use log::info;
use serialport::SerialPort;

use crate::app::ports::ReadingSource;
use crate::config::{BAUD_RATE, READ_TIMEOUT};
use crate::error::PortError;
use crate::sensors::line;

pub struct SerialPortAdapter {
    name: String,
    reader: BufReader<Box<dyn SerialPort>>,
}

impl SerialPortAdapter {
    /// Open `name` at 9600 baud, 8N1, no flow control.
    pub fn open(name: &str) -> Result<Self, PortError> {
        let port = serialport::new(name, BAUD_RATE)
            .timeout(READ_TIMEOUT)
            .flow_control(serialport::FlowControl::None)
            .open()
            .map_err(|source| PortError::Open {
                port: name.to_owned(),
                source,
            })?;
        info!("Opened {} at {} baud", name, BAUD_RATE);
        Ok(Self {
            name: name.to_owned(),
            reader: BufReader::new(port),
        })
    }

    fn has_pending_input(&self) -> Result<bool, PortError> {
        if !self.reader.buffer().is_empty() {
            return Ok(true);
        }
        Ok(self.reader.get_ref().bytes_to_read()? > 0)
    }
}

impl ReadingSource for SerialPortAdapter {
    fn poll_line(&mut self) -> Result<Option<String>, PortError> {
        if !self.has_pending_input()? {
            return Ok(None);
        }
        Ok(read_line(&mut self.reader)?)
    }
}

impl Drop for SerialPortAdapter {
    fn drop(&mut self) {
        info!("Closed serial port {}", self.name);
    }
}

/// Read up to and including the next `\n`.
///
/// A timeout part-way through a line returns what arrived so far, so a
/// truncated line surfaces as an (invalid) reading rather than being held
/// back.  A timeout with nothing read yields `None`.
pub fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut bytes = Vec::new();
    match reader.read_until(b'\n', &mut bytes) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::TimedOut => {}
        Err(e) => return Err(e),
    }
    if bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(line::decode(&bytes)))
}
