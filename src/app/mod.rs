//! Application core: session logic behind port traits.
//!
//! This module contains the rules for a logging session: polling,
//! calibration, buffering and the drain-on-stop sequence.  All
//! interaction with the device, the file system and the clock happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without a serial device.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
