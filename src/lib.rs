//! Serial sensor logger library.
//!
//! Exposes the session core (service, FSM, buffer, calibration) and the
//! host adapters so the binary stays thin and everything is reachable
//! from integration tests.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod buffer;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fsm;
pub mod scheduler;
pub mod sensors;

pub use error::{Error, Result};
