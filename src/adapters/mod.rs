//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to               |
//! |------------|---------------|---------------------------|
//! | `serial`   | ReadingSource | Serial device (serialport)|
//! | `csv_sink` | RecordSink    | Session CSV file          |
//! | `time`     | Clock         | Local wall clock (chrono) |
//! | `signal`   | StopSignal    | Ctrl-C handler (ctrlc)    |
//! | `log_sink` | EventSink     | `log` facade              |

pub mod csv_sink;
pub mod log_sink;
pub mod serial;
pub mod signal;
pub mod time;
