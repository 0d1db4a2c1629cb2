//! sensorlog entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  SerialPortAdapter  CsvFileSink   LocalClock   InterruptSignal │
//! │  (ReadingSource)    (RecordSink)  (Clock)      (StopSignal)    │
//! │                     LogEventSink (EventSink)                   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            LoggerService (pure logic)                  │    │
//! │  │  FSM · Buffer · Calibration                            │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  PollSchedule (fixed 100 ms pacing)                            │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use sensorlog::adapters::csv_sink::CsvFileSink;
use sensorlog::adapters::log_sink::LogEventSink;
use sensorlog::adapters::serial::SerialPortAdapter;
use sensorlog::adapters::signal::InterruptSignal;
use sensorlog::adapters::time::LocalClock;
use sensorlog::app::ports::Clock;
use sensorlog::app::service::LoggerService;
use sensorlog::cli::Args;
use sensorlog::scheduler::PollSchedule;

fn main() -> Result<()> {
    // Missing or malformed arguments print usage and exit here, before
    // anything is opened or created.
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    if args.list_ports {
        list_ports();
        return Ok(());
    }

    let config = args.session_config().context("invalid arguments")?;
    info!("Session config: {}", serde_json::to_string(&config)?);

    let stop = InterruptSignal::install().context("failed to install Ctrl-C handler")?;
    let clock = LocalClock::new();

    let mut port = SerialPortAdapter::open(&config.port)?;
    let mut sink = CsvFileSink::create(&config.output_dir, clock.now(), config.value_mode)
        .context("failed to create output file")?;

    let mut events = LogEventSink::new();
    let mut schedule = PollSchedule::new(config.poll_interval());
    let mut app = LoggerService::new(&config);
    app.start(&mut events);

    let outcome = app.run(
        &mut port,
        &mut sink,
        &clock,
        &stop,
        &mut schedule,
        &mut events,
    );

    // Close the port on every path before reporting the outcome.
    drop(port);
    println!("Data logging stopped");

    let pending = app.stats().pending();
    if outcome.is_err() && pending > 0 {
        warn!("{} record(s) were not written to {}", pending, sink.path().display());
    }
    let stats = outcome.with_context(|| format!("logging to {} failed", sink.path().display()))?;
    info!(
        "{} written to {} over {} poll(s)",
        stats,
        sink.path().display(),
        schedule.iterations()
    );
    Ok(())
}

fn list_ports() {
    println!("Available serial ports:");
    match serialport::available_ports() {
        Ok(ports) => {
            if ports.is_empty() {
                println!("  (none)");
            }
            for port in ports {
                match &port.port_type {
                    serialport::SerialPortType::UsbPort(usb) => {
                        print!(
                            "  {} - USB (VID: 0x{:04x}, PID: 0x{:04x})",
                            port.port_name, usb.vid, usb.pid
                        );
                        if let Some(ref product) = usb.product {
                            print!(" {}", product);
                        }
                        println!();
                    }
                    serialport::SerialPortType::BluetoothPort => {
                        println!("  {} - Bluetooth", port.port_name);
                    }
                    serialport::SerialPortType::PciPort => println!("  {} - PCI", port.port_name),
                    serialport::SerialPortType::Unknown => {
                        println!("  {} - Unknown", port.port_name);
                    }
                }
            }
        }
        Err(e) => {
            eprintln!("Error listing ports: {}", e);
        }
    }
}
