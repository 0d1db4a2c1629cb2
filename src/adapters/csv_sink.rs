//! CSV file sink.
//!
//! Implements [`RecordSink`] for the session's output file.  The file is
//! created once with its header row; every flush then reopens it in
//! append mode, writes the batch, syncs and closes it again, so at most
//! one batch is at risk if the process dies.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use log::{debug, info};

use crate::app::ports::RecordSink;
use crate::buffer::LogRecord;
use crate::config::ValueMode;
use crate::error::SinkError;

/// File name timestamp, e.g. `2024-03-05-020709PM`.
const FILE_STAMP_FORMAT: &str = "%Y-%m-%d-%I%M%S%p";

/// Upper bound on `-N` suffixes tried when the name is taken.
const MAX_NAME_ATTEMPTS: u32 = 100;

/// `data_log_<YYYY-MM-DD-HHMMSSAMPM>` for a session started at `started`.
pub fn session_file_stem(started: NaiveDateTime) -> String {
    format!("data_log_{}", started.format(FILE_STAMP_FORMAT))
}

pub struct CsvFileSink {
    path: PathBuf,
}

impl CsvFileSink {
    /// Create the session file in `dir` and write its header.
    ///
    /// Never overwrites: if a file from a session started in the same
    /// second exists, a `-1`, `-2`, … suffix is added.
    pub fn create(dir: &Path, started: NaiveDateTime, mode: ValueMode) -> Result<Self, SinkError> {
        let (path, file) = create_unique(dir, &session_file_stem(started))?;

        let mut writer = csv_writer(file);
        writer.write_record(["Timestamp", mode.column_name()])?;
        writer.flush()?;

        info!("Logging to {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for CsvFileSink {
    fn append(&mut self, records: &[LogRecord]) -> Result<(), SinkError> {
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv_writer(file);
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_data()?;
        debug!("Appended {} row(s) to {}", records.len(), self.path.display());
        Ok(())
    }
}

fn csv_writer(file: File) -> csv::Writer<File> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(file)
}

fn create_unique(dir: &Path, stem: &str) -> io::Result<(PathBuf, File)> {
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let name = if attempt == 0 {
            format!("{stem}.csv")
        } else {
            format!("{stem}-{attempt}.csv")
        };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(e) => return Err(e),
        }
    }
    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free file name for {stem} in {}", dir.display()),
    ))
}
