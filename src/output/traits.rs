//! Output sink traits and errors
//!
//! This module defines the trait interface for record sinks and the errors
//! they can raise.

use crate::extract::Record;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for consumers of finished records
///
/// Records arrive in final order, exactly once each.
pub trait RecordSink {
    /// Handles one record
    fn write_record(&mut self, record: &Record) -> OutputResult<()>;

    /// Called once after the last record
    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

/// Feeds every record to `sink` in order, then finishes it
pub fn write_all<S: RecordSink + ?Sized>(sink: &mut S, records: &[Record]) -> OutputResult<()> {
    for record in records {
        sink.write_record(record)?;
    }
    sink.finish()
}

impl RecordSink for Vec<Record> {
    fn write_record(&mut self, record: &Record) -> OutputResult<()> {
        self.push(record.clone());
        Ok(())
    }
}
