//! Human-readable record listing
//!
//! Renders each record as a small tree:
//!
//! ```text
//! yaml (v3.0.1)
//! ├ gopkg.in/yaml.v3
//! ├ Package yaml implements YAML support for the Go language.
//! └ Published: May 27, 2022 | Imported by: 12,345 | License: MIT
//! ```

use super::traits::{OutputResult, RecordSink};
use crate::extract::Record;
use std::io::Write;

/// Writes records in the tree layout to any writer
pub struct PrettyPrinter<W: Write> {
    writer: W,
}

impl<W: Write> PrettyPrinter<W> {
    /// Creates a printer writing to `writer`
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the printer and returns the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for PrettyPrinter<W> {
    fn write_record(&mut self, record: &Record) -> OutputResult<()> {
        writeln!(self.writer, "{} ({})", record.repo, record.version)?;

        // Optional lines are omitted entirely when empty
        if !record.path.is_empty() {
            writeln!(self.writer, "├ {}", record.path)?;
        }
        if !record.description.is_empty() {
            writeln!(self.writer, "├ {}", record.description)?;
        }

        writeln!(
            self.writer,
            "└ Published: {} | Imported by: {} | License: {}",
            record.published, record.imported_by, record.license
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}
