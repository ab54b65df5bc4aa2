//! Output formatting for CLI results.

use std::io::Write;

use csv::{Terminator, WriterBuilder};
use futures::TryStreamExt;

use crate::api::RecordStream;
use crate::domain::Record;

use super::args::OutputFormat;
use super::error::Result;

/// Writes records to an output in the selected format.
pub enum Output<W: Write> {
    Str(W),
    Csv(csv::Writer<W>),
}

impl<W: Write> Output<W> {
    pub fn new(format: OutputFormat, out: W) -> Self {
        match format {
            OutputFormat::Str => Output::Str(out),
            OutputFormat::Csv => Output::Csv(
                WriterBuilder::new()
                    .terminator(Terminator::CRLF)
                    .from_writer(out),
            ),
        }
    }

    /// Write one record. Null cells are written as empty CSV fields.
    pub fn record<R: Record>(&mut self, record: &R) -> Result<()> {
        match self {
            Output::Str(out) => writeln!(out, "{record}")?,
            Output::Csv(writer) => writer.write_record(
                record
                    .cells()
                    .iter()
                    .map(|cell| cell.as_deref().unwrap_or_default()),
            )?,
        }
        Ok(())
    }

    /// Write every record of a stream as it arrives.
    pub async fn records<R: Record>(&mut self, mut records: RecordStream<R>) -> Result<usize> {
        let mut count = 0;
        while let Some(record) = records.try_next().await? {
            self.record(&record)?;
            count += 1;
        }
        Ok(count)
    }

    /// Write a single message.
    pub fn message(&mut self, message: &str) -> Result<()> {
        match self {
            Output::Str(out) => writeln!(out, "{message}")?,
            Output::Csv(writer) => writer.write_record([message])?,
        }
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn finish(self) -> Result<W> {
        match self {
            Output::Str(mut out) => {
                out.flush()?;
                Ok(out)
            }
            Output::Csv(writer) => Ok(writer.into_inner().map_err(|e| e.into_error())?),
        }
    }
}
