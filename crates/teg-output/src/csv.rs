//! CSV output backend.
//!
//! Writes one `trace.csv`-style file with a `time,vertex,<label...>` header
//! and one row per fired event.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, TraceRow};

/// Writes fired-event rows to a single CSV file.
pub struct CsvTraceWriter {
    writer:   Writer<File>,
    finished: bool,
}

impl CsvTraceWriter {
    /// Create (or truncate) `path` and write the header row.
    ///
    /// `trace_labels` must match the labels registered on the simulation, in
    /// the same order — the observer writes values positionally.
    pub fn create(path: &Path, trace_labels: &[&str]) -> OutputResult<Self> {
        let mut writer = Writer::from_path(path)?;
        let mut header = vec!["time", "vertex"];
        header.extend_from_slice(trace_labels);
        writer.write_record(&header)?;

        Ok(Self {
            writer,
            finished: false,
        })
    }
}

impl OutputWriter for CsvTraceWriter {
    fn write_fired(&mut self, row: &TraceRow) -> OutputResult<()> {
        let mut record = vec![row.time.to_string(), row.vertex.clone()];
        record.extend(row.values.iter().cloned());
        self.writer.write_record(&record)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}
