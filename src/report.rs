use std::io::Write;

use hashdup_core::{DuplicateEntry, HexRecord, RecordStore};
use serde::Serialize;

use crate::config::{CountMode, OutputFormat};
use crate::error::{DriverError, Result};

#[derive(Debug, Serialize)]
struct JsonEntry {
    hash: String,
    count: usize,
}

/// Writes duplicate entries or sorted records to an output stream.
pub struct Reporter<W: Write> {
    out: W,
    format: OutputFormat,
    count: CountMode,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: OutputFormat, count: CountMode) -> Self {
        Self { out, format, count }
    }

    fn count_of(&self, entry: &DuplicateEntry) -> usize {
        match self.count {
            CountMode::Repeats => entry.count,
            CountMode::Occurrences => entry.occurrences(),
        }
    }

    /// `<HEX> <count>` per line, or one JSON array.
    pub fn write_duplicates(&mut self, entries: &[DuplicateEntry]) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                for entry in entries {
                    let count = self.count_of(entry);
                    writeln!(self.out, "{} {count}", entry.hex()).map_err(DriverError::Output)?;
                }
            }
            OutputFormat::Json => {
                let rows: Vec<JsonEntry> = entries
                    .iter()
                    .map(|entry| JsonEntry {
                        hash: entry.hex().to_string(),
                        count: self.count_of(entry),
                    })
                    .collect();
                serde_json::to_writer(&mut self.out, &rows)
                    .map_err(|e| DriverError::Output(e.into()))?;
                writeln!(self.out).map_err(DriverError::Output)?;
            }
        }
        self.flush()
    }

    /// Every record of the store in hex, one per line.
    pub fn write_sorted(&mut self, store: &RecordStore) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                for record in store.iter() {
                    writeln!(self.out, "{}", HexRecord(record)).map_err(DriverError::Output)?;
                }
            }
            OutputFormat::Json => {
                let rows: Vec<String> = store
                    .iter()
                    .map(|record| HexRecord(record).to_string())
                    .collect();
                serde_json::to_writer(&mut self.out, &rows)
                    .map_err(|e| DriverError::Output(e.into()))?;
                writeln!(self.out).map_err(DriverError::Output)?;
            }
        }
        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush().map_err(DriverError::Output)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
