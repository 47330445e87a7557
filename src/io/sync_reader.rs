//! Streaming CSV reader for the operation log
//!
//! Provides an iterator over ledger operations from a CSV file, delegating
//! format concerns to the csv_format module. Records are read one at a time;
//! memory usage is O(1) per record, not O(file size).
//!
//! # Error Handling
//!
//! - Fatal errors (file not found) are returned from `new()`
//! - Individual record errors are yielded as Err variants with line numbers,
//!   so the caller can skip bad rows and keep processing

use crate::io::csv_format::{convert_operation_record, OperationCsvRecord};
use crate::types::{LedgerError, Operation};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Streaming reader over the operation log
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// The CSV reader trims whitespace and allows flexible field counts so
    /// delete rows can omit the transaction columns.
    ///
    /// # Errors
    ///
    /// * `FileNotFound` - The path could not be opened
    pub fn new(path: &Path) -> Result<Self, LedgerError> {
        let file = File::open(path).map_err(|_| LedgerError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<Operation, String>;

    /// Get the next operation from the CSV file
    ///
    /// # Returns
    ///
    /// * `Some(Ok(Operation))` - Successfully parsed record
    /// * `Some(Err(String))` - Parse or conversion error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<OperationCsvRecord>();

        match deserializer.next()? {
            Ok(record) => {
                self.line_num += 1;
                Some(
                    convert_operation_record(record)
                        .map_err(|e| format!("Line {}: {}", self.line_num + 1, e)),
                )
            }
            Err(e) => {
                self.line_num += 1;
                Some(Err(format!(
                    "Line {}: CSV parse error: {}",
                    self.line_num + 1,
                    e
                )))
            }
        }
    }
}
