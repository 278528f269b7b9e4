//! Streaming reader over CSV account definitions
//!
//! Provides an iterator of account builders from a CSV file. Delegates CSV
//! format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! DefinitionReader implements the Iterator trait, yielding
//! `Result<AccountBuilder, String>` for each CSV row:
//!
//! ```no_run
//! use account_api_client::io::definition_reader::DefinitionReader;
//! use std::path::Path;
//!
//! let reader = DefinitionReader::new(Path::new("accounts.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(builder) => println!("Valid: {}", builder.validate().is_ok()),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Malformed rows and unsupported countries are yielded as Err variants
//! - Line numbers are included in error messages for debugging
//!
//! Field-level validation is not performed here; callers validate each
//! builder and decide what to do with failures.

use crate::core::AccountBuilder;
use crate::io::csv_format::{convert_csv_record, AccountCsvRecord};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// CSV reader over account definitions
#[derive(Debug)]
pub struct DefinitionReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl DefinitionReader {
    /// Create a new DefinitionReader from a file path
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (trailing optional columns may be left out)
    ///
    /// # Errors
    ///
    /// Returns an error message if the file could not be opened.
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }

    /// Line number (1-based, header is line 1) of the last row yielded
    pub fn line(&self) -> usize {
        self.line_num + 1
    }
}

impl Iterator for DefinitionReader {
    type Item = Result<AccountBuilder, String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<AccountCsvRecord>();
        let row = deserializer.next()?;
        self.line_num += 1;
        let line = self.line();

        Some(match row {
            Ok(record) => convert_csv_record(record).map_err(|e| format!("Line {}: {}", line, e)),
            Err(e) => Err(format!("Line {}: CSV parse error: {}", line, e)),
        })
    }
}
