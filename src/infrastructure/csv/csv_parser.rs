// ============================================================
// CSV PARSER
// ============================================================
// Parse CSV files with encoding fallback and per-row header mapping

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::domain::csv::{CsvField, CsvRow};
use crate::domain::error::{AppError, Result};

/// CSV parser producing header-mapped rows
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from values
    trim: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to trim whitespace
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Parse a CSV file into ordered rows. The whole file is loaded into
    /// memory; imports are batch-sized, not streamed.
    pub fn parse_file(&self, path: &Path) -> Result<Vec<CsvRow>> {
        let content = self.read_with_encoding_fallback(path)?;
        self.parse_content(&content)
    }

    /// Parse CSV content from a string
    pub fn parse_content(&self, content: &str) -> Result<Vec<CsvRow>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        let mut rows = Vec::new();

        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            rows.push(Self::parse_row(index, &headers, &record));
        }

        Ok(rows)
    }

    /// Read a file as UTF-8, falling back to Windows-1252 for the exports
    /// spreadsheet tools tend to produce.
    fn read_with_encoding_fallback(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)
            .map_err(|e| AppError::IoError(format!("Failed to read {}: {}", path.display(), e)))?;

        match String::from_utf8(bytes) {
            Ok(content) => Ok(content),
            Err(err) => {
                let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(err.as_bytes());
                Ok(decoded.into_owned())
            }
        }
    }

    fn parse_row(index: usize, headers: &StringRecord, record: &StringRecord) -> CsvRow {
        let fields = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = record.get(idx).unwrap_or("").to_string();
                CsvField::new(header.to_string(), value)
            })
            .collect();

        CsvRow::new(index, fields)
    }
}
