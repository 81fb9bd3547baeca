//! CSV file price source.
//!
//! Expects a header row with at least `Stock`, `Date` and `Close`; `Category`
//! is read when present. Any other column, including a leading unnamed index
//! column, is ignored.

use crate::domain::error::NiftySmaError;
use crate::domain::price_record::RawPriceRow;
use crate::domain::settings::CleaningMode;
use crate::ports::data_port::PriceSource;
use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

const REQUIRED_COLUMNS: &[&str] = &["Stock", "Date", "Close"];

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Stock")]
    stock: String,
    #[serde(rename = "Category", default)]
    category: Option<String>,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Close")]
    close: String,
}

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl PriceSource for CsvAdapter {
    fn load_rows(&self, mode: CleaningMode) -> Result<Vec<RawPriceRow>, NiftySmaError> {
        let content = fs::read(&self.path).map_err(|e| NiftySmaError::DataSource {
            path: self.path.display().to_string(),
            reason: format!("failed to read: {}", e),
        })?;
        parse_rows(content.as_slice(), &self.describe(), mode)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parses CSV from `reader`; `label` names the source in errors. Rows that are
/// not valid UTF-8 are handled like any other malformed row.
pub fn parse_rows<R: Read>(
    reader: R,
    label: &str,
    mode: CleaningMode,
) -> Result<Vec<RawPriceRow>, NiftySmaError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| NiftySmaError::DataSource {
            path: label.to_string(),
            reason: format!("CSV header error: {}", e),
        })?
        .clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(NiftySmaError::MissingColumn {
                path: label.to_string(),
                column: column.to_string(),
            });
        }
    }

    let mut rows = Vec::new();

    for (index, result) in rdr.records().enumerate() {
        // header is line 1
        let fallback_line = index as u64 + 2;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(fallback_line);
                reject_row(mode, line, format!("CSV parse error: {}", e))?;
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(fallback_line);

        match record.deserialize::<CsvRow>(Some(&headers)) {
            Ok(row) => rows.push(RawPriceRow {
                line,
                instrument: row.stock,
                category: row.category,
                date: row.date,
                close: row.close,
            }),
            Err(e) => reject_row(mode, line, format!("malformed row: {}", e))?,
        }
    }

    Ok(rows)
}

fn reject_row(mode: CleaningMode, line: u64, reason: String) -> Result<(), NiftySmaError> {
    match mode {
        CleaningMode::Strict => Err(NiftySmaError::BadRow { line, reason }),
        CleaningMode::Lenient => {
            debug!(line, %reason, "skipping malformed CSV row");
            Ok(())
        }
    }
}
