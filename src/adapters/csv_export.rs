//! CSV export of an enriched indicator series.

use crate::domain::analysis::Analysis;
use crate::domain::error::NiftySmaError;
use crate::ports::report_port::ReportPort;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ExportRow<'a> {
    date: String,
    stock: &'a str,
    category: &'a str,
    close: f64,
    sma_short: f64,
    sma_long: f64,
}

/// Writes `Date,Stock,Category,Close,SMA_<short>,SMA_<long>`, one row per point.
pub struct CsvExportAdapter;

impl CsvExportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvExportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn csv_error(e: csv::Error) -> NiftySmaError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => NiftySmaError::Io(io),
        other => NiftySmaError::Io(std::io::Error::other(format!("{:?}", other))),
    }
}

impl ReportPort for CsvExportAdapter {
    fn write(&self, analysis: &Analysis, out: &mut dyn Write) -> Result<(), NiftySmaError> {
        let windows = analysis.series.windows;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(out);

        wtr.write_record([
            "Date".to_string(),
            "Stock".to_string(),
            "Category".to_string(),
            "Close".to_string(),
            format!("SMA_{}", windows.short()),
            format!("SMA_{}", windows.long()),
        ])
        .map_err(csv_error)?;

        for p in &analysis.series.points {
            wtr.serialize(ExportRow {
                date: p.date.format("%Y-%m-%d").to_string(),
                stock: &p.instrument,
                category: p.category.as_deref().unwrap_or(""),
                close: p.close,
                sma_short: p.sma_short,
                sma_long: p.sma_long,
            })
            .map_err(csv_error)?;
        }

        wtr.flush()?;
        Ok(())
    }
}
