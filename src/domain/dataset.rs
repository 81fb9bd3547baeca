//! Normalized price dataset and selection queries.
//!
//! A `Dataset` is built once from a `PriceSource` and never mutated; every
//! query returns freshly built values.

use crate::domain::date_parse::parse_date;
use crate::domain::error::NiftySmaError;
use crate::domain::price_record::{
    PriceRecord, RawPriceRow, normalize_category, normalize_instrument, parse_close,
};
use crate::domain::settings::CleaningMode;
use crate::ports::data_port::PriceSource;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<PriceRecord>,
}

impl Dataset {
    pub fn from_records(records: Vec<PriceRecord>) -> Self {
        Self { records }
    }

    pub fn load(source: &dyn PriceSource, mode: CleaningMode) -> Result<Self, NiftySmaError> {
        let rows = source.load_rows(mode)?;
        let row_count = rows.len();
        let records = normalize(rows, mode)?;
        info!(
            source = %source.describe(),
            %mode,
            rows = row_count,
            records = records.len(),
            "loaded price dataset"
        );
        Ok(Self::from_records(records))
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct non-missing categories, ascending.
    pub fn categories(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .records
            .iter()
            .filter_map(|r| r.category.as_deref())
            .collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Distinct instruments, ascending, restricted to `category` when given.
    pub fn instruments(&self, category: Option<&str>) -> Vec<String> {
        let category = normalize_category(category);
        let set: BTreeSet<&str> = self
            .records
            .iter()
            .filter(|r| category.is_none() || r.category == category)
            .map(|r| r.instrument.as_str())
            .collect();
        set.into_iter().map(str::to_string).collect()
    }

    pub fn filter_by(&self, category: Option<&str>, instrument: &str) -> Vec<PriceRecord> {
        filter_by(&self.records, category, instrument)
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }
}

/// Cleans raw rows into price records.
///
/// Rows with an empty instrument, an unparseable date, or a close that is not
/// a finite non-negative number are dropped in `Lenient` mode; in `Strict`
/// mode the first such row is returned as `BadRow`.
pub fn normalize(
    rows: Vec<RawPriceRow>,
    mode: CleaningMode,
) -> Result<Vec<PriceRecord>, NiftySmaError> {
    let mut records = Vec::with_capacity(rows.len());
    let mut dropped = 0usize;

    for row in rows {
        match clean_row(&row) {
            Ok(record) => records.push(record),
            Err(reason) => match mode {
                CleaningMode::Strict => {
                    return Err(NiftySmaError::BadRow {
                        line: row.line,
                        reason,
                    });
                }
                CleaningMode::Lenient => {
                    debug!(line = row.line, %reason, "dropping row");
                    dropped += 1;
                }
            },
        }
    }

    if dropped > 0 {
        warn!(dropped, kept = records.len(), "dropped rows that failed to clean");
    }

    Ok(records)
}

fn clean_row(row: &RawPriceRow) -> Result<PriceRecord, String> {
    let instrument = normalize_instrument(&row.instrument);
    if instrument.is_empty() {
        return Err("empty instrument".to_string());
    }
    let date =
        parse_date(&row.date).ok_or_else(|| format!("unparseable date {:?}", row.date.trim()))?;
    let close = parse_close(&row.close)?;

    Ok(PriceRecord {
        instrument,
        category: normalize_category(row.category.as_deref()),
        date,
        close,
    })
}

/// Records of `instrument` (and `category` when given), sorted ascending by
/// date. Both keys are normalized the same way stored identifiers are.
pub fn filter_by(
    records: &[PriceRecord],
    category: Option<&str>,
    instrument: &str,
) -> Vec<PriceRecord> {
    let category = normalize_category(category);
    let key = normalize_instrument(instrument);
    let mut selected: Vec<PriceRecord> = records
        .iter()
        .filter(|r| r.matches(category.as_deref(), &key))
        .cloned()
        .collect();
    selected.sort_by_key(|r| r.date);
    selected
}
