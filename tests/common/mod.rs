#![allow(dead_code)]

use chrono::NaiveDate;
use niftysma::domain::error::NiftySmaError;
pub use niftysma::domain::price_record::{PriceRecord, RawPriceRow};
use niftysma::domain::settings::CleaningMode;
use niftysma::ports::data_port::PriceSource;
use std::cell::RefCell;

pub struct MockPriceSource {
    pub rows: Vec<RawPriceRow>,
    pub error: Option<String>,
    pub requested_modes: RefCell<Vec<CleaningMode>>,
}

impl MockPriceSource {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            error: None,
            requested_modes: RefCell::new(Vec::new()),
        }
    }

    pub fn with_row(
        mut self,
        instrument: &str,
        category: &str,
        date: &str,
        close: &str,
    ) -> Self {
        let line = self.rows.len() as u64 + 2;
        self.rows.push(raw_row(line, instrument, category, date, close));
        self
    }

    pub fn with_closes(
        mut self,
        instrument: &str,
        category: &str,
        start: &str,
        closes: &[f64],
    ) -> Self {
        let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
        for (i, close) in closes.iter().enumerate() {
            let date = (start + chrono::Duration::days(i as i64)).to_string();
            let line = self.rows.len() as u64 + 2;
            self.rows.push(raw_row(
                line,
                instrument,
                category,
                &date,
                &close.to_string(),
            ));
        }
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl PriceSource for MockPriceSource {
    fn load_rows(&self, mode: CleaningMode) -> Result<Vec<RawPriceRow>, NiftySmaError> {
        self.requested_modes.borrow_mut().push(mode);
        if let Some(reason) = &self.error {
            return Err(NiftySmaError::DataSource {
                path: "mock".into(),
                reason: reason.clone(),
            });
        }
        Ok(self.rows.clone())
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

pub fn raw_row(
    line: u64,
    instrument: &str,
    category: &str,
    date: &str,
    close: &str,
) -> RawPriceRow {
    RawPriceRow {
        line,
        instrument: instrument.to_string(),
        category: Some(category.to_string()),
        date: date.to_string(),
        close: close.to_string(),
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Consecutive daily records for one instrument starting at `start`.
pub fn generate_records(
    instrument: &str,
    category: &str,
    start: &str,
    closes: &[f64],
) -> Vec<PriceRecord> {
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceRecord {
            instrument: instrument.to_string(),
            category: Some(category.to_string()),
            date: start + chrono::Duration::days(i as i64),
            close,
        })
        .collect()
}

/// Naive trailing mean with a truncated window, for cross-checking.
pub fn naive_mean(closes: &[f64], i: usize, window: usize) -> f64 {
    let start = (i + 1).saturating_sub(window);
    let slice = &closes[start..=i];
    slice.iter().sum::<f64>() / slice.len() as f64
}

pub const SAMPLE_CSV: &str = ",Stock,Category,Date,Close\n\
0,TCS,IT,2025-01-01,10\n\
1,TCS,IT,2025-01-02,20\n\
2,TCS,IT,2025-01-03,30\n\
3,INFY,IT,2025-01-01,100\n\
4,TATA MOTORS,Auto,2025-01-01,700\n\
5,TATA MOTORS,Auto,2025-01-02,710\n\
6,M M,Auto,not-a-date,1\n\
7,SBIN,Banking,2025-01-01,500\n";
