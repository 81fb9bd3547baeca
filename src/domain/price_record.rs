//! Price record representation.

use chrono::NaiveDate;

/// A row as read from the tabular source, before any cleaning.
///
/// `line` is the 1-based line number in the source, used for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPriceRow {
    pub line: u64,
    pub instrument: String,
    pub category: Option<String>,
    pub date: String,
    pub close: String,
}

/// A cleaned, dated closing price for one instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub instrument: String,
    pub category: Option<String>,
    pub date: NaiveDate,
    pub close: f64,
}

impl PriceRecord {
    /// True when this record belongs to `instrument` and, if given, `category`.
    ///
    /// `instrument` must already be normalized.
    pub fn matches(&self, category: Option<&str>, instrument: &str) -> bool {
        if self.instrument != instrument {
            return false;
        }
        match category {
            Some(c) => self.category.as_deref() == Some(c),
            None => true,
        }
    }
}

/// Deletes every whitespace character, so "TATA MOTORS" and "TATAMOTORS" share a key.
pub fn normalize_instrument(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Trims a category label; blank labels are treated as missing.
pub fn normalize_category(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Parses a closing price; rejects negatives, NaN and infinities.
pub fn parse_close(raw: &str) -> Result<f64, String> {
    let trimmed = raw.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| format!("unparseable close {:?}", trimmed))?;
    if !value.is_finite() {
        return Err(format!("close is not finite: {:?}", trimmed));
    }
    if value < 0.0 {
        return Err(format!("close is negative: {}", value));
    }
    Ok(value)
}
