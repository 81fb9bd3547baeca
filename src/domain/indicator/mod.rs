//! Moving-average indicator types.
//!
//! - `IndicatorWindows`: the short/long window pair (50/200 by default)
//! - `IndicatorPoint`: one price record augmented with both moving averages
//! - `IndicatorSeries`: the ordered points for one selection plus the windows used

pub mod sma;

use crate::domain::error::NiftySmaError;
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorWindows {
    short: usize,
    long: usize,
}

impl IndicatorWindows {
    pub const DEFAULT_SHORT: usize = 50;
    pub const DEFAULT_LONG: usize = 200;

    /// Both windows must be positive and `short < long`.
    pub fn new(short: usize, long: usize) -> Result<Self, NiftySmaError> {
        if short == 0 {
            return Err(window_error("short_window", "short_window must be positive"));
        }
        if long == 0 {
            return Err(window_error("long_window", "long_window must be positive"));
        }
        if short >= long {
            return Err(window_error(
                "short_window",
                "short_window must be less than long_window",
            ));
        }
        Ok(Self { short, long })
    }

    pub fn short(&self) -> usize {
        self.short
    }

    pub fn long(&self) -> usize {
        self.long
    }
}

impl Default for IndicatorWindows {
    fn default() -> Self {
        Self {
            short: Self::DEFAULT_SHORT,
            long: Self::DEFAULT_LONG,
        }
    }
}

impl fmt::Display for IndicatorWindows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SMA({})/SMA({})", self.short, self.long)
    }
}

fn window_error(key: &str, reason: &str) -> NiftySmaError {
    NiftySmaError::ConfigInvalid {
        section: "indicators".to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorPoint {
    pub instrument: String,
    pub category: Option<String>,
    pub date: NaiveDate,
    pub close: f64,
    pub sma_short: f64,
    pub sma_long: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub windows: IndicatorWindows,
    pub points: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub fn empty(windows: IndicatorWindows) -> Self {
        Self {
            windows,
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&IndicatorPoint> {
        self.points.last()
    }
}
