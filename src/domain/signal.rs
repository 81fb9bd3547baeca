//! Trend signal derived from the latest moving-average pair.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries};
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Bullish,
    Bearish,
    Undefined,
}

impl Signal {
    /// Strictly greater short average is bullish; a tie is bearish.
    pub fn from_averages(sma_short: f64, sma_long: f64) -> Self {
        if sma_short > sma_long {
            Signal::Bullish
        } else {
            Signal::Bearish
        }
    }

    /// Colloquial name of the crossover state, if any.
    pub fn cross_label(&self) -> Option<&'static str> {
        match self {
            Signal::Bullish => Some("Golden Cross"),
            Signal::Bearish => Some("Death Cross"),
            Signal::Undefined => None,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Bullish => write!(f, "Bullish"),
            Signal::Bearish => write!(f, "Bearish"),
            Signal::Undefined => write!(f, "Undefined"),
        }
    }
}

/// Latest scalar values of a series, for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatestValues {
    pub date: NaiveDate,
    pub close: f64,
    pub sma_short: f64,
    pub sma_long: f64,
}

impl LatestValues {
    pub fn signal(&self) -> Signal {
        Signal::from_averages(self.sma_short, self.sma_long)
    }
}

impl From<&IndicatorPoint> for LatestValues {
    fn from(point: &IndicatorPoint) -> Self {
        Self {
            date: point.date,
            close: point.close,
            sma_short: point.sma_short,
            sma_long: point.sma_long,
        }
    }
}

pub fn latest(series: &IndicatorSeries) -> Option<LatestValues> {
    series.last().map(LatestValues::from)
}

pub fn latest_signal(series: &IndicatorSeries) -> Signal {
    latest(series)
        .map(|v| v.signal())
        .unwrap_or(Signal::Undefined)
}
