//! Simple Moving Average with a minimum-periods-of-one policy.
//!
//! SMA(n)[i] = mean(C[max(0, i-n+1)..=i])
//! The window truncates at the start of the series, so every point is defined
//! and SMA(n)[0] == C[0].

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorWindows};
use crate::domain::price_record::PriceRecord;

/// Trailing mean of `values` over at most `window` points. Window 0 yields an empty vector.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(values.len());

    for i in 0..values.len() {
        let start = (i + 1).saturating_sub(window);
        let slice = &values[start..=i];
        let sum: f64 = slice.iter().sum();
        out.push(sum / slice.len() as f64);
    }

    out
}

/// Computes both moving averages over `sorted`, which must already be one
/// instrument's records in chronological order.
pub fn compute_indicators(sorted: &[PriceRecord], windows: IndicatorWindows) -> IndicatorSeries {
    if sorted.is_empty() {
        return IndicatorSeries::empty(windows);
    }

    let closes: Vec<f64> = sorted.iter().map(|r| r.close).collect();
    let short = rolling_mean(&closes, windows.short());
    let long = rolling_mean(&closes, windows.long());

    let points = sorted
        .iter()
        .zip(short)
        .zip(long)
        .map(|((record, sma_short), sma_long)| IndicatorPoint {
            instrument: record.instrument.clone(),
            category: record.category.clone(),
            date: record.date,
            close: record.close,
            sma_short,
            sma_long,
        })
        .collect();

    IndicatorSeries { windows, points }
}
