//! Stateless query layer: filter, compute indicators, derive the signal.

use crate::domain::dataset::Dataset;
use crate::domain::indicator::sma::compute_indicators;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorWindows};
use crate::domain::price_record::{normalize_category, normalize_instrument};
use crate::domain::signal::{LatestValues, Signal, latest, latest_signal};

/// A category + instrument choice. `None` instrument means "first available".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub category: Option<String>,
    pub instrument: Option<String>,
}

impl Selection {
    pub fn new(category: Option<&str>, instrument: Option<&str>) -> Self {
        Self {
            category: normalize_category(category),
            instrument: instrument.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub category: Option<String>,
    /// Resolved instrument key; `None` when the selection matched nothing to default to.
    pub instrument: Option<String>,
    pub series: IndicatorSeries,
    pub signal: Signal,
    pub latest: Option<LatestValues>,
}

impl Analysis {
    /// The last `n` points (or fewer), in chronological order.
    pub fn tail(&self, n: usize) -> &[IndicatorPoint] {
        let points = &self.series.points;
        &points[points.len().saturating_sub(n)..]
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Resolves the instrument for a selection: the given one (normalized), or the
/// first instrument of the category in ascending order.
pub fn resolve_instrument(dataset: &Dataset, selection: &Selection) -> Option<String> {
    match &selection.instrument {
        Some(i) => Some(normalize_instrument(i)),
        None => dataset
            .instruments(selection.category.as_deref())
            .into_iter()
            .next(),
    }
}

pub fn analyze(dataset: &Dataset, selection: &Selection, windows: IndicatorWindows) -> Analysis {
    let category = selection.category.clone();
    let instrument = resolve_instrument(dataset, selection);

    let series = match &instrument {
        Some(key) => {
            let sorted = dataset.filter_by(category.as_deref(), key);
            compute_indicators(&sorted, windows)
        }
        None => IndicatorSeries::empty(windows),
    };

    Analysis {
        category,
        instrument,
        signal: latest_signal(&series),
        latest: latest(&series),
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price_record::PriceRecord;
    use chrono::NaiveDate;

    fn rec(instrument: &str, category: &str, day: u32, close: f64) -> PriceRecord {
        PriceRecord {
            instrument: instrument.into(),
            category: Some(category.into()),
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            close,
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            rec("TCS", "IT", 3, 30.0),
            rec("TCS", "IT", 1, 10.0),
            rec("TCS", "IT", 2, 20.0),
            rec("INFY", "IT", 1, 5.0),
            rec("INFY", "IT", 2, 9.0),
            rec("SBIN", "Banking", 1, 500.0),
        ])
    }

    #[test]
    fn analyze_explicit_selection() {
        let a = analyze(
            &dataset(),
            &Selection::new(Some("IT"), Some("TCS")),
            IndicatorWindows::default(),
        );
        assert_eq!(a.instrument.as_deref(), Some("TCS"));
        assert_eq!(a.series.len(), 3);
        let latest = a.latest.unwrap();
        assert_eq!(latest.close, 30.0);
        assert_eq!(latest.sma_short, 20.0);
        assert_eq!(latest.sma_long, 20.0);
        assert_eq!(a.signal, Signal::Bearish);
    }

    #[test]
    fn analyze_defaults_to_first_instrument_in_category() {
        let a = analyze(
            &dataset(),
            &Selection::new(Some("IT"), None),
            IndicatorWindows::default(),
        );
        assert_eq!(a.instrument.as_deref(), Some("INFY"));
        assert_eq!(a.series.len(), 2);
    }

    #[test]
    fn analyze_bullish_with_short_windows() {
        let windows = IndicatorWindows::new(1, 3).unwrap();
        let a = analyze(&dataset(), &Selection::new(None, Some("TCS")), windows);
        // short = 30, long = 20
        assert_eq!(a.signal, Signal::Bullish);
    }

    #[test]
    fn analyze_unknown_instrument_is_undefined() {
        let a = analyze(
            &dataset(),
            &Selection::new(Some("IT"), Some("WIPRO")),
            IndicatorWindows::default(),
        );
        assert!(a.is_empty());
        assert!(a.latest.is_none());
        assert_eq!(a.signal, Signal::Undefined);
    }

    #[test]
    fn analyze_empty_category_is_undefined() {
        let a = analyze(
            &dataset(),
            &Selection::new(Some("Pharma"), None),
            IndicatorWindows::default(),
        );
        assert!(a.instrument.is_none());
        assert!(a.is_empty());
        assert_eq!(a.signal, Signal::Undefined);
    }

    #[test]
    fn analyze_empty_dataset() {
        let a = analyze(
            &Dataset::default(),
            &Selection::default(),
            IndicatorWindows::default(),
        );
        assert!(a.is_empty());
        assert_eq!(a.signal, Signal::Undefined);
    }

    #[test]
    fn tail_returns_last_points_in_order() {
        let a = analyze(
            &dataset(),
            &Selection::new(None, Some("TCS")),
            IndicatorWindows::default(),
        );
        let tail = a.tail(2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].close, 20.0);
        assert_eq!(tail[1].close, 30.0);
        assert_eq!(a.tail(20).len(), 3);
        assert!(a.tail(0).is_empty());
    }

    #[test]
    fn padded_category_is_trimmed() {
        let a = analyze(
            &dataset(),
            &Selection::new(Some("  IT "), None),
            IndicatorWindows::default(),
        );
        assert_eq!(a.category.as_deref(), Some("IT"));
        assert_eq!(a.instrument.as_deref(), Some("INFY"));
        assert_eq!(a.series.len(), 2);
    }

    #[test]
    fn resolve_instrument_normalizes() {
        let sel = Selection::new(None, Some(" T C S "));
        assert_eq!(resolve_instrument(&dataset(), &sel).as_deref(), Some("TCS"));
    }
}
