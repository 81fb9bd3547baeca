//! Property tests for the moving-average engine.
//!
//! Uses proptest to verify:
//! 1. Every SMA point equals the naive mean of its truncated trailing window
//! 2. Output length and order follow the input
//! 3. Computing on one instrument never depends on other instruments' rows
//! 4. The signal only looks at the last point

mod common;

use common::*;
use niftysma::domain::dataset::filter_by;
use niftysma::domain::indicator::IndicatorWindows;
use niftysma::domain::indicator::sma::{compute_indicators, rolling_mean};
use niftysma::domain::signal::{Signal, latest_signal};
use proptest::prelude::*;

fn arb_close() -> impl Strategy<Value = f64> {
    (0.0..10_000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_closes(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(arb_close(), 1..max_len)
}

fn arb_windows() -> impl Strategy<Value = IndicatorWindows> {
    (1usize..60, 1usize..120)
        .prop_map(|(short, extra)| IndicatorWindows::new(short, short + extra).unwrap())
}

fn close_enough(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * b.abs().max(1.0)
}

proptest! {
    #[test]
    fn rolling_mean_matches_naive(closes in arb_closes(300), window in 1usize..250) {
        let out = rolling_mean(&closes, window);
        prop_assert_eq!(out.len(), closes.len());
        for i in 0..closes.len() {
            prop_assert!(close_enough(out[i], naive_mean(&closes, i, window)));
        }
    }

    #[test]
    fn first_point_is_its_own_close(closes in arb_closes(50), windows in arb_windows()) {
        let records = generate_records("TCS", "IT", "2024-01-01", &closes);
        let series = compute_indicators(&records, windows);
        prop_assert_eq!(series.points[0].sma_short, closes[0]);
        prop_assert_eq!(series.points[0].sma_long, closes[0]);
    }

    #[test]
    fn series_preserves_length_and_dates(closes in arb_closes(200)) {
        let records = generate_records("TCS", "IT", "2024-01-01", &closes);
        let series = compute_indicators(&records, IndicatorWindows::default());
        prop_assert_eq!(series.len(), records.len());
        for (p, r) in series.points.iter().zip(&records) {
            prop_assert_eq!(p.date, r.date);
            prop_assert_eq!(p.close, r.close);
        }
    }

    #[test]
    fn no_cross_instrument_leakage(
        target in arb_closes(120),
        other in arb_closes(120),
        windows in arb_windows(),
    ) {
        let tcs = generate_records("TCS", "IT", "2024-01-01", &target);
        let mut mixed = generate_records("INFY", "IT", "2023-06-01", &other);
        mixed.extend(tcs.clone());

        let direct = compute_indicators(&tcs, windows);
        let filtered = compute_indicators(&filter_by(&mixed, Some("IT"), "TCS"), windows);
        prop_assert_eq!(direct, filtered);
    }

    #[test]
    fn signal_follows_last_point(closes in arb_closes(300)) {
        let records = generate_records("TCS", "IT", "2024-01-01", &closes);
        let series = compute_indicators(&records, IndicatorWindows::default());
        let last = series.last().unwrap();
        let expected = if last.sma_short > last.sma_long {
            Signal::Bullish
        } else {
            Signal::Bearish
        };
        prop_assert_eq!(latest_signal(&series), expected);
    }

    #[test]
    fn short_window_stays_within_window_bounds(closes in arb_closes(200)) {
        let records = generate_records("TCS", "IT", "2024-01-01", &closes);
        let series = compute_indicators(&records, IndicatorWindows::default());
        for (i, p) in series.points.iter().enumerate() {
            let start = (i + 1).saturating_sub(50);
            let window = &closes[start..=i];
            let lo = window.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = window.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(p.sma_short >= lo - 1e-6 && p.sma_short <= hi + 1e-6);
        }
    }
}
