//! Behavior tests for the technical indicator engine.

use mercado_core::indicators::{
    build_snapshot, compute_rsi, derive_signals, simple_moving_average, RsiBands,
};
use mercado_core::{GoldenCross, IndicatorConfig, QuoteSource, Signal};

/// Deterministic pseudo-random walk, so the properties are checked on
/// irregular series without a randomness dependency.
fn walk(len: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    let mut price = 100.0;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            let step = ((state >> 33) % 21) as f64 - 10.0;
            price = f64::max(1.0, price + step);
            price
        })
        .collect()
}

// =============================================================================
// RSI
// =============================================================================

#[test]
fn when_fewer_than_fifteen_closes_rsi_is_null_otherwise_bounded() {
    for seed in 0..20 {
        for len in 0..40 {
            // Given: a series of `len` closes
            let closes = walk(len, seed);

            // When: the 14-period RSI is computed
            let rsi = compute_rsi(&closes, 14);

            // Then: it exists only with 15+ closes and stays within [0, 100]
            if len < 15 {
                assert_eq!(rsi, None, "len {len}");
            } else {
                let value = rsi.expect("enough closes");
                assert!((0.0..=100.0).contains(&value), "rsi {value} out of range");
            }
        }
    }
}

#[test]
fn when_the_window_has_no_losses_rsi_is_exactly_one_hundred() {
    // Given: an irregular prefix followed by 15 non-decreasing closes
    let mut closes = walk(30, 7);
    closes.extend([
        50.0, 50.0, 51.0, 53.0, 53.0, 54.0, 60.0, 61.0, 61.0, 62.0, 70.0, 71.0, 71.0, 72.0, 80.0,
    ]);

    // When / Then
    assert_eq!(compute_rsi(&closes, 14), Some(100.0));
}

// =============================================================================
// Moving averages
// =============================================================================

#[test]
fn when_enough_closes_exist_sma_is_the_mean_of_the_trailing_window() {
    for seed in 0..10 {
        let closes = walk(80, seed);
        for window in 1..=80 {
            let expected = closes[closes.len() - window..].iter().sum::<f64>() / window as f64;
            let actual = simple_moving_average(&closes, window).expect("enough closes");
            assert!((actual - expected).abs() < 1e-9);
        }
        assert_eq!(simple_moving_average(&closes, 81), None);
    }
}

// =============================================================================
// Signals
// =============================================================================

#[test]
fn signals_follow_price_and_rsi_thresholds() {
    let bands = RsiBands::default();
    let cases = [
        (10.0, Some(9.0), Some(75.0), Some(Signal::Bullish), Some(Signal::Overbought)),
        (10.0, Some(10.0), Some(70.0), Some(Signal::Bearish), Some(Signal::Neutral)),
        (10.0, Some(11.0), Some(29.9), Some(Signal::Bearish), Some(Signal::Oversold)),
        (10.0, None, Some(30.0), None, Some(Signal::Neutral)),
        (10.0, Some(9.0), None, Some(Signal::Bullish), None),
    ];

    for (price, sma50, rsi, trend, momentum) in cases {
        let signals = derive_signals(price, sma50, None, rsi, bands);
        assert_eq!(signals.sma50_signal, trend);
        assert_eq!(signals.rsi_signal, momentum);
        assert_eq!(signals.sma200_signal, None);
        assert_eq!(signals.golden_cross, None);
    }

    let crossed = derive_signals(10.0, Some(12.0), Some(11.0), None, bands);
    assert_eq!(crossed.golden_cross, Some(GoldenCross::Yes));
    let not_crossed = derive_signals(10.0, Some(11.0), Some(11.0), None, bands);
    assert_eq!(not_crossed.golden_cross, Some(GoldenCross::No));
}

// =============================================================================
// End-to-end snapshot
// =============================================================================

#[test]
fn when_sixty_closes_end_in_thirteen_the_snapshot_uses_trailing_windows() {
    // Given: 10, 11, 12, ... repeating, with the last close forced to 13
    let mut closes = (0..60).map(|i| 10.0 + f64::from(i % 5)).collect::<Vec<_>>();
    closes[58] = 11.0;
    closes[59] = 13.0;
    let config = IndicatorConfig::default();

    // When: the snapshot is built
    let snapshot = build_snapshot("GGAL", &closes, &config);

    // Then: windows are taken from the end of the series
    let last50 = &closes[10..];
    let expected_sma50 = last50.iter().sum::<f64>() / 50.0;
    let last20 = &closes[40..];
    let min20 = last20.iter().copied().fold(f64::INFINITY, f64::min);
    let max20 = last20.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    assert_eq!(snapshot.current_price, Some(13.0));
    let sma50 = snapshot.moving_averages.sma50.expect("50 closes available");
    assert!((sma50 - expected_sma50).abs() < 1e-9);
    assert_eq!(snapshot.moving_averages.sma200, None);
    assert_eq!(snapshot.signals.sma50_signal, Some(Signal::Bullish));
    assert_eq!(snapshot.signals.sma200_signal, None);
    assert_eq!(snapshot.signals.golden_cross, None);
    assert_eq!(snapshot.support.level1, Some(min20));
    assert_eq!(snapshot.resistance.level1, Some(max20));
    assert_eq!(snapshot.support.level2, Some(10.0));
    assert!(snapshot.rsi.is_some());
    assert_eq!(snapshot.source, QuoteSource::YahooFinance);
}

#[test]
fn when_there_are_no_closes_the_snapshot_is_all_null() {
    let snapshot = build_snapshot("GGAL", &[], &IndicatorConfig::default());

    assert_eq!(snapshot.current_price, None);
    assert_eq!(snapshot.rsi, None);
    assert_eq!(snapshot.moving_averages.distance_to_sma50, None);
    assert_eq!(snapshot.resistance.level2, None);
    assert_eq!(snapshot.source, QuoteSource::Unavailable);
}
