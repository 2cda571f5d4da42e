use crate::config::IndicatorConfig;
use crate::indicators::levels::support_resistance;
use crate::indicators::moving_average::{distance_percent, simple_moving_average};
use crate::indicators::rsi::compute_rsi;
use crate::indicators::signals::{derive_signals, RsiBands};
use crate::{MovingAverages, QuoteSource, Signals, TechnicalSnapshot, UtcDateTime};

/// Assemble a [`TechnicalSnapshot`] from an ascending close series.
///
/// The current price is the last close. Indicators that need more closes than
/// are available stay `None`, and so do the signals that depend on them.
pub fn build_snapshot(symbol: &str, closes: &[f64], config: &IndicatorConfig) -> TechnicalSnapshot {
    let current_price = closes.last().copied();
    let sma50 = simple_moving_average(closes, config.short_window);
    let sma200 = simple_moving_average(closes, config.long_window);
    let rsi = compute_rsi(closes, config.rsi_period);
    let levels = support_resistance(closes, config.near_level_window, config.far_level_window);

    let signals = match current_price {
        Some(price) => derive_signals(
            price,
            sma50,
            sma200,
            rsi,
            RsiBands {
                overbought: config.overbought,
                oversold: config.oversold,
            },
        ),
        None => Signals::default(),
    };

    let distance = |average: Option<f64>| {
        current_price
            .zip(average)
            .and_then(|(price, average)| distance_percent(price, average))
    };

    TechnicalSnapshot {
        symbol: symbol.to_owned(),
        name: symbol.to_owned(),
        current_price,
        moving_averages: MovingAverages {
            sma50,
            sma200,
            distance_to_sma50: distance(sma50),
            distance_to_sma200: distance(sma200),
        },
        rsi,
        signals,
        support: levels.support,
        resistance: levels.resistance,
        generated_at: UtcDateTime::now(),
        source: if closes.is_empty() {
            QuoteSource::Unavailable
        } else {
            QuoteSource::YahooFinance
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GoldenCross, Signal};

    #[test]
    fn short_history_leaves_long_average_and_its_signals_null() {
        let closes = (1..=60).map(f64::from).collect::<Vec<_>>();
        let snapshot = build_snapshot("GGAL", &closes, &IndicatorConfig::default());

        assert_eq!(snapshot.current_price, Some(60.0));
        assert_eq!(snapshot.moving_averages.sma50, Some(35.5));
        assert_eq!(snapshot.moving_averages.sma200, None);
        assert_eq!(snapshot.moving_averages.distance_to_sma200, None);
        assert_eq!(snapshot.signals.sma50_signal, Some(Signal::Bullish));
        assert_eq!(snapshot.signals.sma200_signal, None);
        assert_eq!(snapshot.signals.golden_cross, None);
        assert_eq!(snapshot.rsi, Some(100.0));
        assert_eq!(snapshot.signals.rsi_signal, Some(Signal::Overbought));
    }

    #[test]
    fn full_history_fills_every_field() {
        let closes = (1..=200).map(f64::from).collect::<Vec<_>>();
        let snapshot = build_snapshot("YPFD", &closes, &IndicatorConfig::default());

        assert_eq!(snapshot.moving_averages.sma200, Some(100.5));
        assert_eq!(snapshot.signals.golden_cross, Some(GoldenCross::Yes));
        assert_eq!(snapshot.support.level1, Some(181.0));
        assert_eq!(snapshot.resistance.level2, Some(200.0));
        assert_eq!(snapshot.source, QuoteSource::YahooFinance);
    }

    #[test]
    fn empty_history_yields_all_null_snapshot() {
        let snapshot = build_snapshot("BMA", &[], &IndicatorConfig::default());
        assert_eq!(snapshot.current_price, None);
        assert_eq!(snapshot.moving_averages, MovingAverages::default());
        assert_eq!(snapshot.rsi, None);
        assert_eq!(snapshot.signals, Signals::default());
        assert_eq!(snapshot.support.level1, None);
        assert_eq!(snapshot.source, QuoteSource::Unavailable);
    }
}
