use crate::{GoldenCross, Signal, Signals};

/// RSI thresholds; readings strictly outside them are extreme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RsiBands {
    pub overbought: f64,
    pub oversold: f64,
}

impl Default for RsiBands {
    fn default() -> Self {
        Self {
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

pub fn derive_signals(
    current_price: f64,
    sma50: Option<f64>,
    sma200: Option<f64>,
    rsi: Option<f64>,
    bands: RsiBands,
) -> Signals {
    Signals {
        sma50_signal: sma50.map(|average| trend(current_price, average)),
        sma200_signal: sma200.map(|average| trend(current_price, average)),
        rsi_signal: rsi.map(|value| momentum(value, bands)),
        golden_cross: match (sma50, sma200) {
            (Some(short), Some(long)) if short > long => Some(GoldenCross::Yes),
            (Some(_), Some(_)) => Some(GoldenCross::No),
            _ => None,
        },
    }
}

fn trend(price: f64, average: f64) -> Signal {
    if price > average {
        Signal::Bullish
    } else {
        Signal::Bearish
    }
}

fn momentum(rsi: f64, bands: RsiBands) -> Signal {
    if rsi > bands.overbought {
        Signal::Overbought
    } else if rsi < bands.oversold {
        Signal::Oversold
    } else {
        Signal::Neutral
    }
}
