//! # Domain Models
//!
//! Result shapes handed to callers and the validated input types they are
//! built from.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Trimmed, uppercased caller ticker |
//! | [`Quote`] | Current price snapshot (nullable numerics) |
//! | [`Bar`] | Daily OHLCV bar with a mandatory close |
//! | [`HistoricalSeries`] | Ascending bars plus the covered [`Period`] |
//! | [`TechnicalSnapshot`] | Moving averages, RSI, signals and price levels |
//! | [`SymbolRegistryEntry`] | Active registry entry with its [`Sector`] |
//! | [`UtcDateTime`] / [`TradeDate`] | UTC instant / calendar day |
//!
//! Results are rebuilt on every request and never persisted by this crate.

mod models;
mod symbol;
mod timestamp;

pub use models::{
    round2, validate_currency_code, Bar, GoldenCross, HistoricalSeries, Market, MovingAverages,
    Period, PriceLevels, Quote, Sector, Signal, Signals, SymbolRegistryEntry, TechnicalSnapshot,
};
pub use symbol::Symbol;
pub use timestamp::{TradeDate, UtcDateTime};
