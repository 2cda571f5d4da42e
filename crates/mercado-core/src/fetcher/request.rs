use serde::Serialize;

use crate::market_status::MarketStatus;
use crate::{Quote, Symbol, UtcDateTime, ValidationError};

/// Largest batch accepted by [`QuoteBatchRequest::new`].
pub const MAX_BATCH_SYMBOLS: usize = 50;
pub const MIN_HISTORY_DAYS: u32 = 1;
pub const MAX_HISTORY_DAYS: u32 = 365;
pub const DEFAULT_HISTORY_DAYS: u32 = 30;

/// Validated set of tickers for a concurrent quote fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteBatchRequest {
    symbols: Vec<Symbol>,
}

impl QuoteBatchRequest {
    pub fn new(symbols: Vec<Symbol>) -> Result<Self, ValidationError> {
        if symbols.is_empty() {
            return Err(ValidationError::EmptyBatch);
        }
        if symbols.len() > MAX_BATCH_SYMBOLS {
            return Err(ValidationError::BatchTooLarge {
                len: symbols.len(),
                max: MAX_BATCH_SYMBOLS,
            });
        }
        Ok(Self { symbols })
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}

/// Number of calendar days of history to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryWindow(u32);

impl HistoryWindow {
    pub fn new(days: u32) -> Result<Self, ValidationError> {
        if !(MIN_HISTORY_DAYS..=MAX_HISTORY_DAYS).contains(&days) {
            return Err(ValidationError::HistoryWindowOutOfRange {
                days,
                min: MIN_HISTORY_DAYS,
                max: MAX_HISTORY_DAYS,
            });
        }
        Ok(Self(days))
    }

    pub const fn days(self) -> u32 {
        self.0
    }

    pub const fn seconds(self) -> i64 {
        self.0 as i64 * 86_400
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self(DEFAULT_HISTORY_DAYS)
    }
}

/// Result of a concurrent quote fan-out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteBatch {
    pub stocks: Vec<Quote>,
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub fetched_at: UtcDateTime,
}

impl QuoteBatch {
    pub fn from_quotes(stocks: Vec<Quote>) -> Self {
        let total = stocks.len();
        let successful = stocks.iter().filter(|quote| quote.has_price()).count();
        Self {
            stocks,
            total,
            successful,
            failed: total - successful,
            fetched_at: UtcDateTime::now(),
        }
    }
}

/// Index quote plus session state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSummary {
    pub index: Quote,
    pub market_status: MarketStatus,
    pub generated_at: UtcDateTime,
}
