//! Core contracts for the MERVAL market-data gateway.
//!
//! This crate contains:
//! - Canonical quote, history and technical-analysis models
//! - The upstream chart client with its secondary index source
//! - Technical indicators computed from daily closes
//! - The time-bounded symbol cache in front of the registry
//! - Gateway configuration and market-session status

pub mod config;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod http_client;
pub mod indicators;
pub mod market_status;
pub mod outcome;
pub mod source;
pub mod symbols;

pub use config::{
    AliasTable, GatewayConfig, IndicatorConfig, MarketHours, RegistryConfig, SymbolCacheConfig,
    UpstreamConfig,
};
pub use domain::{
    round2, validate_currency_code, Bar, GoldenCross, HistoricalSeries, Market, MovingAverages,
    Period, PriceLevels, Quote, Sector, Signal, Signals, Symbol, SymbolRegistryEntry,
    TechnicalSnapshot, TradeDate, UtcDateTime,
};
pub use error::{
    ConfigError, CoreError, FetchError, RegistryError, SymbolRejection, ValidationError,
};
pub use fetcher::{
    HistoryWindow, MarketDataFetcher, MarketSummary, QuoteBatch, QuoteBatchRequest,
    ResolvedSymbol, DEFAULT_HISTORY_DAYS, MAX_BATCH_SYMBOLS, MAX_HISTORY_DAYS, MIN_HISTORY_DAYS,
};
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use market_status::{market_status, MarketState, MarketStatus};
pub use mercado_registry::{StoreConfig, StoreError, SymbolRecord, SymbolStore};
pub use outcome::Outcome;
pub use source::QuoteSource;
pub use symbols::{SymbolCache, SymbolRegistry, FALLBACK_SECTORS, FALLBACK_SYMBOLS};
