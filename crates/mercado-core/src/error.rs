use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use thiserror::Error;

use crate::http_client::HttpError;

/// Malformed caller input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },
    #[error("date must be YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },

    #[error("currency must be a 3-letter uppercase ISO code: '{value}'")]
    InvalidCurrency { value: String },
    #[error("unknown sector '{value}'")]
    UnknownSector { value: String },
    #[error("unknown market '{value}'")]
    UnknownMarket { value: String },

    #[error("quote batch must contain at least one symbol")]
    EmptyBatch,
    #[error("quote batch of {len} symbols exceeds max {max}")]
    BatchTooLarge { len: usize, max: usize },
    #[error("history window of {days} days must be within {min}..={max}")]
    HistoryWindowOutOfRange { days: u32, min: u32, max: u32 },
}

/// One or more symbols are not in the active registry.
///
/// Symbols are kept exactly as the caller supplied them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRejection {
    symbols: Vec<String>,
}

impl SymbolRejection {
    pub fn new(symbols: Vec<String>) -> Self {
        Self { symbols }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }
}

impl Display for SymbolRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.symbols.as_slice() {
            [single] => write!(f, "symbol '{single}' is not valid for MERVAL"),
            many => write!(f, "symbols not valid for MERVAL: {}", many.join(", ")),
        }
    }
}

impl std::error::Error for SymbolRejection {}

/// Upstream market-data failure. Never leaves the fetcher.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),
    #[error("upstream returned status {status}")]
    Status { status: u16 },
    #[error("malformed upstream payload: {0}")]
    Parse(String),
    #[error("upstream returned no data for {0}")]
    NoData(String),
}

/// Symbol registry could not be queried.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Store(#[from] mercado_registry::StoreError),
    #[error("registry task failed: {0}")]
    Task(String),
}

/// Configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("environment variable {name} has invalid value '{value}'")]
    InvalidEnv { name: &'static str, value: String },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Rejected(#[from] SymbolRejection),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
