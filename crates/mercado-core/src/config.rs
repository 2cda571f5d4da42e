//! Runtime configuration for the gateway core.
//!
//! Every field has a default matching the Buenos Aires market conventions, so
//! an empty JSON object is a valid configuration file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use mercado_registry::StoreConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ConfigError;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub upstream: UpstreamConfig,
    pub indicators: IndicatorConfig,
    pub symbol_cache: SymbolCacheConfig,
    pub market_hours: MarketHours,
    pub aliases: AliasTable,
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub chart_base_url: String,
    pub index_fallback_url: String,
    pub index_symbol: String,
    pub index_name: String,
    pub exchange_suffix: String,
    pub user_agent: String,
    pub quote_timeout_ms: u64,
    pub history_timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            chart_base_url: String::from("https://query1.finance.yahoo.com/v8/finance/chart"),
            index_fallback_url: String::from(
                "https://open.bymadata.com.ar/vanoms-be-core/rest/api/bymadata/free/index/I.MERV",
            ),
            index_symbol: String::from("^MERV"),
            index_name: String::from("Índice Merval"),
            exchange_suffix: String::from(".BA"),
            user_agent: String::from(DEFAULT_USER_AGENT),
            quote_timeout_ms: 10_000,
            history_timeout_ms: 15_000,
        }
    }
}

/// Indicator windows and RSI thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub rsi_period: usize,
    pub short_window: usize,
    pub long_window: usize,
    pub near_level_window: usize,
    pub far_level_window: usize,
    pub history_days: u32,
    pub overbought: f64,
    pub oversold: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            short_window: 50,
            long_window: 200,
            near_level_window: 20,
            far_level_window: 50,
            history_days: 200,
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolCacheConfig {
    pub ttl_secs: u64,
}

impl SymbolCacheConfig {
    pub const fn ttl(self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for SymbolCacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 3_600 }
    }
}

/// Trading session in exchange-local hours, `[open_hour, close_hour)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketHours {
    pub open_hour: u8,
    pub close_hour: u8,
    pub utc_offset_hours: i8,
}

impl Default for MarketHours {
    fn default() -> Self {
        Self {
            open_hour: 11,
            close_hour: 17,
            utc_offset_hours: -3,
        }
    }
}

/// Caller-facing ticker to registry code, for tickers whose listed code differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct AliasTable(BTreeMap<String, String>);

impl AliasTable {
    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(from, to)| {
                    (
                        from.trim().to_ascii_uppercase(),
                        to.trim().to_ascii_uppercase(),
                    )
                })
                .collect(),
        )
    }

    /// Mapped code for an already-uppercased ticker.
    pub fn resolve<'a>(&'a self, ticker: &'a str) -> &'a str {
        self.0.get(ticker).map_or(ticker, String::as_str)
    }
}

impl From<BTreeMap<String, String>> for AliasTable {
    fn from(value: BTreeMap<String, String>) -> Self {
        Self::new(value)
    }
}

impl From<AliasTable> for BTreeMap<String, String> {
    fn from(value: AliasTable) -> Self {
        value.0
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::new([(String::from("YPF"), String::from("YPFD"))])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// DuckDB file; `None` resolves under `MERCADO_HOME`.
    pub db_path: Option<PathBuf>,
}

impl RegistryConfig {
    pub fn store_config(&self) -> StoreConfig {
        match &self.db_path {
            Some(path) => StoreConfig::at(path.clone()),
            None => StoreConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Read a JSON configuration file; missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Defaults with `MERCADO_*` environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(url) = lookup("MERCADO_CHART_URL") {
            self.upstream.chart_base_url = url.trim_end_matches('/').to_owned();
        }
        if let Some(url) = lookup("MERCADO_INDEX_FALLBACK_URL") {
            self.upstream.index_fallback_url = url;
        }
        if let Some(value) = lookup("MERCADO_QUOTE_TIMEOUT_MS") {
            self.upstream.quote_timeout_ms = parse_number("MERCADO_QUOTE_TIMEOUT_MS", &value)?;
        }
        if let Some(value) = lookup("MERCADO_HISTORY_TIMEOUT_MS") {
            self.upstream.history_timeout_ms =
                parse_number("MERCADO_HISTORY_TIMEOUT_MS", &value)?;
        }
        if let Some(value) = lookup("MERCADO_SYMBOL_CACHE_TTL_SECS") {
            self.symbol_cache.ttl_secs = parse_number("MERCADO_SYMBOL_CACHE_TTL_SECS", &value)?;
        }

        if let Some(path) = lookup("MERCADO_REGISTRY_PATH") {
            self.registry.db_path = Some(PathBuf::from(path));
        } else if let Some(home) = lookup("MERCADO_HOME") {
            self.registry.db_path = Some(PathBuf::from(home).join("registry.duckdb"));
        }

        Ok(())
    }
}

fn parse_number(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidEnv {
            name,
            value: value.to_owned(),
        })
}
