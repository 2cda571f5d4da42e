use std::fmt::{Display, Formatter};
use std::str::FromStr;

use mercado_registry::SymbolRecord;
use serde::{Deserialize, Serialize};

use crate::{QuoteSource, TradeDate, UtcDateTime, ValidationError};

/// Current price snapshot for one ticker or the market index.
///
/// Every numeric field is optional: an unavailable quote keeps the same shape
/// with all of them `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub upstream_id: String,
    pub name: String,
    pub price: Option<f64>,
    pub previous_close: Option<f64>,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub volume: Option<u64>,
    pub currency: Option<String>,
    pub date: Option<TradeDate>,
    pub fetched_at: UtcDateTime,
    pub source: QuoteSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Quote {
    pub fn unavailable(
        symbol: impl Into<String>,
        upstream_id: impl Into<String>,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let fetched_at = UtcDateTime::now();
        Self {
            symbol: symbol.into(),
            upstream_id: upstream_id.into(),
            name: name.into(),
            price: None,
            previous_close: None,
            change: None,
            change_percent: None,
            open: None,
            high: None,
            low: None,
            volume: None,
            currency: None,
            date: Some(fetched_at.date()),
            fetched_at,
            source: QuoteSource::Unavailable,
            message: Some(message.into()),
        }
    }

    pub const fn has_price(&self) -> bool {
        self.price.is_some()
    }
}

/// Daily OHLCV bar. Bars without a close are never constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: TradeDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<u64>,
}

/// Date range actually covered by a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub from: TradeDate,
    pub to: TradeDate,
    pub days: usize,
}

/// Daily bars for one ticker, ascending by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    pub symbol: String,
    pub upstream_id: String,
    pub name: String,
    pub requested_days: u32,
    pub period: Period,
    pub bars: Vec<Bar>,
    pub fetched_at: UtcDateTime,
    pub source: QuoteSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HistoricalSeries {
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }
}

/// Directional reading derived from an average or oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    Bullish,
    Bearish,
    Overbought,
    Oversold,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoldenCross {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Signals {
    pub sma50_signal: Option<Signal>,
    pub sma200_signal: Option<Signal>,
    pub rsi_signal: Option<Signal>,
    pub golden_cross: Option<GoldenCross>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MovingAverages {
    #[serde(serialize_with = "round2::serialize")]
    pub sma50: Option<f64>,
    #[serde(serialize_with = "round2::serialize")]
    pub sma200: Option<f64>,
    #[serde(serialize_with = "round2::serialize")]
    pub distance_to_sma50: Option<f64>,
    #[serde(serialize_with = "round2::serialize")]
    pub distance_to_sma200: Option<f64>,
}

/// Near (`level1`) and far (`level2`) price bands.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceLevels {
    pub level1: Option<f64>,
    pub level2: Option<f64>,
}

/// Indicator readings for one ticker.
///
/// Fields that need more history than is available are `None`, never zero.
/// Values are kept unrounded; serialization rounds to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSnapshot {
    pub symbol: String,
    pub name: String,
    pub current_price: Option<f64>,
    pub moving_averages: MovingAverages,
    #[serde(serialize_with = "round2::serialize")]
    pub rsi: Option<f64>,
    pub signals: Signals,
    pub support: PriceLevels,
    pub resistance: PriceLevels,
    pub generated_at: UtcDateTime,
    pub source: QuoteSource,
}

/// Sector labels of the registry's closed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Sector {
    Bancos,
    PetroleoYGas,
    Telecomunicaciones,
    Energia,
    Siderurgia,
    Alimentos,
    Construccion,
    Metalurgia,
    Papel,
    Transporte,
    Holding,
    Otros,
}

impl Sector {
    pub const ALL: [Self; 12] = [
        Self::Bancos,
        Self::PetroleoYGas,
        Self::Telecomunicaciones,
        Self::Energia,
        Self::Siderurgia,
        Self::Alimentos,
        Self::Construccion,
        Self::Metalurgia,
        Self::Papel,
        Self::Transporte,
        Self::Holding,
        Self::Otros,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bancos => "Bancos",
            Self::PetroleoYGas => "Petróleo y Gas",
            Self::Telecomunicaciones => "Telecomunicaciones",
            Self::Energia => "Energía",
            Self::Siderurgia => "Siderurgia",
            Self::Alimentos => "Alimentos",
            Self::Construccion => "Construcción",
            Self::Metalurgia => "Metalurgia",
            Self::Papel => "Papel",
            Self::Transporte => "Transporte",
            Self::Holding => "Holding",
            Self::Otros => "Otros",
        }
    }
}

impl Display for Sector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sector {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|sector| sector.as_str().to_lowercase() == wanted)
            .ok_or_else(|| ValidationError::UnknownSector {
                value: value.to_owned(),
            })
    }
}

impl TryFrom<String> for Sector {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Sector> for String {
    fn from(value: Sector) -> Self {
        value.as_str().to_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Market {
    Merval,
    Mae,
    Byma,
}

impl Market {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Merval => "MERVAL",
            Self::Mae => "MAE",
            Self::Byma => "BYMA",
        }
    }
}

impl FromStr for Market {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "MERVAL" => Ok(Self::Merval),
            "MAE" => Ok(Self::Mae),
            "BYMA" => Ok(Self::Byma),
            _ => Err(ValidationError::UnknownMarket {
                value: value.to_owned(),
            }),
        }
    }
}

/// Active registry entry as seen by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRegistryEntry {
    pub symbol: String,
    pub name: String,
    pub sector: Sector,
    pub market: Market,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SymbolRegistryEntry {
    /// Entry used when the registry is unreachable and only a ticker is known.
    pub fn placeholder(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        Self {
            name: symbol.clone(),
            symbol,
            sector: Sector::Otros,
            market: Market::Merval,
            currency: String::from("ARS"),
            description: None,
        }
    }
}

impl TryFrom<SymbolRecord> for SymbolRegistryEntry {
    type Error = ValidationError;

    fn try_from(record: SymbolRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            symbol: record.symbol.trim().to_ascii_uppercase(),
            name: record.name,
            sector: record.sector.parse()?,
            market: record.market.parse()?,
            currency: validate_currency_code(&record.currency)?,
            description: record.description,
        })
    }
}

pub fn validate_currency_code(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    let valid = trimmed.len() == 3 && trimmed.chars().all(|ch| ch.is_ascii_uppercase());
    if valid {
        Ok(trimmed.to_owned())
    } else {
        Err(ValidationError::InvalidCurrency {
            value: value.to_owned(),
        })
    }
}

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

mod round2 {
    use serde::Serializer;

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_some(&super::round2(*value)),
            None => serializer.serialize_none(),
        }
    }
}
