//! Chart API payloads and their mapping into quotes and bars.

use serde::Deserialize;

use crate::{round2, Bar, FetchError, Quote, QuoteSource, UtcDateTime};

#[derive(Debug, Clone, Deserialize)]
struct ChartResponse {
    chart: ChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartData {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    indicators: ChartIndicators,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ChartMeta {
    currency: Option<String>,
    regular_market_price: Option<f64>,
    previous_close: Option<f64>,
    chart_previous_close: Option<f64>,
    regular_market_day_high: Option<f64>,
    regular_market_day_low: Option<f64>,
    regular_market_time: Option<i64>,
    long_name: Option<String>,
    short_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ChartQuote {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<f64>>,
}

/// Which session volume a quote reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VolumePick {
    First,
    Last,
}

/// Identity of the instrument a chart document describes.
pub(crate) struct ChartSubject<'a> {
    pub symbol: &'a str,
    pub upstream_id: &'a str,
    /// Used when the document carries neither long nor short name.
    pub default_name: &'a str,
}

pub(crate) fn parse_chart(body: &str, upstream_id: &str) -> Result<ChartResult, FetchError> {
    let response: ChartResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::Parse(format!("chart document: {e}")))?;

    if let Some(error) = response.chart.error.filter(|value| !value.is_null()) {
        return Err(FetchError::Parse(format!("chart API error: {error}")));
    }

    response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| FetchError::NoData(upstream_id.to_owned()))
}

impl ChartResult {
    /// Display name preferring the long name.
    pub(crate) fn display_name(&self, default_name: &str) -> String {
        self.meta
            .long_name
            .clone()
            .or_else(|| self.meta.short_name.clone())
            .unwrap_or_else(|| default_name.to_owned())
    }

    pub(crate) fn into_quote(self, subject: &ChartSubject<'_>, volume: VolumePick) -> Quote {
        let name = self.display_name(subject.default_name);
        let meta = self.meta;
        let session = self.indicators.quote.into_iter().next().unwrap_or_default();

        let price = meta.regular_market_price.or(meta.previous_close);
        let previous_close = meta.chart_previous_close.or(meta.previous_close);
        let change = price.zip(previous_close).map(|(price, prev)| price - prev);
        let change_percent = change
            .zip(previous_close)
            .filter(|(_, prev)| *prev != 0.0)
            .map(|(change, prev)| round2(change / prev * 100.0));

        let volume = match volume {
            VolumePick::First => session.volume.first().copied().flatten(),
            VolumePick::Last => session.volume.last().copied().flatten(),
        };

        let fetched_at = UtcDateTime::now();
        Quote {
            symbol: subject.symbol.to_owned(),
            upstream_id: subject.upstream_id.to_owned(),
            name,
            price,
            previous_close,
            change: change.map(round2),
            change_percent,
            open: session.open.first().copied().flatten(),
            high: meta.regular_market_day_high,
            low: meta.regular_market_day_low,
            volume: volume.and_then(to_volume),
            currency: Some(meta.currency.unwrap_or_else(|| String::from("ARS"))),
            date: meta
                .regular_market_time
                .and_then(UtcDateTime::from_unix_timestamp)
                .map(UtcDateTime::date),
            fetched_at,
            source: QuoteSource::YahooFinance,
            message: None,
        }
    }

    /// Zip the parallel arrays into ascending bars, dropping closeless days.
    pub(crate) fn into_bars(self) -> Vec<Bar> {
        let session = self.indicators.quote.into_iter().next().unwrap_or_default();
        let mut bars = self
            .timestamp
            .iter()
            .enumerate()
            .filter_map(|(index, &seconds)| {
                let close = value_at(&session.close, index)?;
                let date = UtcDateTime::from_unix_timestamp(seconds)?.date();
                Some(Bar {
                    date,
                    open: value_at(&session.open, index),
                    high: value_at(&session.high, index),
                    low: value_at(&session.low, index),
                    close,
                    volume: value_at(&session.volume, index).and_then(to_volume),
                })
            })
            .collect::<Vec<_>>();

        bars.sort_by_key(|bar| bar.date);
        bars
    }
}

fn value_at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

fn to_volume(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0).then(|| value.round() as u64)
}
