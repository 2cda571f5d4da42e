//! Flat index document served by the secondary source.

use serde::Deserialize;

use crate::{FetchError, Quote, QuoteSource, TradeDate, UtcDateTime};

const INDEX_ID: &str = "I.MERV";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct IndexDocument {
    settlement_price: Option<f64>,
    last_price: Option<f64>,
    change: Option<f64>,
    change_percent: Option<f64>,
    volume: Option<f64>,
    date: Option<String>,
}

/// Reshape the secondary index document into a [`Quote`].
///
/// A document without any price is treated as a failed fetch.
pub(crate) fn parse_index_quote(body: &str, symbol: &str, name: &str) -> Result<Quote, FetchError> {
    let document: IndexDocument = serde_json::from_str(body)
        .map_err(|e| FetchError::Parse(format!("index document: {e}")))?;

    let price = document
        .settlement_price
        .or(document.last_price)
        .ok_or_else(|| FetchError::NoData(INDEX_ID.to_owned()))?;

    let fetched_at = UtcDateTime::now();
    let date = document
        .date
        .as_deref()
        .and_then(|raw| raw.get(..10))
        .and_then(|day| TradeDate::parse(day).ok())
        .unwrap_or_else(|| fetched_at.date());

    Ok(Quote {
        symbol: symbol.to_owned(),
        upstream_id: INDEX_ID.to_owned(),
        name: name.to_owned(),
        price: Some(price),
        previous_close: None,
        change: document.change,
        change_percent: document.change_percent,
        open: None,
        high: None,
        low: None,
        volume: document
            .volume
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v.round() as u64),
        currency: Some(String::from("ARS")),
        date: Some(date),
        fetched_at,
        source: QuoteSource::Byma,
        message: None,
    })
}
