//! # Quote/History Fetcher
//!
//! Resolves caller tickers to chart identifiers (`<code>.BA`, or the fixed
//! index identifier), fetches quotes and daily history, and degrades instead
//! of failing:
//!
//! | Operation | Primary fails |
//! |-----------|---------------|
//! | [`MarketDataFetcher::get_index_quote`] | secondary index document, then null quote |
//! | [`MarketDataFetcher::get_quote`] | null quote with a message |
//! | [`MarketDataFetcher::get_history`] | empty series with a message |
//! | [`MarketDataFetcher::technical_analysis`] | all-null snapshot |
//!
//! Every attempt is made once; there is no retry against the same source.

mod byma;
mod request;
mod yahoo;

use std::sync::Arc;

use futures_util::future::join_all;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::config::{AliasTable, GatewayConfig, IndicatorConfig, MarketHours, UpstreamConfig};
use crate::http_client::{HttpClient, HttpRequest};
use crate::indicators::build_snapshot;
use crate::market_status::{market_status, MarketStatus};
use crate::{
    Bar, FetchError, HistoricalSeries, Outcome, Period, Quote, QuoteSource, Symbol,
    TechnicalSnapshot, UtcDateTime,
};

use yahoo::{ChartResult, ChartSubject, VolumePick};

pub use request::{
    HistoryWindow, MarketSummary, QuoteBatch, QuoteBatchRequest, DEFAULT_HISTORY_DAYS,
    MAX_BATCH_SYMBOLS, MAX_HISTORY_DAYS, MIN_HISTORY_DAYS,
};

/// Caller ticker with the identifiers derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSymbol {
    /// Trimmed, uppercased caller input.
    pub ticker: String,
    /// Registry code after alias substitution.
    pub code: String,
    /// Identifier sent to the chart API.
    pub upstream_id: String,
}

/// Market-data fetcher over an injected [`HttpClient`].
#[derive(Clone)]
pub struct MarketDataFetcher {
    http: Arc<dyn HttpClient>,
    upstream: UpstreamConfig,
    indicators: IndicatorConfig,
    aliases: AliasTable,
    market_hours: MarketHours,
}

impl MarketDataFetcher {
    pub fn new(http: Arc<dyn HttpClient>, config: &GatewayConfig) -> Self {
        Self {
            http,
            upstream: config.upstream.clone(),
            indicators: config.indicators.clone(),
            aliases: config.aliases.clone(),
            market_hours: config.market_hours,
        }
    }

    /// Uppercase and trim `input`, substitute a known alias, append the
    /// exchange suffix.
    pub fn normalize_symbol(&self, input: &str) -> ResolvedSymbol {
        let ticker = input.trim().to_ascii_uppercase();
        let code = self.aliases.resolve(&ticker).to_owned();
        let upstream_id = format!("{code}{}", self.upstream.exchange_suffix);
        ResolvedSymbol {
            ticker,
            code,
            upstream_id,
        }
    }

    pub async fn get_quote(&self, symbol: &Symbol) -> Outcome<Quote> {
        let resolved = self.normalize_symbol(symbol.as_str());
        let subject = ChartSubject {
            symbol: &resolved.ticker,
            upstream_id: &resolved.upstream_id,
            default_name: &resolved.ticker,
        };

        match self.fetch_quote_chart(&resolved.upstream_id).await {
            Ok(chart) => Outcome::Primary(chart.into_quote(&subject, VolumePick::Last)),
            Err(error) => {
                warn!(symbol = %resolved.ticker, upstream_id = %resolved.upstream_id, error = %error, "quote unavailable");
                Outcome::Unavailable {
                    data: Quote::unavailable(
                        &resolved.ticker,
                        &resolved.upstream_id,
                        &resolved.ticker,
                        format!(
                            "No price for {}: the symbol may not exist or is not available right now",
                            resolved.ticker
                        ),
                    ),
                    cause: error.to_string(),
                }
            }
        }
    }

    /// Index quote with the secondary index document as fallback.
    pub async fn get_index_quote(&self) -> Outcome<Quote> {
        let index_symbol = self.upstream.index_symbol.as_str();
        let subject = ChartSubject {
            symbol: index_symbol,
            upstream_id: index_symbol,
            default_name: &self.upstream.index_name,
        };

        let primary_error = match self.fetch_quote_chart(index_symbol).await {
            Ok(chart) => {
                let mut quote = chart.into_quote(&subject, VolumePick::First);
                quote.name = self.upstream.index_name.clone();
                return Outcome::Primary(quote);
            }
            Err(error) => error,
        };

        warn!(error = %primary_error, "index chart failed, using secondary index source");
        match self.fetch_index_document().await {
            Ok(quote) => Outcome::Fallback {
                data: quote,
                cause: primary_error.to_string(),
            },
            Err(fallback_error) => {
                warn!(error = %fallback_error, "secondary index source failed");
                Outcome::Unavailable {
                    data: Quote::unavailable(
                        index_symbol,
                        index_symbol,
                        &self.upstream.index_name,
                        "The quote service is not available. Please try again later.",
                    ),
                    cause: format!("{primary_error}; fallback: {fallback_error}"),
                }
            }
        }
    }

    pub async fn get_history(
        &self,
        symbol: &Symbol,
        window: HistoryWindow,
    ) -> Outcome<HistoricalSeries> {
        let resolved = self.normalize_symbol(symbol.as_str());
        self.history_for(&resolved.ticker, &resolved.upstream_id, &resolved.ticker, window)
            .await
    }

    pub async fn get_index_history(&self, window: HistoryWindow) -> Outcome<HistoricalSeries> {
        let index_symbol = self.upstream.index_symbol.clone();
        let index_name = self.upstream.index_name.clone();
        let mut outcome = self
            .history_for(&index_symbol, &index_symbol, &index_name, window)
            .await;
        outcome.data_mut().name = index_name;
        outcome
    }

    /// Fetch every quote concurrently; a failed symbol does not fail the batch.
    pub async fn get_multiple(&self, request: &QuoteBatchRequest) -> QuoteBatch {
        let outcomes = join_all(request.symbols().iter().map(|symbol| self.get_quote(symbol))).await;
        QuoteBatch::from_quotes(outcomes.into_iter().map(Outcome::into_data).collect())
    }

    pub fn market_status(&self, now: OffsetDateTime) -> MarketStatus {
        market_status(now, &self.market_hours)
    }

    pub async fn market_summary(&self) -> Outcome<MarketSummary> {
        let status = self.market_status(OffsetDateTime::now_utc());
        self.get_index_quote().await.map(|index| MarketSummary {
            index,
            market_status: status,
            generated_at: UtcDateTime::now(),
        })
    }

    /// Indicator snapshot over `history_days` of daily closes.
    pub async fn technical_analysis(&self, symbol: &Symbol) -> Outcome<TechnicalSnapshot> {
        let resolved = self.normalize_symbol(symbol.as_str());
        let days = i64::from(self.indicators.history_days);
        let request = self.history_request(&resolved.upstream_id, days * 86_400);

        match self.fetch_chart(request, &resolved.upstream_id).await {
            Ok(chart) => {
                let name = chart.display_name(&resolved.ticker);
                let closes = chart
                    .into_bars()
                    .into_iter()
                    .map(|bar| bar.close)
                    .collect::<Vec<_>>();
                let snapshot = build_snapshot(&resolved.ticker, &closes, &self.indicators);
                Outcome::Primary(TechnicalSnapshot { name, ..snapshot })
            }
            Err(error) => {
                warn!(symbol = %resolved.ticker, error = %error, "technical analysis unavailable");
                Outcome::Unavailable {
                    data: build_snapshot(&resolved.ticker, &[], &self.indicators),
                    cause: error.to_string(),
                }
            }
        }
    }

    async fn history_for(
        &self,
        symbol: &str,
        upstream_id: &str,
        default_name: &str,
        window: HistoryWindow,
    ) -> Outcome<HistoricalSeries> {
        let now = UtcDateTime::now();
        let start = UtcDateTime::from_unix_timestamp(now.unix_timestamp() - window.seconds())
            .unwrap_or(now);
        let request = self.history_request(upstream_id, window.seconds());

        let series = |name: String,
                      bars: Vec<Bar>,
                      source: QuoteSource,
                      message: Option<String>| HistoricalSeries {
            symbol: symbol.to_owned(),
            upstream_id: upstream_id.to_owned(),
            name,
            requested_days: window.days(),
            period: Period {
                from: bars.first().map_or_else(|| start.date(), |bar| bar.date),
                to: bars.last().map_or_else(|| now.date(), |bar| bar.date),
                days: bars.len(),
            },
            bars,
            fetched_at: UtcDateTime::now(),
            source,
            message,
        };

        match self.fetch_chart(request, upstream_id).await {
            Ok(chart) => {
                let name = chart.display_name(default_name);
                Outcome::Primary(series(name, chart.into_bars(), QuoteSource::YahooFinance, None))
            }
            Err(error) => {
                warn!(symbol = %symbol, error = %error, "history unavailable");
                Outcome::Unavailable {
                    data: series(
                        default_name.to_owned(),
                        Vec::new(),
                        QuoteSource::Unavailable,
                        Some(format!("No history available for {symbol} right now")),
                    ),
                    cause: error.to_string(),
                }
            }
        }
    }

    async fn fetch_quote_chart(&self, upstream_id: &str) -> Result<ChartResult, FetchError> {
        let request = HttpRequest::get(self.chart_url(upstream_id))
            .with_query("interval", "1d")
            .with_query("range", "1d")
            .with_header("user-agent", &self.upstream.user_agent)
            .with_timeout_ms(self.upstream.quote_timeout_ms);
        self.fetch_chart(request, upstream_id).await
    }

    fn history_request(&self, upstream_id: &str, span_secs: i64) -> HttpRequest {
        let end = UtcDateTime::now().unix_timestamp();
        HttpRequest::get(self.chart_url(upstream_id))
            .with_query("interval", "1d")
            .with_query("period1", end - span_secs)
            .with_query("period2", end)
            .with_header("user-agent", &self.upstream.user_agent)
            .with_timeout_ms(self.upstream.history_timeout_ms)
    }

    async fn fetch_chart(
        &self,
        request: HttpRequest,
        upstream_id: &str,
    ) -> Result<ChartResult, FetchError> {
        debug!(url = %request.url, "requesting chart");
        let response = self.http.execute(request).await?;
        if !response.is_success() {
            return Err(FetchError::Status {
                status: response.status,
            });
        }
        yahoo::parse_chart(&response.body, upstream_id)
    }

    async fn fetch_index_document(&self) -> Result<Quote, FetchError> {
        let request = HttpRequest::get(&self.upstream.index_fallback_url)
            .with_header("accept", "application/json")
            .with_header("user-agent", &self.upstream.user_agent)
            .with_timeout_ms(self.upstream.quote_timeout_ms);
        debug!(url = %request.url, "requesting secondary index document");

        let response = self.http.execute(request).await?;
        if !response.is_success() {
            return Err(FetchError::Status {
                status: response.status,
            });
        }
        byma::parse_index_quote(
            &response.body,
            &self.upstream.index_symbol,
            &self.upstream.index_name,
        )
    }

    fn chart_url(&self, upstream_id: &str) -> String {
        format!(
            "{}/{}",
            self.upstream.chart_base_url.trim_end_matches('/'),
            urlencoding::encode(upstream_id)
        )
    }
}
