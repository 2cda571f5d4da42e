//! Behavior tests for the quote/history fetcher.
//!
//! Every upstream call goes through a scripted transport, so these tests pin
//! down how the fetcher degrades rather than what the live services return.

mod support;

use std::sync::Arc;

use mercado_core::{
    GatewayConfig, HistoryWindow, HttpError, MarketDataFetcher, QuoteBatchRequest, QuoteSource,
    Symbol,
};
use support::{quote_chart, ScriptedHttpClient};

fn fetcher(http: ScriptedHttpClient) -> (MarketDataFetcher, Arc<ScriptedHttpClient>) {
    let http = Arc::new(http);
    let fetcher = MarketDataFetcher::new(http.clone(), &GatewayConfig::default());
    (fetcher, http)
}

fn symbol(input: &str) -> Symbol {
    Symbol::parse(input).expect("valid symbol")
}

// =============================================================================
// Index quote: primary, secondary, unavailable
// =============================================================================

#[tokio::test]
async fn when_index_chart_answers_the_quote_is_primary_and_named_after_the_index() {
    // Given: the chart source answers for the index
    let chart = quote_chart(1_850_000.0, 1_800_000.0, "MERVAL");
    let (fetcher, _) = fetcher(ScriptedHttpClient::new().respond("%5EMERV", 200, &chart));

    // When: the index quote is requested
    let outcome = fetcher.get_index_quote().await;

    // Then: the quote comes from the chart source under the configured name
    assert!(outcome.is_primary());
    let quote = outcome.data();
    assert_eq!(quote.source, QuoteSource::YahooFinance);
    assert_eq!(quote.name, "Índice Merval");
    assert_eq!(quote.price, Some(1_850_000.0));
    assert_eq!(quote.change_percent, Some(2.78));
}

#[tokio::test]
async fn when_index_chart_fails_the_secondary_document_answers_with_byma_source() {
    // Given: the chart source times out but the index document is up
    let (fetcher, http) = fetcher(
        ScriptedHttpClient::new()
            .fail("%5EMERV", HttpError::timeout("request timeout"))
            .respond(
                "bymadata",
                200,
                r#"{"settlementPrice": 1850000.5, "change": 1000.0, "changePercent": 0.05}"#,
            ),
    );

    // When: the index quote is requested
    let outcome = fetcher.get_index_quote().await;

    // Then: the call does not fail and the quote is tagged with the fallback source
    assert!(outcome.is_fallback());
    assert_eq!(outcome.cause(), Some("transport error: request timeout"));
    assert_eq!(outcome.data().source, QuoteSource::Byma);
    assert_eq!(outcome.data().price, Some(1_850_000.5));
    assert_eq!(http.seen_urls().len(), 2);
}

#[tokio::test]
async fn when_index_chart_fails_the_market_summary_carries_the_secondary_quote() {
    // Given: the chart source is down but the index document answers
    let (fetcher, _) = fetcher(
        ScriptedHttpClient::new()
            .fail("%5EMERV", HttpError::new("connection refused"))
            .respond("bymadata", 200, r#"{"lastPrice": 10.0}"#),
    );

    // When: the market summary is requested
    let outcome = fetcher.market_summary().await;

    // Then: the summary keeps the fallback tag and still reports the session
    assert!(outcome.is_fallback());
    let summary = outcome.data();
    assert_eq!(summary.index.source, QuoteSource::Byma);
    assert_eq!(summary.index.name, "Índice Merval");
    assert_eq!(summary.index.price, Some(10.0));
    let expected = if summary.market_status.is_open() {
        "Market open"
    } else {
        "Market closed"
    };
    assert_eq!(summary.market_status.message, expected);
}

#[tokio::test]
async fn when_both_index_sources_fail_a_null_quote_with_a_message_is_returned() {
    // Given: the chart source returns 500 and the index document has no price
    let (fetcher, _) = fetcher(
        ScriptedHttpClient::new()
            .respond("%5EMERV", 500, "")
            .respond("bymadata", 200, r#"{"change": 1.0}"#),
    );

    // When: the index quote is requested
    let outcome = fetcher.get_index_quote().await;

    // Then: a renderable placeholder comes back
    assert!(outcome.is_unavailable());
    let quote = outcome.data();
    assert_eq!(quote.price, None);
    assert_eq!(quote.change, None);
    assert_eq!(quote.source, QuoteSource::Unavailable);
    assert!(quote.message.is_some());
    assert!(outcome.cause().expect("cause").contains("status 500"));
}

// =============================================================================
// Single and batch quotes
// =============================================================================

#[tokio::test]
async fn when_a_stock_quote_fails_the_result_names_the_symbol() {
    // Given: no route for the requested ticker
    let (fetcher, _) = fetcher(ScriptedHttpClient::new());

    // When: a quote is requested
    let outcome = fetcher.get_quote(&symbol("zzzz")).await;

    // Then: the placeholder carries the normalized identifiers and a message
    assert!(outcome.is_unavailable());
    let quote = outcome.data();
    assert_eq!(quote.symbol, "ZZZZ");
    assert_eq!(quote.upstream_id, "ZZZZ.BA");
    assert!(quote.message.as_deref().unwrap_or_default().contains("ZZZZ"));
}

#[tokio::test]
async fn when_an_alias_is_requested_the_mapped_code_is_fetched() {
    // Given: the chart source answers only for the mapped code
    let chart = quote_chart(30_000.0, 29_000.0, "YPF S.A.");
    let (fetcher, http) = fetcher(ScriptedHttpClient::new().respond("YPFD.BA", 200, &chart));

    // When: the alias is requested
    let outcome = fetcher.get_quote(&symbol("ypf")).await;

    // Then: the caller ticker is kept and the mapped identifier was used
    assert!(outcome.is_primary());
    assert_eq!(outcome.data().symbol, "YPF");
    assert_eq!(outcome.data().upstream_id, "YPFD.BA");
    assert!(http.seen_urls()[0].contains("/YPFD.BA?"));
}

#[tokio::test]
async fn when_one_symbol_of_a_batch_fails_the_batch_still_completes() {
    // Given: one ticker with data and one without
    let chart = quote_chart(10.0, 9.0, "AAA S.A.");
    let (fetcher, _) = fetcher(ScriptedHttpClient::new().respond("AAA.BA", 200, &chart));
    let request =
        QuoteBatchRequest::new(vec![symbol("AAA"), symbol("INVALID")]).expect("valid batch");

    // When: the batch is fetched
    let batch = fetcher.get_multiple(&request).await;

    // Then: totals reflect one success and one annotated failure, in request order
    assert_eq!(batch.total, 2);
    assert_eq!(batch.successful, 1);
    assert_eq!(batch.failed, 1);
    assert_eq!(batch.stocks[0].symbol, "AAA");
    assert_eq!(batch.stocks[0].price, Some(10.0));
    assert_eq!(batch.stocks[1].symbol, "INVALID");
    assert_eq!(batch.stocks[1].price, None);
    assert!(batch.stocks[1].message.is_some());
}

// =============================================================================
// History and technical analysis
// =============================================================================

const HISTORY: &str = r#"{"chart":{"result":[{
    "meta":{"longName":"Grupo Financiero Galicia S.A."},
    "timestamp":[1709816400,1709643600,1709730000],
    "indicators":{"quote":[{
        "open":[3.0,1.0,null],"high":[3.5,1.5,2.5],"low":[2.5,0.5,1.5],
        "close":[3.2,1.2,null],"volume":[300,100,200]
    }]}
}],"error":null}}"#;

#[tokio::test]
async fn when_history_is_fetched_bars_without_close_are_dropped_and_sorted() {
    // Given: a chart with an unordered day and a day without close
    let (fetcher, http) = fetcher(ScriptedHttpClient::new().respond("GGAL.BA", 200, HISTORY));
    let window = HistoryWindow::new(10).expect("valid window");

    // When: history is requested
    let outcome = fetcher.get_history(&symbol("GGAL"), window).await;

    // Then: two ascending bars remain and the period covers them
    assert!(outcome.is_primary());
    let series = outcome.data();
    assert_eq!(series.name, "Grupo Financiero Galicia S.A.");
    assert_eq!(series.requested_days, 10);
    assert_eq!(series.closes(), vec![1.2, 3.2]);
    assert_eq!(series.period.days, 2);
    assert_eq!(series.period.from.to_string(), "2024-03-05");
    assert_eq!(series.period.to.to_string(), "2024-03-07");
    assert!(http.seen_urls()[0].contains("period1="));
}

#[tokio::test]
async fn when_history_fails_an_empty_series_with_a_message_is_returned() {
    // Given: the chart source is unreachable
    let (fetcher, _) = fetcher(ScriptedHttpClient::new());

    // When: index history is requested
    let outcome = fetcher.get_index_history(HistoryWindow::default()).await;

    // Then: the series is empty but complete
    assert!(outcome.is_unavailable());
    let series = outcome.data();
    assert!(series.bars.is_empty());
    assert_eq!(series.period.days, 0);
    assert_eq!(series.name, "Índice Merval");
    assert_eq!(series.source, QuoteSource::Unavailable);
    assert!(series.message.is_some());
}

#[tokio::test]
async fn when_technical_history_fails_every_indicator_is_null() {
    // Given: the chart source is unreachable
    let (fetcher, _) = fetcher(ScriptedHttpClient::new());

    // When: technical analysis is requested
    let outcome = fetcher.technical_analysis(&symbol("GGAL")).await;

    // Then: the snapshot renders with nulls only
    assert!(outcome.is_unavailable());
    let snapshot = outcome.data();
    assert_eq!(snapshot.current_price, None);
    assert_eq!(snapshot.rsi, None);
    assert_eq!(snapshot.moving_averages.sma50, None);
    assert_eq!(snapshot.signals.golden_cross, None);
    assert_eq!(snapshot.support.level1, None);
}

#[tokio::test]
async fn when_technical_history_is_short_only_levels_and_price_are_set() {
    // Given: a three-day history
    let (fetcher, _) = fetcher(ScriptedHttpClient::new().respond("GGAL.BA", 200, HISTORY));

    // When: technical analysis is requested
    let outcome = fetcher.technical_analysis(&symbol("GGAL")).await;

    // Then: windows that need more closes stay null
    let snapshot = outcome.data();
    assert_eq!(snapshot.name, "Grupo Financiero Galicia S.A.");
    assert_eq!(snapshot.current_price, Some(3.2));
    assert_eq!(snapshot.rsi, None);
    assert_eq!(snapshot.moving_averages.sma50, None);
    assert_eq!(snapshot.signals.sma50_signal, None);
    assert_eq!(snapshot.support.level1, Some(1.2));
    assert_eq!(snapshot.resistance.level1, Some(3.2));
}
