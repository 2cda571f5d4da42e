//! Shared doubles for the behavior suites.
#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use mercado_core::{
    HttpClient, HttpError, HttpRequest, HttpResponse, Market, RegistryError, Sector,
    SymbolRegistry, SymbolRegistryEntry,
};

enum Reply {
    Ok(HttpResponse),
    Err(HttpError),
}

/// Answers requests by the first scripted URL fragment the URL contains.
/// Unscripted URLs fail with a transport error.
#[derive(Default)]
pub struct ScriptedHttpClient {
    routes: Vec<(String, Reply)>,
    seen: Mutex<Vec<String>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url_fragment: &str, status: u16, body: &str) -> Self {
        self.routes.push((
            url_fragment.to_owned(),
            Reply::Ok(HttpResponse {
                status,
                body: body.to_owned(),
            }),
        ));
        self
    }

    pub fn fail(mut self, url_fragment: &str, error: HttpError) -> Self {
        self.routes.push((url_fragment.to_owned(), Reply::Err(error)));
        self
    }

    pub fn seen_urls(&self) -> Vec<String> {
        self.seen.lock().expect("lock poisoned").clone()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.seen
            .lock()
            .expect("lock poisoned")
            .push(request.url.clone());

        let reply = self
            .routes
            .iter()
            .find(|(fragment, _)| request.url.contains(fragment.as_str()))
            .map(|(_, reply)| match reply {
                Reply::Ok(response) => Ok(response.clone()),
                Reply::Err(error) => Err(error.clone()),
            })
            .unwrap_or_else(|| Err(HttpError::new(format!("no route for {}", request.url))));

        Box::pin(async move { reply })
    }
}

/// Chart body with a single session and the given live price.
pub fn quote_chart(price: f64, previous_close: f64, name: &str) -> String {
    format!(
        r#"{{"chart":{{"result":[{{
            "meta":{{"currency":"ARS","regularMarketPrice":{price},
                     "chartPreviousClose":{previous_close},"longName":"{name}",
                     "regularMarketTime":1709742600}},
            "timestamp":[1709730000],
            "indicators":{{"quote":[{{"open":[{previous_close}],"high":[{price}],
                                      "low":[{previous_close}],"close":[{price}],
                                      "volume":[1000]}}]}}
        }}],"error":null}}}}"#
    )
}

/// Registry double returning fixed entries and counting queries.
pub struct CountingRegistry {
    entries: Mutex<Vec<SymbolRegistryEntry>>,
    fail: bool,
    calls: AtomicUsize,
}

impl CountingRegistry {
    pub fn with_tickers(tickers: &[(&str, Sector)]) -> Self {
        Self {
            entries: Mutex::new(tickers.iter().map(|(t, s)| entry(t, *s)).collect()),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn replace(&self, tickers: &[(&str, Sector)]) {
        *self.entries.lock().expect("lock poisoned") =
            tickers.iter().map(|(t, s)| entry(t, *s)).collect();
    }
}

impl SymbolRegistry for CountingRegistry {
    fn active_entries<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SymbolRegistryEntry>, RegistryError>> + Send + 'a>>
    {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(RegistryError::Task(String::from("registry offline")));
            }
            Ok(self.entries.lock().expect("lock poisoned").clone())
        })
    }
}

pub fn entry(symbol: &str, sector: Sector) -> SymbolRegistryEntry {
    SymbolRegistryEntry {
        symbol: symbol.to_owned(),
        name: format!("{symbol} S.A."),
        sector,
        market: Market::Merval,
        currency: String::from("ARS"),
        description: None,
    }
}
