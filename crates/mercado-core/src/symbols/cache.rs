use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::symbols::SymbolRegistry;
use crate::{RegistryError, Sector, SymbolRegistryEntry, SymbolRejection};

/// Tickers served when the registry cannot be queried.
pub const FALLBACK_SYMBOLS: [&str; 25] = [
    "ALUA", "BBAR", "BMA", "BYMA", "CEPU", "COME", "CRES", "CVH", "EDN", "GGAL", "HARG", "HAVA",
    "INTR", "LOMA", "METR", "MIRG", "PAMP", "SUPV", "TECO2", "TGNO4", "TGSU2", "TRAN", "TXAR",
    "VALO", "YPFD",
];

/// Sectors served when the registry cannot be queried.
pub const FALLBACK_SECTORS: [Sector; 6] = [
    Sector::Bancos,
    Sector::Energia,
    Sector::Telecomunicaciones,
    Sector::Construccion,
    Sector::Alimentos,
    Sector::Otros,
];

#[derive(Debug)]
struct CacheSnapshot {
    entries: Vec<SymbolRegistryEntry>,
    symbols: Vec<String>,
    refreshed_at: Instant,
}

/// Time-bounded cache of active tickers shared by every validation path.
///
/// Reads inside the TTL never touch the registry. Refreshes are serialized so
/// a burst of callers after expiry issues one registry query. A failed refresh
/// leaves the cache empty-or-stale and serves the static fallback lists.
pub struct SymbolCache {
    registry: Arc<dyn SymbolRegistry>,
    ttl: Duration,
    snapshot: RwLock<Option<Arc<CacheSnapshot>>>,
    refresh: Mutex<()>,
}

impl SymbolCache {
    pub fn new(registry: Arc<dyn SymbolRegistry>, ttl: Duration) -> Self {
        Self {
            registry,
            ttl,
            snapshot: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    /// Active tickers in registry order, or [`FALLBACK_SYMBOLS`] on registry failure.
    pub async fn get_valid_symbols(&self) -> Vec<String> {
        match self.load().await {
            Ok(snapshot) => snapshot.symbols.clone(),
            Err(error) => {
                warn!(error = %error, "symbol registry unavailable, serving fallback tickers");
                FALLBACK_SYMBOLS.iter().map(|s| (*s).to_owned()).collect()
            }
        }
    }

    /// Canonical ticker for `input`, matched case-insensitively.
    pub async fn validate_symbol(&self, input: &str) -> Result<String, SymbolRejection> {
        let valid = self.get_valid_symbols().await;
        let canonical = input.trim().to_ascii_uppercase();
        if valid.contains(&canonical) {
            Ok(canonical)
        } else {
            Err(SymbolRejection::new(vec![input.to_owned()]))
        }
    }

    /// Canonical tickers for `inputs`; the rejection lists every invalid entry.
    pub async fn validate_symbols<S: AsRef<str>>(
        &self,
        inputs: &[S],
    ) -> Result<Vec<String>, SymbolRejection> {
        let valid = self.get_valid_symbols().await;
        let mut accepted = Vec::with_capacity(inputs.len());
        let mut rejected = Vec::new();

        for input in inputs {
            let input = input.as_ref();
            let canonical = input.trim().to_ascii_uppercase();
            if valid.contains(&canonical) {
                accepted.push(canonical);
            } else {
                rejected.push(input.to_owned());
            }
        }

        if rejected.is_empty() {
            Ok(accepted)
        } else {
            Err(SymbolRejection::new(rejected))
        }
    }

    /// Full active entries; on registry failure the fallback tickers as
    /// placeholder entries.
    pub async fn complete_symbols(&self) -> Vec<SymbolRegistryEntry> {
        match self.load().await {
            Ok(snapshot) => snapshot.entries.clone(),
            Err(error) => {
                warn!(error = %error, "symbol registry unavailable, serving fallback entries");
                FALLBACK_SYMBOLS
                    .iter()
                    .map(|symbol| SymbolRegistryEntry::placeholder(*symbol))
                    .collect()
            }
        }
    }

    /// Distinct sectors of active entries, sorted by label.
    pub async fn sectors(&self) -> Vec<Sector> {
        match self.load().await {
            Ok(snapshot) => {
                let labels = snapshot
                    .entries
                    .iter()
                    .map(|entry| entry.sector.as_str())
                    .collect::<BTreeSet<_>>();
                labels
                    .into_iter()
                    .filter_map(|label| label.parse().ok())
                    .collect()
            }
            Err(error) => {
                warn!(error = %error, "symbol registry unavailable, serving fallback sectors");
                FALLBACK_SECTORS.to_vec()
            }
        }
    }

    /// Active tickers of one sector.
    pub async fn symbols_in_sector(&self, sector: Sector) -> Vec<String> {
        self.complete_symbols()
            .await
            .into_iter()
            .filter(|entry| entry.sector == sector)
            .map(|entry| entry.symbol)
            .collect()
    }

    /// Force the next read to query the registry.
    pub async fn invalidate(&self) {
        *self.snapshot.write().await = None;
        debug!("symbol cache invalidated");
    }

    async fn load(&self) -> Result<Arc<CacheSnapshot>, RegistryError> {
        if let Some(snapshot) = self.fresh().await {
            debug!("symbol cache hit");
            return Ok(snapshot);
        }

        let _guard = self.refresh.lock().await;
        // Another caller may have refreshed while this one waited.
        if let Some(snapshot) = self.fresh().await {
            return Ok(snapshot);
        }

        let entries = self.registry.active_entries().await?;
        let symbols = entries
            .iter()
            .map(|entry| entry.symbol.to_ascii_uppercase())
            .collect::<Vec<_>>();
        debug!(count = symbols.len(), "symbol cache refreshed");

        let snapshot = Arc::new(CacheSnapshot {
            entries,
            symbols,
            refreshed_at: Instant::now(),
        });
        *self.snapshot.write().await = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    async fn fresh(&self) -> Option<Arc<CacheSnapshot>> {
        self.snapshot
            .read()
            .await
            .as_ref()
            .filter(|snapshot| snapshot.refreshed_at.elapsed() < self.ttl)
            .map(Arc::clone)
    }
}
