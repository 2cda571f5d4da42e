use std::future::Future;
use std::pin::Pin;

use mercado_registry::SymbolStore;
use tracing::warn;

use crate::{RegistryError, SymbolRegistryEntry};

/// Read side of the persistent symbol registry.
pub trait SymbolRegistry: Send + Sync {
    /// Active entries, sorted by ticker.
    fn active_entries<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SymbolRegistryEntry>, RegistryError>> + Send + 'a>>;
}

impl SymbolRegistry for SymbolStore {
    fn active_entries<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SymbolRegistryEntry>, RegistryError>> + Send + 'a>>
    {
        let store = self.clone();
        Box::pin(async move {
            let records = tokio::task::spawn_blocking(move || store.active_entries())
                .await
                .map_err(|error| RegistryError::Task(error.to_string()))??;

            Ok(records
                .into_iter()
                .filter_map(|record| {
                    let symbol = record.symbol.clone();
                    match SymbolRegistryEntry::try_from(record) {
                        Ok(entry) => Some(entry),
                        Err(error) => {
                            warn!(symbol = %symbol, error = %error, "skipping malformed registry entry");
                            None
                        }
                    }
                })
                .collect())
        })
    }
}
