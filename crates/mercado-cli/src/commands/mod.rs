mod history;
mod market;
mod quote;
mod registry;
mod symbols;
mod technical;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use mercado_core::{
    GatewayConfig, MarketDataFetcher, Outcome, RegistryError, ReqwestHttpClient, Symbol,
    SymbolCache, SymbolRegistry, SymbolRegistryEntry, SymbolRejection, SymbolStore,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::cli::{Cli, Command};
use crate::envelope::Envelope;
use crate::error::CliError;

#[derive(Debug)]
pub struct CommandResult {
    pub success: bool,
    pub message: String,
    pub data: Value,
}

impl CommandResult {
    pub fn ok(message: impl Into<String>, data: &impl Serialize) -> Result<Self, CliError> {
        Ok(Self {
            success: true,
            message: message.into(),
            data: serde_json::to_value(data)?,
        })
    }

    pub fn failed(message: impl Into<String>, data: &impl Serialize) -> Result<Self, CliError> {
        Ok(Self {
            success: false,
            ..Self::ok(message, data)?
        })
    }

    /// Degraded results still succeed; only an unavailable outcome fails.
    pub fn from_outcome<T: Serialize>(
        outcome: &Outcome<T>,
        message: impl Into<String>,
    ) -> Result<Self, CliError> {
        let message = message.into();
        match outcome {
            Outcome::Primary(data) => Self::ok(message, data),
            Outcome::Fallback { data, .. } => {
                Self::ok(format!("{message} (secondary source)"), data)
            }
            Outcome::Unavailable { data, cause } => {
                Self::failed(format!("{message} unavailable: {cause}"), data)
            }
        }
    }
}

/// Shared state for one command invocation.
pub struct Context {
    config: GatewayConfig,
    fetcher: MarketDataFetcher,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let config = match &cli.config {
            Some(path) => GatewayConfig::load(path)?,
            None => GatewayConfig::from_env()?,
        };
        Ok(Self::new(config))
    }

    pub fn new(config: GatewayConfig) -> Self {
        let http = Arc::new(ReqwestHttpClient::new(&config.upstream.user_agent));
        let fetcher = MarketDataFetcher::new(http, &config);
        Self { config, fetcher }
    }

    pub fn fetcher(&self) -> &MarketDataFetcher {
        &self.fetcher
    }

    pub fn open_store(&self) -> Result<SymbolStore, CliError> {
        Ok(SymbolStore::open(self.config.registry.store_config())?)
    }

    /// Symbol cache over the local registry, seeding an empty registry first.
    ///
    /// A registry that cannot be opened is treated like one that cannot be
    /// queried, so validation falls back to the static ticker list.
    pub fn symbol_cache(&self) -> SymbolCache {
        let registry: Arc<dyn SymbolRegistry> = match self.open_seeded_store() {
            Ok(store) => Arc::new(store),
            Err(error) => {
                warn!(error = %error, "symbol registry could not be opened");
                Arc::new(OfflineRegistry {
                    reason: error.to_string(),
                })
            }
        };
        SymbolCache::new(registry, self.config.symbol_cache.ttl())
    }

    /// Parse `input` and check its registry code against the active list.
    pub async fn validated_symbol(
        &self,
        cache: &SymbolCache,
        input: &str,
    ) -> Result<Symbol, CliError> {
        let symbol = Symbol::parse(input)?;
        let resolved = self.fetcher.normalize_symbol(symbol.as_str());
        cache
            .validate_symbol(&resolved.code)
            .await
            .map_err(|_| SymbolRejection::new(vec![input.to_owned()]))?;
        Ok(symbol)
    }

    fn open_seeded_store(&self) -> Result<SymbolStore, CliError> {
        let store = self.open_store()?;
        if store.count_active()? == 0 {
            let seeded = store.seed_default_catalog()?;
            info!(count = seeded, path = %store.db_path().display(), "seeded empty symbol registry");
        }
        Ok(store)
    }
}

struct OfflineRegistry {
    reason: String,
}

impl SymbolRegistry for OfflineRegistry {
    fn active_entries<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SymbolRegistryEntry>, RegistryError>> + Send + 'a>>
    {
        Box::pin(async move { Err(RegistryError::Task(self.reason.clone())) })
    }
}

pub async fn run(cli: &Cli) -> Result<Envelope, CliError> {
    let started = Instant::now();
    let context = Context::from_cli(cli)?;

    let result = match &cli.command {
        Command::Quote(args) => quote::quote(&context, args).await?,
        Command::Index => quote::index(&context).await?,
        Command::Stocks(args) => quote::stocks(&context, args).await?,
        Command::History(args) => history::history(&context, args).await?,
        Command::IndexHistory(args) => history::index_history(&context, args).await?,
        Command::Technical(args) => technical::run(&context, args).await?,
        Command::Status => market::status(&context)?,
        Command::Summary => market::summary(&context).await?,
        Command::Symbols(args) => symbols::run(&context, &args.command).await?,
        Command::Registry(args) => registry::run(&context, &args.command)?,
    };

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    Ok(Envelope::new(
        result.success,
        result.message,
        result.data,
        latency_ms,
    ))
}
