//! # Mercado Registry
//!
//! Persistent registry of tradable Buenos Aires symbols, stored in an embedded
//! DuckDB file.
//!
//! The registry is the source of truth for which tickers are valid. Entries are
//! created or deactivated by an administrative process (see
//! [`SymbolStore::seed_default_catalog`], [`SymbolStore::upsert`] and
//! [`SymbolStore::set_active`]); request paths only ever read active entries.
//!
//! ```rust,no_run
//! use mercado_registry::{StoreConfig, SymbolStore};
//!
//! let store = SymbolStore::open(StoreConfig::default())?;
//! if store.count_active()? == 0 {
//!     store.seed_default_catalog()?;
//! }
//! for record in store.active_entries()? {
//!     println!("{} {}", record.symbol, record.sector);
//! }
//! # Ok::<(), mercado_registry::StoreError>(())
//! ```
//!
//! ## Tables
//!
//! | Table / View | Description |
//! |--------------|-------------|
//! | `symbols` | Every registered ticker, active or not |
//! | `v_active_symbols` | Active tickers only |
//! | `schema_migrations` | Applied migration versions |

pub mod catalog;
pub mod migrations;
pub mod pool;

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use ::duckdb::{params, Row};
use thiserror::Error;
use tracing::{info, warn};

pub use catalog::{default_catalog, CURRENCIES, MARKETS, SECTORS};
pub use pool::{ConnectionPool, PooledConnection};

const MIN_TICKER_LEN: usize = 3;
const MAX_TICKER_LEN: usize = 6;
const MAX_NAME_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 500;

/// Errors raised by registry storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    DuckDb(#[from] ::duckdb::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid symbol record: {0}")]
    InvalidRecord(String),

    #[error("symbol '{0}' is not registered")]
    NotFound(String),
}

/// Location and pool sizing of the registry database.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Root directory for mercado data.
    pub mercado_home: PathBuf,
    /// Path to the DuckDB file.
    pub db_path: PathBuf,
    /// Idle connections kept for reuse.
    pub max_pool_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let mercado_home = resolve_mercado_home();
        let db_path = mercado_home.join("registry.duckdb");
        Self {
            mercado_home,
            db_path,
            max_pool_size: 4,
        }
    }
}

impl StoreConfig {
    pub fn at(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Self::default()
        }
    }
}

/// One row of the `symbols` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRecord {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub market: String,
    pub currency: String,
    pub is_active: bool,
    pub description: Option<String>,
    pub website: Option<String>,
}

impl SymbolRecord {
    /// Active MERVAL entry quoted in pesos.
    pub fn merval(
        symbol: impl Into<String>,
        name: impl Into<String>,
        sector: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into().trim().to_ascii_uppercase(),
            name: name.into(),
            sector: sector.into(),
            market: String::from("MERVAL"),
            currency: String::from("ARS"),
            is_active: true,
            description: None,
            website: None,
        }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        let len = self.symbol.chars().count();
        if !(MIN_TICKER_LEN..=MAX_TICKER_LEN).contains(&len) {
            return Err(StoreError::InvalidRecord(format!(
                "ticker '{}' must have between {MIN_TICKER_LEN} and {MAX_TICKER_LEN} characters",
                self.symbol
            )));
        }
        if !self
            .symbol
            .chars()
            .all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit())
        {
            return Err(StoreError::InvalidRecord(format!(
                "ticker '{}' must be uppercase alphanumeric",
                self.symbol
            )));
        }
        if self.name.trim().is_empty() || self.name.chars().count() > MAX_NAME_LEN {
            return Err(StoreError::InvalidRecord(format!(
                "name of '{}' must be 1..={MAX_NAME_LEN} characters",
                self.symbol
            )));
        }
        if !SECTORS.contains(&self.sector.as_str()) {
            return Err(StoreError::InvalidRecord(format!(
                "unknown sector '{}'",
                self.sector
            )));
        }
        if !MARKETS.contains(&self.market.as_str()) {
            return Err(StoreError::InvalidRecord(format!(
                "unknown market '{}'",
                self.market
            )));
        }
        if !CURRENCIES.contains(&self.currency.as_str()) {
            return Err(StoreError::InvalidRecord(format!(
                "unsupported currency '{}'",
                self.currency
            )));
        }
        if let Some(description) = &self.description {
            if description.chars().count() > MAX_DESCRIPTION_LEN {
                return Err(StoreError::InvalidRecord(format!(
                    "description of '{}' exceeds {MAX_DESCRIPTION_LEN} characters",
                    self.symbol
                )));
            }
        }
        if let Some(website) = &self.website {
            if !(website.starts_with("http://") || website.starts_with("https://")) {
                return Err(StoreError::InvalidRecord(format!(
                    "website of '{}' must be an http(s) URL",
                    self.symbol
                )));
            }
        }
        Ok(())
    }

    fn from_row(row: &Row<'_>) -> Result<Self, ::duckdb::Error> {
        Ok(Self {
            symbol: row.get(0)?,
            name: row.get(1)?,
            sector: row.get(2)?,
            market: row.get(3)?,
            currency: row.get(4)?,
            is_active: row.get(5)?,
            description: row.get(6)?,
            website: row.get(7)?,
        })
    }
}

const RECORD_COLUMNS: &str =
    "symbol, name, sector, market, currency, is_active, description, website";

/// Handle to the registry database.
#[derive(Clone)]
pub struct SymbolStore {
    pool: ConnectionPool,
}

impl SymbolStore {
    /// Open (creating if needed) the registry and apply pending migrations.
    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let pool = ConnectionPool::open(config.db_path.clone(), config.max_pool_size)?;
        let store = Self { pool };
        let connection = store.pool.acquire()?;
        migrations::apply_migrations(&connection)?;
        Ok(store)
    }

    pub fn db_path(&self) -> &Path {
        self.pool.db_path()
    }

    /// Active entries sorted by ticker.
    pub fn active_entries(&self) -> Result<Vec<SymbolRecord>, StoreError> {
        let connection = self.pool.acquire()?;
        let sql = format!("SELECT {RECORD_COLUMNS} FROM v_active_symbols ORDER BY symbol");
        let mut statement = connection.prepare(&sql)?;
        let rows = statement.query_map([], SymbolRecord::from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Active entries of one sector, sorted by ticker.
    pub fn active_by_sector(&self, sector: &str) -> Result<Vec<SymbolRecord>, StoreError> {
        let connection = self.pool.acquire()?;
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM v_active_symbols WHERE sector = ? ORDER BY symbol"
        );
        let mut statement = connection.prepare(&sql)?;
        let rows = statement.query_map(params![sector], SymbolRecord::from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Sectors with at least one active entry, sorted.
    pub fn distinct_sectors(&self) -> Result<Vec<String>, StoreError> {
        let connection = self.pool.acquire()?;
        let mut statement =
            connection.prepare("SELECT DISTINCT sector FROM v_active_symbols ORDER BY sector")?;
        let rows = statement.query_map([], |row| row.get::<_, String>(0))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn count_active(&self) -> Result<usize, StoreError> {
        let connection = self.pool.acquire()?;
        let count: i64 =
            connection.query_row("SELECT COUNT(*) FROM v_active_symbols", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Insert or replace one entry.
    pub fn upsert(&self, record: &SymbolRecord) -> Result<(), StoreError> {
        record.validate()?;
        let connection = self.pool.acquire()?;
        insert_record(&connection, record)?;
        Ok(())
    }

    /// Flip the active flag of a registered ticker.
    pub fn set_active(&self, symbol: &str, active: bool) -> Result<(), StoreError> {
        let symbol = symbol.trim().to_ascii_uppercase();
        let connection = self.pool.acquire()?;
        let updated = connection.execute(
            "UPDATE symbols SET is_active = ?, updated_at = CURRENT_TIMESTAMP WHERE symbol = ?",
            params![active, symbol],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(symbol));
        }
        Ok(())
    }

    /// Replace the whole registry with `records`.
    ///
    /// Runs as one transaction, so concurrent readers see either the previous
    /// registry or the new one. Only symbols absent from `records` are
    /// deleted; DuckDB rejects re-inserting a key deleted in the same
    /// transaction.
    pub fn replace_all(&self, records: &[SymbolRecord]) -> Result<usize, StoreError> {
        for record in records {
            record.validate()?;
        }

        let connection = self.pool.acquire()?;
        connection.execute_batch("BEGIN TRANSACTION")?;
        let result = (|| -> Result<(), StoreError> {
            let keep = records
                .iter()
                .map(|record| record.symbol.as_str())
                .collect::<HashSet<_>>();
            let mut statement = connection.prepare("SELECT symbol FROM symbols")?;
            let existing = statement
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            for stale in existing.iter().filter(|symbol| !keep.contains(symbol.as_str())) {
                connection.execute("DELETE FROM symbols WHERE symbol = ?", params![stale])?;
            }
            for record in records {
                insert_record(&connection, record)?;
            }
            Ok(())
        })();

        match result.and_then(|()| connection.execute_batch("COMMIT").map_err(StoreError::from)) {
            Ok(()) => {
                info!(count = records.len(), path = %self.db_path().display(), "symbol registry replaced");
                Ok(records.len())
            }
            Err(error) => {
                if let Err(rollback_error) = connection.execute_batch("ROLLBACK") {
                    warn!(error = %rollback_error, "symbol registry rollback failed");
                }
                Err(error)
            }
        }
    }

    /// Replace the registry with the default leader-panel catalog.
    pub fn seed_default_catalog(&self) -> Result<usize, StoreError> {
        self.replace_all(&default_catalog())
    }
}

fn insert_record(connection: &::duckdb::Connection, record: &SymbolRecord) -> Result<(), StoreError> {
    connection.execute(
        "INSERT OR REPLACE INTO symbols \
         (symbol, name, sector, market, currency, is_active, description, website, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP)",
        params![
            record.symbol,
            record.name,
            record.sector,
            record.market,
            record.currency,
            record.is_active,
            record.description,
            record.website,
        ],
    )?;
    Ok(())
}

fn resolve_mercado_home() -> PathBuf {
    if let Some(path) = env::var_os("MERCADO_HOME") {
        let path = PathBuf::from(path);
        if !path.as_os_str().is_empty() {
            return path;
        }
    }

    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".mercado");
    }

    PathBuf::from(".mercado")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_temp_store() -> (tempfile::TempDir, SymbolStore) {
        let temp = tempdir().expect("tempdir");
        let store = SymbolStore::open(StoreConfig {
            mercado_home: temp.path().to_path_buf(),
            db_path: temp.path().join("nested").join("registry.duckdb"),
            max_pool_size: 2,
        })
        .expect("store open");
        (temp, store)
    }

    #[test]
    fn seeding_populates_sorted_active_entries() {
        let (_temp, store) = open_temp_store();
        let inserted = store.seed_default_catalog().expect("seed");
        assert_eq!(inserted, 25);

        let entries = store.active_entries().expect("entries");
        assert_eq!(entries.len(), 25);
        assert_eq!(entries.first().map(|r| r.symbol.as_str()), Some("ALUA"));
        assert_eq!(entries.last().map(|r| r.symbol.as_str()), Some("YPFD"));
    }

    #[test]
    fn reseeding_replaces_instead_of_duplicating() {
        let (_temp, store) = open_temp_store();
        store.seed_default_catalog().expect("first seed");
        store.seed_default_catalog().expect("second seed");
        assert_eq!(store.count_active().expect("count"), 25);
    }

    #[test]
    fn replacing_drops_symbols_missing_from_the_new_set() {
        let (_temp, store) = open_temp_store();
        store
            .upsert(&SymbolRecord::merval("AGRO", "Agrometal", "Otros"))
            .expect("insert");
        store.seed_default_catalog().expect("seed");

        let entries = store.active_entries().expect("entries");
        assert_eq!(entries.len(), 25);
        assert!(entries.iter().all(|r| r.symbol != "AGRO"));
    }

    #[test]
    fn rejected_replace_keeps_the_previous_registry() {
        let (_temp, store) = open_temp_store();
        store.seed_default_catalog().expect("seed");

        let mut records = default_catalog();
        records.truncate(3);
        records.push(SymbolRecord::merval("ABCD", "Example S.A.", "Crypto"));

        let err = store.replace_all(&records).expect_err("must fail");
        assert!(matches!(err, StoreError::InvalidRecord(_)));
        assert_eq!(store.count_active().expect("count"), 25);
    }

    #[test]
    fn concurrent_readers_never_see_a_partial_registry_during_reseed() {
        let (_temp, store) = open_temp_store();
        store.seed_default_catalog().expect("seed");

        let done = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
        let reader = {
            let store = store.clone();
            let done = std::sync::Arc::clone(&done);
            std::thread::spawn(move || {
                let mut reads = 0_usize;
                let mut partial = 0_usize;
                while !done.load(std::sync::atomic::Ordering::Acquire) || reads == 0 {
                    let entries = store.active_entries().expect("concurrent read");
                    reads += 1;
                    if entries.len() != 25 {
                        partial += 1;
                    }
                }
                (reads, partial)
            })
        };

        for _ in 0..50 {
            store.seed_default_catalog().expect("reseed");
        }
        done.store(true, std::sync::atomic::Ordering::Release);

        let (reads, partial) = reader.join().expect("reader thread");
        assert!(reads > 0);
        assert_eq!(partial, 0, "{partial} of {reads} reads saw a partial registry");
    }

    #[test]
    fn deactivated_symbols_disappear_from_active_queries() {
        let (_temp, store) = open_temp_store();
        store.seed_default_catalog().expect("seed");
        store.set_active("ggal", false).expect("deactivate");

        let entries = store.active_entries().expect("entries");
        assert!(entries.iter().all(|r| r.symbol != "GGAL"));
        assert_eq!(store.count_active().expect("count"), 24);
    }

    #[test]
    fn set_active_on_unknown_symbol_is_not_found() {
        let (_temp, store) = open_temp_store();
        let err = store.set_active("ZZZZ", true).expect_err("must fail");
        assert!(matches!(err, StoreError::NotFound(symbol) if symbol == "ZZZZ"));
    }

    #[test]
    fn sector_queries_use_active_entries_only() {
        let (_temp, store) = open_temp_store();
        store.seed_default_catalog().expect("seed");

        let banks = store.active_by_sector("Bancos").expect("banks");
        let tickers = banks.iter().map(|r| r.symbol.as_str()).collect::<Vec<_>>();
        assert_eq!(tickers, vec!["BBAR", "BMA", "GGAL", "SUPV", "VALO"]);

        let sectors = store.distinct_sectors().expect("sectors");
        assert!(sectors.contains(&String::from("Energía")));
        assert!(!sectors.contains(&String::from("Papel")));
    }

    #[test]
    fn upsert_rejects_record_outside_closed_enumerations() {
        let (_temp, store) = open_temp_store();
        let record = SymbolRecord::merval("ABCD", "Example S.A.", "Crypto");
        let err = store.upsert(&record).expect_err("must fail");
        assert!(matches!(err, StoreError::InvalidRecord(_)));

        let short = SymbolRecord::merval("AB", "Example S.A.", "Otros");
        assert!(matches!(
            store.upsert(&short),
            Err(StoreError::InvalidRecord(_))
        ));
    }

    #[test]
    fn upsert_overwrites_existing_entry() {
        let (_temp, store) = open_temp_store();
        store
            .upsert(&SymbolRecord::merval("AGRO", "Agrometal", "Otros"))
            .expect("insert");
        store
            .upsert(&SymbolRecord::merval("AGRO", "Agrometal S.A.I.", "Metalurgia"))
            .expect("update");

        let entries = store.active_entries().expect("entries");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Agrometal S.A.I.");
        assert_eq!(entries[0].sector, "Metalurgia");
    }
}
