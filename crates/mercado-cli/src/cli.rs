//! CLI argument definitions for mercado.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `quote` | Latest quote for one ticker |
//! | `index` | Latest quote for the Merval index |
//! | `history` | Daily bars for one ticker |
//! | `index-history` | Daily bars for the index |
//! | `stocks` | Concurrent quotes for several tickers |
//! | `technical` | Moving averages, RSI, signals and price levels |
//! | `status` | Whether the local session is open |
//! | `summary` | Index quote plus session status |
//! | `symbols` | Inspect and validate the active ticker list |
//! | `registry` | Maintain the local symbol registry |
//!
//! # Examples
//!
//! ```bash
//! mercado quote GGAL --pretty
//! mercado history YPF --days 90
//! mercado stocks GGAL PAMP BMA
//! mercado symbols sector Bancos
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mercado_core::DEFAULT_HISTORY_DAYS;

/// Buenos Aires equities from the command line.
#[derive(Debug, Parser)]
#[command(
    name = "mercado",
    author,
    version,
    about = "Quotes, history and technical analysis for Buenos Aires equities"
)]
pub struct Cli {
    /// JSON configuration file; without it defaults and MERCADO_* variables apply.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Latest quote for one ticker.
    ///
    ///   mercado quote GGAL
    Quote(SymbolArgs),

    /// Latest quote for the Merval index, with the secondary source as fallback.
    Index,

    /// Daily bars for one ticker.
    ///
    ///   mercado history GGAL --days 90
    History(HistoryArgs),

    /// Daily bars for the Merval index.
    IndexHistory(WindowArgs),

    /// Concurrent quotes for up to 50 tickers.
    ///
    ///   mercado stocks GGAL PAMP YPF
    Stocks(StocksArgs),

    /// Technical snapshot over 200 days of closes.
    Technical(SymbolArgs),

    /// Whether the local trading session is open right now.
    Status,

    /// Index quote plus session status.
    Summary,

    /// Inspect and validate the active ticker list.
    Symbols(SymbolsArgs),

    /// Maintain the local symbol registry.
    Registry(RegistryArgs),
}

#[derive(Debug, Args)]
pub struct SymbolArgs {
    /// Ticker, case-insensitive (e.g. GGAL, ypf).
    pub symbol: String,
}

#[derive(Debug, Args)]
pub struct WindowArgs {
    /// Calendar days to cover (1-365).
    #[arg(long, default_value_t = DEFAULT_HISTORY_DAYS)]
    pub days: u32,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Ticker, case-insensitive.
    pub symbol: String,

    #[command(flatten)]
    pub window: WindowArgs,
}

#[derive(Debug, Args)]
pub struct StocksArgs {
    /// One or more tickers.
    #[arg(required = true, num_args = 1..)]
    pub symbols: Vec<String>,
}

#[derive(Debug, Args)]
pub struct SymbolsArgs {
    #[command(subcommand)]
    pub command: SymbolsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SymbolsCommand {
    /// Active entries with name, sector, market and currency.
    List,
    /// Check tickers against the active list.
    Validate(StocksArgs),
    /// Distinct sectors of active entries.
    Sectors,
    /// Active tickers of one sector.
    Sector(SectorArgs),
}

#[derive(Debug, Args)]
pub struct SectorArgs {
    /// Sector label, case-insensitive (e.g. Bancos, "Petróleo y Gas").
    pub name: String,
}

#[derive(Debug, Args)]
pub struct RegistryArgs {
    #[command(subcommand)]
    pub command: RegistryCommand,
}

#[derive(Debug, Subcommand)]
pub enum RegistryCommand {
    /// Replace the registry with the default leader-panel catalog.
    Seed,
}
