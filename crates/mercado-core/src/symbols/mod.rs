//! # Symbol Validation
//!
//! One [`SymbolCache`] instance is built at startup and shared by every path
//! that must reject unknown tickers before querying upstream. It reads the
//! registry through the [`SymbolRegistry`] trait, implemented for
//! [`mercado_registry::SymbolStore`].

mod cache;
mod registry;

pub use cache::{SymbolCache, FALLBACK_SECTORS, FALLBACK_SYMBOLS};
pub use registry::SymbolRegistry;
