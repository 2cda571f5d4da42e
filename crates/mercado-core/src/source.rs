use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Presentation tag naming where a result's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteSource {
    #[serde(rename = "Yahoo Finance")]
    YahooFinance,
    #[serde(rename = "BYMA")]
    Byma,
    #[serde(rename = "Unavailable")]
    Unavailable,
}

impl QuoteSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::YahooFinance => "Yahoo Finance",
            Self::Byma => "BYMA",
            Self::Unavailable => "Unavailable",
        }
    }
}

impl Display for QuoteSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
