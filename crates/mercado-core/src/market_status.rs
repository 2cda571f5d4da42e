//! Open/closed state of the Buenos Aires trading session.

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset, Weekday};

use crate::config::MarketHours;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketState {
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketStatus {
    pub status: MarketState,
    pub message: String,
}

impl MarketStatus {
    pub fn is_open(&self) -> bool {
        self.status == MarketState::Open
    }
}

/// Session state at `now`: open on weekdays while the exchange-local hour is
/// inside `[open_hour, close_hour)`.
pub fn market_status(now: OffsetDateTime, hours: &MarketHours) -> MarketStatus {
    let offset = UtcOffset::from_hms(hours.utc_offset_hours, 0, 0).unwrap_or(UtcOffset::UTC);
    let local = now.to_offset(offset);
    let weekday = !matches!(local.weekday(), Weekday::Saturday | Weekday::Sunday);
    let in_session = (hours.open_hour..hours.close_hour).contains(&local.hour());

    if weekday && in_session {
        MarketStatus {
            status: MarketState::Open,
            message: String::from("Market open"),
        }
    } else {
        MarketStatus {
            status: MarketState::Closed,
            message: String::from("Market closed"),
        }
    }
}
