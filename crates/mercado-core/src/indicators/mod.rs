//! # Technical Indicator Engine
//!
//! Pure functions over an ascending close-price series. Nothing here performs
//! I/O; [`build_snapshot`] is the entry point used by the fetcher.
//!
//! | Function | Needs | Otherwise |
//! |----------|-------|-----------|
//! | [`simple_moving_average`] | `window` closes | `None` |
//! | [`compute_rsi`] | `period + 1` closes | `None` |
//! | [`support_resistance`] | one close | windows shrink to what is available |
//! | [`derive_signals`] | the inputs it reads | dependent signal is `None` |

mod levels;
mod moving_average;
mod rsi;
mod signals;
mod snapshot;

pub use levels::{support_resistance, take_last_up_to, SupportResistance};
pub use moving_average::{distance_percent, simple_moving_average};
pub use rsi::compute_rsi;
pub use signals::{derive_signals, RsiBands};
pub use snapshot::build_snapshot;
