//! Market data access port trait.

use crate::domain::error::TickerTrackError;
use crate::domain::quote::Quote;

pub trait MarketDataPort {
    /// Latest quote for `ticker`; `Ok(None)` when the ticker is unknown.
    fn quote(&self, ticker: &str) -> Result<Option<Quote>, TickerTrackError>;
}
