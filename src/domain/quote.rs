//! Latest price and daily change for a ticker.

use crate::domain::price_bar::PriceBar;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub price: f64,
    pub daily_change_percent: f64,
}

impl Quote {
    /// Quote from a close series in date order.
    ///
    /// The price is the last close; the daily change compares it with the
    /// close before. A single close gives a change of 0. An empty series or a
    /// zero previous close gives no quote.
    pub fn from_closes(closes: &[f64]) -> Option<Self> {
        let (&price, earlier) = closes.split_last()?;
        let daily_change_percent = match earlier.last() {
            Some(&prev) if prev == 0.0 => return None,
            Some(&prev) => (price - prev) / prev * 100.0,
            None => 0.0,
        };
        Some(Self {
            price,
            daily_change_percent,
        })
    }

    /// Quote from bars already sorted by date.
    pub fn from_bars(bars: &[PriceBar]) -> Option<Self> {
        let closes: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
        Self::from_closes(&closes)
    }
}
