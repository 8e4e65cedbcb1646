//! Daily closing price as read from history files.
//!
//! History files carry full OHLCV rows; only the date and close feed a quote.

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
}
