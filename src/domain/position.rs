//! Tracked stock positions.

use crate::domain::error::TickerTrackError;
use crate::domain::quote::Quote;
use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Why a position is being tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyTag {
    Short,
    Long,
    Investment,
}

impl StrategyTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyTag::Short => "Short",
            StrategyTag::Long => "Long",
            StrategyTag::Investment => "Investment",
        }
    }
}

impl fmt::Display for StrategyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyTag {
    type Err = TickerTrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(StrategyTag::Short),
            "long" => Ok(StrategyTag::Long),
            "investment" => Ok(StrategyTag::Investment),
            _ => Err(TickerTrackError::InvalidStrategy {
                value: s.to_string(),
            }),
        }
    }
}

/// A position not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPosition {
    pub ticker: String,
    pub strategy: StrategyTag,
    pub entry_price: f64,
    pub daily_change: f64,
    pub added_at: NaiveDateTime,
}

impl NewPosition {
    /// Enter at the quoted price; the ticker is upper-cased.
    pub fn from_quote(
        ticker: &str,
        strategy: StrategyTag,
        quote: Quote,
        added_at: NaiveDateTime,
    ) -> Self {
        Self {
            ticker: ticker.trim().to_uppercase(),
            strategy,
            entry_price: quote.price,
            daily_change: quote.daily_change_percent,
            added_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackedPosition {
    pub id: i64,
    pub ticker: String,
    pub strategy: StrategyTag,
    pub entry_price: f64,
    pub current_price: Option<f64>,
    pub daily_change: Option<f64>,
    pub added_at: NaiveDateTime,
}

impl TrackedPosition {
    /// Return since entry in percent, rounded to 2 decimal places.
    pub fn roi_percent(&self) -> f64 {
        match self.current_price {
            Some(current) if self.entry_price != 0.0 => {
                let roi = (current - self.entry_price) / self.entry_price * 100.0;
                (roi * 100.0).round() / 100.0
            }
            _ => 0.0,
        }
    }

    pub fn daily_change_or_zero(&self) -> f64 {
        self.daily_change.unwrap_or(0.0)
    }
}
