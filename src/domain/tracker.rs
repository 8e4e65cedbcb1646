//! Position tracking workflows over the store, market data and OCR ports.

use crate::domain::error::TickerTrackError;
use crate::domain::extractor::extract_from_text;
use crate::domain::policy::ExtractionPolicy;
use crate::domain::position::{NewPosition, StrategyTag, TrackedPosition};
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::ocr_port::OcrPort;
use crate::ports::position_store_port::PositionStorePort;
use chrono::{NaiveDateTime, Utc};
use std::fmt;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub added: Vec<TrackedPosition>,
    pub skipped: Vec<SkippedTicker>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedTicker {
    pub ticker: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    NoQuote,
    QuoteError(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoQuote => f.write_str("no quote"),
            SkipReason::QuoteError(reason) => write!(f, "quote lookup failed: {reason}"),
        }
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

pub fn add_position(
    store: &dyn PositionStorePort,
    market: &dyn MarketDataPort,
    ticker: &str,
    strategy: StrategyTag,
) -> Result<TrackedPosition, TickerTrackError> {
    let ticker = ticker.trim().to_uppercase();
    let quote = market
        .quote(&ticker)?
        .ok_or_else(|| TickerTrackError::QuoteNotFound {
            ticker: ticker.clone(),
        })?;

    let position = store.insert(&NewPosition::from_quote(&ticker, strategy, quote, now()))?;
    info!(ticker = %position.ticker, id = position.id, price = position.entry_price, "position added");
    Ok(position)
}

/// Add a position for every ticker that has a quote.
///
/// Tickers without a quote, or whose lookup fails, are skipped and reported.
/// Store failures abort the import.
pub fn import_tickers(
    store: &dyn PositionStorePort,
    market: &dyn MarketDataPort,
    tickers: &[String],
    strategy: StrategyTag,
) -> Result<ImportReport, TickerTrackError> {
    let mut added = Vec::new();
    let mut skipped = Vec::new();

    for raw in tickers {
        let ticker = raw.trim().to_uppercase();
        let quote = match market.quote(&ticker) {
            Ok(Some(quote)) => quote,
            Ok(None) => {
                warn!(ticker = %ticker, "skipping ticker with no quote");
                skipped.push(SkippedTicker {
                    ticker,
                    reason: SkipReason::NoQuote,
                });
                continue;
            }
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "skipping ticker, quote lookup failed");
                skipped.push(SkippedTicker {
                    ticker,
                    reason: SkipReason::QuoteError(e.to_string()),
                });
                continue;
            }
        };

        added.push(store.insert(&NewPosition::from_quote(&ticker, strategy, quote, now()))?);
    }

    info!(
        added = added.len(),
        skipped = skipped.len(),
        "import finished"
    );
    Ok(ImportReport { added, skipped })
}

/// Update every position that has a quote; the rest keep their last values.
pub fn refresh_prices(
    store: &dyn PositionStorePort,
    market: &dyn MarketDataPort,
) -> Result<Vec<TrackedPosition>, TickerTrackError> {
    let mut positions = store.list()?;
    let mut refreshed = 0;

    for position in &mut positions {
        match market.quote(&position.ticker) {
            Ok(Some(quote)) => {
                store.update_quote(position.id, quote.price, quote.daily_change_percent)?;
                position.current_price = Some(quote.price);
                position.daily_change = Some(quote.daily_change_percent);
                refreshed += 1;
            }
            Ok(None) => warn!(ticker = %position.ticker, "no quote, keeping last price"),
            Err(e) => warn!(ticker = %position.ticker, error = %e, "quote lookup failed"),
        }
    }

    info!(refreshed, total = positions.len(), "prices refreshed");
    Ok(positions)
}

pub fn remove_position(store: &dyn PositionStorePort, id: i64) -> Result<(), TickerTrackError> {
    if store.delete(id)? {
        info!(id, "position removed");
        Ok(())
    } else {
        Err(TickerTrackError::PositionNotFound { id })
    }
}

/// Tickers read from a screenshot via OCR and the raw-text scan.
pub fn import_screenshot(
    ocr: &dyn OcrPort,
    image: &[u8],
    policy: &ExtractionPolicy,
) -> Result<Vec<String>, TickerTrackError> {
    let text = ocr.image_to_text(image)?;
    Ok(extract_from_text(&text, policy))
}
