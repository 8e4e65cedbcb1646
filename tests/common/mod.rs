#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use tickertrack::domain::error::TickerTrackError;
use tickertrack::domain::position::{NewPosition, TrackedPosition};
pub use tickertrack::domain::quote::Quote;
use tickertrack::ports::market_data_port::MarketDataPort;
use tickertrack::ports::ocr_port::OcrPort;
use tickertrack::ports::position_store_port::PositionStorePort;

pub struct MockMarketData {
    pub quotes: HashMap<String, Quote>,
    pub errors: HashMap<String, String>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self {
            quotes: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_quote(mut self, ticker: &str, price: f64, daily_change_percent: f64) -> Self {
        self.quotes.insert(
            ticker.to_string(),
            Quote {
                price,
                daily_change_percent,
            },
        );
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl MarketDataPort for MockMarketData {
    fn quote(&self, ticker: &str) -> Result<Option<Quote>, TickerTrackError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(TickerTrackError::Database {
                reason: reason.clone(),
            });
        }
        Ok(self.quotes.get(ticker).copied())
    }
}

/// Vec-backed store with sequential ids starting at 1.
pub struct InMemoryStore {
    pub positions: RefCell<Vec<TrackedPosition>>,
    next_id: RefCell<i64>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            positions: RefCell::new(Vec::new()),
            next_id: RefCell::new(1),
        }
    }
}

impl PositionStorePort for InMemoryStore {
    fn insert(&self, position: &NewPosition) -> Result<TrackedPosition, TickerTrackError> {
        let mut next_id = self.next_id.borrow_mut();
        let tracked = TrackedPosition {
            id: *next_id,
            ticker: position.ticker.clone(),
            strategy: position.strategy,
            entry_price: position.entry_price,
            current_price: Some(position.entry_price),
            daily_change: Some(position.daily_change),
            added_at: position.added_at,
        };
        *next_id += 1;
        self.positions.borrow_mut().push(tracked.clone());
        Ok(tracked)
    }

    fn list(&self) -> Result<Vec<TrackedPosition>, TickerTrackError> {
        Ok(self.positions.borrow().clone())
    }

    fn delete(&self, id: i64) -> Result<bool, TickerTrackError> {
        let mut positions = self.positions.borrow_mut();
        let before = positions.len();
        positions.retain(|p| p.id != id);
        Ok(positions.len() < before)
    }

    fn update_quote(
        &self,
        id: i64,
        current_price: f64,
        daily_change: f64,
    ) -> Result<(), TickerTrackError> {
        let mut positions = self.positions.borrow_mut();
        let position = positions
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(TickerTrackError::PositionNotFound { id })?;
        position.current_price = Some(current_price);
        position.daily_change = Some(daily_change);
        Ok(())
    }
}

/// Returns canned text, or an OCR error when `text` is `None`.
pub struct MockOcr {
    pub text: Option<String>,
}

impl MockOcr {
    pub fn returning(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { text: None }
    }
}

impl OcrPort for MockOcr {
    fn image_to_text(&self, _image: &[u8]) -> Result<String, TickerTrackError> {
        self.text.clone().ok_or_else(|| TickerTrackError::Ocr {
            reason: "engine unavailable".into(),
        })
    }
}

pub fn write_temp_file(suffix: &str, content: &[u8]) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}
