//! CSV price history market data adapter.
//!
//! Reads `<base_path>/<TICKER>.csv` files with a
//! `date,open,high,low,close,volume` header and quotes the latest close.
//! Only the date and close columns are parsed.

use crate::domain::error::TickerTrackError;
use crate::domain::price_bar::PriceBar;
use crate::domain::quote::Quote;
use crate::domain::ticker::is_ticker;
use crate::ports::config_port::ConfigPort;
use crate::ports::market_data_port::MarketDataPort;
use chrono::NaiveDate;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::str::FromStr;

const MAX_FILE_TICKER_LEN: usize = 16;
const CLOSE_COLUMN: usize = 4;

pub struct CsvQuoteAdapter {
    base_path: PathBuf,
}

impl CsvQuoteAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, TickerTrackError> {
        let path = config
            .get_string("quotes", "path")
            .ok_or_else(|| TickerTrackError::ConfigMissing {
                section: "quotes".into(),
                key: "path".into(),
            })?;
        Ok(Self::new(PathBuf::from(path)))
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }

    /// Bars for `ticker` sorted by date; empty when there is no history file.
    pub fn fetch_bars(&self, ticker: &str) -> Result<Vec<PriceBar>, TickerTrackError> {
        if !is_ticker(ticker, MAX_FILE_TICKER_LEN) {
            return Ok(Vec::new());
        }

        let path = self.csv_path(ticker);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(TickerTrackError::Database {
                    reason: format!("failed to read {}: {}", path.display(), e),
                });
            }
        };

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| TickerTrackError::Database {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let date_str = field::<String>(&record, 0, "date")?;
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
                TickerTrackError::Database {
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            bars.push(PriceBar {
                date,
                close: field(&record, CLOSE_COLUMN, "close")?,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

fn field<T>(record: &csv::StringRecord, index: usize, name: &str) -> Result<T, TickerTrackError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    record
        .get(index)
        .ok_or_else(|| TickerTrackError::Database {
            reason: format!("missing {} column", name),
        })?
        .trim()
        .parse()
        .map_err(|e| TickerTrackError::Database {
            reason: format!("invalid {} value: {}", name, e),
        })
}

impl MarketDataPort for CsvQuoteAdapter {
    fn quote(&self, ticker: &str) -> Result<Option<Quote>, TickerTrackError> {
        let bars = self.fetch_bars(ticker)?;
        Ok(Quote::from_bars(&bars))
    }
}
