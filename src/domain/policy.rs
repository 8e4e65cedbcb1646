//! Tunable extraction policy.
//!
//! The noise word lists, the density threshold and the pattern lengths are
//! policy rather than business rules, so they live here as named defaults
//! that can be overridden from the `[extraction]` config section.

use crate::domain::error::TickerTrackError;
use crate::ports::config_port::ConfigPort;
use std::collections::BTreeSet;

/// Header words and artifacts rejected by the column scorer.
pub const DEFAULT_IGNORE_WORDS: &[&str] = &[
    "SYMBOL", "TICKER", "STOCK", "PRICE", "LAST", "CHANGE", "VOLUME", "HIGH", "LOW", "OPEN",
    "CLOSE", "NET", "CHG", "DESC", "8", "WATCH",
];

/// Noise words rejected by the raw-text fallback scan.
pub const DEFAULT_FALLBACK_IGNORE_WORDS: &[&str] = &[
    "WATCHLIST",
    "SYMBOL",
    "DESCRIPTION",
    "LAST",
    "PRICE",
    "CHANGE",
    "VOLUME",
    "HIGH",
    "LOW",
    "OPEN",
    "CLOSE",
    "NET",
    "CHG",
];

pub const DEFAULT_HEADER_KEYWORDS: &[&str] = &["symbol", "ticker", "stock"];

/// A column must hold strictly more tickers than this to be preferred on volume alone.
pub const DEFAULT_DENSITY_THRESHOLD: usize = 2;
pub const DEFAULT_HEADER_SCAN_ROWS: usize = 15;
pub const DEFAULT_MAX_TICKER_LEN: usize = 8;
pub const DEFAULT_FALLBACK_MAX_LEN: usize = 6;
pub const DEFAULT_SAMPLE_ROWS: usize = 20;

const MAX_PATTERN_LEN: i64 = 16;
const SECTION: &str = "extraction";

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionPolicy {
    pub density_threshold: usize,
    pub header_scan_rows: usize,
    pub max_ticker_len: usize,
    pub fallback_max_len: usize,
    /// Rows sampled when detecting the field separator.
    pub sample_rows: usize,
    pub ignore_words: BTreeSet<String>,
    pub fallback_ignore_words: BTreeSet<String>,
    /// Lower-case substrings that mark a column as a ticker column.
    pub header_keywords: Vec<String>,
    /// Scan prose cells in their original case, so only capitalised words qualify.
    pub case_sensitive_subtokens: bool,
}

impl Default for ExtractionPolicy {
    fn default() -> Self {
        Self {
            density_threshold: DEFAULT_DENSITY_THRESHOLD,
            header_scan_rows: DEFAULT_HEADER_SCAN_ROWS,
            max_ticker_len: DEFAULT_MAX_TICKER_LEN,
            fallback_max_len: DEFAULT_FALLBACK_MAX_LEN,
            sample_rows: DEFAULT_SAMPLE_ROWS,
            ignore_words: upper_set(DEFAULT_IGNORE_WORDS.iter().copied()),
            fallback_ignore_words: upper_set(DEFAULT_FALLBACK_IGNORE_WORDS.iter().copied()),
            header_keywords: DEFAULT_HEADER_KEYWORDS
                .iter()
                .map(|kw| kw.to_string())
                .collect(),
            case_sensitive_subtokens: true,
        }
    }
}

impl ExtractionPolicy {
    /// Build a policy from the `[extraction]` section, falling back to defaults
    /// for every missing key.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, TickerTrackError> {
        let mut policy = Self::default();

        policy.density_threshold = read_count(
            config,
            "density_threshold",
            DEFAULT_DENSITY_THRESHOLD,
            0,
            i64::MAX,
        )?;
        policy.header_scan_rows = read_count(
            config,
            "header_scan_rows",
            DEFAULT_HEADER_SCAN_ROWS,
            1,
            i64::MAX,
        )?;
        policy.max_ticker_len = read_count(
            config,
            "max_ticker_len",
            DEFAULT_MAX_TICKER_LEN,
            1,
            MAX_PATTERN_LEN,
        )?;
        policy.fallback_max_len = read_count(
            config,
            "fallback_max_len",
            DEFAULT_FALLBACK_MAX_LEN,
            1,
            MAX_PATTERN_LEN,
        )?;
        policy.sample_rows =
            read_count(config, "sample_rows", DEFAULT_SAMPLE_ROWS, 1, i64::MAX)?;

        if let Some(words) = config.get_list(SECTION, "ignore_words") {
            policy.ignore_words = upper_set(words.iter().map(String::as_str));
        }
        if let Some(words) = config.get_list(SECTION, "fallback_ignore_words") {
            policy.fallback_ignore_words = upper_set(words.iter().map(String::as_str));
        }
        if let Some(keywords) = config.get_list(SECTION, "header_keywords") {
            if keywords.is_empty() {
                return Err(invalid("header_keywords", "at least one keyword is required"));
            }
            policy.header_keywords = keywords.iter().map(|kw| kw.to_lowercase()).collect();
        }
        policy.case_sensitive_subtokens =
            config.get_bool(SECTION, "case_sensitive_subtokens", true);

        Ok(policy)
    }

    pub fn is_ignored(&self, token: &str) -> bool {
        self.ignore_words.contains(token)
    }

    pub fn is_fallback_ignored(&self, token: &str) -> bool {
        self.fallback_ignore_words.contains(token)
    }

    /// True if `value` contains one of the header keywords, ignoring case.
    pub fn has_header_keyword(&self, value: &str) -> bool {
        let lower = value.to_lowercase();
        self.header_keywords.iter().any(|kw| lower.contains(kw.as_str()))
    }
}

fn upper_set<'a>(words: impl Iterator<Item = &'a str>) -> BTreeSet<String> {
    words
        .map(|w| w.trim().to_uppercase())
        .filter(|w| !w.is_empty())
        .collect()
}

fn read_count(
    config: &dyn ConfigPort,
    key: &str,
    default: usize,
    min: i64,
    max: i64,
) -> Result<usize, TickerTrackError> {
    let value = config.get_int(SECTION, key, default as i64);
    if value < min || value > max {
        let reason = if max == i64::MAX {
            format!("{key} must be at least {min}")
        } else {
            format!("{key} must be between {min} and {max}")
        };
        return Err(invalid(key, &reason));
    }
    Ok(value as usize)
}

fn invalid(key: &str, reason: &str) -> TickerTrackError {
    TickerTrackError::ConfigInvalid {
        section: SECTION.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
