//! Ticker extraction from arbitrary tabular or plain-text content.
//!
//! One pass, no state: parse into a grid, score every column, return the
//! winning column's tickers, or fall back to scanning the raw text when no
//! column produced anything. Malformed input never errors; it degrades to a
//! fallback result, which may be empty.

use crate::domain::column_scoring::{score_columns, select_column};
use crate::domain::fallback_scan::{decode_lossy, scan_text};
use crate::domain::policy::ExtractionPolicy;
use crate::domain::tabular::{parse_grid, SourceKind};
use tracing::{debug, info};

/// Which stage produced the tickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionPath {
    Column { index: usize, header_flagged: bool },
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub tickers: Vec<String>,
    pub path: ExtractionPath,
}

pub fn extract(content: &[u8], kind: SourceKind, policy: &ExtractionPolicy) -> Extraction {
    let extraction = match parse_grid(content, kind, policy.sample_rows) {
        Some(grid) => {
            let candidates = score_columns(&grid, policy);
            match select_column(candidates, policy.density_threshold) {
                Some(winner) => Extraction {
                    path: ExtractionPath::Column {
                        index: winner.index,
                        header_flagged: winner.header_flagged,
                    },
                    tickers: winner.tickers,
                },
                None => {
                    debug!("no column produced tickers");
                    fallback(content, policy)
                }
            }
        }
        None => fallback(content, policy),
    };

    info!(
        count = extraction.tickers.len(),
        path = ?extraction.path,
        "tickers extracted"
    );
    extraction
}

/// Ordered, de-duplicated tickers found in `content`; possibly empty.
pub fn extract_tickers(
    content: &[u8],
    kind: SourceKind,
    policy: &ExtractionPolicy,
) -> Vec<String> {
    extract(content, kind, policy).tickers
}

/// Tickers mined from already-plain text such as OCR output.
pub fn extract_from_text(text: &str, policy: &ExtractionPolicy) -> Vec<String> {
    scan_text(text, policy)
}

fn fallback(content: &[u8], policy: &ExtractionPolicy) -> Extraction {
    debug!("using raw text fallback scan");
    Extraction {
        tickers: scan_text(&decode_lossy(content), policy),
        path: ExtractionPath::Fallback,
    }
}
