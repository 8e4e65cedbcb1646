//! Tolerant tabular parsing into a [`Grid`].
//!
//! Delimited text has its separator sniffed from a sample of rows; records
//! that fail to parse are skipped. Spreadsheets are read from their first
//! worksheet. Whatever cannot be parsed yields `None` so the caller can fall
//! back to scanning raw text.

use crate::domain::grid::Grid;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

pub const DELIMITER_CANDIDATES: &[u8] = b",\t;";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Origin of the content handed to the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// CSV/TSV-like text with an unknown separator.
    Delimited,
    /// Binary workbook (xlsx, xls, xlsb, ods).
    Spreadsheet,
    /// Already-plain text, e.g. OCR output; never parsed into a grid.
    PlainText,
}

impl SourceKind {
    /// Kind implied by a file extension, if it is one we read.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" | "tsv" | "tab" => Some(Self::Delimited),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Spreadsheet),
            "txt" => Some(Self::PlainText),
            _ => None,
        }
    }
}

/// Parse `content` into a grid, or `None` when nothing usable comes out.
pub fn parse_grid(content: &[u8], kind: SourceKind, sample_rows: usize) -> Option<Grid> {
    let grid = match kind {
        SourceKind::Delimited => parse_delimited(content, sample_rows),
        SourceKind::Spreadsheet => parse_spreadsheet(content),
        SourceKind::PlainText => None,
    }?;

    if grid.is_empty() {
        debug!("parsed grid is empty");
        return None;
    }
    debug!(rows = grid.row_count(), columns = grid.width(), "grid loaded");
    Some(grid)
}

/// Pick the separator that most consistently splits the sampled rows.
///
/// Candidates are ranked by whether their modal row width exceeds one
/// field, then by how many rows share that width, then by the width itself.
/// Remaining ties go to candidate order, so unsplittable input reads as a
/// single comma-separated column.
pub fn detect_delimiter(content: &[u8], sample_rows: usize) -> u8 {
    let mut best = DELIMITER_CANDIDATES[0];
    let mut best_key = (false, 0usize, 0usize);

    for &delimiter in DELIMITER_CANDIDATES {
        let widths: Vec<usize> = reader(content, delimiter)
            .records()
            .filter_map(Result::ok)
            .filter(|record| !is_blank(record))
            .take(sample_rows)
            .map(|record| record.len())
            .collect();

        let (rows, width) = modal_width(&widths);
        let key = (width > 1, rows, width);
        if key > best_key {
            best_key = key;
            best = delimiter;
        }
    }
    best
}

fn parse_delimited(content: &[u8], sample_rows: usize) -> Option<Grid> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
    if content.iter().all(u8::is_ascii_whitespace) {
        return None;
    }

    let delimiter = detect_delimiter(content, sample_rows);
    debug!(delimiter = %(delimiter as char).escape_default(), "delimiter detected");

    let mut rows = Vec::new();
    for (line, result) in reader(content, delimiter).records().enumerate() {
        match result {
            Ok(record) => rows.push(record.iter().map(str::to_string).collect()),
            Err(e) => debug!(record = line, error = %e, "skipping unparseable record"),
        }
    }
    Some(Grid::new(rows))
}

fn reader(content: &[u8], delimiter: u8) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content)
}

fn is_blank(record: &csv::StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

/// `(rows sharing the modal width, modal width)`.
fn modal_width(widths: &[usize]) -> (usize, usize) {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for &width in widths {
        *counts.entry(width).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(width, rows)| (rows, width))
        .max()
        .unwrap_or((0, 0))
}

#[cfg(feature = "spreadsheet")]
fn parse_spreadsheet(content: &[u8]) -> Option<Grid> {
    use calamine::{Reader, open_workbook_auto_from_rs};
    use std::io::Cursor;

    let mut workbook = match open_workbook_auto_from_rs(Cursor::new(content.to_vec())) {
        Ok(workbook) => workbook,
        Err(e) => {
            debug!(error = %e, "content is not a readable workbook");
            return None;
        }
    };
    let range = match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => range,
        Some(Err(e)) => {
            debug!(error = %e, "failed to read first worksheet");
            return None;
        }
        None => {
            debug!("workbook has no worksheets");
            return None;
        }
    };

    let rows = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();
    Some(Grid::new(rows))
}

#[cfg(not(feature = "spreadsheet"))]
fn parse_spreadsheet(_content: &[u8]) -> Option<Grid> {
    debug!("spreadsheet support not compiled in");
    None
}
