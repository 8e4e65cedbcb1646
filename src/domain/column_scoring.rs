//! Column scoring and selection.
//!
//! Every column of a [`Grid`] is scored independently for ticker-likeness;
//! the winner is chosen by [`rank_candidates`], an explicit comparator over
//! `(count > density_threshold, header_flagged, count)`.

use crate::domain::grid::Grid;
use crate::domain::policy::ExtractionPolicy;
use crate::domain::ticker::{
    dedup_preserving_order, find_ticker_tokens, has_letter, is_ticker, strip_numeric_prefix,
};
use std::cmp::Ordering;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnCandidate {
    pub index: usize,
    /// De-duplicated tickers in first-seen order.
    pub tickers: Vec<String>,
    pub header_flagged: bool,
}

impl ColumnCandidate {
    pub fn count(&self) -> usize {
        self.tickers.len()
    }

    fn sort_key(&self, density_threshold: usize) -> (bool, bool, usize) {
        (
            self.count() > density_threshold,
            self.header_flagged,
            self.count(),
        )
    }
}

/// Tickers recognised in a single cell.
///
/// A cell that is a ticker as a whole (after trimming, upper-casing and
/// dropping a row-number prefix) yields itself. Anything else is searched
/// for embedded tokens that carry at least one letter.
pub fn classify_cell(raw: &str, policy: &ExtractionPolicy) -> Vec<String> {
    let trimmed = strip_numeric_prefix(raw.trim());
    let upper = trimmed.to_uppercase();

    if is_ticker(&upper, policy.max_ticker_len) && !policy.is_ignored(&upper) {
        return vec![upper];
    }

    let haystack = if policy.case_sensitive_subtokens {
        trimmed
    } else {
        upper.as_str()
    };
    find_ticker_tokens(haystack, policy.max_ticker_len)
        .into_iter()
        .filter(|token| has_letter(token) && !policy.is_ignored(token))
        .map(str::to_string)
        .collect()
}

pub fn score_column(grid: &Grid, index: usize, policy: &ExtractionPolicy) -> ColumnCandidate {
    let tickers = dedup_preserving_order(
        grid.column(index)
            .flatten()
            .flat_map(|cell| classify_cell(cell, policy)),
    );
    let header_flagged = grid
        .column(index)
        .take(policy.header_scan_rows)
        .flatten()
        .any(|cell| policy.has_header_keyword(cell));

    ColumnCandidate {
        index,
        tickers,
        header_flagged,
    }
}

pub fn score_columns(grid: &Grid, policy: &ExtractionPolicy) -> Vec<ColumnCandidate> {
    (0..grid.width())
        .map(|index| score_column(grid, index, policy))
        .collect()
}

/// Ordering of two candidates, best first: `Less` means `a` outranks `b`.
///
/// Clearing the density threshold dominates, then the header flag, then
/// the raw count. Equal keys compare `Equal` so a stable sort keeps the
/// left-most column ahead.
pub fn rank_candidates(
    a: &ColumnCandidate,
    b: &ColumnCandidate,
    density_threshold: usize,
) -> Ordering {
    b.sort_key(density_threshold)
        .cmp(&a.sort_key(density_threshold))
}

/// The best-ranked column, provided it found at least one ticker.
pub fn select_column(
    mut candidates: Vec<ColumnCandidate>,
    density_threshold: usize,
) -> Option<ColumnCandidate> {
    candidates.sort_by(|a, b| rank_candidates(a, b, density_threshold));
    for candidate in &candidates {
        debug!(
            column = candidate.index,
            count = candidate.count(),
            header_flagged = candidate.header_flagged,
            "column score"
        );
    }
    candidates.into_iter().next().filter(|c| c.count() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(index: usize, count: usize, header_flagged: bool) -> ColumnCandidate {
        ColumnCandidate {
            index,
            tickers: (0..count).map(|i| format!("T{i}")).collect(),
            header_flagged,
        }
    }

    fn column_grid(cells: &[&str]) -> Grid {
        Grid::new(cells.iter().map(|c| vec![c.to_string()]).collect())
    }

    #[test]
    fn rank_density_threshold_dominates_header_flag() {
        let dense = candidate(0, 3, false);
        let flagged = candidate(1, 1, true);
        assert_eq!(rank_candidates(&dense, &flagged, 2), Ordering::Less);
        assert_eq!(rank_candidates(&flagged, &dense, 2), Ordering::Greater);
    }

    #[test]
    fn rank_header_flag_breaks_ties_above_threshold() {
        let flagged = candidate(0, 5, true);
        let plain = candidate(1, 8, false);
        assert_eq!(rank_candidates(&flagged, &plain, 2), Ordering::Less);
    }

    #[test]
    fn rank_header_flag_breaks_ties_below_threshold() {
        let flagged = candidate(0, 1, true);
        let plain = candidate(1, 2, false);
        assert_eq!(rank_candidates(&flagged, &plain, 2), Ordering::Less);
    }

    #[test]
    fn rank_count_decides_when_flags_match() {
        let more = candidate(0, 7, false);
        let fewer = candidate(1, 4, false);
        assert_eq!(rank_candidates(&more, &fewer, 2), Ordering::Less);
    }

    #[test]
    fn rank_equal_keys_are_equal() {
        let a = candidate(0, 4, true);
        let b = candidate(3, 4, true);
        assert_eq!(rank_candidates(&a, &b, 2), Ordering::Equal);
    }

    #[test]
    fn rank_threshold_is_tunable() {
        let flagged = candidate(0, 2, true);
        let plain = candidate(1, 3, false);
        assert_eq!(rank_candidates(&flagged, &plain, 2), Ordering::Greater);
        assert_eq!(rank_candidates(&flagged, &plain, 3), Ordering::Less);
    }

    #[test]
    fn select_flagged_five_beats_plain_three() {
        let selected =
            select_column(vec![candidate(0, 3, false), candidate(1, 5, true)], 2).unwrap();
        assert_eq!(selected.index, 1);
    }

    #[test]
    fn select_three_beats_one() {
        let selected =
            select_column(vec![candidate(0, 1, true), candidate(1, 3, false)], 2).unwrap();
        assert_eq!(selected.index, 1);
    }

    #[test]
    fn select_ties_go_to_leftmost_column() {
        let selected = select_column(
            vec![
                candidate(0, 0, false),
                candidate(1, 4, false),
                candidate(2, 4, false),
            ],
            2,
        )
        .unwrap();
        assert_eq!(selected.index, 1);
    }

    #[test]
    fn select_none_when_all_columns_empty() {
        assert!(select_column(vec![candidate(0, 0, true), candidate(1, 0, false)], 2).is_none());
        assert!(select_column(Vec::new(), 2).is_none());
    }

    #[test]
    fn classify_direct_hit() {
        let policy = ExtractionPolicy::default();
        assert_eq!(classify_cell("  aapl ", &policy), vec!["AAPL"]);
        assert_eq!(classify_cell("BRK.B", &policy), vec!["BRK.B"]);
        assert_eq!(classify_cell("8 AMZN", &policy), vec!["AMZN"]);
    }

    #[test]
    fn classify_rejects_ignored_words() {
        let policy = ExtractionPolicy::default();
        assert!(classify_cell("Symbol", &policy).is_empty());
        assert!(classify_cell("8", &policy).is_empty());
        assert!(classify_cell("PRICE 145.2", &policy).is_empty());
    }

    #[test]
    fn classify_recovers_embedded_ticker() {
        let policy = ExtractionPolicy::default();
        assert_eq!(classify_cell("AAPL - Apple Inc, up 2%", &policy), vec!["AAPL"]);
    }

    #[test]
    fn classify_case_insensitive_subtokens() {
        let policy = ExtractionPolicy {
            case_sensitive_subtokens: false,
            ..ExtractionPolicy::default()
        };
        assert_eq!(
            classify_cell("AAPL - Apple Inc, up 2%", &policy),
            vec!["AAPL", "APPLE", "INC", "UP"]
        );
    }

    #[test]
    fn score_column_header_flagged_with_noise() {
        let grid = column_grid(&["Symbol", "AAPL", "MSFT", "NOTATICKER123!"]);
        let scored = score_column(&grid, 0, &ExtractionPolicy::default());
        assert_eq!(scored.tickers, vec!["AAPL", "MSFT"]);
        assert!(scored.header_flagged);
        assert_eq!(scored.count(), 2);
    }

    #[test]
    fn score_column_deduplicates() {
        let grid = column_grid(&["TSLA", "tsla", "1 TSLA", "NVDA"]);
        let scored = score_column(&grid, 0, &ExtractionPolicy::default());
        assert_eq!(scored.tickers, vec!["TSLA", "NVDA"]);
        assert!(!scored.header_flagged);
    }

    #[test]
    fn score_column_header_scan_is_bounded() {
        let mut cells = vec!["X"; 15];
        cells.push("Ticker");
        let grid = column_grid(&cells);
        let policy = ExtractionPolicy::default();
        assert!(!score_column(&grid, 0, &policy).header_flagged);

        let wider = ExtractionPolicy {
            header_scan_rows: 16,
            ..ExtractionPolicy::default()
        };
        assert!(score_column(&grid, 0, &wider).header_flagged);
    }

    #[test]
    fn score_columns_handles_ragged_rows() {
        let grid = Grid::new(vec![
            vec!["1".into(), "AAPL".into(), "Apple Inc.".into()],
            vec!["2".into(), "MSFT".into()],
            vec!["3".into()],
        ]);
        let scores = score_columns(&grid, &ExtractionPolicy::default());
        assert_eq!(scores.len(), 3);
        assert_eq!(scores[1].tickers, vec!["AAPL", "MSFT"]);
        assert!(scores[2].tickers.is_empty());
    }
}
