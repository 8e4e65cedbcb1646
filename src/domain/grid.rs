//! Generic row/column grid built from tabular input.
//!
//! No header row is assumed: row 0 is ordinary data. Rows may be ragged; all
//! access goes through [`Grid::cell`], which reports out-of-range and blank
//! cells as absent.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest row; shorter rows are treated as absent past their end.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.width() == 0
    }

    /// Cell at `(row, col)`, or `None` if out of range or blank.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    /// Column `col` top to bottom, one entry per row.
    pub fn column(&self, col: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        (0..self.rows.len()).map(move |row| self.cell(row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ragged() -> Grid {
        Grid::new(vec![
            vec!["Symbol".into(), "Price".into(), "Note".into()],
            vec!["AAPL".into(), "189.1".into()],
            vec!["MSFT".into()],
            vec![],
        ])
    }

    #[test]
    fn width_is_widest_row() {
        let grid = ragged();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.row_count(), 4);
    }

    #[test]
    fn cell_out_of_range_is_absent() {
        let grid = ragged();
        assert_eq!(grid.cell(0, 2), Some("Note"));
        assert_eq!(grid.cell(1, 2), None);
        assert_eq!(grid.cell(3, 0), None);
        assert_eq!(grid.cell(99, 0), None);
    }

    #[test]
    fn blank_cell_is_absent() {
        let grid = Grid::new(vec![vec!["  ".into(), "".into(), "X".into()]]);
        assert_eq!(grid.cell(0, 0), None);
        assert_eq!(grid.cell(0, 1), None);
        assert_eq!(grid.cell(0, 2), Some("X"));
    }

    #[test]
    fn column_yields_one_entry_per_row() {
        let grid = ragged();
        let col: Vec<Option<&str>> = grid.column(1).collect();
        assert_eq!(col, vec![Some("Price"), Some("189.1"), None, None]);
    }

    #[test]
    fn empty_grid() {
        assert!(Grid::default().is_empty());
        assert!(Grid::new(vec![vec![], vec![]]).is_empty());
        assert!(!ragged().is_empty());
    }
}
