//! The grid store: a fixed-row-count, dynamic-column-count table of text.
//!
//! Rows are maps keyed by column *label*, not position. Labels come from
//! [`column_name`](super::column_name) but once assigned they are stable
//! identifiers: inserting or deleting other columns never renames a column,
//! and labels are never reused within a session, so formula references stay
//! stable. Position is carried separately by `column_labels` order.
//!
//! Invariant held across every operation: each row's key set equals the
//! current label set, and every label has a width entry. Operations are
//! atomic - a rejected call leaves the grid untouched.

use std::collections::{HashMap, HashSet};

use super::columns::{column_name, column_names};
use super::error::{GridError, Result};

/// Default grid dimensions for a fresh sheet.
pub const DEFAULT_ROWS: usize = 20;
pub const DEFAULT_COLS: usize = 16;

/// Default and minimum column widths in pixels.
pub const DEFAULT_COLUMN_WIDTH: u32 = 100;
pub const MIN_COLUMN_WIDTH: u32 = 50;

/// A single row: column label -> cell text.
pub type Row = HashMap<String, String>;

/// The rectangular table of cells plus column metadata.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: Vec<Row>,
    column_labels: Vec<String>,
    column_widths: HashMap<String, u32>,
    hidden_columns: HashSet<String>,
    /// Count of labels ever issued. Fresh labels continue from here so a
    /// deleted column's label is never handed out again.
    labels_issued: usize,
}

impl Grid {
    /// Create a blank grid of the given dimensions (all cells empty).
    pub fn new(row_count: usize, col_count: usize) -> Self {
        Self::build(row_count, col_count, |_, _| String::new())
    }

    /// Create a grid pre-populated with placeholder content (`R1CA`,
    /// `R1CB`, ...), useful for demos and tests.
    pub fn with_sample_data(row_count: usize, col_count: usize) -> Self {
        Self::build(row_count, col_count, |row, label| {
            format!("R{}C{}", row + 1, label)
        })
    }

    fn build(row_count: usize, col_count: usize, fill: impl Fn(usize, &str) -> String) -> Self {
        let column_labels = column_names(col_count);
        let rows = (0..row_count)
            .map(|r| {
                column_labels
                    .iter()
                    .map(|label| (label.clone(), fill(r, label)))
                    .collect()
            })
            .collect();
        let column_widths = column_labels
            .iter()
            .map(|label| (label.clone(), DEFAULT_COLUMN_WIDTH))
            .collect();
        Grid {
            rows,
            column_labels,
            column_widths,
            hidden_columns: HashSet::new(),
            labels_issued: col_count,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_labels.len()
    }

    /// Column labels in display order.
    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    /// The label at a column position, if in range.
    pub fn label_at(&self, col: usize) -> Option<&str> {
        self.column_labels.get(col).map(String::as_str)
    }

    /// Resolve a label to its current position. Linear scan: the label list
    /// is small and positions shift under structural edits, so nothing is
    /// cached.
    pub fn index_of_label(&self, label: &str) -> Option<usize> {
        self.column_labels.iter().position(|l| l == label)
    }

    /// Read a cell by position. `None` if out of range.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        let label = self.column_labels.get(col)?;
        self.rows.get(row)?.get(label).map(String::as_str)
    }

    /// Read a cell by row position and column label.
    pub fn cell_by_label(&self, row: usize, label: &str) -> Option<&str> {
        self.rows.get(row)?.get(label).map(String::as_str)
    }

    /// The full row map at a position.
    pub fn row(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    /// Replace the text of a cell.
    pub fn set_cell(&mut self, row: usize, col: usize, text: impl Into<String>) -> Result<()> {
        self.check_row(row)?;
        let label = self.check_col(col)?.to_string();
        self.rows[row].insert(label, text.into());
        Ok(())
    }

    /// Insert a blank row at `at` (0..=row_count), shifting later rows down.
    pub fn insert_row(&mut self, at: usize) -> Result<()> {
        if at > self.rows.len() {
            return Err(GridError::RowOutOfRange {
                row: at,
                rows: self.rows.len(),
            });
        }
        self.rows.insert(at, self.blank_row());
        Ok(())
    }

    /// Append a blank row at the bottom.
    pub fn append_row(&mut self) {
        self.rows.push(self.blank_row());
    }

    /// Remove the row at `row`, shifting later rows up.
    pub fn delete_row(&mut self, row: usize) -> Result<()> {
        self.check_row(row)?;
        self.rows.remove(row);
        Ok(())
    }

    /// Insert a new column at position `at` (0..=column_count) and return
    /// its freshly generated label. Every row gains an empty cell under the
    /// new label and the default width is assigned.
    pub fn insert_column(&mut self, at: usize) -> Result<String> {
        if at > self.column_labels.len() {
            return Err(GridError::ColumnOutOfRange {
                col: at,
                cols: self.column_labels.len(),
            });
        }
        let label = column_name(self.labels_issued);
        self.labels_issued += 1;
        self.column_labels.insert(at, label.clone());
        self.column_widths
            .insert(label.clone(), DEFAULT_COLUMN_WIDTH);
        for row in &mut self.rows {
            row.insert(label.clone(), String::new());
        }
        Ok(label)
    }

    /// Remove the column at position `col`, dropping its cells, width and
    /// hidden flag. Returns the removed label.
    pub fn delete_column(&mut self, col: usize) -> Result<String> {
        self.check_col(col)?;
        let label = self.column_labels.remove(col);
        self.column_widths.remove(&label);
        self.hidden_columns.remove(&label);
        for row in &mut self.rows {
            row.remove(&label);
        }
        Ok(label)
    }

    /// Set a column's width, clamped to [`MIN_COLUMN_WIDTH`].
    pub fn set_column_width(&mut self, label: &str, width: u32) -> Result<()> {
        if !self.column_widths.contains_key(label) {
            return Err(GridError::UnknownColumn {
                label: label.to_string(),
            });
        }
        self.column_widths
            .insert(label.to_string(), width.max(MIN_COLUMN_WIDTH));
        Ok(())
    }

    pub fn width_of(&self, label: &str) -> Option<u32> {
        self.column_widths.get(label).copied()
    }

    pub fn column_widths(&self) -> &HashMap<String, u32> {
        &self.column_widths
    }

    /// Flip a column's hidden flag. Returns the new hidden state. Hidden
    /// columns stay in the rows and remain addressable; they are only
    /// skipped by the presentation layer.
    pub fn toggle_hidden(&mut self, label: &str) -> Result<bool> {
        if self.index_of_label(label).is_none() {
            return Err(GridError::UnknownColumn {
                label: label.to_string(),
            });
        }
        if self.hidden_columns.remove(label) {
            Ok(false)
        } else {
            self.hidden_columns.insert(label.to_string());
            Ok(true)
        }
    }

    pub fn is_hidden(&self, label: &str) -> bool {
        self.hidden_columns.contains(label)
    }

    pub fn hidden_columns(&self) -> &HashSet<String> {
        &self.hidden_columns
    }

    fn blank_row(&self) -> Row {
        self.column_labels
            .iter()
            .map(|label| (label.clone(), String::new()))
            .collect()
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.rows.len() {
            return Err(GridError::RowOutOfRange {
                row,
                rows: self.rows.len(),
            });
        }
        Ok(())
    }

    fn check_col(&self, col: usize) -> Result<&str> {
        self.column_labels
            .get(col)
            .map(String::as_str)
            .ok_or(GridError::ColumnOutOfRange {
                col,
                cols: self.column_labels.len(),
            })
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every row's key set must equal the label set, and every label must
    /// carry a width.
    fn assert_consistent(grid: &Grid) {
        let labels: HashSet<&str> = grid.column_labels().iter().map(String::as_str).collect();
        for r in 0..grid.row_count() {
            let keys: HashSet<&str> = grid.row(r).unwrap().keys().map(String::as_str).collect();
            assert_eq!(keys, labels, "row {} keys drifted from label set", r);
        }
        for label in &labels {
            assert!(grid.width_of(label).is_some(), "label {} has no width", label);
        }
        for hidden in grid.hidden_columns() {
            assert!(labels.contains(hidden.as_str()));
        }
    }

    #[test]
    fn test_set_cell_round_trip() {
        let mut grid = Grid::new(4, 4);
        grid.set_cell(2, 3, "hello").unwrap();
        assert_eq!(grid.cell(2, 3), Some("hello"));
    }

    #[test]
    fn test_set_cell_out_of_range() {
        let mut grid = Grid::new(2, 2);
        assert_eq!(
            grid.set_cell(2, 0, "x"),
            Err(GridError::RowOutOfRange { row: 2, rows: 2 })
        );
        assert_eq!(
            grid.set_cell(0, 2, "x"),
            Err(GridError::ColumnOutOfRange { col: 2, cols: 2 })
        );
    }

    #[test]
    fn test_sample_data_fill() {
        let grid = Grid::with_sample_data(3, 2);
        assert_eq!(grid.cell(0, 0), Some("R1CA"));
        assert_eq!(grid.cell(2, 1), Some("R3CB"));
    }

    #[test]
    fn test_insert_and_delete_row() {
        let mut grid = Grid::with_sample_data(3, 2);
        grid.insert_row(1).unwrap();
        assert_eq!(grid.row_count(), 4);
        assert_eq!(grid.cell(1, 0), Some(""));
        assert_eq!(grid.cell(2, 0), Some("R2CA"));
        grid.delete_row(1).unwrap();
        assert_eq!(grid.cell(1, 0), Some("R2CA"));
        assert_consistent(&grid);
    }

    #[test]
    fn test_insert_row_at_end_allowed() {
        let mut grid = Grid::new(2, 2);
        grid.insert_row(2).unwrap();
        assert_eq!(grid.row_count(), 3);
        assert!(grid.insert_row(4).is_err());
    }

    #[test]
    fn test_insert_column_generates_fresh_label() {
        let mut grid = Grid::new(2, 3); // A B C
        let label = grid.insert_column(1).unwrap();
        assert_eq!(label, "D");
        assert_eq!(grid.column_labels(), &["A", "D", "B", "C"]);
        assert_eq!(grid.cell(0, 1), Some(""));
        assert_eq!(grid.width_of("D"), Some(DEFAULT_COLUMN_WIDTH));
        assert_consistent(&grid);
    }

    #[test]
    fn test_labels_never_reused() {
        let mut grid = Grid::new(2, 2); // A B
        let first = grid.insert_column(2).unwrap(); // C
        grid.delete_column(2).unwrap();
        let second = grid.insert_column(2).unwrap();
        assert_eq!(first, "C");
        assert_eq!(second, "D");
    }

    #[test]
    fn test_insert_then_delete_column_restores_structure() {
        let mut grid = Grid::with_sample_data(3, 3);
        let labels_before = grid.column_labels().to_vec();
        let widths_before = grid.column_widths().clone();
        let row_before = grid.row(1).unwrap().clone();

        grid.insert_column(1).unwrap();
        grid.delete_column(1).unwrap();

        assert_eq!(grid.column_labels(), labels_before.as_slice());
        assert_eq!(grid.column_widths(), &widths_before);
        assert_eq!(grid.row(1).unwrap(), &row_before);
        assert_consistent(&grid);
    }

    #[test]
    fn test_delete_column_drops_width_and_hidden_flag() {
        let mut grid = Grid::new(2, 3);
        grid.toggle_hidden("B").unwrap();
        let removed = grid.delete_column(1).unwrap();
        assert_eq!(removed, "B");
        assert_eq!(grid.width_of("B"), None);
        assert!(!grid.is_hidden("B"));
        assert_consistent(&grid);
    }

    #[test]
    fn test_column_width_clamped_to_minimum() {
        let mut grid = Grid::new(1, 1);
        grid.set_column_width("A", 10).unwrap();
        assert_eq!(grid.width_of("A"), Some(MIN_COLUMN_WIDTH));
        grid.set_column_width("A", 240).unwrap();
        assert_eq!(grid.width_of("A"), Some(240));
        assert!(matches!(
            grid.set_column_width("Z", 80),
            Err(GridError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_toggle_hidden() {
        let mut grid = Grid::new(1, 2);
        assert_eq!(grid.toggle_hidden("B"), Ok(true));
        assert!(grid.is_hidden("B"));
        assert_eq!(grid.toggle_hidden("B"), Ok(false));
        assert!(!grid.is_hidden("B"));
        assert!(grid.toggle_hidden("Q").is_err());
    }

    #[test]
    fn test_hidden_column_still_addressable() {
        let mut grid = Grid::new(2, 2);
        grid.toggle_hidden("B").unwrap();
        grid.set_cell(0, 1, "still here").unwrap();
        assert_eq!(grid.cell(0, 1), Some("still here"));
    }

    #[test]
    fn test_labels_stable_under_structural_edits() {
        let mut grid = Grid::new(2, 4); // A B C D
        grid.delete_column(0).unwrap();
        assert_eq!(grid.column_labels(), &["B", "C", "D"]);
        assert_eq!(grid.index_of_label("C"), Some(1));
    }
}
