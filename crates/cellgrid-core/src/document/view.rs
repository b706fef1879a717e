//! View derivation: which rows are displayed, in what order.
//!
//! The view is a read-only projection over the grid: an AND of per-column
//! case-insensitive substring filters, then an optional single-key sort
//! using a numeric-substring-aware comparison ("R2" sorts before "R10").
//! It is recomputed in full on demand; nothing here mutates the rows.

use std::cmp::Ordering;

use super::state::{Document, SortDirection, SortSpec};

impl Document {
    /// Set or replace the filter pattern for a column label. An empty
    /// pattern is kept but places no constraint on the column.
    pub fn set_filter(&mut self, label: impl Into<String>, pattern: impl Into<String>) {
        self.filters.insert(label.into(), pattern.into());
    }

    pub fn remove_filter(&mut self, label: &str) {
        self.filters.remove(label);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Set the sort key, or `None` to restore filtered row order.
    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
    }

    /// Data-row indices currently eligible for display, filtered then
    /// sorted. Ties keep their filtered (insertion) order.
    pub fn visible_rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = (0..self.grid.row_count())
            .filter(|&row| self.row_passes_filters(row))
            .collect();

        if let Some(SortSpec { column, direction }) = &self.sort {
            rows.sort_by(|&a, &b| {
                let va = self.grid.cell_by_label(a, column).unwrap_or("");
                let vb = self.grid.cell_by_label(b, column).unwrap_or("");
                let ord = natural_cmp(va, vb);
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }
        rows
    }

    /// Column labels not currently hidden, in display order.
    pub fn visible_columns(&self) -> Vec<&str> {
        self.grid
            .column_labels()
            .iter()
            .map(String::as_str)
            .filter(|label| !self.grid.is_hidden(label))
            .collect()
    }

    fn row_passes_filters(&self, row: usize) -> bool {
        self.filters.iter().all(|(label, pattern)| {
            if pattern.is_empty() {
                return true;
            }
            match self.grid.cell_by_label(row, label) {
                Some(text) => text.to_lowercase().contains(&pattern.to_lowercase()),
                // A filter on a label the rows don't carry matches nothing.
                None => false,
            }
        })
    }
}

/// Case-insensitive comparison that orders embedded digit runs by numeric
/// value, so "R2" < "R10" and "a2b" < "a10a".
pub(crate) fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ca = a.chars().peekable();
    let mut cb = b.chars().peekable();

    loop {
        match (ca.peek().copied(), cb.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if x.is_ascii_digit() && y.is_ascii_digit() {
                    let run_a = take_digits(&mut ca);
                    let run_b = take_digits(&mut cb);
                    let ord = cmp_digit_runs(&run_a, &run_b);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                } else {
                    let ord = x.to_lowercase().cmp(y.to_lowercase());
                    if ord != Ordering::Equal {
                        return ord;
                    }
                    ca.next();
                    cb.next();
                }
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellgrid_engine::Grid;

    fn doc_with_column_a(values: &[&str]) -> Document {
        let mut grid = Grid::new(values.len(), 2);
        for (row, value) in values.iter().enumerate() {
            grid.set_cell(row, 0, *value).unwrap();
        }
        Document::with_grid(grid)
    }

    #[test]
    fn test_natural_cmp_numeric_runs() {
        assert_eq!(natural_cmp("R2", "R10"), Ordering::Less);
        assert_eq!(natural_cmp("R10", "R2"), Ordering::Greater);
        assert_eq!(natural_cmp("a2b", "a10a"), Ordering::Less);
        assert_eq!(natural_cmp("x", "x"), Ordering::Equal);
    }

    #[test]
    fn test_natural_cmp_case_insensitive() {
        assert_eq!(natural_cmp("apple", "APPLE"), Ordering::Equal);
        assert_eq!(natural_cmp("Apple", "banana"), Ordering::Less);
        assert_eq!(natural_cmp("BANANA", "apple"), Ordering::Greater);
    }

    #[test]
    fn test_natural_cmp_leading_zeros() {
        assert_eq!(natural_cmp("a007", "a7"), Ordering::Equal);
        assert_eq!(natural_cmp("a007", "a8"), Ordering::Less);
        assert_eq!(natural_cmp("a010", "a9"), Ordering::Greater);
    }

    #[test]
    fn test_unfiltered_view_is_identity() {
        let doc = doc_with_column_a(&["x", "y", "z"]);
        assert_eq!(doc.visible_rows(), vec![0, 1, 2]);
    }

    #[test]
    fn test_filter_case_insensitive_substring() {
        let mut doc = doc_with_column_a(&["Apple pie", "Banana", "apple tart", "cherry"]);
        doc.set_filter("A", "APPLE");
        assert_eq!(doc.visible_rows(), vec![0, 2]);
    }

    #[test]
    fn test_filters_compose_with_and() {
        let mut grid = Grid::new(3, 2);
        grid.set_cell(0, 0, "red").unwrap();
        grid.set_cell(0, 1, "small").unwrap();
        grid.set_cell(1, 0, "red").unwrap();
        grid.set_cell(1, 1, "large").unwrap();
        grid.set_cell(2, 0, "blue").unwrap();
        grid.set_cell(2, 1, "small").unwrap();
        let mut doc = Document::with_grid(grid);
        doc.set_filter("A", "red");
        doc.set_filter("B", "small");
        assert_eq!(doc.visible_rows(), vec![0]);
    }

    #[test]
    fn test_empty_pattern_is_no_constraint() {
        let mut doc = doc_with_column_a(&["a", "b"]);
        doc.set_filter("A", "");
        assert_eq!(doc.visible_rows(), vec![0, 1]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let mut doc = doc_with_column_a(&["ant", "bee", "antelope"]);
        doc.set_filter("A", "ant");
        let once = doc.visible_rows();
        doc.set_filter("A", "ant");
        assert_eq!(doc.visible_rows(), once);
    }

    #[test]
    fn test_sort_natural_ascending_and_descending() {
        let mut doc = doc_with_column_a(&["R10", "R2", "R1"]);
        doc.set_sort(Some(SortSpec {
            column: "A".into(),
            direction: SortDirection::Ascending,
        }));
        assert_eq!(doc.visible_rows(), vec![2, 1, 0]);
        doc.set_sort(Some(SortSpec {
            column: "A".into(),
            direction: SortDirection::Descending,
        }));
        assert_eq!(doc.visible_rows(), vec![0, 1, 2]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let mut doc = doc_with_column_a(&["b", "a", "b", "a"]);
        doc.set_sort(Some(SortSpec {
            column: "A".into(),
            direction: SortDirection::Ascending,
        }));
        assert_eq!(doc.visible_rows(), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_sort_applies_after_filter() {
        let mut doc = doc_with_column_a(&["item9", "skip", "item10", "item1"]);
        doc.set_filter("A", "item");
        doc.set_sort(Some(SortSpec {
            column: "A".into(),
            direction: SortDirection::Ascending,
        }));
        assert_eq!(doc.visible_rows(), vec![3, 0, 2]);
    }

    #[test]
    fn test_hidden_columns_excluded_from_visible_columns() {
        let mut grid = Grid::new(1, 3);
        grid.toggle_hidden("B").unwrap();
        let doc = Document::with_grid(grid);
        assert_eq!(doc.visible_columns(), vec!["A", "C"]);
    }

    #[test]
    fn test_view_does_not_mutate_grid() {
        let mut doc = doc_with_column_a(&["c", "a", "b"]);
        doc.set_sort(Some(SortSpec {
            column: "A".into(),
            direction: SortDirection::Ascending,
        }));
        let _ = doc.visible_rows();
        assert_eq!(doc.grid.cell(0, 0), Some("c"));
        assert_eq!(doc.grid.cell(2, 0), Some("b"));
    }
}
