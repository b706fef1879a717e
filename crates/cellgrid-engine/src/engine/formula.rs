//! Formula evaluation for display.
//!
//! The grammar is deliberately tiny: a cell is a formula iff its raw text
//! starts with `=`, and the only recognised shape is a range aggregate,
//! `=SUM(A1:B2)`. Column names in a reference are *labels* resolved against
//! the grid's current label list, so a reference keeps pointing at the same
//! column when columns are inserted or deleted elsewhere. There is no
//! cross-cell reference substitution and no dependency graph; evaluation is
//! a single pass over the referenced rectangle at render time.

use regex::Regex;

use super::grid::Grid;

/// Rendered when a formula names a column label that does not exist.
pub const REF_ERROR: &str = "#REF!";

/// Rendered when `=`-prefixed text does not match the supported grammar.
pub const FORMULA_ERROR: &str = "#ERROR!";

fn sum_re() -> Regex {
    Regex::new(r"^SUM\(([A-Z]+)([0-9]+):([A-Z]+)([0-9]+)\)$").unwrap()
}

/// Produce the text to display for a cell's raw content.
///
/// Plain text passes through unchanged. Formula errors never propagate as
/// faults; they render as the `#REF!` / `#ERROR!` sentinels.
pub fn display_value(raw: &str, grid: &Grid) -> String {
    let Some(body) = raw.strip_prefix('=') else {
        return raw.to_string();
    };
    let expr = body.trim().to_ascii_uppercase();

    let Some(caps) = sum_re().captures(&expr) else {
        return FORMULA_ERROR.to_string();
    };

    // Row numbers are 1-based in references; 0 is outside the grammar.
    let (Some(start_row), Some(end_row)) = (parse_row(&caps[2]), parse_row(&caps[4])) else {
        return FORMULA_ERROR.to_string();
    };
    let (Some(start_col), Some(end_col)) = (
        grid.index_of_label(&caps[1]),
        grid.index_of_label(&caps[3]),
    ) else {
        return REF_ERROR.to_string();
    };

    let mut sum = 0.0f64;
    for row in start_row.min(end_row)..=start_row.max(end_row) {
        for col in start_col.min(end_col)..=start_col.max(end_col) {
            // Cells past the last row and non-numeric cells contribute 0.
            if let Some(text) = grid.cell(row, col) {
                if let Ok(value) = text.trim().parse::<f64>() {
                    if value.is_finite() {
                        sum += value;
                    }
                }
            }
        }
    }
    sum.to_string()
}

fn parse_row(digits: &str) -> Option<usize> {
    digits.parse::<usize>().ok()?.checked_sub(1)
}
