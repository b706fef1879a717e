//! Clipboard transfer format and provider abstraction.
//!
//! The interchange format is plain text: cells joined by horizontal tabs,
//! rows joined by newlines. It round-trips through any text clipboard and
//! is what spreadsheet applications exchange. The provider trait keeps the
//! codec testable without a windowing system.

use cellgrid_engine::Grid;

use crate::document::{CellAddr, Document, SelectionRect};

/// Trait for clipboard backends.
pub trait ClipboardProvider {
    /// Get text from the clipboard.
    fn get_text(&mut self) -> Option<String>;

    /// Set text to the clipboard.
    fn set_text(&mut self, text: String) -> bool;
}

/// System clipboard implementation using arboard.
pub struct SystemClipboard;

impl ClipboardProvider for SystemClipboard {
    fn get_text(&mut self) -> Option<String> {
        let mut cb = arboard::Clipboard::new().ok()?;
        cb.get_text().ok()
    }

    fn set_text(&mut self, text: String) -> bool {
        let mut cb = match arboard::Clipboard::new() {
            Ok(cb) => cb,
            Err(_) => return false,
        };
        cb.set_text(text).is_ok()
    }
}

/// Serialize a rectangle of raw cell text. Cells the grid does not cover
/// render as empty strings, so the block is always rectangular.
pub fn serialize_range(grid: &Grid, rect: &SelectionRect) -> String {
    let mut lines = Vec::with_capacity(rect.max_row - rect.min_row + 1);
    for row in rect.min_row..=rect.max_row {
        let cells: Vec<&str> = (rect.min_col..=rect.max_col)
            .map(|col| grid.cell(row, col).unwrap_or(""))
            .collect();
        lines.push(cells.join("\t"));
    }
    lines.join("\n")
}

/// Parse pasted text into a patch: one `Vec<String>` per non-blank line,
/// split on tabs. Rows may be ragged; shorter rows simply patch fewer
/// columns.
pub fn parse_block(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split('\t').map(str::to_string).collect())
        .collect()
}

/// Write a patch into the grid with its top-left cell at the origin.
/// Patch cells that land outside the grid are silently dropped; the grid is
/// never resized. Returns the number of cells written.
pub fn apply_paste(
    grid: &mut Grid,
    patch: &[Vec<String>],
    origin_row: usize,
    origin_col: usize,
) -> usize {
    let mut written = 0;
    for (r, patch_row) in patch.iter().enumerate() {
        for (c, text) in patch_row.iter().enumerate() {
            let row = origin_row + r;
            let col = origin_col + c;
            if grid.set_cell(row, col, text.clone()).is_ok() {
                written += 1;
            }
        }
    }
    written
}

impl Document {
    /// Serialize the current selection (or the active cell, as a 1x1
    /// rectangle) for the clipboard. `None` when nothing is selected.
    pub fn copy_selection(&self) -> Option<String> {
        let rect = self.selection_rect().or_else(|| {
            self.active_cell()
                .map(|CellAddr { row, col }| SelectionRect::between(
                    CellAddr::new(row, col),
                    CellAddr::new(row, col),
                ))
        })?;
        Some(serialize_range(&self.grid, &rect))
    }

    /// Paste clipboard text with its origin at the active cell. Returns the
    /// number of cells written (0 when idle or the text is blank).
    pub fn paste_at_active(&mut self, text: &str) -> usize {
        let Some(active) = self.active_cell() else {
            return 0;
        };
        let patch = parse_block(text);
        let written = apply_paste(&mut self.grid, &patch, active.row, active.col);
        if written > 0 {
            self.mark_mutation();
        }
        written
    }
}
