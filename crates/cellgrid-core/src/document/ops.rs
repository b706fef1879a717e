//! Selection/edit state machine transitions and structural edits.
//!
//! Every method here is a synchronous state transition: it either completes
//! fully or rejects with no change. Navigation clamps at grid bounds;
//! operations that *address* an out-of-range cell fail with the engine's
//! out-of-range errors instead.

use cellgrid_engine::{Grid, GridError, DEFAULT_COLS, DEFAULT_ROWS};

use super::state::{CellAddr, Document, ResizeState};
use crate::error::Result;

/// Arrow-key navigation directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}

impl Document {
    fn check_addr(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.grid.row_count() {
            return Err(GridError::RowOutOfRange {
                row,
                rows: self.grid.row_count(),
            }
            .into());
        }
        if col >= self.grid.column_count() {
            return Err(GridError::ColumnOutOfRange {
                col,
                cols: self.grid.column_count(),
            }
            .into());
        }
        Ok(())
    }

    fn load_preview(&mut self, row: usize, col: usize) {
        self.edit_buffer = self.grid.cell(row, col).unwrap_or_default().to_string();
    }

    /// Make (row, col) the active cell: collapses the selection, closes any
    /// edit buffer, and loads the cell's raw text as the buffer preview.
    pub fn select(&mut self, row: usize, col: usize) -> Result<()> {
        self.check_addr(row, col)?;
        self.active_cell = Some(CellAddr::new(row, col));
        self.editing_cell = None;
        self.selection_anchor = None;
        self.selection_focus = None;
        self.load_preview(row, col);
        Ok(())
    }

    /// Open an edit buffer on (row, col), initialised from the cell's raw
    /// text (double-click / Enter).
    pub fn begin_edit(&mut self, row: usize, col: usize) -> Result<()> {
        self.check_addr(row, col)?;
        self.active_cell = Some(CellAddr::new(row, col));
        self.editing_cell = Some(CellAddr::new(row, col));
        self.load_preview(row, col);
        Ok(())
    }

    /// Open an edit buffer seeded with a single typed character, replacing
    /// the existing cell text (type-to-overwrite).
    pub fn begin_edit_with_char(&mut self, row: usize, col: usize, ch: char) -> Result<()> {
        self.check_addr(row, col)?;
        self.active_cell = Some(CellAddr::new(row, col));
        self.editing_cell = Some(CellAddr::new(row, col));
        self.edit_buffer = ch.to_string();
        Ok(())
    }

    /// Replace the edit buffer (keystrokes routed through an input field or
    /// the formula bar).
    pub fn set_edit_buffer(&mut self, text: impl Into<String>) {
        self.edit_buffer = text.into();
    }

    /// A printable key was pressed: in edit mode it appends to the buffer,
    /// on an active cell it starts an overwriting edit. No-op when idle.
    pub fn type_char(&mut self, ch: char) -> Result<()> {
        if self.editing_cell.is_some() {
            self.edit_buffer.push(ch);
            return Ok(());
        }
        if let Some(active) = self.active_cell {
            return self.begin_edit_with_char(active.row, active.col, ch);
        }
        Ok(())
    }

    /// Write the edit buffer to the grid and leave edit mode (blur). The
    /// active cell is unchanged. No-op when no edit is open.
    pub fn commit_edit(&mut self) -> Result<()> {
        let Some(cell) = self.editing_cell.take() else {
            return Ok(());
        };
        let text = std::mem::take(&mut self.edit_buffer);
        self.grid.set_cell(cell.row, cell.col, text)?;
        self.mark_mutation();
        self.load_preview(cell.row, cell.col);
        Ok(())
    }

    /// Commit (Enter), then advance the active cell one row down, clamped
    /// to the last row, reloading the buffer preview.
    pub fn commit_edit_and_advance(&mut self) -> Result<()> {
        self.commit_edit()?;
        if let Some(active) = self.active_cell {
            let row = (active.row + 1).min(self.grid.row_count().saturating_sub(1));
            self.active_cell = Some(CellAddr::new(row, active.col));
            self.load_preview(row, active.col);
        }
        Ok(())
    }

    /// Discard the edit buffer (Escape) and restore the stored cell text.
    pub fn cancel_edit(&mut self) {
        if self.editing_cell.take().is_some() {
            if let Some(active) = self.active_cell {
                self.load_preview(active.row, active.col);
            }
        }
    }

    /// Pointer down on a cell: selects it and starts a drag with anchor =
    /// focus = (row, col).
    pub fn begin_drag(&mut self, row: usize, col: usize) -> Result<()> {
        self.check_addr(row, col)?;
        self.active_cell = Some(CellAddr::new(row, col));
        self.editing_cell = None;
        self.selection_anchor = Some(CellAddr::new(row, col));
        self.selection_focus = Some(CellAddr::new(row, col));
        self.dragging = true;
        self.load_preview(row, col);
        Ok(())
    }

    /// Pointer moved over a cell while dragging: moves the focus corner,
    /// anchor unchanged. Ignored when no drag is in progress.
    pub fn extend_drag(&mut self, row: usize, col: usize) -> Result<()> {
        if !self.dragging {
            return Ok(());
        }
        self.check_addr(row, col)?;
        self.selection_focus = Some(CellAddr::new(row, col));
        Ok(())
    }

    /// Pointer released: the drag ends, the selection rectangle persists.
    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Arrow-key navigation. Only meaningful with an active cell outside
    /// edit mode; moves one step, clamped to grid bounds, and reloads the
    /// buffer preview.
    pub fn move_active(&mut self, direction: MoveDirection) {
        if self.editing_cell.is_some() {
            return;
        }
        let Some(active) = self.active_cell else {
            return;
        };
        let (mut row, mut col) = (active.row, active.col);
        match direction {
            MoveDirection::Up => row = row.saturating_sub(1),
            MoveDirection::Down => row = (row + 1).min(self.grid.row_count().saturating_sub(1)),
            MoveDirection::Left => col = col.saturating_sub(1),
            MoveDirection::Right => col = (col + 1).min(self.grid.column_count().saturating_sub(1)),
        }
        self.active_cell = Some(CellAddr::new(row, col));
        self.load_preview(row, col);
    }

    // ---- structural edits -------------------------------------------------

    /// Replace a cell's text directly (no edit buffer involved).
    pub fn set_cell(&mut self, row: usize, col: usize, text: impl Into<String>) -> Result<()> {
        self.grid.set_cell(row, col, text)?;
        self.mark_mutation();
        Ok(())
    }

    pub fn insert_row(&mut self, at: usize) -> Result<()> {
        self.grid.insert_row(at)?;
        self.mark_mutation();
        Ok(())
    }

    pub fn append_row(&mut self) {
        self.grid.append_row();
        self.mark_mutation();
    }

    /// Delete a row. Cursor, edit and selection state are cleared: the
    /// coordinates they held reference removed or shifted rows.
    pub fn delete_row(&mut self, row: usize) -> Result<()> {
        self.grid.delete_row(row)?;
        self.clear_cursor();
        self.mark_mutation();
        Ok(())
    }

    /// Insert a column, returning its freshly generated label.
    pub fn insert_column(&mut self, at: usize) -> Result<String> {
        let label = self.grid.insert_column(at)?;
        self.mark_mutation();
        Ok(label)
    }

    /// Delete a column and clear cursor state, returning the removed label.
    pub fn delete_column(&mut self, col: usize) -> Result<String> {
        let label = self.grid.delete_column(col)?;
        self.clear_cursor();
        self.filters.remove(&label);
        if self
            .sort
            .as_ref()
            .is_some_and(|sort| sort.column == label)
        {
            self.sort = None;
        }
        self.mark_mutation();
        Ok(label)
    }

    pub fn set_column_width(&mut self, label: &str, width: u32) -> Result<()> {
        self.grid.set_column_width(label, width)?;
        self.mark_mutation();
        Ok(())
    }

    pub fn toggle_hidden(&mut self, label: &str) -> Result<bool> {
        let hidden = self.grid.toggle_hidden(label)?;
        self.mark_mutation();
        Ok(hidden)
    }

    // ---- column resize ----------------------------------------------------

    /// Start resizing the column at position `col`; `pointer_x` is the
    /// pointer's current x coordinate.
    pub fn begin_resize(&mut self, col: usize, pointer_x: i32) -> Result<()> {
        let label = self
            .grid
            .label_at(col)
            .ok_or(GridError::ColumnOutOfRange {
                col,
                cols: self.grid.column_count(),
            })?
            .to_string();
        self.resizing = Some(ResizeState {
            label,
            last_x: pointer_x,
        });
        Ok(())
    }

    /// Apply a pointer move to the in-progress resize. Width deltas are
    /// incremental from the last observed x; the grid clamps the minimum.
    pub fn update_resize(&mut self, pointer_x: i32) -> Result<()> {
        let Some(state) = self.resizing.as_mut() else {
            return Ok(());
        };
        let delta = pointer_x - state.last_x;
        state.last_x = pointer_x;
        let label = state.label.clone();
        let current = self.grid.width_of(&label).unwrap_or_default();
        let width = (current as i64 + delta as i64).max(0) as u32;
        self.grid.set_column_width(&label, width)?;
        self.mark_mutation();
        Ok(())
    }

    pub fn end_resize(&mut self) {
        self.resizing = None;
    }

    /// "New project": replace everything with the blank default grid and
    /// drop all cursor, filter and sort state.
    pub fn reset_blank(&mut self) {
        self.grid = Grid::new(DEFAULT_ROWS, DEFAULT_COLS);
        self.clear_cursor();
        self.filters.clear();
        self.sort = None;
        self.mark_mutation();
    }
}
