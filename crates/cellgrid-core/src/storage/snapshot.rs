//! The persisted sheet document.
//!
//! The store holds a single JSON document: the cell text as a row-major
//! matrix, the column widths, the hidden-column set, and an `updatedAt`
//! millisecond timestamp used for last-write-wins. Labels are positional in
//! this format - on restore they are regenerated from column count, width
//! and hidden entries naming labels outside that set are dropped, and
//! missing widths take the default.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use cellgrid_engine::Grid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetSnapshot {
    /// Raw cell text, row-major, columns in display order.
    pub data: Vec<Vec<String>>,
    pub column_widths: HashMap<String, u32>,
    pub hidden_columns: Vec<String>,
    /// Milliseconds since the epoch at capture time.
    pub updated_at: i64,
}

impl SheetSnapshot {
    /// Capture the persistable parts of a grid.
    pub fn capture(grid: &Grid, updated_at: i64) -> Self {
        let labels = grid.column_labels();
        let data = (0..grid.row_count())
            .map(|row| {
                labels
                    .iter()
                    .map(|label| {
                        grid.cell_by_label(row, label)
                            .unwrap_or_default()
                            .to_string()
                    })
                    .collect()
            })
            .collect();
        let mut hidden_columns: Vec<String> = grid.hidden_columns().iter().cloned().collect();
        hidden_columns.sort();
        SheetSnapshot {
            data,
            column_widths: grid.column_widths().clone(),
            hidden_columns,
            updated_at,
        }
    }

    /// Rebuild a grid from this snapshot.
    pub fn restore_grid(&self) -> Grid {
        let col_count = self.data.iter().map(Vec::len).max().unwrap_or(0);
        let mut grid = Grid::new(self.data.len(), col_count);
        for (row, cells) in self.data.iter().enumerate() {
            for (col, text) in cells.iter().enumerate() {
                // In range by construction.
                let _ = grid.set_cell(row, col, text.clone());
            }
        }
        for label in grid.column_labels().to_vec() {
            if let Some(&width) = self.column_widths.get(&label) {
                let _ = grid.set_column_width(&label, width);
            }
        }
        for label in &self.hidden_columns {
            let _ = grid.toggle_hidden(label);
        }
        grid
    }
}
