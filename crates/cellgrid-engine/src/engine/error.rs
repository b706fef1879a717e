//! Error types for grid operations.

use thiserror::Error;

/// Rejections from grid store operations. The operation that returns one of
/// these has made no change to the grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("row {row} is out of range (grid has {rows} rows)")]
    RowOutOfRange { row: usize, rows: usize },

    #[error("column {col} is out of range (grid has {cols} columns)")]
    ColumnOutOfRange { col: usize, cols: usize },

    #[error("unknown column label {label:?}")]
    UnknownColumn { label: String },
}

pub type Result<T> = std::result::Result<T, GridError>;
