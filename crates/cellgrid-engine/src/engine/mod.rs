//! Grid engine API.
//!
//! This module provides the in-memory model and pure computation for the
//! grid editor:
//!
//! - [`Grid`], [`Row`] - the rectangular table of text cells
//! - [`column_name`], [`column_names`] - bijective base-26 column labels
//! - [`display_value`] - formula evaluation (range SUM) for display
//! - [`GridError`] - out-of-range / unknown-label rejections

mod columns;
mod error;
mod formula;
mod grid;

pub use columns::{column_name, column_names};
pub use error::{GridError, Result};
pub use formula::{display_value, FORMULA_ERROR, REF_ERROR};
pub use grid::{Grid, Row, DEFAULT_COLS, DEFAULT_COLUMN_WIDTH, DEFAULT_ROWS, MIN_COLUMN_WIDTH};
