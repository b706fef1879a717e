//! cellgrid_engine - grid data model + formula evaluation.

pub mod engine;

pub use engine::{
    Grid, GridError, Row, column_name, column_names, display_value, DEFAULT_COLS,
    DEFAULT_COLUMN_WIDTH, DEFAULT_ROWS, FORMULA_ERROR, MIN_COLUMN_WIDTH, REF_ERROR,
};
