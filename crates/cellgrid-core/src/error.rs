//! Error types for cellgrid core.

use cellgrid_engine::GridError;
use thiserror::Error;

/// Errors surfaced by the document and storage layers. None of these are
/// fatal: rejected operations leave state unchanged, and snapshot parse
/// failures fall back to the blank default grid.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("snapshot parse error: {0}")]
    SnapshotParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
