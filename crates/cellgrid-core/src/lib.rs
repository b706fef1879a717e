//! cellgrid_core - UI-agnostic grid editor document model + storage.
//!
//! The presentation layer forwards input events into [`Document`] methods
//! and renders from its query surface; nothing here draws, blocks, or talks
//! to the network.

pub mod clipboard;
pub mod document;
pub mod error;
pub mod storage;

pub use document::{
    CellAddr, Document, EditorState, MoveDirection, SelectionRect, SortDirection, SortSpec,
};
pub use error::{CoreError, Result};

pub use cellgrid_engine::{display_value, Grid, GridError};
