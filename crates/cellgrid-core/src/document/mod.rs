//! Document state and logic (UI-agnostic).

mod io;
mod ops;
mod state;
mod view;

pub use ops::MoveDirection;
pub use state::{CellAddr, Document, EditorState, SelectionRect, SortDirection, SortSpec};
