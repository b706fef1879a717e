use std::collections::HashMap;

use cellgrid_engine::{display_value, Grid};

/// A cell coordinate. `col` is the column's *position* in the label list,
/// not its label, so the cursor keeps tracking a screen position as labels
/// shift under structural edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellAddr {
    pub row: usize,
    pub col: usize,
}

impl CellAddr {
    pub fn new(row: usize, col: usize) -> Self {
        CellAddr { row, col }
    }
}

/// Inclusive rectangle between a selection anchor and focus; min/max is
/// taken per axis, so the two corners can be given in any order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRect {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl SelectionRect {
    pub fn between(a: CellAddr, b: CellAddr) -> Self {
        SelectionRect {
            min_row: a.row.min(b.row),
            max_row: a.row.max(b.row),
            min_col: a.col.min(b.col),
            max_col: a.col.max(b.col),
        }
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.min_row..=self.max_row).contains(&row) && (self.min_col..=self.max_col).contains(&col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The single active sort key: a column label and a direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

/// Where the selection/edit machine currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorState {
    /// No active cell.
    Idle,
    /// An active cell receives keyboard input; no edit buffer is open.
    CellActive,
    /// The active cell has an open edit buffer.
    Editing,
}

/// An in-progress column resize. The machine, not the input layer, owns the
/// "resize in progress" flag.
#[derive(Clone, Debug)]
pub(crate) struct ResizeState {
    pub label: String,
    pub last_x: i32,
}

/// UI-agnostic document state for the grid editor.
pub struct Document {
    /// The grid of cells plus column metadata.
    pub grid: Grid,
    /// The cell targeted by keyboard input, when any.
    pub(crate) active_cell: Option<CellAddr>,
    /// Present iff an edit buffer is open on the active cell.
    pub(crate) editing_cell: Option<CellAddr>,
    /// Uncommitted edit text; outside edit mode it previews the active
    /// cell's raw content (formula-bar display).
    pub(crate) edit_buffer: String,
    /// Selection rectangle corners; `None` when the selection is collapsed.
    pub(crate) selection_anchor: Option<CellAddr>,
    pub(crate) selection_focus: Option<CellAddr>,
    /// Whether a pointer drag is extending the selection.
    pub(crate) dragging: bool,
    /// In-progress column resize, when any.
    pub(crate) resizing: Option<ResizeState>,
    /// Per-column case-insensitive substring filters (label -> pattern).
    pub(crate) filters: HashMap<String, String>,
    /// Optional single sort key.
    pub(crate) sort: Option<SortSpec>,
    /// Whether local edits exist since the last snapshot was taken.
    pub modified: bool,
    /// Bumped on every settled local mutation; the host watches this to
    /// schedule debounced saves.
    pub(crate) revision: u64,
    /// Timestamp of the last snapshot applied from the store (last-write-
    /// wins guard).
    pub(crate) last_applied_at: i64,
}

impl Document {
    /// Blank default document.
    pub fn new() -> Self {
        Self::with_grid(Grid::default())
    }

    pub fn with_grid(grid: Grid) -> Self {
        Document {
            grid,
            active_cell: None,
            editing_cell: None,
            edit_buffer: String::new(),
            selection_anchor: None,
            selection_focus: None,
            dragging: false,
            resizing: None,
            filters: HashMap::new(),
            sort: None,
            modified: false,
            revision: 0,
            last_applied_at: 0,
        }
    }

    pub fn state(&self) -> EditorState {
        if self.editing_cell.is_some() {
            EditorState::Editing
        } else if self.active_cell.is_some() {
            EditorState::CellActive
        } else {
            EditorState::Idle
        }
    }

    pub fn active_cell(&self) -> Option<CellAddr> {
        self.active_cell
    }

    pub fn editing_cell(&self) -> Option<CellAddr> {
        self.editing_cell
    }

    pub fn is_editing(&self) -> bool {
        self.editing_cell.is_some()
    }

    pub fn edit_buffer(&self) -> &str {
        &self.edit_buffer
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_resizing(&self) -> bool {
        self.resizing.is_some()
    }

    /// The current selection rectangle, if a multi-cell selection exists.
    pub fn selection_rect(&self) -> Option<SelectionRect> {
        match (self.selection_anchor, self.selection_focus) {
            (Some(anchor), Some(focus)) => Some(SelectionRect::between(anchor, focus)),
            _ => None,
        }
    }

    pub fn filters(&self) -> &HashMap<String, String> {
        &self.filters
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn last_applied_at(&self) -> i64 {
        self.last_applied_at
    }

    /// Text to render for a cell: the formula evaluator applied to its raw
    /// content. `None` if the address is out of range.
    pub fn display_value(&self, row: usize, col: usize) -> Option<String> {
        self.grid
            .cell(row, col)
            .map(|raw| display_value(raw, &self.grid))
    }

    /// Record a settled local mutation.
    pub(crate) fn mark_mutation(&mut self) {
        self.modified = true;
        self.revision += 1;
    }

    /// Drop all cursor, selection and edit state. Required after any edit
    /// that removes or shifts rows/columns: stale coordinates must never be
    /// retained.
    pub(crate) fn clear_cursor(&mut self) {
        self.active_cell = None;
        self.editing_cell = None;
        self.edit_buffer.clear();
        self.selection_anchor = None;
        self.selection_focus = None;
        self.dragging = false;
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
