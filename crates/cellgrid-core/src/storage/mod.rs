//! Persistence: snapshot stores and save scheduling.
//!
//! The persistence collaborator is outside the core; this module models it
//! as the [`SnapshotStore`] trait. The core never blocks on a store - the
//! host observes [`Document::revision`](crate::Document::revision), runs a
//! [`SaveDebouncer`], and calls `save` when a flush is due.

mod snapshot;

use std::fs;
use std::path::{Path, PathBuf};

use cellgrid_engine::Grid;
use chrono::Utc;

pub use snapshot::SheetSnapshot;

use crate::error::Result;

/// Current wall-clock time in milliseconds, the `updatedAt` unit.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Where sheet snapshots are kept.
pub trait SnapshotStore {
    /// Fetch the stored document. `Ok(None)` means nothing has been saved
    /// yet; a deserialization failure is an `Err` the caller recovers from.
    fn load(&mut self) -> Result<Option<SheetSnapshot>>;

    /// Persist a snapshot, replacing any previous document.
    fn save(&mut self, snapshot: &SheetSnapshot) -> Result<()>;
}

/// A snapshot store backed by a single JSON file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&mut self) -> Result<Option<SheetSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&mut self, snapshot: &SheetSnapshot) -> Result<()> {
        let json = serde_json::to_string(snapshot)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    pub snapshot: Option<SheetSnapshot>,
    pub save_count: usize,
}

impl SnapshotStore for MemoryStore {
    fn load(&mut self) -> Result<Option<SheetSnapshot>> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &SheetSnapshot) -> Result<()> {
        self.snapshot = Some(snapshot.clone());
        self.save_count += 1;
        Ok(())
    }
}

/// Load the stored grid, or initialise the store with a blank default.
///
/// An absent document and an unreadable one are both recovered the same
/// way: start from the blank default grid and persist it immediately.
/// Returns the grid and the timestamp it carries.
pub fn load_or_init(
    store: &mut impl SnapshotStore,
    row_count: usize,
    col_count: usize,
) -> Result<(Grid, i64)> {
    match store.load() {
        Ok(Some(snapshot)) => {
            let grid = snapshot.restore_grid();
            Ok((grid, snapshot.updated_at))
        }
        Ok(None) | Err(crate::CoreError::SnapshotParse(_)) => {
            let grid = Grid::new(row_count, col_count);
            let snapshot = SheetSnapshot::capture(&grid, now_millis());
            store.save(&snapshot)?;
            Ok((grid, snapshot.updated_at))
        }
        Err(err) => Err(err),
    }
}

/// Coalesces bursts of mutations into one delayed save.
///
/// Purely clock-driven: the host feeds it "now" values (milliseconds) and
/// polls [`flush_due`](Self::flush_due) on its own tick. Each mutation
/// pushes the deadline out, so a rapid editing burst produces a single
/// flush after the burst settles.
pub struct SaveDebouncer {
    delay_ms: i64,
    deadline: Option<i64>,
}

impl SaveDebouncer {
    pub fn new(delay_ms: i64) -> Self {
        SaveDebouncer {
            delay_ms,
            deadline: None,
        }
    }

    /// Note that a mutation settled at `now_ms`.
    pub fn note_mutation(&mut self, now_ms: i64) {
        self.deadline = Some(now_ms + self.delay_ms);
    }

    /// Whether a save should be flushed at `now_ms`.
    pub fn flush_due(&self, now_ms: i64) -> bool {
        self.deadline.is_some_and(|deadline| now_ms >= deadline)
    }

    /// Clear the pending deadline after a flush.
    pub fn mark_flushed(&mut self) {
        self.deadline = None;
    }
}
