//! Snapshot capture and last-write-wins application.

use super::Document;
use crate::error::Result;
use crate::storage::{now_millis, SheetSnapshot, SnapshotStore};

impl Document {
    /// Capture the persistable state, stamped with the current time.
    pub fn snapshot(&self) -> SheetSnapshot {
        SheetSnapshot::capture(&self.grid, now_millis())
    }

    /// Apply an incoming snapshot under the last-write-wins rule: it
    /// replaces local state wholesale iff its timestamp is strictly newer
    /// than the last applied one. Returns whether it was applied.
    ///
    /// This is advisory, not transactional - a stale concurrent editor's
    /// intermediate edits can be silently clobbered. That policy is given.
    pub fn apply_snapshot(&mut self, snapshot: &SheetSnapshot) -> bool {
        if snapshot.updated_at <= self.last_applied_at {
            return false;
        }
        self.grid = snapshot.restore_grid();
        self.last_applied_at = snapshot.updated_at;
        // The whole grid was replaced; any held coordinates are stale.
        self.clear_cursor();
        self.revision += 1;
        self.modified = false;
        true
    }

    /// Flush the current state to a store and clear the modified flag.
    pub fn save_to(&mut self, store: &mut impl SnapshotStore) -> Result<()> {
        let snapshot = self.snapshot();
        store.save(&snapshot)?;
        self.last_applied_at = snapshot.updated_at;
        self.modified = false;
        Ok(())
    }
}
