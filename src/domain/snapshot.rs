//! Viewport snapshots and the store that keeps them across navigation

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::domain::{projection::SortMode, subject::FeedSubject};

/// Half-open range `[start, end)` of row indices rendered by the virtualized list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize,
}

impl VisibleRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Render-range state plus absolute scroll offset of a virtualized list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewportSnapshot {
    pub range: VisibleRange,
    /// Offset in the surface's own units (rows for a TUI, pixels for a GUI)
    pub scroll_offset: u64,
}

impl ViewportSnapshot {
    pub fn new(range: VisibleRange, scroll_offset: u64) -> Self {
        Self {
            range,
            scroll_offset,
        }
    }

    /// A snapshot with an empty visible range carries nothing worth restoring
    pub fn is_degenerate(&self) -> bool {
        self.range.is_empty()
    }

    /// Fit the snapshot into a list of `len` rows.
    ///
    /// An empty list is treated as "not loaded yet" and leaves the snapshot
    /// untouched. Otherwise a range running past the tail is shifted back so it
    /// ends on the last row, and the offset is scaled by the same amount.
    pub fn clamped(&self, len: usize) -> Self {
        if len == 0 || self.range.end <= len {
            return *self;
        }

        let visible = self.range.len().min(len);
        let start = len - visible;
        // start <= range.start, so the scaled offset never exceeds the original
        let scroll_offset = if self.range.start == 0 {
            0
        } else {
            let scaled = u128::from(self.scroll_offset) * start as u128 / self.range.start as u128;
            u64::try_from(scaled).unwrap_or(u64::MAX)
        };

        Self::new(VisibleRange::new(start, len), scroll_offset)
    }
}

/// Identity under which a snapshot is stored
///
/// Two feeds with the same subject and sort mode share one entry, whatever
/// their feed kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotKey {
    pub subject: FeedSubject,
    pub sort: SortMode,
}

impl SnapshotKey {
    pub fn new(subject: FeedSubject, sort: SortMode) -> Self {
        Self { subject, sort }
    }
}

/// In-memory keyed cache of viewport snapshots
///
/// Entries live for as long as the store does. Writes for a key are
/// last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    entries: HashMap<SnapshotKey, ViewportSnapshot>,
}

/// Store handle shared by every feed controller on the UI thread
pub type SharedSnapshotStore = Rc<RefCell<SnapshotStore>>;

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store wrapped for sharing between controllers
    pub fn shared() -> SharedSnapshotStore {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Store `snapshot` under `key`, replacing any previous entry.
    ///
    /// Degenerate snapshots are refused so they never overwrite a useful one.
    /// Returns whether the snapshot was stored.
    pub fn save(&mut self, key: SnapshotKey, snapshot: ViewportSnapshot) -> bool {
        if snapshot.is_degenerate() {
            log::debug!("Refusing degenerate snapshot for {}", key.subject);
            return false;
        }
        self.entries.insert(key, snapshot);
        true
    }

    pub fn load(&self, key: &SnapshotKey) -> Option<ViewportSnapshot> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
