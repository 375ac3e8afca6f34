use nostr_sdk::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::snapshot::{SnapshotKey, ViewportSnapshot};

/// Side effects requested by the feed reducer
///
/// The reducer never touches the snapshot store, the data source or the
/// navigation layer itself; it returns these and the controller executes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cmd {
    /// Ask the streaming data source for the next batch
    LoadMore,
    /// Persist the viewport for the feed's (subject, sort-mode) key
    SaveSnapshot {
        key: SnapshotKey,
        snapshot: ViewportSnapshot,
    },
    /// Hand the stored viewport for `key`, if any, to the virtualization surface
    RestoreViewport { key: SnapshotKey },
    /// Redirect navigation to the canonical item id
    NavigateTo { id: EventId },
    /// Diagnostic for an error that is not necessarily shown to the user
    LogError { message: String },
}
