use serde::{Deserialize, Serialize};

use crate::domain::{
    projection::{FeedKind, SortMode},
    snapshot::ViewportSnapshot,
    source::SourceSnapshot,
};

/// Events that can change a feed's state
///
/// Every scroll notification, data arrival and user selection is delivered as
/// one of these, one at a time, from the UI event loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedMsg {
    // Lifecycle
    Mounted,
    Unmounted,

    // Data source
    SourceChanged(SourceSnapshot),

    // Virtualization surface
    Scrolled(ViewportSnapshot),
    ReachedEnd,

    // Projection selection
    SetFeedKind(FeedKind),
    SetSortMode(SortMode),

    // Client-side pages
    NextPage,
    PreviousPage,

    // Keyboard selection
    ScrollUp,
    ScrollDown,
    ScrollToTop,
    ScrollToBottom,
    Select(usize),
    Deselect,
}

impl FeedMsg {
    /// Scroll notifications arrive on every frame while the list moves
    pub fn is_frequent(&self) -> bool {
        matches!(self, Self::Scrolled(_))
    }
}
