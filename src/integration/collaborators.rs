//! Contracts the feed controller consumes from the host application

use nostr_sdk::prelude::*;

use crate::domain::{
    error::FeedError,
    item::{FeedItem, Vote},
    snapshot::ViewportSnapshot,
    source::SourceSnapshot,
};

/// A paginated query against the data layer
///
/// `load_more` is fire-and-forget: its outcome shows up later as a change to
/// `items` or `error`, after which the host calls
/// [`FeedController::sync`](super::controller::FeedController::sync).
/// Guarding against overlapping loads is the source's job.
pub trait FeedSource {
    /// Current items; append-only across loads
    fn items(&self) -> &[FeedItem];

    fn has_more(&self) -> bool;

    fn load_more(&mut self);

    /// Last error, if any
    fn error(&self) -> Option<&FeedError>;

    /// Votes cast by the local account (account queries only)
    fn votes(&self) -> &[Vote] {
        &[]
    }

    /// Ids hidden by the local account, in hide order (account queries only)
    fn hidden(&self) -> &[EventId] {
        &[]
    }

    /// Items referenced by votes or hides, fetched so far (account queries only)
    fn targets(&self) -> &[FeedItem] {
        &[]
    }

    /// Canonical latest item id for the subject (author queries only)
    fn latest_known_id(&self) -> Option<EventId> {
        None
    }

    /// Copy of everything the source currently reports
    fn snapshot(&self) -> SourceSnapshot {
        SourceSnapshot {
            items: self.items().to_vec(),
            votes: self.votes().to_vec(),
            hidden: self.hidden().to_vec(),
            targets: self.targets().to_vec(),
            has_more: self.has_more(),
            error: self.error().cloned(),
            latest_known_id: self.latest_known_id(),
        }
    }
}

/// The virtualized list that renders the rows
pub trait ViewportSurface {
    /// Current render range and scroll offset, if the surface has laid out
    fn viewport_snapshot(&self) -> Option<ViewportSnapshot>;

    fn restore_from(&mut self, snapshot: &ViewportSnapshot);

    fn set_initial_scroll_offset(&mut self, offset: u64);
}

/// Navigation layer of the host application
pub trait Navigator {
    fn navigate_to(&mut self, id: EventId);
}
