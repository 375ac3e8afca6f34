//! Feed state
//!
//! One [`FeedState`] per mounted feed instance. The snapshot store is shared
//! between instances and lives outside the state, see
//! [`crate::domain::snapshot::SnapshotStore`].

pub mod feed;

pub use feed::{
    ErrorVisibility, FeedSettings, FeedState, FeedView, Footer, PageInfo, DEFAULT_PAGE_SIZE,
};
