//! # Profile Feed - Incremental feed controller for Nostr profiles
//!
//! Turns a growing, append-only collection of posts and replies into a
//! scrollable feed: filtered and sorted views, paging against a remote source
//! or on the client, viewport persistence across navigation, and an error
//! display that never hides data the user can already see.
//!
//! ## Architecture Overview
//!
//! The feed follows the Elm architecture:
//!
//! - **Model** (`state`): [`FeedState`] holds everything one feed instance knows
//! - **Message** (`msg`): [`FeedMsg`] describes what happened
//! - **Update** (`update`): pure transitions from state and message
//! - **Command** (`cmd`): [`Cmd`] side effects, executed by [`FeedController`]
//!
//! ## Example Usage
//!
//! ```rust
//! use profile_feed::{
//!     core::state::{FeedSettings, FeedState, Footer},
//!     domain::{
//!         source::SourceSnapshot,
//!         subject::{FeedSubject, NavigationContext},
//!     },
//!     update, FeedMsg,
//! };
//!
//! let nav = NavigationContext::from_params(FeedSubject::LocalAccount, Some("posts"), None);
//! let state = FeedState::new(nav, FeedSettings::default());
//!
//! let (state, _) = update(FeedMsg::Mounted, state);
//! let (state, commands) = update(
//!     FeedMsg::SourceChanged(SourceSnapshot::with_items(vec![], false)),
//!     state,
//! );
//!
//! // A confirmed-empty feed shows "nothing found" and asks for nothing
//! assert!(commands.is_empty());
//! assert_eq!(state.footer(), Footer::NothingFound);
//! ```
//!
//! ## Modules
//!
//! - [`core`] - Feed state, messages, commands and the update function
//! - [`domain`] - Items, votes, projection and viewport snapshots
//! - [`integration`] - Collaborator traits and the feed controller
//! - [`infrastructure`] - CLI, configuration and session replay
//! - [`utils`] - Logging, panic handling and paths

pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod integration;
pub mod utils;

// Re-exports for convenience
pub use crate::core::{cmd::Cmd, msg::FeedMsg, state::FeedState, update::update};
pub use domain::{
    projection::{project, FeedKind, RawFeed, SortMode},
    snapshot::{SharedSnapshotStore, SnapshotStore},
};
pub use integration::{FeedController, FeedSource, Navigator, ViewportSurface};

/// Result type used throughout the library
pub type Result<T> = color_eyre::eyre::Result<T>;
