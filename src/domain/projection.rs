//! Derived views over a raw item collection
//!
//! Every projection is a pure function of the raw items (plus the vote and
//! hidden collections for the account-only kinds). Switching between kinds or
//! sort modes never requires a new fetch.
//!
//! A projection is an ordered id sequence. Vote and hidden kinds take their
//! ids from the votes or hides themselves, so an id whose item has not been
//! delivered yet still counts; it is resolved once the item shows up in the
//! subject's items or in the referenced targets.

use std::{cmp::Ordering, collections::HashMap};

use nostr_sdk::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::domain::{
    collections::{HiddenSet, ItemSet},
    item::{FeedItem, Vote, VoteSign},
};

/// Which derived view of the raw collection is active
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    #[default]
    All,
    #[strum(serialize = "posts")]
    #[serde(rename = "posts")]
    PostsOnly,
    #[strum(serialize = "replies")]
    #[serde(rename = "replies")]
    RepliesOnly,
    Upvoted,
    Downvoted,
    Hidden,
}

impl FeedKind {
    /// Parse a navigation parameter, falling back to `All`
    pub fn from_param(param: Option<&str>) -> Self {
        param.and_then(|p| p.parse().ok()).unwrap_or_default()
    }

    /// Vote-derived and hidden feeds are sliced into fixed pages on the client
    /// instead of streaming from the data source
    pub fn is_client_paged(self) -> bool {
        matches!(self, Self::Upvoted | Self::Downvoted | Self::Hidden)
    }
}

/// Time ordering applied after filtering
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Newest first
    #[default]
    New,
    /// Oldest first
    Old,
}

impl SortMode {
    /// Parse a navigation parameter, falling back to newest-first
    pub fn from_param(param: Option<&str>) -> Self {
        param.and_then(|p| p.parse().ok()).unwrap_or_default()
    }
}

/// (feed-kind, sort-mode) pair selecting the active view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectionKey {
    pub kind: FeedKind,
    pub sort: SortMode,
}

impl ProjectionKey {
    pub fn new(kind: FeedKind, sort: SortMode) -> Self {
        Self { kind, sort }
    }
}

/// Raw collections a projection is computed from
#[derive(Debug, Clone, Copy)]
pub struct RawFeed<'a> {
    /// The subject's own items
    pub items: &'a ItemSet,
    /// Items referenced by votes or hides, from any author
    pub targets: &'a ItemSet,
    pub votes: &'a [Vote],
    pub hidden: &'a HiddenSet,
}

impl<'a> RawFeed<'a> {
    pub fn lookup(&self, id: &EventId) -> Option<&'a FeedItem> {
        self.items.get(id).or_else(|| self.targets.get(id))
    }
}

/// Ordered id sequence for `key`.
///
/// Streaming kinds filter the subject's items. Vote kinds list the targets of
/// the account's votes in cast order, the hidden kind lists hides in hide
/// order; neither requires the referenced item to be known.
///
/// Sorting is stable, so ids with equal timestamps keep their relative input
/// order under both sort modes. Ids whose item is unknown have no timestamp
/// and follow every known one, in sequence order.
pub fn project_ids(raw: RawFeed<'_>, key: ProjectionKey) -> Vec<EventId> {
    let ids: Vec<EventId> = match key.kind {
        FeedKind::All => ids_where(raw.items, |_| true),
        FeedKind::PostsOnly => ids_where(raw.items, FeedItem::is_post),
        FeedKind::RepliesOnly => ids_where(raw.items, FeedItem::is_reply),
        FeedKind::Upvoted => voted(raw.votes, VoteSign::Up),
        FeedKind::Downvoted => voted(raw.votes, VoteSign::Down),
        FeedKind::Hidden => raw.hidden.iter().copied().collect(),
    };

    sort_by_time(raw, ids, key.sort)
}

/// Compute the ordered, resolved view for `key`
pub fn project(raw: RawFeed<'_>, key: ProjectionKey) -> Vec<FeedItem> {
    resolve(raw, &project_ids(raw, key))
}

/// Items for `ids` in the same order; ids not delivered yet are skipped
pub fn resolve(raw: RawFeed<'_>, ids: &[EventId]) -> Vec<FeedItem> {
    let resolved: Vec<FeedItem> = ids.iter().filter_map(|id| raw.lookup(id).cloned()).collect();

    if resolved.len() < ids.len() {
        log::debug!(
            "{} referenced items are not in the collection yet",
            ids.len() - resolved.len()
        );
    }

    resolved
}

fn sort_by_time(raw: RawFeed<'_>, ids: Vec<EventId>, sort: SortMode) -> Vec<EventId> {
    let mut keyed: Vec<(EventId, Option<Timestamp>)> = ids
        .into_iter()
        .map(|id| (id, raw.lookup(&id).map(|item| item.created_at)))
        .collect();

    // slice::sort_by is stable
    keyed.sort_by(|(_, a), (_, b)| match (a, b) {
        (Some(a), Some(b)) => match sort {
            SortMode::New => b.cmp(a),
            SortMode::Old => a.cmp(b),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    keyed.into_iter().map(|(id, _)| id).collect()
}

fn ids_where(items: &ItemSet, keep: impl Fn(&FeedItem) -> bool) -> Vec<EventId> {
    items.iter().filter(|item| keep(item)).map(|item| item.id).collect()
}

/// Targets whose latest vote has `sign`, in the order those votes were cast
fn voted(votes: &[Vote], sign: VoteSign) -> Vec<EventId> {
    let mut cast_order: Vec<&Vote> = votes.iter().collect();
    cast_order.sort_by_key(|vote| vote.created_at);

    // A later vote on the same target supersedes the earlier one
    let latest: HashMap<EventId, usize> = cast_order
        .iter()
        .enumerate()
        .map(|(position, vote)| (vote.target, position))
        .collect();

    cast_order
        .iter()
        .enumerate()
        .filter(|(position, vote)| latest.get(&vote.target) == Some(position))
        .filter(|(_, vote)| vote.sign == sign)
        .map(|(_, vote)| vote.target)
        .collect()
}
