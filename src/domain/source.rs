use nostr_sdk::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{
    error::FeedError,
    item::{FeedItem, Vote},
};

/// Everything a data source reports for one query at a point in time
///
/// `items` is append-only across successive loads. `votes`, `hidden` and
/// `targets` are only populated for local-account queries, `latest_known_id`
/// only for author queries. `targets` carries the items referenced by votes
/// and hides as far as the source has fetched them; they may be authored by
/// anyone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSnapshot {
    #[serde(default)]
    pub items: Vec<FeedItem>,
    #[serde(default)]
    pub votes: Vec<Vote>,
    #[serde(default)]
    pub hidden: Vec<EventId>,
    #[serde(default)]
    pub targets: Vec<FeedItem>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub error: Option<FeedError>,
    #[serde(default)]
    pub latest_known_id: Option<EventId>,
}

impl SourceSnapshot {
    pub fn with_items(items: Vec<FeedItem>, has_more: bool) -> Self {
        Self {
            items,
            has_more,
            ..Default::default()
        }
    }

    pub fn failed(error: FeedError) -> Self {
        Self {
            error: Some(error),
            ..Default::default()
        }
    }
}
