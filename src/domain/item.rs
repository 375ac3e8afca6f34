use nostr_sdk::prelude::*;
use serde::{Deserialize, Serialize};

/// A single feed entry: a top-level post or a reply
///
/// Items are immutable once observed by the controller. The data source
/// replaces the whole collection on every update instead of mutating entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: EventId,
    /// Present for replies, absent for top-level posts
    #[serde(default)]
    pub parent_id: Option<EventId>,
    pub created_at: Timestamp,
    pub author: PublicKey,
    #[serde(default)]
    pub content: String,
}

impl FeedItem {
    /// Build a feed item from a text note, resolving its parent from NIP-10 `e` tags
    pub fn from_event(event: &Event) -> Self {
        Self {
            id: event.id,
            parent_id: parent_id(event),
            created_at: event.created_at,
            author: event.pubkey,
            content: event.content.clone(),
        }
    }

    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    pub fn is_post(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Resolve the event a note replies to.
///
/// The `reply` marker wins over `root`; unmarked (deprecated positional) tags
/// fall back to the last `e` tag.
fn parent_id(event: &Event) -> Option<EventId> {
    let mut root = None;
    let mut reply = None;
    let mut positional = None;

    for tag in event
        .tags
        .filter_standardized(TagKind::SingleLetter(SingleLetterTag::lowercase(
            Alphabet::E,
        )))
    {
        if let TagStandard::Event {
            event_id, marker, ..
        } = tag
        {
            match marker {
                Some(Marker::Reply) => reply = Some(*event_id),
                Some(Marker::Root) => root = Some(*event_id),
                _ => positional = Some(*event_id),
            }
        }
    }

    reply.or(root).or(positional)
}

/// Direction of a vote cast by the local account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteSign {
    Up,
    Down,
}

/// A vote cast by the local account on some item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub target: EventId,
    pub sign: VoteSign,
    pub created_at: Timestamp,
}

impl Vote {
    pub fn new(target: EventId, sign: VoteSign, created_at: Timestamp) -> Self {
        Self {
            target,
            sign,
            created_at,
        }
    }

    /// Interpret a NIP-25 reaction as a vote
    ///
    /// Returns `None` for non-reaction events or reactions without an `e` tag.
    pub fn from_reaction(event: &Event) -> Option<Self> {
        if event.kind != Kind::Reaction {
            return None;
        }

        // The reacted-to event is the last `e` tag
        let target = event
            .tags
            .filter_standardized(TagKind::SingleLetter(SingleLetterTag::lowercase(
                Alphabet::E,
            )))
            .last()
            .and_then(|tag| match tag {
                TagStandard::Event { event_id, .. } => Some(*event_id),
                _ => None,
            })?;

        let sign = if event.content == "-" {
            VoteSign::Down
        } else {
            VoteSign::Up
        };

        Some(Self::new(target, sign, event.created_at))
    }
}
