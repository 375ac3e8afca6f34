use std::fmt;

use nostr_sdk::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::projection::{FeedKind, ProjectionKey, SortMode};

/// What a feed instance is showing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedSubject {
    /// A remote author, optionally scoped to one of their items
    Author {
        pubkey: PublicKey,
        #[serde(default)]
        context: Option<EventId>,
    },
    /// The local account (own items, votes and hidden items)
    LocalAccount,
}

impl FeedSubject {
    pub fn author(pubkey: PublicKey) -> Self {
        Self::Author {
            pubkey,
            context: None,
        }
    }

    pub fn author_in_context(pubkey: PublicKey, context: EventId) -> Self {
        Self::Author {
            pubkey,
            context: Some(context),
        }
    }

    /// The item id the navigation currently points at, if any
    pub fn context(&self) -> Option<EventId> {
        match self {
            Self::Author { context, .. } => *context,
            Self::LocalAccount => None,
        }
    }

    pub fn is_author(&self) -> bool {
        matches!(self, Self::Author { .. })
    }
}

impl fmt::Display for FeedSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Author { pubkey, context } => {
                let npub = pubkey.to_bech32().unwrap_or_else(|_| pubkey.to_hex());
                match context {
                    Some(id) => write!(f, "{npub}/{}", id.to_hex()),
                    None => write!(f, "{npub}"),
                }
            }
            Self::LocalAccount => write!(f, "account"),
        }
    }
}

/// Parameters supplied by the navigation layer when a feed is opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationContext {
    pub subject: FeedSubject,
    #[serde(default)]
    pub kind: FeedKind,
    #[serde(default)]
    pub sort: SortMode,
}

impl NavigationContext {
    /// Resolve the navigation parameters, falling back to defaults for missing
    /// or unknown values
    pub fn from_params(subject: FeedSubject, kind: Option<&str>, sort: Option<&str>) -> Self {
        Self {
            subject,
            kind: FeedKind::from_param(kind),
            sort: SortMode::from_param(sort),
        }
    }

    pub fn projection_key(&self) -> ProjectionKey {
        ProjectionKey::new(self.kind, self.sort)
    }
}
