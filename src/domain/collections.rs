use nostr_sdk::prelude::*;
use std::collections::{HashMap, HashSet};
use std::ops::Deref;
use std::slice::Iter;

use crate::domain::item::FeedItem;

/// A collection of feed items with automatic deduplication
/// Provides O(1) duplicate checking and lookup by EventId while preserving insertion order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemSet {
    items: Vec<FeedItem>,
    positions: HashMap<EventId, usize>,
}

impl ItemSet {
    /// Creates a new empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an item (the first occurrence of an id wins)
    /// Returns: true if the item was actually inserted, false if it was a duplicate
    pub fn insert(&mut self, item: FeedItem) -> bool {
        if self.positions.contains_key(&item.id) {
            return false;
        }
        self.positions.insert(item.id, self.items.len());
        self.items.push(item);
        true
    }

    pub fn get(&self, id: &EventId) -> Option<&FeedItem> {
        self.positions.get(id).and_then(|&i| self.items.get(i))
    }
}

impl Deref for ItemSet {
    type Target = [FeedItem];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl FromIterator<FeedItem> for ItemSet {
    fn from_iter<T: IntoIterator<Item = FeedItem>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<FeedItem> for ItemSet {
    fn extend<T: IntoIterator<Item = FeedItem>>(&mut self, iter: T) {
        for item in iter {
            self.insert(item);
        }
    }
}

/// Ids hidden by the local account, iterated in the order they were hidden
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HiddenSet {
    order: Vec<EventId>,
    ids: HashSet<EventId>,
}

impl HiddenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the id was already hidden
    pub fn insert(&mut self, id: EventId) -> bool {
        if self.ids.insert(id) {
            self.order.push(id);
            true
        } else {
            false
        }
    }

    pub fn iter(&self) -> Iter<'_, EventId> {
        self.order.iter()
    }
}

impl FromIterator<EventId> for HiddenSet {
    fn from_iter<T: IntoIterator<Item = EventId>>(iter: T) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}
