//! Pagination state for feeds
//!
//! Streaming feeds (author / account items) page through the data source via
//! `load_more`. Vote-derived and hidden feeds hold their whole sequence and are
//! sliced into fixed-size pages on the client.

use nostr_sdk::prelude::*;

use crate::domain::error::FeedError;

/// Rows shown per page of a client-paged feed
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Rows of page `page_index` (1-based) of `sequence`
pub fn visible_slice<T>(sequence: &[T], page_index: usize, page_size: usize) -> &[T] {
    let page_index = page_index.max(1);
    let start = ((page_index - 1) * page_size).min(sequence.len());
    let end = (page_index * page_size).min(sequence.len());
    &sequence[start..end]
}

/// Whether rows exist beyond page `page_index` (1-based)
pub fn has_more(page_index: usize, page_size: usize, total: usize) -> bool {
    page_index.max(1) * page_size < total
}

/// Last state reported by a streaming data source
#[derive(Debug, Clone, Default)]
pub struct StreamState {
    has_more: bool,
    error: Option<FeedError>,
    latest_known_id: Option<EventId>,
    /// Item count at the time of the last `load_more` request still awaiting data
    loading_more_from: Option<usize>,
}

impl StreamState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Last error verbatim; retries are the data source's business
    pub fn error(&self) -> Option<&FeedError> {
        self.error.as_ref()
    }

    pub fn latest_known_id(&self) -> Option<EventId> {
        self.latest_known_id
    }

    /// Record a data update from the source.
    ///
    /// A pending load finishes once more items arrive than were present when it
    /// was requested, or once the source reports the end.
    pub fn apply(
        &mut self,
        item_count: usize,
        has_more: bool,
        error: Option<FeedError>,
        latest_known_id: Option<EventId>,
    ) {
        self.has_more = has_more;
        self.error = error;
        self.latest_known_id = latest_known_id;

        if let Some(from) = self.loading_more_from {
            if item_count > from || !has_more {
                self.finish_loading_more();
            }
        }
    }

    /// Mark that a `load_more` request has been issued at `item_count` items
    pub fn start_loading_more(&mut self, item_count: usize) {
        self.loading_more_from = Some(item_count);
    }

    pub fn finish_loading_more(&mut self) {
        self.loading_more_from = None;
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_more_from.is_some()
    }
}

/// Page cursor over a client-side sliced sequence
///
/// `page_index` is 1-based and never drops below 1.
#[derive(Debug, Clone)]
pub struct ClientPager {
    page_index: usize,
    page_size: usize,
}

impl Default for ClientPager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ClientPager {
    /// A zero page size is bumped to 1
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn visible_slice<'a, T>(&self, sequence: &'a [T]) -> &'a [T] {
        visible_slice(sequence, self.page_index, self.page_size)
    }

    pub fn has_more(&self, total: usize) -> bool {
        has_more(self.page_index, self.page_size, total)
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 1
    }

    /// Advance one page if there is one; returns whether the page changed
    pub fn next_page(&mut self, total: usize) -> bool {
        if self.has_more(total) {
            self.page_index += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page if possible; returns whether the page changed
    pub fn previous_page(&mut self) -> bool {
        if self.has_previous() {
            self.page_index -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.page_index = 1;
    }

    /// Pull the cursor back onto the last page after the sequence shrank
    pub fn clamp(&mut self, total: usize) {
        let last_page = total.div_ceil(self.page_size).max(1);
        if self.page_index > last_page {
            self.page_index = last_page;
        }
    }
}
