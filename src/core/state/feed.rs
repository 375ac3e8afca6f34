use std::collections::HashSet;

use nostr_sdk::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    core::{cmd::Cmd, msg::FeedMsg},
    domain::{
        collections::{HiddenSet, ItemSet},
        error::FeedError,
        item::{FeedItem, Vote},
        projection::{project_ids, resolve, FeedKind, ProjectionKey, RawFeed, SortMode},
        snapshot::{SnapshotKey, ViewportSnapshot},
        source::SourceSnapshot,
        subject::{FeedSubject, NavigationContext},
    },
};

mod error_gate;
mod pagination;
mod redirect;
mod selection;

pub use error_gate::{ErrorGate, ErrorVisibility};
pub use pagination::{has_more, visible_slice, ClientPager, StreamState, DEFAULT_PAGE_SIZE};
pub use redirect::RedirectGuard;
pub use selection::SelectionState;

/// Tunables shared by every feed instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSettings {
    /// Rows per page for client-paged feeds
    pub page_size: usize,
    /// Rows from the tail at which keyboard selection counts as reaching the end
    pub end_threshold: usize,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            end_threshold: 0,
        }
    }
}

/// Footer shown below the rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Footer {
    None,
    /// More rows exist for the active adapter
    LoadingMore,
    /// Confirmed empty: no rows and nothing left to load
    NothingFound,
}

/// Page position of a client-paged feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub index: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Everything a renderer needs to draw one feed
#[derive(Debug, Clone, PartialEq)]
pub struct FeedView<'a> {
    pub rows: &'a [FeedItem],
    /// Size of the whole projection (all pages)
    pub total: usize,
    /// Ids on the current page whose item has not been delivered yet
    pub pending: usize,
    pub footer: Footer,
    /// Present only while the error gate is open
    pub error: Option<&'a FeedError>,
    pub page: Option<PageInfo>,
    pub selected: Option<usize>,
}

/// State of one mounted feed instance
///
/// Raw data from the source is kept as delivered; the active projection is
/// recomputed from it whenever the data or the projection key changes. The
/// projection is an id sequence; `rows` holds the resolved items of the part
/// currently rendered.
#[derive(Debug, Clone)]
pub struct FeedState {
    subject: FeedSubject,
    key: ProjectionKey,
    settings: FeedSettings,
    mounted: bool,

    items: ItemSet,
    targets: ItemSet,
    votes: Vec<Vote>,
    hidden: HiddenSet,
    ids: Vec<EventId>,
    rows: Vec<FeedItem>,

    stream: StreamState,
    pager: ClientPager,
    selection: SelectionState,
    error_gate: ErrorGate,
    redirect: RedirectGuard,
    logged_errors: HashSet<String>,
}

impl FeedState {
    pub fn new(navigation: NavigationContext, settings: FeedSettings) -> Self {
        Self {
            key: navigation.projection_key(),
            subject: navigation.subject,
            settings,
            mounted: false,
            items: ItemSet::new(),
            targets: ItemSet::new(),
            votes: Vec::new(),
            hidden: HiddenSet::new(),
            ids: Vec::new(),
            rows: Vec::new(),
            stream: StreamState::new(),
            pager: ClientPager::new(settings.page_size),
            selection: SelectionState::new(),
            error_gate: ErrorGate::new(),
            redirect: RedirectGuard::new(),
            logged_errors: HashSet::new(),
        }
    }

    pub fn subject(&self) -> &FeedSubject {
        &self.subject
    }

    pub fn projection_key(&self) -> ProjectionKey {
        self.key
    }

    pub fn feed_kind(&self) -> FeedKind {
        self.key.kind
    }

    pub fn sort_mode(&self) -> SortMode {
        self.key.sort
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Key under which this feed's viewport is stored
    pub fn snapshot_key(&self) -> SnapshotKey {
        SnapshotKey::new(self.subject.clone(), self.key.sort)
    }

    /// Ids of the whole active projection (every page)
    pub fn projected_ids(&self) -> &[EventId] {
        &self.ids
    }

    /// Size of the whole active projection
    pub fn total(&self) -> usize {
        self.ids.len()
    }

    /// Rows currently rendered: the whole projection for streaming feeds, the
    /// resolved part of the current page for client-paged ones
    pub fn rows(&self) -> &[FeedItem] {
        &self.rows
    }

    pub fn pending(&self) -> usize {
        self.visible_ids().len().saturating_sub(self.rows.len())
    }

    /// Whether the active adapter has more to show
    ///
    /// Client-paged feeds hold their whole sequence already; only further
    /// pages count, never the upstream stream.
    pub fn has_more(&self) -> bool {
        if self.key.kind.is_client_paged() {
            self.pager.has_more(self.total())
        } else {
            self.stream.has_more()
        }
    }

    pub fn is_loading_more(&self) -> bool {
        self.stream.is_loading_more()
    }

    pub fn error_visibility(&self) -> ErrorVisibility {
        self.error_gate.visibility()
    }

    /// Last error reported by the source, whether shown or not
    pub fn source_error(&self) -> Option<&FeedError> {
        self.stream.error()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection.selected_index()
    }

    pub fn selected_item(&self) -> Option<&FeedItem> {
        self.rows().get(self.selection.selected_index()?)
    }

    pub fn footer(&self) -> Footer {
        if self.has_more() {
            Footer::LoadingMore
        } else if self.ids.is_empty() {
            Footer::NothingFound
        } else {
            Footer::None
        }
    }

    pub fn page_info(&self) -> Option<PageInfo> {
        self.key.kind.is_client_paged().then(|| PageInfo {
            index: self.pager.page_index(),
            has_previous: self.pager.has_previous(),
            has_next: self.pager.has_more(self.total()),
        })
    }

    pub fn view(&self) -> FeedView<'_> {
        FeedView {
            rows: self.rows(),
            total: self.total(),
            pending: self.pending(),
            footer: self.footer(),
            error: self.error_gate.shown_error(),
            page: self.page_info(),
            selected: self.selection.selected_index(),
        }
    }

    /// Feed-specific update function
    /// Returns: Generated commands
    pub fn update(&mut self, msg: FeedMsg) -> Vec<Cmd> {
        match msg {
            FeedMsg::Mounted => {
                self.mounted = true;
                vec![Cmd::RestoreViewport {
                    key: self.snapshot_key(),
                }]
            }

            FeedMsg::Unmounted => {
                self.mounted = false;
                vec![]
            }

            FeedMsg::SourceChanged(snapshot) => self.apply_source(snapshot),

            FeedMsg::Scrolled(snapshot) => self.save_viewport(snapshot),

            FeedMsg::ReachedEnd => self.request_more(),

            FeedMsg::SetFeedKind(kind) => {
                if kind == self.key.kind {
                    return vec![];
                }
                self.key.kind = kind;
                self.pager.reset();
                self.selection.deselect();
                self.refresh();
                vec![]
            }

            FeedMsg::SetSortMode(sort) => {
                if sort == self.key.sort {
                    return vec![];
                }
                self.key.sort = sort;
                self.pager.reset();
                self.selection.deselect();
                self.refresh();

                // Each sort mode keeps its own viewport
                if self.mounted {
                    vec![Cmd::RestoreViewport {
                        key: self.snapshot_key(),
                    }]
                } else {
                    vec![]
                }
            }

            FeedMsg::NextPage => {
                if self.key.kind.is_client_paged() && self.pager.next_page(self.total()) {
                    self.selection.deselect();
                    self.resolve_rows();
                }
                vec![]
            }

            FeedMsg::PreviousPage => {
                if self.key.kind.is_client_paged() && self.pager.previous_page() {
                    self.selection.deselect();
                    self.resolve_rows();
                }
                vec![]
            }

            FeedMsg::ScrollUp => {
                self.selection.scroll_up(self.rows().len());
                vec![]
            }

            FeedMsg::ScrollDown => {
                if self.selection.scroll_down(self.rows.len()) {
                    self.request_more_if_near_end()
                } else {
                    vec![]
                }
            }

            FeedMsg::ScrollToTop => {
                self.selection.select_first(self.rows().len());
                vec![]
            }

            FeedMsg::ScrollToBottom => {
                if self.selection.select_last(self.rows.len()) {
                    self.request_more_if_near_end()
                } else {
                    vec![]
                }
            }

            FeedMsg::Select(index) => {
                self.selection.select(index, self.rows().len());
                vec![]
            }

            FeedMsg::Deselect => {
                self.selection.deselect();
                vec![]
            }
        }
    }

    fn apply_source(&mut self, snapshot: SourceSnapshot) -> Vec<Cmd> {
        let SourceSnapshot {
            items,
            votes,
            hidden,
            targets,
            has_more,
            error,
            latest_known_id,
        } = snapshot;

        self.items = items.into_iter().collect();
        self.targets = targets.into_iter().collect();
        self.votes = votes;
        self.hidden = hidden.into_iter().collect();

        let mut cmds = vec![];

        if let Some(error) = &error {
            if self.logged_errors.insert(error.log_key()) {
                cmds.push(Cmd::LogError {
                    message: error.to_string(),
                });
            }
        }

        self.stream
            .apply(self.items.len(), has_more, error, latest_known_id);
        self.refresh();

        if self.subject.is_author() {
            if let Some(id) = self
                .redirect
                .check(self.subject.context(), self.stream.latest_known_id())
            {
                cmds.push(Cmd::NavigateTo { id });
            }
        }

        cmds
    }

    fn raw(&self) -> RawFeed<'_> {
        RawFeed {
            items: &self.items,
            targets: &self.targets,
            votes: &self.votes,
            hidden: &self.hidden,
        }
    }

    /// Ids rendered right now: the current page, or everything when streaming
    fn visible_ids(&self) -> &[EventId] {
        if self.key.kind.is_client_paged() {
            self.pager.visible_slice(&self.ids)
        } else {
            &self.ids
        }
    }

    fn resolve_rows(&mut self) {
        self.rows = resolve(self.raw(), self.visible_ids());
        self.selection.clamp(self.rows.len());
    }

    /// Recompute the projection and everything derived from it
    fn refresh(&mut self) {
        self.ids = project_ids(self.raw(), self.key);
        log::debug!(
            "Projected {} of {} items for {} ({}, {})",
            self.ids.len(),
            self.items.len(),
            self.subject,
            self.key.kind,
            self.key.sort
        );

        self.pager.clamp(self.ids.len());
        self.resolve_rows();
        self.error_gate.evaluate(self.stream.error(), self.ids.len());
    }

    fn save_viewport(&self, snapshot: ViewportSnapshot) -> Vec<Cmd> {
        if !self.mounted {
            log::debug!("Ignoring scroll for unmounted feed {}", self.subject);
            return vec![];
        }
        if snapshot.is_degenerate() {
            return vec![];
        }
        vec![Cmd::SaveSnapshot {
            key: self.snapshot_key(),
            snapshot,
        }]
    }

    /// One `LoadMore` per end-of-range notification on a streaming feed
    fn request_more(&mut self) -> Vec<Cmd> {
        if !self.mounted || self.key.kind.is_client_paged() || !self.stream.has_more() {
            return vec![];
        }
        self.stream.start_loading_more(self.items.len());
        vec![Cmd::LoadMore]
    }

    fn request_more_if_near_end(&mut self) -> Vec<Cmd> {
        if self
            .selection
            .is_near_end(self.rows.len(), self.settings.end_threshold)
        {
            self.request_more()
        } else {
            vec![]
        }
    }
}
