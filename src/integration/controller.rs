use crate::{
    core::{
        cmd::Cmd,
        msg::FeedMsg,
        state::{FeedSettings, FeedState, FeedView},
        update::update,
    },
    domain::{
        projection::{FeedKind, SortMode},
        snapshot::SharedSnapshotStore,
        subject::NavigationContext,
    },
    integration::collaborators::{FeedSource, Navigator, ViewportSurface},
};

/// Composition root for one feed instance
///
/// Wires the feed reducer to its collaborators: the data source, the
/// virtualization surface, the navigation layer and the shared snapshot store.
/// Every public method corresponds to one event from the UI loop; each
/// dispatches a [`FeedMsg`] and executes the resulting commands in order.
pub struct FeedController<S, V, N> {
    state: FeedState,
    store: SharedSnapshotStore,
    source: S,
    surface: V,
    navigator: N,
}

impl<S, V, N> FeedController<S, V, N>
where
    S: FeedSource,
    V: ViewportSurface,
    N: Navigator,
{
    pub fn new(
        navigation: NavigationContext,
        settings: FeedSettings,
        store: SharedSnapshotStore,
        source: S,
        surface: V,
        navigator: N,
    ) -> Self {
        Self {
            state: FeedState::new(navigation, settings),
            store,
            source,
            surface,
            navigator,
        }
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn view(&self) -> FeedView<'_> {
        self.state.view()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut V {
        &mut self.surface
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Read the source, then restore the stored viewport for this feed
    pub fn mount(&mut self) {
        self.sync();
        self.dispatch(FeedMsg::Mounted);
    }

    /// Stop persisting viewport state; in-flight loads are left alone
    pub fn unmount(&mut self) {
        self.dispatch(FeedMsg::Unmounted);
    }

    /// The data source changed (items, error or end-of-data)
    pub fn sync(&mut self) {
        let snapshot = self.source.snapshot();
        self.dispatch(FeedMsg::SourceChanged(snapshot));
    }

    /// The surface scrolled; persist its viewport
    pub fn on_scroll(&mut self) {
        if let Some(snapshot) = self.surface.viewport_snapshot() {
            self.dispatch(FeedMsg::Scrolled(snapshot));
        }
    }

    /// The surface rendered near the tail of the rows
    pub fn on_reached_end(&mut self) {
        self.dispatch(FeedMsg::ReachedEnd);
    }

    pub fn set_feed_kind(&mut self, kind: FeedKind) {
        self.dispatch(FeedMsg::SetFeedKind(kind));
    }

    pub fn set_sort_mode(&mut self, sort: SortMode) {
        self.dispatch(FeedMsg::SetSortMode(sort));
    }

    pub fn next_page(&mut self) {
        self.dispatch(FeedMsg::NextPage);
    }

    pub fn previous_page(&mut self) {
        self.dispatch(FeedMsg::PreviousPage);
    }

    pub fn dispatch(&mut self, msg: FeedMsg) {
        let (state, commands) = update(msg, self.state.clone());
        self.state = state;

        for cmd in commands {
            self.execute(cmd);
        }
    }

    fn execute(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::LoadMore => {
                log::debug!("Loading more for {}", self.state.subject());
                self.source.load_more();
            }

            Cmd::SaveSnapshot { key, snapshot } => {
                self.store.borrow_mut().save(key, snapshot);
            }

            Cmd::RestoreViewport { key } => {
                let stored = self.store.borrow().load(&key);
                match stored {
                    Some(snapshot) => {
                        let snapshot = crate::trace_dbg!(
                            target: module_path!(),
                            level: tracing::Level::DEBUG,
                            snapshot.clamped(self.state.rows().len())
                        );
                        self.surface.set_initial_scroll_offset(snapshot.scroll_offset);
                        self.surface.restore_from(&snapshot);
                    }
                    None => self.surface.set_initial_scroll_offset(0),
                }
            }

            Cmd::NavigateTo { id } => {
                log::info!(
                    "Redirecting {} to latest item {}",
                    self.state.subject(),
                    id.to_hex()
                );
                self.navigator.navigate_to(id);
            }

            Cmd::LogError { message } => {
                log::warn!("Feed {}: {message}", self.state.subject());
            }
        }
    }
}
