// Integration tests for the feed controller
// Drives FeedController through mount / data / scroll / navigation events
// against in-memory collaborators

use nostr_sdk::prelude::*;
use pretty_assertions::assert_eq;
use profile_feed::{
    core::state::{ErrorVisibility, FeedSettings, Footer},
    domain::{
        error::FeedError,
        item::{FeedItem, Vote, VoteSign},
        snapshot::{
            SharedSnapshotStore, SnapshotKey, SnapshotStore, ViewportSnapshot, VisibleRange,
        },
        subject::{FeedSubject, NavigationContext},
    },
    update, Cmd, FeedController, FeedKind, FeedMsg, FeedSource, Navigator, SortMode,
    ViewportSurface,
};

#[derive(Default)]
struct FakeSource {
    items: Vec<FeedItem>,
    votes: Vec<Vote>,
    hidden: Vec<EventId>,
    targets: Vec<FeedItem>,
    has_more: bool,
    error: Option<FeedError>,
    latest: Option<EventId>,
    load_calls: usize,
}

impl FeedSource for FakeSource {
    fn items(&self) -> &[FeedItem] {
        &self.items
    }

    fn has_more(&self) -> bool {
        self.has_more
    }

    fn load_more(&mut self) {
        self.load_calls += 1;
    }

    fn error(&self) -> Option<&FeedError> {
        self.error.as_ref()
    }

    fn votes(&self) -> &[Vote] {
        &self.votes
    }

    fn hidden(&self) -> &[EventId] {
        &self.hidden
    }

    fn targets(&self) -> &[FeedItem] {
        &self.targets
    }

    fn latest_known_id(&self) -> Option<EventId> {
        self.latest
    }
}

#[derive(Default)]
struct FakeSurface {
    viewport: Option<ViewportSnapshot>,
    restored: Vec<ViewportSnapshot>,
    initial_offsets: Vec<u64>,
}

impl ViewportSurface for FakeSurface {
    fn viewport_snapshot(&self) -> Option<ViewportSnapshot> {
        self.viewport
    }

    fn restore_from(&mut self, snapshot: &ViewportSnapshot) {
        self.restored.push(*snapshot);
    }

    fn set_initial_scroll_offset(&mut self, offset: u64) {
        self.initial_offsets.push(offset);
    }
}

#[derive(Default)]
struct FakeNavigator {
    redirects: Vec<EventId>,
}

impl Navigator for FakeNavigator {
    fn navigate_to(&mut self, id: EventId) {
        self.redirects.push(id);
    }
}

type Controller = FeedController<FakeSource, FakeSurface, FakeNavigator>;

fn id(n: u8) -> EventId {
    EventId::from_byte_array([n; 32])
}

fn author() -> PublicKey {
    PublicKey::from_hex("4d39c23b3b03bf99494df5f3a149c7908ae1bc7416807fdd6b34a31886eaae25")
        .unwrap()
}

fn post(n: u8, created_at: u64) -> FeedItem {
    FeedItem {
        id: id(n),
        parent_id: None,
        created_at: Timestamp::from(created_at),
        author: author(),
        content: format!("post {n}"),
    }
}

fn reply(n: u8, parent: u8, created_at: u64) -> FeedItem {
    FeedItem {
        parent_id: Some(id(parent)),
        content: format!("reply {n}"),
        ..post(n, created_at)
    }
}

fn viewport(start: usize, end: usize, offset: u64) -> ViewportSnapshot {
    ViewportSnapshot::new(VisibleRange::new(start, end), offset)
}

fn controller(
    subject: FeedSubject,
    kind: Option<&str>,
    sort: Option<&str>,
    store: &SharedSnapshotStore,
    source: FakeSource,
) -> Controller {
    FeedController::new(
        NavigationContext::from_params(subject, kind, sort),
        FeedSettings::default(),
        SharedSnapshotStore::clone(store),
        source,
        FakeSurface::default(),
        FakeNavigator::default(),
    )
}

fn mixed_items() -> Vec<FeedItem> {
    vec![
        post(1, 10),
        reply(2, 1, 20),
        post(3, 30),
        reply(4, 3, 40),
        post(5, 50),
        post(6, 60),
        reply(7, 6, 70),
        post(8, 80),
    ]
}

#[test]
fn test_replies_feed_newest_first() {
    let store = SnapshotStore::shared();
    let source = FakeSource {
        items: mixed_items(),
        ..Default::default()
    };
    let mut feed = controller(
        FeedSubject::LocalAccount,
        Some("replies"),
        Some("new"),
        &store,
        source,
    );
    feed.mount();

    let ids: Vec<EventId> = feed.view().rows.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![id(7), id(4), id(2)]);
    assert_eq!(feed.view().footer, Footer::None);
}

#[test]
fn test_confirmed_empty_feed_shows_nothing_found() {
    let store = SnapshotStore::shared();
    let mut feed = controller(
        FeedSubject::LocalAccount,
        None,
        None,
        &store,
        FakeSource::default(),
    );
    feed.mount();

    let view = feed.view();
    assert_eq!(view.footer, Footer::NothingFound);
    assert_eq!(view.error, None);
    assert_eq!(feed.state().error_visibility(), ErrorVisibility::Hidden);
}

#[test]
fn test_error_shown_until_first_item_arrives() {
    let store = SnapshotStore::shared();
    let error = FeedError::Network("connection refused".into());
    let source = FakeSource {
        error: Some(error.clone()),
        ..Default::default()
    };
    let mut feed = controller(FeedSubject::LocalAccount, None, None, &store, source);
    feed.mount();

    assert_eq!(feed.state().error_visibility(), ErrorVisibility::Shown);
    assert_eq!(feed.view().error, Some(&error));

    // Still failing and still empty
    feed.sync();
    assert_eq!(feed.state().error_visibility(), ErrorVisibility::Shown);

    // Data arrives while the error is still reported
    feed.source_mut().items.push(post(1, 10));
    feed.sync();

    assert_eq!(feed.state().error_visibility(), ErrorVisibility::Hidden);
    assert_eq!(feed.view().error, None);
    assert_eq!(feed.state().source_error(), Some(&error));
    assert_eq!(feed.view().rows.len(), 1);
}

#[test]
fn test_author_feed_redirects_once() {
    let store = SnapshotStore::shared();
    let source = FakeSource {
        items: vec![post(1, 10)],
        latest: Some(id(9)),
        ..Default::default()
    };
    let subject = FeedSubject::author_in_context(author(), id(1));
    let mut feed = controller(subject, None, None, &store, source);
    feed.mount();

    assert_eq!(feed.navigator().redirects, vec![id(9)]);

    // Re-renders with the same divergence do not redirect again
    feed.sync();
    feed.sync();
    assert_eq!(feed.navigator().redirects, vec![id(9)]);

    // A new divergence does
    feed.source_mut().latest = Some(id(10));
    feed.sync();
    assert_eq!(feed.navigator().redirects, vec![id(9), id(10)]);
}

#[test]
fn test_author_feed_without_context_never_redirects() {
    let store = SnapshotStore::shared();
    let source = FakeSource {
        items: vec![post(1, 10)],
        latest: Some(id(9)),
        ..Default::default()
    };
    let mut feed = controller(FeedSubject::author(author()), None, None, &store, source);
    feed.mount();
    feed.sync();

    assert!(feed.navigator().redirects.is_empty());
}

#[test]
fn test_viewport_restored_after_remount() {
    let store = SnapshotStore::shared();
    let source = FakeSource {
        items: mixed_items(),
        ..Default::default()
    };
    let mut feed = controller(FeedSubject::LocalAccount, None, None, &store, source);
    feed.mount();
    assert_eq!(feed.surface().initial_offsets, vec![0]);
    assert!(feed.surface().restored.is_empty());

    feed.surface_mut().viewport = Some(viewport(2, 6, 240));
    feed.on_scroll();
    feed.unmount();

    let source = FakeSource {
        items: mixed_items(),
        ..Default::default()
    };
    let mut feed = controller(FeedSubject::LocalAccount, None, None, &store, source);
    feed.mount();

    assert_eq!(feed.surface().restored, vec![viewport(2, 6, 240)]);
    assert_eq!(feed.surface().initial_offsets, vec![240]);
}

#[test]
fn test_degenerate_scroll_keeps_stored_viewport() {
    let store = SnapshotStore::shared();
    let source = FakeSource {
        items: mixed_items(),
        ..Default::default()
    };
    let mut feed = controller(FeedSubject::LocalAccount, None, None, &store, source);
    feed.mount();

    feed.surface_mut().viewport = Some(viewport(1, 4, 60));
    feed.on_scroll();
    feed.surface_mut().viewport = Some(viewport(0, 0, 0));
    feed.on_scroll();

    let key = SnapshotKey::new(FeedSubject::LocalAccount, SortMode::New);
    assert_eq!(store.borrow().load(&key), Some(viewport(1, 4, 60)));
}

#[test]
fn test_unmounted_feed_stops_saving() {
    let store = SnapshotStore::shared();
    let source = FakeSource {
        items: mixed_items(),
        ..Default::default()
    };
    let mut feed = controller(FeedSubject::LocalAccount, None, None, &store, source);
    feed.mount();
    feed.unmount();

    feed.surface_mut().viewport = Some(viewport(1, 4, 60));
    feed.on_scroll();

    assert!(store.borrow().is_empty());
}

#[test]
fn test_late_scroll_from_previous_instance_wins() {
    let store = SnapshotStore::shared();
    let source = || FakeSource {
        items: mixed_items(),
        ..Default::default()
    };

    let mut old = controller(FeedSubject::LocalAccount, None, None, &store, source());
    old.mount();
    let mut new = controller(FeedSubject::LocalAccount, None, None, &store, source());
    new.mount();

    new.surface_mut().viewport = Some(viewport(0, 3, 0));
    new.on_scroll();
    // Last write wins, even from the instance on its way out
    old.surface_mut().viewport = Some(viewport(3, 6, 90));
    old.on_scroll();
    old.unmount();

    let key = SnapshotKey::new(FeedSubject::LocalAccount, SortMode::New);
    assert_eq!(store.borrow().load(&key), Some(viewport(3, 6, 90)));
}

#[test]
fn test_sort_modes_keep_separate_viewports() {
    let store = SnapshotStore::shared();
    let source = FakeSource {
        items: mixed_items(),
        ..Default::default()
    };
    let mut feed = controller(FeedSubject::LocalAccount, None, Some("new"), &store, source);
    feed.mount();

    feed.surface_mut().viewport = Some(viewport(2, 5, 100));
    feed.on_scroll();

    feed.set_sort_mode(SortMode::Old);
    assert_eq!(feed.surface().initial_offsets, vec![0, 0]);
    feed.surface_mut().viewport = Some(viewport(0, 3, 0));
    feed.on_scroll();

    feed.set_sort_mode(SortMode::New);
    assert_eq!(feed.surface().restored, vec![viewport(2, 5, 100)]);
    assert_eq!(store.borrow().len(), 2);
}

#[test]
fn test_stale_viewport_clamped_to_shorter_feed() {
    let store = SnapshotStore::shared();
    let key = SnapshotKey::new(FeedSubject::LocalAccount, SortMode::New);
    store.borrow_mut().save(key.clone(), viewport(10, 14, 500));

    let source = FakeSource {
        items: mixed_items(),
        ..Default::default()
    };
    let mut feed = controller(FeedSubject::LocalAccount, None, None, &store, source);
    feed.mount();

    let restored = feed.surface().restored[0];
    assert_eq!(restored.range, VisibleRange::new(4, 8));
    assert_eq!(restored.scroll_offset, 200);
    // The stored entry itself is untouched
    assert_eq!(store.borrow().load(&key), Some(viewport(10, 14, 500)));
}

#[test]
fn test_reached_end_loads_once_per_notification() {
    let store = SnapshotStore::shared();
    let source = FakeSource {
        items: mixed_items(),
        has_more: true,
        ..Default::default()
    };
    let mut feed = controller(FeedSubject::LocalAccount, None, None, &store, source);
    feed.mount();
    assert_eq!(feed.view().footer, Footer::LoadingMore);

    feed.on_reached_end();
    feed.on_reached_end();
    assert_eq!(feed.source().load_calls, 2);

    // The source ran dry
    feed.source_mut().has_more = false;
    feed.sync();
    feed.on_reached_end();
    assert_eq!(feed.source().load_calls, 2);
    assert_eq!(feed.view().footer, Footer::None);
}

#[test]
fn test_reached_end_ignored_after_unmount() {
    let store = SnapshotStore::shared();
    let source = FakeSource {
        items: mixed_items(),
        has_more: true,
        ..Default::default()
    };
    let mut feed = controller(FeedSubject::LocalAccount, None, None, &store, source);
    feed.mount();
    feed.unmount();
    feed.on_reached_end();

    assert_eq!(feed.source().load_calls, 0);
}

#[test]
fn test_upvoted_feed_pages_on_the_client() {
    let store = SnapshotStore::shared();
    let items: Vec<FeedItem> = (1..=30).map(|n| post(n, u64::from(n))).collect();
    let votes: Vec<Vote> = (1..=25)
        .map(|n| Vote::new(id(n), VoteSign::Up, Timestamp::from(u64::from(n))))
        .chain(
            (26..=30).map(|n| Vote::new(id(n), VoteSign::Down, Timestamp::from(u64::from(n)))),
        )
        .collect();
    let source = FakeSource {
        items,
        votes,
        ..Default::default()
    };
    let mut feed = controller(
        FeedSubject::LocalAccount,
        Some("upvoted"),
        None,
        &store,
        source,
    );
    feed.mount();

    assert_eq!(feed.view().total, 25);
    assert_eq!(feed.view().rows.len(), 10);
    assert_eq!(feed.view().rows[0].id, id(25));

    feed.next_page();
    feed.next_page();
    let page = feed.view().page.unwrap();
    assert_eq!(page.index, 3);
    assert!(!page.has_next);
    assert_eq!(feed.view().rows.len(), 5);

    // Already on the last page
    feed.next_page();
    assert_eq!(feed.view().page.unwrap().index, 3);

    // Scrolling to the end never asks the source for more
    feed.on_reached_end();
    assert_eq!(feed.source().load_calls, 0);

    feed.previous_page();
    assert_eq!(feed.view().page.unwrap().index, 2);
}

#[test]
fn test_upvoted_last_page_has_no_footer_while_source_streams() {
    let store = SnapshotStore::shared();
    let source = FakeSource {
        items: (1..=25).map(|n| post(n, u64::from(n))).collect(),
        votes: (1..=25)
            .map(|n| Vote::new(id(n), VoteSign::Up, Timestamp::from(u64::from(n))))
            .collect(),
        has_more: true,
        ..Default::default()
    };
    let mut feed = controller(
        FeedSubject::LocalAccount,
        Some("upvoted"),
        None,
        &store,
        source,
    );
    feed.mount();
    assert_eq!(feed.view().footer, Footer::LoadingMore);

    feed.next_page();
    feed.next_page();
    let view = feed.view();
    assert_eq!(view.page.unwrap().index, 3);
    assert_eq!(view.rows.len(), 5);
    assert_eq!(view.footer, Footer::None);
}

#[test]
fn test_empty_upvoted_feed_is_nothing_found_while_source_streams() {
    let store = SnapshotStore::shared();
    let source = FakeSource {
        items: mixed_items(),
        has_more: true,
        ..Default::default()
    };
    let mut feed = controller(
        FeedSubject::LocalAccount,
        Some("upvoted"),
        None,
        &store,
        source,
    );
    feed.mount();

    assert_eq!(feed.view().total, 0);
    assert_eq!(feed.view().footer, Footer::NothingFound);
}

#[test]
fn test_upvotes_on_other_authors_count_and_page() {
    let store = SnapshotStore::shared();
    let source = FakeSource {
        items: (1..=5).map(|n| post(n, u64::from(n))).collect(),
        votes: (101..=125)
            .map(|n| Vote::new(id(n), VoteSign::Up, Timestamp::from(u64::from(n))))
            .collect(),
        ..Default::default()
    };
    let mut feed = controller(
        FeedSubject::LocalAccount,
        Some("upvoted"),
        None,
        &store,
        source,
    );
    feed.mount();

    // Targets not fetched yet: the page is there, its rows are pending
    let view = feed.view();
    assert_eq!(view.total, 25);
    assert!(view.rows.is_empty());
    assert_eq!(view.pending, 10);
    assert!(view.page.unwrap().has_next);

    feed.source_mut().targets = (101..=125).map(|n| post(n, u64::from(n))).collect();
    feed.sync();

    let view = feed.view();
    assert_eq!(view.total, 25);
    assert_eq!(view.pending, 0);
    assert_eq!(view.rows[0].id, id(125));

    feed.next_page();
    feed.next_page();
    assert_eq!(feed.view().rows.len(), 5);
    assert_eq!(feed.view().footer, Footer::None);
}

#[test]
fn test_holding_scroll_down_at_tail_loads_once() {
    let store = SnapshotStore::shared();
    let source = FakeSource {
        items: mixed_items(),
        has_more: true,
        ..Default::default()
    };
    let mut feed = controller(FeedSubject::LocalAccount, None, None, &store, source);
    feed.mount();

    feed.dispatch(FeedMsg::ScrollToBottom);
    assert_eq!(feed.source().load_calls, 1);

    for _ in 0..5 {
        feed.dispatch(FeedMsg::ScrollDown);
    }
    assert_eq!(feed.source().load_calls, 1);
    assert_eq!(feed.view().selected, Some(7));
}

#[test]
fn test_dispatch_matches_update_function() {
    let store = SnapshotStore::shared();
    let source = FakeSource {
        items: mixed_items(),
        has_more: true,
        ..Default::default()
    };
    let mut feed = controller(FeedSubject::LocalAccount, None, None, &store, source);
    feed.mount();

    let (expected, commands) = update(FeedMsg::ReachedEnd, feed.state().clone());
    assert_eq!(commands, vec![Cmd::LoadMore]);

    feed.dispatch(FeedMsg::ReachedEnd);
    assert_eq!(feed.source().load_calls, 1);
    assert_eq!(feed.state().is_loading_more(), expected.is_loading_more());
    assert_eq!(feed.state().projected_ids(), expected.projected_ids());
}

#[test]
fn test_hidden_feed_follows_hide_order() {
    let store = SnapshotStore::shared();
    let source = FakeSource {
        items: mixed_items(),
        hidden: vec![id(3), id(8), id(1)],
        ..Default::default()
    };
    let mut feed = controller(
        FeedSubject::LocalAccount,
        Some("hidden"),
        Some("old"),
        &store,
        source,
    );
    feed.mount();

    let ids: Vec<EventId> = feed.view().rows.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![id(1), id(3), id(8)]);
}

#[test]
fn test_switching_feed_kind_reprojects() {
    let store = SnapshotStore::shared();
    let source = FakeSource {
        items: mixed_items(),
        ..Default::default()
    };
    let mut feed = controller(FeedSubject::LocalAccount, None, None, &store, source);
    feed.mount();
    assert_eq!(feed.view().total, 8);

    feed.set_feed_kind(FeedKind::PostsOnly);
    assert_eq!(feed.view().total, 5);
    assert!(feed.view().rows.iter().all(FeedItem::is_post));

    feed.set_feed_kind(FeedKind::RepliesOnly);
    assert_eq!(feed.view().total, 3);
    assert!(feed.view().rows.iter().all(FeedItem::is_reply));
}

#[test]
fn test_partial_feed_keeps_rows_over_error() {
    let store = SnapshotStore::shared();
    let source = FakeSource {
        items: vec![post(1, 10)],
        error: Some(FeedError::Timeout("relay".into())),
        ..Default::default()
    };
    let mut feed = controller(FeedSubject::LocalAccount, None, None, &store, source);
    feed.mount();

    // A partially successful feed keeps showing its rows, not the error
    feed.sync();
    assert_eq!(feed.state().error_visibility(), ErrorVisibility::Hidden);
    assert_eq!(feed.view().rows.len(), 1);
}
