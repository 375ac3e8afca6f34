//! Replays a recorded feed session through a [`FeedController`]
//!
//! A session names the feed's subject and a list of steps: data updates from
//! the source, scrolls, end-of-range notifications, key changes, page moves
//! and remounts. The controller runs against in-memory collaborators and the
//! resulting view is reported after every step.

use std::{fs, io::Write, path::Path};

use color_eyre::eyre::WrapErr;
use nostr_sdk::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        msg::FeedMsg,
        state::{FeedSettings, FeedView, Footer, PageInfo},
    },
    domain::{
        error::FeedError,
        item::{FeedItem, Vote},
        projection::{FeedKind, SortMode},
        snapshot::{SharedSnapshotStore, ViewportSnapshot},
        source::SourceSnapshot,
        subject::{FeedSubject, NavigationContext},
    },
    integration::{FeedController, FeedSource, Navigator, ViewportSurface},
    Result,
};

/// A recorded session
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub subject: FeedSubject,
    #[serde(default)]
    pub kind: Option<FeedKind>,
    #[serde(default)]
    pub sort: Option<SortMode>,
    #[serde(default)]
    pub steps: Vec<ReplayStep>,
}

impl Session {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("reading session {}", path.display()))?;
        json5::from_str(&text).wrap_err_with(|| format!("parsing session {}", path.display()))
    }

    /// Resolve the initial navigation; explicit overrides win over the
    /// session, the session wins over `default_sort`
    pub fn navigation(
        &self,
        kind: Option<FeedKind>,
        sort: Option<SortMode>,
        default_sort: SortMode,
    ) -> NavigationContext {
        NavigationContext {
            subject: self.subject.clone(),
            kind: kind.or(self.kind).unwrap_or_default(),
            sort: sort.or(self.sort).unwrap_or(default_sort),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayStep {
    /// The data source now reports this
    Data(SourceSnapshot),
    /// The surface scrolled to this viewport
    Scroll(ViewportSnapshot),
    ReachedEnd,
    Kind(FeedKind),
    Sort(SortMode),
    NextPage,
    PreviousPage,
    /// Unmount and mount a fresh controller for the same feed
    Remount,
    /// Any other message, delivered as-is
    Msg(FeedMsg),
}

impl ReplayStep {
    fn label(&self) -> &'static str {
        match self {
            Self::Data(_) => "data",
            Self::Scroll(_) => "scroll",
            Self::ReachedEnd => "reached-end",
            Self::Kind(_) => "kind",
            Self::Sort(_) => "sort",
            Self::NextPage => "next-page",
            Self::PreviousPage => "previous-page",
            Self::Remount => "remount",
            Self::Msg(_) => "msg",
        }
    }
}

/// In-memory source fed by `data` steps
#[derive(Debug, Default)]
pub struct ReplaySource {
    current: SourceSnapshot,
    load_requests: usize,
}

impl ReplaySource {
    pub fn set(&mut self, snapshot: SourceSnapshot) {
        self.current = snapshot;
    }

    pub fn load_requests(&self) -> usize {
        self.load_requests
    }
}

impl FeedSource for ReplaySource {
    fn items(&self) -> &[FeedItem] {
        &self.current.items
    }

    fn has_more(&self) -> bool {
        self.current.has_more
    }

    fn load_more(&mut self) {
        self.load_requests += 1;
    }

    fn error(&self) -> Option<&FeedError> {
        self.current.error.as_ref()
    }

    fn votes(&self) -> &[Vote] {
        &self.current.votes
    }

    fn hidden(&self) -> &[EventId] {
        &self.current.hidden
    }

    fn targets(&self) -> &[FeedItem] {
        &self.current.targets
    }

    fn latest_known_id(&self) -> Option<EventId> {
        self.current.latest_known_id
    }
}

/// Surface without rendering; remembers what it was told
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    viewport: Option<ViewportSnapshot>,
    restored: Option<ViewportSnapshot>,
    initial_offset: u64,
}

impl HeadlessSurface {
    pub fn scroll_to(&mut self, snapshot: ViewportSnapshot) {
        self.viewport = Some(snapshot);
    }

    pub fn restored(&self) -> Option<ViewportSnapshot> {
        self.restored
    }
}

impl ViewportSurface for HeadlessSurface {
    fn viewport_snapshot(&self) -> Option<ViewportSnapshot> {
        self.viewport
    }

    fn restore_from(&mut self, snapshot: &ViewportSnapshot) {
        self.restored = Some(*snapshot);
        self.viewport = Some(*snapshot);
    }

    fn set_initial_scroll_offset(&mut self, offset: u64) {
        self.initial_offset = offset;
    }
}

/// Records redirects instead of navigating
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    redirects: Vec<EventId>,
}

impl RecordingNavigator {
    pub fn redirects(&self) -> &[EventId] {
        &self.redirects
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&mut self, id: EventId) {
        self.redirects.push(id);
    }
}

type ReplayController = FeedController<ReplaySource, HeadlessSurface, RecordingNavigator>;

/// What the view looked like after one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub action: &'static str,
    pub kind: FeedKind,
    pub sort: SortMode,
    pub rows: Vec<String>,
    pub total: usize,
    pub pending: usize,
    pub footer: Footer,
    pub error: Option<String>,
    pub page: Option<PageInfo>,
    pub selected: Option<usize>,
    pub load_requests: usize,
    pub redirects: Vec<String>,
    pub restored: Option<ViewportSnapshot>,
}

impl StepReport {
    fn capture(step: usize, action: &'static str, controller: &ReplayController) -> Self {
        let FeedView {
            rows,
            total,
            pending,
            footer,
            error,
            page,
            selected,
        } = controller.view();

        Self {
            step,
            action,
            kind: controller.state().feed_kind(),
            sort: controller.state().sort_mode(),
            rows: rows.iter().map(row_label).collect(),
            total,
            pending,
            footer,
            error: error.map(ToString::to_string),
            page,
            selected,
            load_requests: controller.source().load_requests(),
            redirects: controller
                .navigator()
                .redirects()
                .iter()
                .map(short_id)
                .collect(),
            restored: controller.surface().restored(),
        }
    }

    fn write_text<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(
            out,
            "#{} {} [{}/{}] {} of {} row(s), footer {:?}",
            self.step,
            self.action,
            self.kind,
            self.sort,
            self.rows.len(),
            self.total,
            self.footer
        )?;
        if let Some(page) = &self.page {
            writeln!(
                out,
                "  page {}{}{}",
                page.index,
                if page.has_previous { " <prev" } else { "" },
                if page.has_next { " next>" } else { "" }
            )?;
        }
        if self.pending > 0 {
            writeln!(out, "  {} row(s) not loaded yet", self.pending)?;
        }
        if let Some(error) = &self.error {
            writeln!(out, "  error: {error}")?;
        }
        if let Some(restored) = &self.restored {
            writeln!(
                out,
                "  restored rows {}..{} at offset {}",
                restored.range.start, restored.range.end, restored.scroll_offset
            )?;
        }
        if !self.redirects.is_empty() {
            writeln!(out, "  redirects: {}", self.redirects.join(", "))?;
        }
        for (index, row) in self.rows.iter().enumerate() {
            let marker = if self.selected == Some(index) { '>' } else { ' ' };
            writeln!(out, "  {marker} {row}")?;
        }
        Ok(())
    }
}

fn short_id(id: &EventId) -> String {
    id.to_hex().chars().take(8).collect()
}

fn row_label(item: &FeedItem) -> String {
    let kind = if item.is_reply() { "reply" } else { "post" };
    format!(
        "{} {kind:<5} {} {}",
        short_id(&item.id),
        item.created_at.as_u64(),
        item.content.lines().next().unwrap_or_default()
    )
}

fn new_controller(
    navigation: NavigationContext,
    settings: FeedSettings,
    store: &SharedSnapshotStore,
) -> ReplayController {
    FeedController::new(
        navigation,
        settings,
        SharedSnapshotStore::clone(store),
        ReplaySource::default(),
        HeadlessSurface::default(),
        RecordingNavigator::default(),
    )
}

/// Run every step of `session`, returning one report per step
pub fn run(
    session: &Session,
    navigation: NavigationContext,
    settings: FeedSettings,
    store: &SharedSnapshotStore,
) -> Vec<StepReport> {
    let mut controller = new_controller(navigation.clone(), settings, store);
    controller.mount();

    let mut reports = Vec::with_capacity(session.steps.len());
    for (index, step) in session.steps.iter().enumerate() {
        match step {
            ReplayStep::Data(snapshot) => {
                controller.source_mut().set(snapshot.clone());
                controller.sync();
            }
            ReplayStep::Scroll(snapshot) => {
                controller.surface_mut().scroll_to(*snapshot);
                controller.on_scroll();
            }
            ReplayStep::ReachedEnd => controller.on_reached_end(),
            ReplayStep::Kind(kind) => controller.set_feed_kind(*kind),
            ReplayStep::Sort(sort) => controller.set_sort_mode(*sort),
            ReplayStep::NextPage => controller.next_page(),
            ReplayStep::PreviousPage => controller.previous_page(),
            ReplayStep::Remount => {
                // The data source outlives the view; carry its last report over
                let last = controller.source().current.clone();
                let navigation = NavigationContext {
                    kind: controller.state().feed_kind(),
                    sort: controller.state().sort_mode(),
                    ..navigation.clone()
                };
                controller.unmount();
                controller = new_controller(navigation, settings, store);
                controller.source_mut().set(last);
                controller.mount();
            }
            ReplayStep::Msg(msg) => controller.dispatch(msg.clone()),
        }
        reports.push(StepReport::capture(index + 1, step.label(), &controller));
    }

    reports
}

/// Print reports as text or JSON lines
pub fn write_reports<W: Write>(reports: &[StepReport], json: bool, out: &mut W) -> Result<()> {
    for report in reports {
        if json {
            serde_json::to_writer(&mut *out, report)?;
            writeln!(out)?;
        } else {
            report.write_text(out)?;
        }
    }
    Ok(())
}
