//! # Application State Module / 应用状态模块
//!
//! `AppState` is the single owner of everything the viewer mutates: the
//! forest, the search query, the selection, the playlist and the status of the
//! data source. Every operation goes through it, and every visible change is
//! published as a [`ViewEvent`] so a presentation layer can subscribe instead
//! of being called from inside the data operations.
//!
//! `AppState` 是查看器所有可变内容的唯一所有者：森林、搜索查询、选择、播放列表以及数据源状态。
//! 每个操作都经过它，每个可见的变化都作为 [`ViewEvent`] 发布，表现层可以订阅这些事件。

use std::borrow::Cow;

use tokio::sync::broadcast;

use crate::core::filter;
use crate::core::import::{self, ImportError, XraySource};
use crate::core::models::{Node, NodeDetails};
use crate::core::playlist::{self, Advance, PlaybackState, Playlist, PlaylistStatus};
use crate::core::tree::Catalog;

const EVENT_CAPACITY: usize = 64;

/// Where the current forest came from, or why the last load did not replace it.
///
/// 当前森林的来源，或上次加载未替换它的原因。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStatus {
    /// The built-in catalog.
    Seed,
    /// Loaded from a local export file.
    LocalFile(String),
    /// Loaded through remote discovery from the described location.
    Remote(String),
    /// Remote discovery found nothing at the described location; the tree was kept.
    RemoteEmpty(String),
    /// A local export could not be parsed; the tree was kept.
    ParseError(String),
    /// A local export could not be read; the tree was kept.
    ReadError(String),
}

impl SourceStatus {
    /// `true` for the statuses reporting a failed load.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            SourceStatus::RemoteEmpty(_) | SourceStatus::ParseError(_) | SourceStatus::ReadError(_)
        )
    }
}

/// Changes published to subscribers of [`AppState::subscribe`].
/// 发布给 [`AppState::subscribe`] 订阅者的变更。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// The view-tree must be re-rendered for `query`.
    TreeChanged { query: String },
    /// A node was selected; `path` lists the ids from the root to the node.
    Selected { id: String, path: Vec<String> },
    /// The selection no longer refers to anything.
    SelectionCleared,
    /// The playlist position display must be refreshed.
    PlaylistPosition(PlaylistStatus),
    /// The source status line changed.
    SourceChanged(SourceStatus),
}

/// The viewer's application state and controller.
/// 查看器的应用状态与控制器。
#[derive(Debug)]
pub struct AppState {
    catalog: Catalog,
    query: String,
    selection: Option<String>,
    playlist: Playlist,
    source: SourceStatus,
    events: broadcast::Sender<ViewEvent>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Catalog::seed(), playlist::DEFAULT_MAX_SKIPS_PER_TICK)
    }
}

impl AppState {
    pub fn new(catalog: Catalog, max_skips_per_tick: usize) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            catalog,
            query: String::new(),
            selection: None,
            playlist: Playlist::new(max_skips_per_tick),
            source: SourceStatus::Seed,
            events,
        }
    }

    /// Subscribes to view events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.events.subscribe()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn source_status(&self) -> &SourceStatus {
        &self.source
    }

    /// The currently selected node, if the selection still exists in the forest.
    pub fn selection(&self) -> Option<&Node> {
        self.selection
            .as_deref()
            .and_then(|id| self.catalog.find_exact(id))
    }

    /// Details-panel data for the current selection.
    pub fn selection_details(&self) -> Option<NodeDetails> {
        let node = self.selection()?;
        Some(NodeDetails::new(node, path_ids(&self.catalog, &node.id)))
    }

    /// Sets the search query and asks subscribers to re-render.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.publish(ViewEvent::TreeChanged {
            query: self.query.clone(),
        });
    }

    /// The view-tree for the current query.
    pub fn view(&self) -> Cow<'_, [Node]> {
        filter::filter(self.catalog.nodes(), &self.query)
    }

    /// Resolves `token` and selects the node it names. Returns `false`, leaving
    /// the selection untouched, when nothing matches.
    ///
    /// 解析 `token` 并选择它指向的节点。无匹配时返回 `false` 且不改变当前选择。
    pub fn select(&mut self, token: &str) -> bool {
        select_in(&self.catalog, &mut self.selection, &self.events, token)
    }

    /// Substitutes the forest. The query is reset, the selection is cleared and
    /// the playlist position display is refreshed; the playlist tokens are kept.
    ///
    /// 替换森林。查询被重置，选择被清除，播放列表位置显示被刷新；播放列表标记保持不变。
    pub fn replace_catalog(&mut self, nodes: Vec<Node>, source: SourceStatus) {
        self.catalog.replace(nodes);
        self.query.clear();
        self.selection = None;
        self.set_source(source);
        self.publish(ViewEvent::TreeChanged {
            query: String::new(),
        });
        self.publish(ViewEvent::SelectionCleared);
        self.publish(ViewEvent::PlaylistPosition(self.playlist.status()));
    }

    /// Ingests a local export. A parse failure only updates the status line.
    pub fn import_local_text(&mut self, origin: &str, json_text: &str) -> bool {
        match import::ingest_local_text(json_text) {
            Ok(nodes) => {
                self.replace_catalog(nodes, SourceStatus::LocalFile(origin.to_string()));
                true
            }
            Err(e) => {
                self.report_import_error(origin, &e);
                false
            }
        }
    }

    /// Records a failed local import without touching the tree.
    pub fn report_import_error(&mut self, origin: &str, error: &ImportError) {
        tracing::warn!(origin, error = %error, "export import failed");
        let status = match error {
            ImportError::Read { .. } => SourceStatus::ReadError(origin.to_string()),
            ImportError::Parse(_) | ImportError::Null => SourceStatus::ParseError(origin.to_string()),
        };
        self.set_source(status);
    }

    /// Runs remote discovery and replaces the forest when it yields data.
    pub async fn import_remote(&mut self, source: &dyn XraySource) -> bool {
        let location = source.describe();
        match import::fetch_remote(source).await {
            Some(nodes) => {
                self.replace_catalog(nodes, SourceStatus::Remote(location));
                true
            }
            None => {
                self.set_source(SourceStatus::RemoteEmpty(location));
                false
            }
        }
    }

    /// Replaces the playlist tokens from raw, delimiter-tolerant input.
    pub fn load_playlist(&mut self, raw: &str) {
        self.playlist.set_tokens(playlist::parse_tokens(raw));
        self.publish_position();
    }

    /// Starts playback at `start_index` over the loaded tokens.
    pub fn start_playlist(&mut self, start_index: usize) -> Option<Advance> {
        let tokens = self.playlist.tokens().to_vec();
        let outcome = self.playlist.start(tokens, start_index, |token| {
            select_in(&self.catalog, &mut self.selection, &self.events, token)
        });
        self.publish_position();
        outcome
    }

    /// One timer tick. Does nothing unless the timer is armed.
    pub fn tick_playlist(&mut self) -> Option<Advance> {
        if !self.playlist.is_timer_armed() {
            return None;
        }
        let outcome = self.playlist.advance(|token| {
            select_in(&self.catalog, &mut self.selection, &self.events, token)
        });
        self.publish_position();
        Some(outcome)
    }

    /// Steps the playlist back by one token.
    pub fn previous_in_playlist(&mut self) -> Option<bool> {
        let selected = self.playlist.previous(|token| {
            select_in(&self.catalog, &mut self.selection, &self.events, token)
        });
        if selected == Some(true) {
            self.publish_position();
        }
        selected
    }

    pub fn stop_playlist(&mut self) {
        self.playlist.stop();
    }

    pub fn playlist_state(&self) -> PlaybackState {
        self.playlist.state()
    }

    pub fn playlist_status(&self) -> PlaylistStatus {
        self.playlist.status()
    }

    fn set_source(&mut self, source: SourceStatus) {
        self.source = source;
        self.publish(ViewEvent::SourceChanged(self.source.clone()));
    }

    fn publish_position(&self) {
        self.publish(ViewEvent::PlaylistPosition(self.playlist.status()));
    }

    fn publish(&self, event: ViewEvent) {
        // Sending only fails when nobody is subscribed.
        let _ = self.events.send(event);
    }
}

fn select_in(
    catalog: &Catalog,
    selection: &mut Option<String>,
    events: &broadcast::Sender<ViewEvent>,
    token: &str,
) -> bool {
    let Some(node) = catalog.resolve(token) else {
        return false;
    };
    let id = node.id.clone();
    let path = path_ids(catalog, &id);
    *selection = Some(id.clone());
    let _ = events.send(ViewEvent::Selected { id, path });
    true
}

fn path_ids(catalog: &Catalog, id: &str) -> Vec<String> {
    catalog
        .path_to(id)
        .map(|path| path.into_iter().map(|node| node.id.clone()).collect())
        .unwrap_or_default()
}
