use std::path::{Path, PathBuf};

use tokio::task::JoinHandle;

use crate::archive::SnapshotArchive;
use crate::context::{AppConfig, WatchSession, resolve_log_path};
use crate::query::QueryEngine;
use crate::roster::{PlayerRecord, RosterBuilder, SnapshotStore};

/// Shared application state for front ends.
///
/// The store is owned here and only ever replaced wholesale; the engine and
/// the last result set carry the query-side state (active sort, rows the
/// next sort toggle operates on).
#[derive(Default)]
pub struct AppState {
    pub config: AppConfig,
    pub store: SnapshotStore,
    pub engine: QueryEngine,
    pub builder: RosterBuilder,
    pub session: WatchSession,
    /// Most recent search results; sort toggles re-order these.
    pub results: Vec<PlayerRecord>,
    pub watcher_task: Option<JoinHandle<()>>,
    pub refresh_task: Option<JoinHandle<()>>,
}

impl AppState {
    pub fn new() -> Self {
        let config = AppConfig::load();
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn archive(&self) -> SnapshotArchive {
        SnapshotArchive::new(self.config.archive_dir())
    }

    /// Point the tail session at a log file, resolving relative paths
    /// against the configured log directory.
    pub fn set_active_file(&mut self, path: &str) -> PathBuf {
        let resolved = resolve_log_path(&self.config, Path::new(path));
        self.session = WatchSession::new(resolved.clone());
        resolved
    }
}
