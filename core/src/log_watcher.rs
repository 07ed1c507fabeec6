//! Log directory watching.
//!
//! Bridges notify's callback API onto an async channel so front ends can
//! poll with `next_event().await` from a tokio task.

use std::path::{Path, PathBuf};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::error::RosterError;

#[derive(Debug)]
pub enum DirectoryEvent {
    /// A write touched an existing file (for log files: bytes appended).
    Modified(PathBuf),
    NewFile(PathBuf),
    FileRemoved(PathBuf),
    Error(String),
}

pub struct DirectoryWatcher {
    // Held only for its Drop: dropping stops the notify backend.
    _watcher: RecommendedWatcher,
    rx: mpsc::UnboundedReceiver<DirectoryEvent>,
}

impl DirectoryWatcher {
    pub fn new(dir: &Path) -> Result<Self, RosterError> {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut watcher =
            notify::recommended_watcher(move |result: Result<Event, notify::Error>| match result {
                Ok(event) => {
                    for event in translate(event) {
                        let _ = tx.send(event);
                    }
                }
                Err(e) => {
                    let _ = tx.send(DirectoryEvent::Error(e.to_string()));
                }
            })
            .map_err(|source| RosterError::Watch {
                path: dir.to_path_buf(),
                source,
            })?;

        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|source| RosterError::Watch {
                path: dir.to_path_buf(),
                source,
            })?;

        tracing::info!(dir = %dir.display(), "watching log directory");

        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    /// Next filesystem event, or `None` once the watcher backend shuts down.
    pub async fn next_event(&mut self) -> Option<DirectoryEvent> {
        self.rx.recv().await
    }
}

fn translate(event: Event) -> Vec<DirectoryEvent> {
    let make: fn(PathBuf) -> DirectoryEvent = match event.kind {
        EventKind::Create(_) => DirectoryEvent::NewFile,
        EventKind::Modify(_) => DirectoryEvent::Modified,
        EventKind::Remove(_) => DirectoryEvent::FileRemoved,
        _ => return Vec::new(),
    };
    event.paths.into_iter().map(make).collect()
}
