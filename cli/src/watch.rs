//! Log directory watching and live tailing.
//!
//! When the active log file grows, the appended tail is parsed for `/who`
//! sightings; recent ones feed the roster builder and a rebuilt snapshot
//! replaces the store.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Duration, Local};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use whoall_core::app_state::AppState;
use whoall_core::context::{WatchSession, parse_log_character};
use whoall_core::log_watcher::{DirectoryEvent, DirectoryWatcher};
use whoall_core::who_log;

/// Attach to the newest log file and start the directory watcher.
pub async fn init_watcher(state: Arc<RwLock<AppState>>) -> Option<JoinHandle<()>> {
    let dir = {
        let s = state.read().await;
        PathBuf::from(&s.config.log_directory)
    };

    if dir.as_os_str().is_empty() {
        println!("No log directory configured (set-directory --path <dir>)");
        return None;
    }
    if !dir.exists() {
        println!("Warning: Log directory {} does not exist", dir.display());
        return None;
    }

    // Auto-attach to the most recently modified character log
    if let Some(newest) = newest_log_file(&dir) {
        let mut s = state.write().await;
        let mut session = WatchSession::new(newest.clone());
        if let Err(e) = session.skip_to_end() {
            tracing::warn!(error = %e, "failed to position tail session");
        }
        s.session = session;
        println!("Tailing {}", newest.display());
    }

    let mut watcher = match DirectoryWatcher::new(&dir) {
        Ok(w) => w,
        Err(e) => {
            println!("Failed to start directory watcher: {e}");
            return None;
        }
    };

    println!("Watching directory: {}", dir.display());

    let watcher_state = Arc::clone(&state);
    let handle = tokio::spawn(async move {
        while let Some(event) = watcher.next_event().await {
            handle_watcher_event(event, Arc::clone(&watcher_state)).await;
        }
    });

    Some(handle)
}

async fn handle_watcher_event(event: DirectoryEvent, state: Arc<RwLock<AppState>>) {
    match event {
        DirectoryEvent::Modified(path) => {
            let is_active = {
                let s = state.read().await;
                s.session.active_file.as_deref() == Some(path.as_path())
            };
            if is_active {
                tail_active_file(state).await;
            }
        }

        DirectoryEvent::NewFile(path) => {
            if parse_log_character(&path).is_none() {
                return;
            }
            tracing::info!(path = %path.display(), "new log file detected");

            // Attach automatically only if nothing is being tailed yet
            let mut s = state.write().await;
            if s.session.active_file.is_none() {
                s.session = WatchSession::new(path.clone());
                println!("Tailing new log file: {}", path.display());
            }
        }

        DirectoryEvent::FileRemoved(path) => {
            let mut s = state.write().await;
            if s.session.active_file.as_deref() == Some(path.as_path()) {
                tracing::warn!(path = %path.display(), "active log file removed");
                s.session = WatchSession::default();
            }
        }

        DirectoryEvent::Error(err) => {
            tracing::warn!(error = %err, "watcher error");
        }
    }
}

async fn tail_active_file(state: Arc<RwLock<AppState>>) {
    let mut guard = state.write().await;
    let s = &mut *guard;

    let text = match s.session.drain_appended() {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "tail read failed");
            return;
        }
    };
    if text.is_empty() {
        return;
    }

    let now = Local::now().naive_local();
    let window = Duration::minutes(s.config.active_window_mins);
    let cutoff = now - window;

    let mut applied = 0usize;
    for entry in who_log::parse_text(&text) {
        // Stale lines can show up when a client flushes old buffers
        if entry.timestamp < cutoff {
            continue;
        }
        s.builder.apply(entry);
        applied += 1;
    }

    if applied > 0 {
        let snapshot = s.builder.snapshot(now, window);
        tracing::debug!(applied, active = snapshot.len(), "roster updated from tail");
        s.store.replace(snapshot);
    }
}

/// Most recently modified `eqlog_*.txt` in the directory, if any.
fn newest_log_file(dir: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;

    entries
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if parse_log_character(&path).is_none() {
                return None;
            }
            if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                return None;
            }
            let modified = path.metadata().ok()?.modified().ok()?;
            Some((modified, path))
        })
        .max_by_key(|(modified, _)| *modified)
        .map(|(_, path)| path)
}
