//! Periodic snapshot refresh.
//!
//! A background task fetches the published roster document on a fixed
//! cadence and replaces the snapshot store wholesale. A failed fetch is
//! logged and skipped; the current snapshot stays in place until a fetch
//! succeeds.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use whoall_core::app_state::AppState;
use whoall_core::roster::{RosterSnapshot, SnapshotDocument};

const USER_AGENT: &str = "whoall v0.1.0";

pub async fn spawn(state: Arc<RwLock<AppState>>) -> JoinHandle<()> {
    let (url, interval_secs) = {
        let s = state.read().await;
        (
            s.config.snapshot_url.clone(),
            s.config.refresh_interval_secs,
        )
    };

    tokio::spawn(async move {
        let client = reqwest::Client::new();
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));

        // First tick fires immediately, so the console has data at startup.
        loop {
            interval.tick().await;
            match fetch_snapshot(&client, &url).await {
                Ok(snapshot) => {
                    let records = snapshot.len();
                    state.write().await.store.replace(snapshot);
                    tracing::info!(records, "snapshot refreshed");
                }
                Err(e) => {
                    tracing::warn!(error = %e, url, "snapshot refresh failed");
                }
            }
        }
    })
}

/// Fetch and decode one snapshot document.
pub async fn fetch_snapshot(
    client: &reqwest::Client,
    url: &str,
) -> Result<RosterSnapshot, String> {
    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .timeout(Duration::from_secs(30))
        .send()
        .await
        .map_err(|e| format!("fetch failed: {e}"))?;

    let document: SnapshotDocument = response
        .json()
        .await
        .map_err(|e| format!("malformed snapshot document: {e}"))?;

    Ok(document.into_snapshot())
}
