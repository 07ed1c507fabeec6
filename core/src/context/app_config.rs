use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const CONFIG_APP_NAME: &str = "whoall";

/// Persisted application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory containing the game's `eqlog_*.txt` files.
    pub log_directory: String,
    /// Where the published roster snapshot is fetched from.
    pub snapshot_url: String,
    /// Seconds between automatic snapshot refreshes.
    pub refresh_interval_secs: u64,
    /// How recently a player must have been sighted to appear in a built
    /// snapshot.
    pub active_window_mins: i64,
    /// Override for the snapshot archive location.
    pub archive_directory: Option<PathBuf>,
}

impl ::std::default::Default for AppConfig {
    fn default() -> Self {
        Self {
            log_directory: String::new(),
            snapshot_url:
                "https://raw.githubusercontent.com/crdunwel/whoall-quarm/main/data.json"
                    .to_string(),
            refresh_interval_secs: 60,
            active_window_mins: 10,
            archive_directory: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        confy::load(CONFIG_APP_NAME, None).unwrap_or_default()
    }

    pub fn store(&self) -> Result<(), confy::ConfyError> {
        confy::store(CONFIG_APP_NAME, None, self)
    }

    /// Resolved archive directory: the configured override, or a `whoall`
    /// folder in the platform data dir, or `./data` as a last resort.
    pub fn archive_dir(&self) -> PathBuf {
        if let Some(dir) = &self.archive_directory {
            return dir.clone();
        }
        dirs::data_dir()
            .map(|d| d.join("whoall").join("archive"))
            .unwrap_or_else(|| PathBuf::from("data"))
    }
}
