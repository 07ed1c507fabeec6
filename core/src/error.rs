use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the roster core.
///
/// The query engine itself has no failure modes; these cover the boundaries
/// around it (disk, watcher, wire format).
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed snapshot document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unknown snapshot '{0}'")]
    UnknownSnapshot(String),

    #[error("failed to watch {path}: {source}")]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}

impl RosterError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
