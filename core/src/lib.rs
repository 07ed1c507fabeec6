pub mod app_state;
pub mod archive;
pub mod context;
pub mod error;
pub mod game_data;
pub mod log_watcher;
pub mod query;
pub mod roster;
pub mod who_log;

// Re-exports for convenience
pub use error::RosterError;
pub use query::QueryEngine;
pub use roster::{PlayerRecord, RosterBuilder, RosterSnapshot, SnapshotStore};
