pub mod builder;
pub mod record;
pub mod snapshot;

pub use builder::RosterBuilder;
pub use record::PlayerRecord;
pub use snapshot::{RosterSnapshot, SnapshotDocument, SnapshotStore};
