pub mod formatting;
mod query;

pub use query::{FilterSpec, LevelRange, SortColumn, SortDirection, SortSpec};
