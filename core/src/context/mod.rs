mod app_config;
mod watch_session;

pub use app_config::AppConfig;
pub use watch_session::{WatchSession, parse_log_character, resolve_log_path};
