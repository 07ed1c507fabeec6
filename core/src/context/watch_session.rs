use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use encoding_rs::WINDOWS_1252;

use super::AppConfig;
use crate::error::RosterError;

/// State for tailing one log file.
///
/// `current_byte` remembers how far into the file the last read got, so a
/// modification event only ever reads the appended tail.
#[derive(Debug, Default)]
pub struct WatchSession {
    pub current_byte: Option<u64>,
    pub active_file: Option<PathBuf>,
    /// Character whose log this is, from the `eqlog_<name>_<server>.txt`
    /// file name.
    pub character: Option<String>,
}

impl WatchSession {
    pub fn new(path: PathBuf) -> Self {
        let character = parse_log_character(&path);
        Self {
            current_byte: None,
            active_file: Some(path),
            character,
        }
    }

    /// Read everything appended since the last call, decoded from the log's
    /// Windows-1252 encoding.
    ///
    /// The first call on a session reads from the start of the file; pass
    /// the file length through [`WatchSession::skip_to_end`] first to tail
    /// only new content.
    pub fn drain_appended(&mut self) -> Result<String, RosterError> {
        let Some(path) = &self.active_file else {
            return Ok(String::new());
        };

        let mut file = File::open(path).map_err(|e| RosterError::io(path, e))?;
        let len = file
            .metadata()
            .map_err(|e| RosterError::io(path, e))?
            .len();

        let mut start = self.current_byte.unwrap_or(0);
        if start > len {
            // Log was truncated or replaced; start over.
            start = 0;
        }

        file.seek(SeekFrom::Start(start))
            .map_err(|e| RosterError::io(path, e))?;
        let mut raw = Vec::with_capacity((len - start) as usize);
        file.read_to_end(&mut raw)
            .map_err(|e| RosterError::io(path, e))?;
        self.current_byte = Some(len);

        let (text, _, _) = WINDOWS_1252.decode(&raw);
        Ok(text.into_owned())
    }

    /// Position the session at the current end of the file without reading.
    pub fn skip_to_end(&mut self) -> Result<(), RosterError> {
        let Some(path) = &self.active_file else {
            return Ok(());
        };
        let len = std::fs::metadata(path)
            .map_err(|e| RosterError::io(path, e))?
            .len();
        self.current_byte = Some(len);
        Ok(())
    }
}

/// Extract the character name from an `eqlog_<name>_<server>.txt` file name.
pub fn parse_log_character(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let rest = stem.strip_prefix("eqlog_")?;
    let (character, _server) = rest.split_once('_')?;
    if character.is_empty() {
        return None;
    }
    Some(character.to_string())
}

/// Resolve a log file path, joining with log_directory if relative.
pub fn resolve_log_path(config: &AppConfig, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        Path::new(&config.log_directory).join(path)
    }
}
