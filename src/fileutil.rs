//! File-system helpers shared by the command paths

use crate::events::EventId;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Maximum byte length of a path carried in a load/dump command.
pub const MAX_PATH_LEN: usize = 64;

static FILENAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._/-]+$").unwrap());

/// What the file system reports for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    NonExistent,
    File { size: u64 },
    Directory,
}

impl FileState {
    pub fn exists(self) -> bool {
        !matches!(self, FileState::NonExistent)
    }

    pub fn label(self) -> &'static str {
        match self {
            FileState::NonExistent => "nonexistent",
            FileState::File { .. } => "file",
            FileState::Directory => "directory",
        }
    }
}

pub fn state(path: impl AsRef<Path>) -> FileState {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => FileState::Directory,
        Ok(meta) => FileState::File { size: meta.len() },
        Err(_) => FileState::NonExistent,
    }
}

/// Check that a command-supplied filename is plausible before any file
/// system call: non-empty, within the path length bound, and restricted to
/// a conservative path character set. Rejections are logged once.
pub fn verify_filename(filename: &str) -> bool {
    if filename.is_empty() || filename.len() > MAX_PATH_LEN {
        tracing::error!(
            event = EventId::FilenameInvalid.code(),
            "invalid filename length {}",
            filename.len()
        );
        return false;
    }
    if !FILENAME_REGEX.is_match(filename) {
        tracing::error!(
            event = EventId::FilenameInvalid.code(),
            "filename {filename:?} contains invalid characters"
        );
        return false;
    }
    true
}
