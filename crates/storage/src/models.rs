//! Storage models.

use crate::error::ErrorKind;
use derive_more::Display;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
    /// Sockets, devices and the like; never moved.
    Other,
}

/// One immediate entry of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Last modified timestamp (UTC)
    pub modified: OffsetDateTime,
}
impl Entry {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind, modified: OffsetDateTime) -> Self {
        Self { path: path.into(), kind, modified }
    }

    /// The entry's own name, or `None` if it isn't valid UTF-8.
    pub fn name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Case-insensitive check of the name's ending. `extension` is usually
    /// given with its dot (`".pdf"`), but any suffix works.
    pub fn has_extension(&self, extension: &str) -> bool {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .is_some_and(|name| name.ends_with(&extension.to_lowercase()))
    }
}

/// Why a move did not happen.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Refusal {
    #[display("source no longer exists")]
    SourceMissing,
    #[display("permission denied")]
    PermissionDenied,
    #[display("destination already exists")]
    DestinationExists,
    #[display("source and destination are on different devices")]
    CrossesDevices,
    /// Any other failure confined to the moved path or its destination.
    #[display("{_0}")]
    Io(std::io::ErrorKind),
}
impl Refusal {
    /// The refusal a storage error stands for, or `None` if the error leaves
    /// the whole storage unusable.
    pub fn from_error(kind: &ErrorKind) -> Option<Self> {
        match kind {
            ErrorKind::NotFound(_) => Some(Self::SourceMissing),
            ErrorKind::PermissionDenied(_) => Some(Self::PermissionDenied),
            ErrorKind::AlreadyExists(_) => Some(Self::DestinationExists),
            ErrorKind::CrossesDevices(_) => Some(Self::CrossesDevices),
            ErrorKind::Path(_, kind) => Some(Self::Io(*kind)),
            ErrorKind::Io(_) => None,
        }
    }
}

/// Result of asking a backend to move one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// `None` when the move happened.
    pub refused: Option<Refusal>,
}
impl MoveOutcome {
    pub fn moved(source: impl AsRef<Path>, destination: impl AsRef<Path>) -> Self {
        Self {
            source: source.as_ref().to_path_buf(),
            destination: destination.as_ref().to_path_buf(),
            refused: None,
        }
    }

    pub fn refused(source: impl AsRef<Path>, destination: impl AsRef<Path>, refusal: Refusal) -> Self {
        Self {
            refused: Some(refusal),
            ..Self::moved(source, destination)
        }
    }

    pub fn is_success(&self) -> bool {
        self.refused.is_none()
    }
}
