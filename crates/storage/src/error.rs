//! Storage Error Types
//!
//! Structured errors using `exn` for automatic location tracking. Every
//! variant but [`ErrorKind::Io`] concerns a single path; the move helper
//! [`StorageBackend::relocate`](crate::StorageBackend::relocate) reports those
//! as a [`Refusal`](crate::Refusal) instead of an error.

use derive_more::{Display, Error};
use std::io::{Error as IoError, ErrorKind as IoErrorKind};
use std::path::PathBuf;

/// A storage error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// File or directory does not exist
    #[display("not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// Access denied
    #[display("permission denied: {}", _0.display())]
    PermissionDenied(#[error(not(source))] PathBuf),
    /// Destination already exists; moves never overwrite
    #[display("already exists: {}", _0.display())]
    AlreadyExists(#[error(not(source))] PathBuf),
    /// Source and destination are on different volumes
    #[display("cannot move across devices: {}", _0.display())]
    CrossesDevices(#[error(not(source))] PathBuf),
    /// Any other failure confined to one path (not a directory, read-only
    /// filesystem, disk full, ...)
    #[display("{_1}: {}", _0.display())]
    Path(#[error(not(source))] PathBuf, IoErrorKind),
    /// Underlying I/O error that leaves the storage unusable
    #[display("I/O error: {_0}")]
    Io(IoError),
}
impl From<IoError> for ErrorKind {
    fn from(err: IoError) -> Self {
        Self::Io(err)
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    pub(crate) fn from_io(err: IoError, path: impl Into<PathBuf>) -> Self {
        match err.kind() {
            IoErrorKind::NotFound => Self::NotFound(path.into()),
            IoErrorKind::PermissionDenied => Self::PermissionDenied(path.into()),
            IoErrorKind::AlreadyExists => Self::AlreadyExists(path.into()),
            IoErrorKind::CrossesDevices => Self::CrossesDevices(path.into()),
            IoErrorKind::OutOfMemory | IoErrorKind::StaleNetworkFileHandle => Self::Io(err),
            kind => Self::Path(path.into(), kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::Path;

    #[rstest]
    #[case(IoErrorKind::NotADirectory)]
    #[case(IoErrorKind::ReadOnlyFilesystem)]
    #[case(IoErrorKind::StorageFull)]
    #[case(IoErrorKind::DirectoryNotEmpty)]
    #[case(IoErrorKind::InvalidFilename)]
    fn test_single_path_failures(#[case] kind: IoErrorKind) {
        let err = ErrorKind::from_io(IoError::from(kind), "/archive/done");
        assert!(matches!(&err, ErrorKind::Path(path, k) if path == Path::new("/archive/done") && *k == kind));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_storage_wide_failures() {
        let err = ErrorKind::from_io(IoError::from(IoErrorKind::StaleNetworkFileHandle), "/archive");
        assert!(matches!(err, ErrorKind::Io(_)));
        assert!(err.is_retryable());
    }
}
