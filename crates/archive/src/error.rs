//! Archive Error Types
//!
//! Only failures that should stop the whole batch surface as errors. Anything
//! that concerns a single entry (unknown name, refused move, failed tagging)
//! is reported as an [`Action`](crate::Action) instead.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// An archive error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for archive operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies the origin of a batch failure.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The storage backend failed while moving (or preparing to move) a path
    /// in a way that is not an ordinary refusal.
    #[display("storage failure while archiving {}", _0.display())]
    Storage(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}
