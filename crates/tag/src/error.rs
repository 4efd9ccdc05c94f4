//! Tagging Error Types

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A tagging error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for tagging operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The tagging utility could not be started.
    #[display("could not launch tag utility {}", _0.display())]
    Launch(#[error(not(source))] PathBuf),
    /// Tags must be a non-empty comma-separated list.
    #[display("invalid tag list: {_0:?}")]
    InvalidTags(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Launch(_))
    }
}
