//! Classification Error Types
//!
//! Document classification itself never fails: an unknown name is reported as
//! [`Classification::Unrecognized`](crate::Classification::Unrecognized). The
//! errors below come from the mappers that cut fixed character windows out of
//! podcast file names and backup directory names without validating them first.

use derive_more::{Display, Error};

/// A classification error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for mapper operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The name is too short (or oddly encoded) for the fixed windows the
    /// mapper cuts out of it.
    #[display("malformed name: {_0}")]
    MalformedName(#[error(not(source))] String),
    /// A modification timestamp could not be rendered as `yyyyMMdd`.
    #[display("could not format modification date")]
    DateFormat,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Names don't change between attempts.
        false
    }
}
