//! Storage backend trait and implementations.
//!
//! The archive only ever needs four things from a filesystem: list a
//! directory, check for a path, create directories and move a path. The
//! [`StorageBackend`] trait captures exactly that so the orchestration logic
//! can run against [`LocalBackend`] in production, [`ReadOnlyBackend`] during
//! dry runs and [`MockBackend`] (feature `mock`) in tests.

mod local;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod ro;

pub use self::local::LocalBackend;
#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockBackend;
pub use self::ro::ReadOnlyBackend;
use crate::error::Result;
use crate::models::{Entry, MoveOutcome, Refusal};
use std::path::Path;

/// Unified interface for filesystem access.
///
/// All operations are synchronous: the archive is processed one file at a
/// time and nothing else is supposed to touch the directories during a run.
///
/// # Path Handling
/// Paths are used as given (absolute or relative to the working directory).
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use renfiles_storage::{backend::StorageBackend, error::Result};
///
/// fn count_pdfs(backend: &dyn StorageBackend) -> Result<usize> {
///     let pdfs = backend.select(Path::new("/downloads"), ".pdf")?;
///     Ok(pdfs.iter().filter(|entry| entry.is_file()).count())
/// }
/// ```
pub trait StorageBackend: Send + Sync {
    /// Name of the backend, used for logging only.
    fn name(&self) -> &str;

    /// List the immediate entries (files, directories, anything) of `dir`,
    /// sorted by path.
    ///
    /// Returns [`NotFound`](crate::error::ErrorKind::NotFound) if `dir` does
    /// not exist.
    fn list(&self, dir: &Path) -> Result<Vec<Entry>>;

    /// List the immediate entries of `dir` whose name ends with `extension`,
    /// compared case-insensitively.
    ///
    /// Both files and directories are returned; callers filter by
    /// [`Entry::kind`].
    fn select(&self, dir: &Path, extension: &str) -> Result<Vec<Entry>> {
        let mut entries = self.list(dir)?;
        entries.retain(|entry| entry.has_extension(extension));
        Ok(entries)
    }

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> Result<bool>;

    /// Create a directory and all of its missing parents. Succeeds if the
    /// directory already exists.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Rename/move a file or directory.
    ///
    /// # Notes
    /// - Implementations should create parent directories as needed.
    /// - Never overwrites: returns
    ///   [`AlreadyExists`](crate::error::ErrorKind::AlreadyExists) if `to`
    ///   exists.
    /// - Returns [`NotFound`](crate::error::ErrorKind::NotFound) if `from`
    ///   does not exist.
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    /// Move a path, reporting every failure confined to `from` or `to` as a
    /// refused [`MoveOutcome`] instead of an error.
    ///
    /// Only I/O errors that leave the storage unusable are returned as `Err`.
    fn relocate(&self, from: &Path, to: &Path) -> Result<MoveOutcome> {
        match self.rename(from, to) {
            Ok(()) => Ok(MoveOutcome::moved(from, to)),
            Err(err) => match Refusal::from_error(&*err) {
                Some(refusal) => {
                    tracing::debug!(backend = self.name(), from = %from.display(), to = %to.display(), %refusal, "Move refused");
                    Ok(MoveOutcome::refused(from, to, refusal))
                },
                None => Err(err),
            },
        }
    }
}
