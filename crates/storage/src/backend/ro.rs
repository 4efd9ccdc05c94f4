//! Readonly filesystem storage backend.
//!
//! Wraps another backend so that a dry run can walk the real directories
//! while every directory creation and move is logged and skipped.

use std::path::Path;

use crate::{BackendHandle, Entry, StorageBackend, error::Result};

/// Read-only storage backend.
///
/// Wraps another backend and silently drops all write operations, logging an
/// [`info event`](tracing::Event).
#[derive(Clone)]
pub struct ReadOnlyBackend {
    inner: BackendHandle,
}
impl ReadOnlyBackend {
    pub fn new(inner: BackendHandle) -> Self {
        Self { inner }
    }
}

impl StorageBackend for ReadOnlyBackend {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn list(&self, dir: &Path) -> Result<Vec<Entry>> {
        self.inner.list(dir)
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        self.inner.exists(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        tracing::info!(path = %path.display(), "Skipping mkdir during read-only mode");
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        tracing::info!(from = %from.display(), to = %to.display(), "Skipping rename/move during read-only mode");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use std::path::PathBuf;
    use std::sync::Arc;

    #[test]
    fn test_writes_are_skipped() {
        let inner = Arc::new(MockBackend::with_files(["/src/20210101_nzz.pdf"]));
        let backend = ReadOnlyBackend::new(inner.clone());
        backend.create_dir_all(Path::new("/dest/news")).unwrap();
        let outcome = backend
            .relocate(Path::new("/src/20210101_nzz.pdf"), Path::new("/dest/news/20210101_nzz.pdf"))
            .unwrap();
        assert!(outcome.is_success());
        assert_eq!(inner.files(), vec![PathBuf::from("/src/20210101_nzz.pdf")]);
        assert!(!inner.exists(Path::new("/dest/news")).unwrap());
    }

    #[test]
    fn test_reads_are_delegated() {
        let inner = Arc::new(MockBackend::with_files(["/src/a.pdf", "/src/b.mp4"]));
        let backend = ReadOnlyBackend::new(inner);
        assert_eq!(backend.name(), "mock");
        assert_eq!(backend.select(Path::new("/src"), ".pdf").unwrap().len(), 1);
        assert!(backend.exists(Path::new("/src/b.mp4")).unwrap());
    }
}
