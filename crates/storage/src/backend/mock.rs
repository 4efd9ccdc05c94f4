//! In-memory storage backend for testing.

use crate::error::{ErrorKind, Result};
use crate::models::{Entry, EntryKind};
use crate::StorageBackend;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use time::OffsetDateTime;

/// In-memory storage backend for testing.
///
/// Paths are kept in an ordered map behind a [`RwLock`], so all trait methods
/// can operate on `&self` without external synchronisation. Adding a file
/// implicitly adds all of its ancestor directories.
///
/// # Examples
///
/// ```
/// use renfiles_storage::backend::{MockBackend, StorageBackend};
/// use std::path::Path;
///
/// let backend = MockBackend::with_files(["/downloads/20210101_nzz.pdf"]);
/// assert!(backend.exists(Path::new("/downloads")).unwrap());
///
/// backend
///     .rename(Path::new("/downloads/20210101_nzz.pdf"), Path::new("/archive/imac/news/20210101_nzz.pdf"))
///     .unwrap();
/// assert!(backend.exists(Path::new("/archive/imac/news")).unwrap());
/// ```
pub struct MockBackend {
    name: String,
    storage: RwLock<BTreeMap<PathBuf, (EntryKind, OffsetDateTime)>>,
    denied: RwLock<BTreeSet<PathBuf>>,
}

impl MockBackend {
    /// Create a mock backend pre-populated with files. Every file gets the
    /// Unix epoch as its modification time; see [`Self::with_modified`].
    pub fn with_files(files: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        let backend = Self::default();
        {
            let mut storage = backend.storage.write().unwrap_or_else(PoisonError::into_inner);
            for path in files {
                insert(&mut storage, path.into(), EntryKind::File);
            }
        }
        backend
    }

    /// Add (empty) directories.
    pub fn with_dirs(self, dirs: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        {
            let mut storage = self.storage.write().unwrap_or_else(PoisonError::into_inner);
            for path in dirs {
                insert(&mut storage, path.into(), EntryKind::Directory);
            }
        }
        self
    }

    /// Set the modification time of an existing path.
    ///
    /// Panics if the path was never added. If test setup is wrong, then test
    /// should not pass.
    pub fn with_modified(self, path: impl AsRef<Path>, modified: OffsetDateTime) -> Self {
        {
            let mut storage = self.storage.write().unwrap_or_else(PoisonError::into_inner);
            let Some(entry) = storage.get_mut(path.as_ref()) else {
                panic!("MockBackend::with_modified: unknown path {}", path.as_ref().display());
            };
            entry.1 = modified;
        }
        self
    }

    /// Refuse every move from or to `path` (or anything below it) with
    /// [`ErrorKind::PermissionDenied`].
    pub fn deny(self, path: impl Into<PathBuf>) -> Self {
        self.denied.write().unwrap_or_else(PoisonError::into_inner).insert(path.into());
        self
    }

    /// All files currently stored, in path order.
    pub fn files(&self) -> Vec<PathBuf> {
        let storage = self.storage.read().unwrap_or_else(PoisonError::into_inner);
        storage
            .iter()
            .filter(|(_, (kind, _))| *kind == EntryKind::File)
            .map(|(path, _)| path.clone())
            .collect()
    }

    fn is_denied(&self, path: &Path) -> bool {
        let denied = self.denied.read().unwrap_or_else(PoisonError::into_inner);
        denied.iter().any(|prefix| path.starts_with(prefix))
    }
}

fn insert(storage: &mut BTreeMap<PathBuf, (EntryKind, OffsetDateTime)>, path: PathBuf, kind: EntryKind) {
    for ancestor in path.ancestors().skip(1).filter(|a| !a.as_os_str().is_empty()) {
        storage
            .entry(ancestor.to_path_buf())
            .or_insert((EntryKind::Directory, OffsetDateTime::UNIX_EPOCH));
    }
    storage.insert(path, (kind, OffsetDateTime::UNIX_EPOCH));
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            name: "mock".to_string(),
            storage: RwLock::new(BTreeMap::new()),
            denied: RwLock::new(BTreeSet::new()),
        }
    }
}

impl StorageBackend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn list(&self, dir: &Path) -> Result<Vec<Entry>> {
        let storage = self.storage.read().unwrap_or_else(PoisonError::into_inner);
        match storage.get(dir) {
            Some((EntryKind::Directory, _)) => {},
            _ => exn::bail!(ErrorKind::NotFound(dir.to_path_buf())),
        }
        // BTreeMap iteration is already sorted by path.
        Ok(storage
            .iter()
            .filter(|(path, _)| path.parent() == Some(dir))
            .map(|(path, (kind, modified))| Entry::new(path.clone(), *kind, *modified))
            .collect())
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        let storage = self.storage.read().unwrap_or_else(PoisonError::into_inner);
        Ok(storage.contains_key(path))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let mut storage = self.storage.write().unwrap_or_else(PoisonError::into_inner);
        if let Some((EntryKind::File | EntryKind::Other, _)) = storage.get(path) {
            exn::bail!(ErrorKind::AlreadyExists(path.to_path_buf()));
        }
        insert(&mut storage, path.to_path_buf(), EntryKind::Directory);
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        if self.is_denied(from) || self.is_denied(to) {
            exn::bail!(ErrorKind::PermissionDenied(from.to_path_buf()));
        }
        let mut storage = self.storage.write().unwrap_or_else(PoisonError::into_inner);
        let Some((kind, modified)) = storage.remove(from) else {
            exn::bail!(ErrorKind::NotFound(from.to_path_buf()));
        };
        if storage.contains_key(to) {
            storage.insert(from.to_path_buf(), (kind, modified));
            exn::bail!(ErrorKind::AlreadyExists(to.to_path_buf()));
        }
        insert(&mut storage, to.to_path_buf(), kind);
        storage.insert(to.to_path_buf(), (kind, modified));
        if kind == EntryKind::Directory {
            let descendants: Vec<_> = storage.keys().filter(|p| p.starts_with(from)).cloned().collect();
            for path in descendants {
                if let (Some(value), Ok(relative)) = (storage.remove(&path), path.strip_prefix(from)) {
                    storage.insert(to.join(relative), value);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Refusal;
    use time::macros::datetime;

    #[test]
    fn test_with_files_creates_ancestors() {
        let backend = MockBackend::with_files(["/a/b/c.pdf"]);
        assert!(backend.exists(Path::new("/a")).unwrap());
        assert!(backend.exists(Path::new("/a/b")).unwrap());
        let entries = backend.list(Path::new("/a/b")).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_file());
    }

    #[test]
    fn test_list_is_shallow() {
        let backend = MockBackend::with_files(["/src/a.pdf", "/src/sub/b.pdf"]).with_dirs(["/src/empty"]);
        let names: Vec<_> = backend
            .list(Path::new("/src"))
            .unwrap()
            .iter()
            .filter_map(|e| e.name().map(str::to_string))
            .collect();
        assert_eq!(names, ["a.pdf", "empty", "sub"]);
    }

    #[test]
    fn test_list_not_found() {
        let backend = MockBackend::default();
        let err = backend.list(Path::new("/missing")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }

    #[test]
    fn test_with_modified() {
        let modified = datetime!(2021-03-04 10:00 UTC);
        let backend = MockBackend::with_files(["/p/talk.mp4"]).with_modified("/p/talk.mp4", modified);
        assert_eq!(backend.list(Path::new("/p")).unwrap()[0].modified, modified);
    }

    #[test]
    #[should_panic(expected = "unknown path")]
    fn test_with_modified_panics_on_unknown_path() {
        let _ = MockBackend::default().with_modified("/nope", OffsetDateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_rename() {
        let backend = MockBackend::with_files(["/src/a.pdf"]);
        backend.rename(Path::new("/src/a.pdf"), Path::new("/dest/x/a.pdf")).unwrap();
        assert_eq!(backend.files(), vec![PathBuf::from("/dest/x/a.pdf")]);
    }

    #[test]
    fn test_rename_directory_moves_contents() {
        let backend = MockBackend::with_files(["/src/db.bentodb/data", "/src/db.bentodb/index"]);
        backend.rename(Path::new("/src/db.bentodb"), Path::new("/backup/20131214.bentodb")).unwrap();
        assert_eq!(
            backend.files(),
            vec![PathBuf::from("/backup/20131214.bentodb/data"), PathBuf::from("/backup/20131214.bentodb/index")]
        );
        assert!(!backend.exists(Path::new("/src/db.bentodb")).unwrap());
    }

    #[test]
    fn test_rename_refusals() {
        let backend = MockBackend::with_files(["/src/a.pdf", "/dest/a.pdf", "/locked/b.pdf"]).deny("/locked");
        let outcome = backend.relocate(Path::new("/src/a.pdf"), Path::new("/dest/a.pdf")).unwrap();
        assert_eq!(outcome.refused, Some(Refusal::DestinationExists));
        assert!(backend.exists(Path::new("/src/a.pdf")).unwrap(), "source is kept when refused");

        let outcome = backend.relocate(Path::new("/src/gone.pdf"), Path::new("/dest/gone.pdf")).unwrap();
        assert_eq!(outcome.refused, Some(Refusal::SourceMissing));

        let outcome = backend.relocate(Path::new("/locked/b.pdf"), Path::new("/dest/b.pdf")).unwrap();
        assert_eq!(outcome.refused, Some(Refusal::PermissionDenied));
    }

    #[test]
    fn test_create_dir_all_over_file() {
        let backend = MockBackend::with_files(["/dest/news"]);
        assert!(backend.create_dir_all(Path::new("/dest/other")).is_ok());
        assert!(backend.create_dir_all(Path::new("/dest/news")).is_err());
    }
}
