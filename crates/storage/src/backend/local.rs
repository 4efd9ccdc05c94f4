//! Local filesystem storage backend.

use crate::error::{ErrorKind, Result};
use crate::models::{Entry, EntryKind};
use crate::StorageBackend;
use std::fs::{self, DirEntry};
use std::path::Path;
use time::OffsetDateTime;

enum WalkEntry {
    Entry(Entry),
    Skip,
}

/// Local filesystem storage backend.
///
/// Operates directly on the paths it is given; there is no storage root.
///
/// # Examples
///
/// ```no_run
/// use renfiles_storage::backend::{LocalBackend, StorageBackend};
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = LocalBackend::default();
/// for entry in backend.select(Path::new("/Users/me/Downloads"), ".pdf")? {
///     println!("{}", entry.path.display());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LocalBackend {
    name: String,
}
impl LocalBackend {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn process_entry(entry: DirEntry) -> Result<WalkEntry> {
        let path = entry.path();
        // Follow symlinks: a link to a file is treated as the file.
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            // Note: silently drop what is most likely a broken symlink.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(WalkEntry::Skip),
            Err(e) => exn::bail!(ErrorKind::from_io(e, path)),
        };
        let kind = if metadata.is_file() {
            EntryKind::File
        } else if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::Other
        };
        let modified = metadata.modified().map_err(|e| ErrorKind::from_io(e, &path))?;
        Ok(WalkEntry::Entry(Entry::new(path, kind, OffsetDateTime::from(modified))))
    }
}
impl Default for LocalBackend {
    fn default() -> Self {
        Self::new("local")
    }
}

impl StorageBackend for LocalBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn list(&self, dir: &Path) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| ErrorKind::from_io(e, dir))? {
            let entry = entry.map_err(|e| ErrorKind::from_io(e, dir))?;
            match Self::process_entry(entry)? {
                WalkEntry::Entry(entry) => entries.push(entry),
                WalkEntry::Skip => {},
            }
        }
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        Ok(fs::exists(path).map_err(|e| ErrorKind::from_io(e, path))?)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        Ok(fs::create_dir_all(path).map_err(|e| ErrorKind::from_io(e, path))?)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        if fs::symlink_metadata(from).is_err() {
            exn::bail!(ErrorKind::NotFound(from.to_path_buf()));
        }
        // `fs::rename` silently replaces files on Unix.
        if fs::symlink_metadata(to).is_ok() {
            exn::bail!(ErrorKind::AlreadyExists(to.to_path_buf()));
        }
        if let Some(parent) = to.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ErrorKind::from_io(e, parent))?;
        }
        Ok(fs::rename(from, to).map_err(|e| ErrorKind::from_io(e, to))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Refusal;
    use std::path::PathBuf;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"data").unwrap();
    }

    #[test]
    fn test_list_is_sorted_and_shallow() {
        let temp_dir = tempfile::tempdir().unwrap();
        touch(&temp_dir.path().join("b.pdf"));
        touch(&temp_dir.path().join("a.pdf"));
        touch(&temp_dir.path().join("sub/nested.pdf"));
        let backend = LocalBackend::default();
        let entries = backend.list(temp_dir.path()).unwrap();
        let names: Vec<_> = entries.iter().filter_map(Entry::name).collect();
        assert_eq!(names, ["a.pdf", "b.pdf", "sub"]);
        assert!(entries[0].is_file());
        assert!(entries[2].is_dir());
    }

    #[test]
    fn test_select_is_case_insensitive() {
        let temp_dir = tempfile::tempdir().unwrap();
        touch(&temp_dir.path().join("upper.PDF"));
        touch(&temp_dir.path().join("lower.pdf"));
        touch(&temp_dir.path().join("movie.mp4"));
        fs::create_dir(temp_dir.path().join("folder.pdf")).unwrap();
        let backend = LocalBackend::default();
        let selected = backend.select(temp_dir.path(), ".pdf").unwrap();
        assert_eq!(selected.len(), 3, "directories are selected too");
    }

    #[test]
    fn test_list_missing_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = LocalBackend::default().list(&temp_dir.path().join("nope")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }

    #[test]
    fn test_rename_creates_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let from = temp_dir.path().join("file.pdf");
        let to = temp_dir.path().join("a/b/c/file.pdf");
        touch(&from);
        LocalBackend::default().rename(&from, &to).unwrap();
        assert!(!from.exists());
        assert!(to.exists());
    }

    #[test]
    fn test_rename_moves_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let from = temp_dir.path().join("Bento Backup - 2013-12-14.bentodb");
        touch(&from.join("data.db"));
        let to = temp_dir.path().join("backup/20131214.bentodb");
        LocalBackend::default().rename(&from, &to).unwrap();
        assert!(to.join("data.db").exists());
    }

    #[test]
    fn test_rename_never_overwrites() {
        let temp_dir = tempfile::tempdir().unwrap();
        let from = temp_dir.path().join("new.pdf");
        let to = temp_dir.path().join("old.pdf");
        touch(&from);
        touch(&to);
        let backend = LocalBackend::default();
        let err = backend.rename(&from, &to).unwrap_err();
        assert!(matches!(&*err, ErrorKind::AlreadyExists(_)));
        let outcome = backend.relocate(&from, &to).unwrap();
        assert_eq!(outcome.refused, Some(Refusal::DestinationExists));
        assert!(from.exists());
    }

    #[test]
    fn test_relocate_below_a_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let from = temp_dir.path().join("file.pdf");
        touch(&from);
        touch(&temp_dir.path().join("done"));
        let outcome = LocalBackend::default().relocate(&from, &temp_dir.path().join("done/finance/file.pdf")).unwrap();
        assert_eq!(outcome.refused, Some(Refusal::Io(std::io::ErrorKind::NotADirectory)));
        assert!(from.exists());
    }

    #[test]
    fn test_relocate_missing_source() {
        let temp_dir = tempfile::tempdir().unwrap();
        let outcome = LocalBackend::default()
            .relocate(&temp_dir.path().join("gone.pdf"), &temp_dir.path().join("dest.pdf"))
            .unwrap();
        assert_eq!(outcome.refused, Some(Refusal::SourceMissing));
    }

    #[test]
    fn test_exists_and_create_dir_all() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("x/y/z");
        let backend = LocalBackend::default();
        assert!(!backend.exists(&dir).unwrap());
        backend.create_dir_all(&dir).unwrap();
        backend.create_dir_all(&dir).unwrap();
        assert!(backend.exists(&dir).unwrap());
        assert!(backend.exists(&PathBuf::from(temp_dir.path())).unwrap());
    }
}
