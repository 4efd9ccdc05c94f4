use std::path::{Path, PathBuf};

/// Destination roots every rule resolves against.
///
/// Built once from configuration and shared read-only by all mappers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    archive: PathBuf,
    diary: Option<PathBuf>,
    podcasts: PathBuf,
}
impl Layout {
    /// Creates a layout rooted at the archive directory. The podcast root
    /// defaults to the archive root until [`with_podcasts`](Self::with_podcasts)
    /// says otherwise.
    pub fn new(archive: impl Into<PathBuf>) -> Self {
        let archive = archive.into();
        Self {
            podcasts: archive.clone(),
            archive,
            diary: None,
        }
    }

    pub fn with_diary(mut self, diary: impl Into<Option<PathBuf>>) -> Self {
        self.diary = diary.into();
        self
    }

    pub fn with_podcasts(mut self, podcasts: impl Into<PathBuf>) -> Self {
        self.podcasts = podcasts.into();
        self
    }

    /// Base archive directory. Dated documents without a known marker land here.
    pub fn archive(&self) -> &Path {
        &self.archive
    }

    /// Root of the newspaper and magazine folders.
    pub fn news(&self) -> PathBuf {
        self.archive.join("imac").join("news")
    }

    pub fn diary(&self) -> PathBuf {
        self.diary.clone().unwrap_or_else(|| self.archive.join("done").join("diary"))
    }

    pub fn podcasts(&self) -> &Path {
        &self.podcasts
    }

    /// Root of the folders that get copied to the backup server.
    pub fn pegasus(&self) -> PathBuf {
        self.archive.join("toPegasus")
    }
}
