use crate::Archivist;
use crate::action::Action;
use crate::error::Result;
use renfiles_classify::{BackupSet, Classification, SHOWS, classify_document, map_software};
use renfiles_storage::Entry;
use std::path::Path;

impl Archivist {
    /// PDFs in the downloads folder, through the document rules.
    #[tracing::instrument(level = "debug", skip_all, fields(dir = %self.ctx.documents.display()))]
    pub fn organize_documents(&self, sink: &mut impl FnMut(Action)) -> Result<()> {
        let Some(entries) = self.candidates(&self.ctx.documents, ".pdf", sink) else {
            return Ok(());
        };
        for (entry, name) in files(&entries) {
            match classify_document(name, &self.ctx.layout) {
                Classification::Unrecognized => sink(Action::Unrecognized(entry.path.clone())),
                Classification::Matched(placement) => sink(self.place(&entry.path, &placement)?),
            }
        }
        Ok(())
    }

    /// Dated backup directories of one application.
    #[tracing::instrument(level = "debug", skip_all, fields(set = set.name()))]
    pub fn organize_backups(&self, set: BackupSet, sink: &mut impl FnMut(Action)) -> Result<()> {
        let Some(dir) = self.ctx.backup_source(set) else {
            tracing::debug!("No source folder configured");
            return Ok(());
        };
        let entries = match set {
            BackupSet::Bento => self.candidates(dir, set.extension(), sink),
            BackupSet::Shakehands => self.candidates(dir, "", sink),
        };
        let Some(entries) = entries else {
            return Ok(());
        };
        for (entry, name) in directories(&entries) {
            let placement = match set.map(name, &self.ctx.layout) {
                Ok(placement) => placement,
                Err(err) => {
                    tracing::warn!(name, error = ?err, "Malformed backup name");
                    sink(Action::failed(&entry.path, &*err));
                    continue;
                },
            };
            match set {
                // The directory itself is the backup.
                BackupSet::Bento => sink(self.place(&entry.path, &placement)?),
                // Each database file inside the dated directory is the backup.
                BackupSet::Shakehands => {
                    let Some(inner) = self.candidates(&entry.path, set.extension(), sink) else {
                        continue;
                    };
                    for (file, _) in files(&inner) {
                        sink(self.place(&file.path, &placement)?);
                    }
                },
            }
        }
        Ok(())
    }

    /// Installer images in the downloads folder.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn organize_software(&self, sink: &mut impl FnMut(Action)) -> Result<()> {
        let Some(entries) = self.candidates(&self.ctx.documents, ".dmg", sink) else {
            return Ok(());
        };
        for (entry, name) in files(&entries) {
            sink(self.place(&entry.path, &map_software(name, &self.ctx.layout))?);
        }
        Ok(())
    }

    /// Episodes of every known show, only when both podcast roots exist.
    #[tracing::instrument(level = "debug", skip_all, fields(dir = %self.ctx.podcasts.display()))]
    pub fn organize_podcasts(&self, sink: &mut impl FnMut(Action)) -> Result<()> {
        let destination = self.ctx.layout.podcasts();
        if !self.is_present(&self.ctx.podcasts) || !self.is_present(destination) {
            tracing::info!(destination = %destination.display(), "Podcast folders missing; skipping podcasts");
            return Ok(());
        }
        for show in &SHOWS {
            let dir = self.ctx.podcasts.join(show.source);
            if !self.is_present(&dir) {
                tracing::debug!(show = show.name, "No download folder for show");
                continue;
            }
            let Some(entries) = self.candidates(&dir, ".mp4", sink) else {
                continue;
            };
            for (entry, name) in files(&entries) {
                let modified = entry.modified.to_offset(self.ctx.offset);
                match show.map_episode(name, modified, &self.ctx.layout) {
                    Ok(placement) => sink(self.place(&entry.path, &placement)?),
                    Err(err) => {
                        tracing::warn!(show = show.name, name, error = ?err, "Malformed episode name");
                        sink(Action::failed(&entry.path, &*err));
                    },
                }
            }
        }
        Ok(())
    }

    /// Lists `dir` for entries ending in `extension`. A listing failure
    /// abandons the source: it is logged, reported once and `None` returned.
    fn candidates(&self, dir: &Path, extension: &str, sink: &mut impl FnMut(Action)) -> Option<Vec<Entry>> {
        match self.backend.select(dir, extension) {
            Ok(entries) => {
                tracing::trace!(dir = %dir.display(), extension, count = entries.len(), "Selected candidates");
                Some(entries)
            },
            Err(err) => {
                tracing::warn!(dir = %dir.display(), error = ?err, "Could not list source directory");
                sink(Action::failed(dir, &*err));
                None
            },
        }
    }

    fn is_present(&self, path: &Path) -> bool {
        self.backend.exists(path).unwrap_or(false)
    }
}

/// Regular files with UTF-8 names, paired with the name. Anything else is
/// skipped silently.
fn files(entries: &[Entry]) -> impl Iterator<Item = (&Entry, &str)> {
    entries.iter().filter(|e| e.is_file()).filter_map(|e| e.name().map(|name| (e, name)))
}

fn directories(entries: &[Entry]) -> impl Iterator<Item = (&Entry, &str)> {
    entries.iter().filter(|e| e.is_dir()).filter_map(|e| e.name().map(|name| (e, name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use renfiles_storage::EntryKind;
    use time::OffsetDateTime;

    #[test]
    fn test_entry_filters() {
        let entries = [
            Entry::new("/dl/a.pdf", EntryKind::File, OffsetDateTime::UNIX_EPOCH),
            Entry::new("/dl/b.pdf", EntryKind::Directory, OffsetDateTime::UNIX_EPOCH),
            Entry::new("/dl/c.pdf", EntryKind::Other, OffsetDateTime::UNIX_EPOCH),
        ];
        let names: Vec<_> = files(&entries).map(|(_, name)| name).collect();
        assert_eq!(names, ["a.pdf"]);
        let names: Vec<_> = directories(&entries).map(|(_, name)| name).collect();
        assert_eq!(names, ["b.pdf"]);
    }
}
