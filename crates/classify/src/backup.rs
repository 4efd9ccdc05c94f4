//! Database backup naming.
//!
//! Both applications write dated backup *directories*. The date is cut out of
//! the directory name at fixed positions and becomes the canonical
//! `yyyyMMdd.<ext>` name in the backup folder that gets synced to the server.

use crate::error::{ErrorKind, Result};
use crate::layout::Layout;
use crate::models::{Placement, Tags};
use crate::window;
use exn::OptionExt;
use std::ops::Range;

// `Bento Backup - yyyy-MM-dd.bentodb`
const BENTO_DATE: &[Range<usize>] = &[15..19, 20..22, 23..25];
// `yyyy-MM-dd hh-mm-ss`
const SHAKEHANDS_DATE: &[Range<usize>] = &[0..4, 5..7, 8..10];

/// A kind of backup set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackupSet {
    /// Bento database backups: the directory itself (`Bento Backup -
    /// 2013-12-14.bentodb`) is the backup.
    Bento,
    /// Shakehands accounting backups: a directory named `2013-12-14 10-11-12`
    /// holding one or more `.sdb` files.
    Shakehands,
}
impl BackupSet {
    pub const ALL: [BackupSet; 2] = [BackupSet::Bento, BackupSet::Shakehands];

    pub fn name(&self) -> &'static str {
        match self {
            BackupSet::Bento => "bento",
            BackupSet::Shakehands => "shakehands",
        }
    }

    /// Extension of the entries that get moved, including the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            BackupSet::Bento => ".bentodb",
            BackupSet::Shakehands => ".sdb",
        }
    }

    fn date_windows(&self) -> &'static [Range<usize>] {
        match self {
            BackupSet::Bento => BENTO_DATE,
            BackupSet::Shakehands => SHAKEHANDS_DATE,
        }
    }

    /// Computes the canonical location for a backup, given the name of its
    /// dated directory.
    ///
    /// # Errors
    /// [`ErrorKind::MalformedName`] when the directory name is too short for
    /// the date windows. Nothing else is validated.
    pub fn map(&self, directory_name: &str, layout: &Layout) -> Result<Placement> {
        let date = window(directory_name, self.date_windows())
            .ok_or_raise(|| ErrorKind::MalformedName(directory_name.to_string()))?;
        Ok(Placement::new(
            self.name(),
            layout.pegasus().join("backup").join(self.name()),
            format!("{date}{}", self.extension()),
            Tags::new(),
        ))
    }
}

/// Installer images are archived as-is, untagged.
pub fn map_software(file_name: &str, layout: &Layout) -> Placement {
    Placement::new("software", layout.pegasus().join("software"), file_name, Tags::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::PathBuf;

    #[rstest]
    #[case(BackupSet::Bento, "Bento Backup - 2013-12-14.bentodb", "/archive/toPegasus/backup/bento", "20131214.bentodb")]
    #[case(BackupSet::Shakehands, "2013-12-14 10-11-12", "/archive/toPegasus/backup/shakehands", "20131214.sdb")]
    fn test_backup_names(
        #[case] set: BackupSet,
        #[case] directory_name: &str,
        #[case] directory: &str,
        #[case] file_name: &str,
    ) {
        let placement = set.map(directory_name, &Layout::new("/archive")).unwrap();
        assert_eq!(placement.directory, PathBuf::from(directory));
        assert_eq!(placement.file_name, file_name);
        assert!(placement.tags.is_empty());
    }

    #[rstest]
    #[case(BackupSet::Bento, "Bento.bentodb")]
    #[case(BackupSet::Shakehands, "2013-12")]
    fn test_malformed_directory_names(#[case] set: BackupSet, #[case] directory_name: &str) {
        let err = set.map(directory_name, &Layout::new("/archive")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::MalformedName(_)));
    }

    #[test]
    fn test_software_keeps_name() {
        let placement = map_software("Firefox 120.0.dmg", &Layout::new("/archive"));
        assert_eq!(placement.destination(), PathBuf::from("/archive/toPegasus/software/Firefox 120.0.dmg"));
        assert!(placement.tags.is_empty());
    }
}
