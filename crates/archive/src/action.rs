use renfiles_classify::Tags;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};

/// The outcome of handling a single candidate entry.
///
/// Each variant carries the path it concerns. The `Display` implementation is
/// the human-readable trace line printed by the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Entry was moved (and, when `tags` is non-empty, handed to the tagger).
    Renamed { from: PathBuf, to: PathBuf, tags: Tags },
    /// Dry run: entry would have been moved.
    Planned { from: PathBuf, to: PathBuf, tags: Tags },
    /// Entry already sits at its canonical path; no work performed.
    AlreadyCorrect(PathBuf),
    /// No rule knows the name; the entry is left alone.
    Unrecognized(PathBuf),
    /// The entry (or a whole source directory) could not be handled.
    Failed { path: PathBuf, reason: String },
}
impl Action {
    pub fn path(&self) -> &Path {
        match self {
            Self::Renamed { from, .. } | Self::Planned { from, .. } => from,
            Self::AlreadyCorrect(path) | Self::Unrecognized(path) | Self::Failed { path, .. } => path,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub(crate) fn failed(path: impl Into<PathBuf>, reason: impl Display) -> Self {
        Self::Failed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

fn name(path: &Path) -> String {
    path.file_name().unwrap_or(path.as_os_str()).to_string_lossy().into_owned()
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Renamed { from, to, tags } | Self::Planned { from, to, tags } => {
                write!(f, "mv {} {}", name(from), to.display())?;
                if tags.is_empty() {
                    write!(f, ", no tags added")
                } else {
                    write!(f, ", adding tags: {tags}")
                }
            },
            Self::AlreadyCorrect(path) => write!(f, "already in place: {}", path.display()),
            Self::Unrecognized(path) => write!(f, "not recognized: {}", name(path)),
            Self::Failed { path, reason } => write!(f, "conversion of {} failed: {reason}", name(path)),
        }
    }
}

/// Every [`Action`] of a batch, in the order they happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    actions: Vec<Action>,
}
impl Report {
    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn renamed(&self) -> usize {
        self.count(|a| matches!(a, Action::Renamed { .. }))
    }

    pub fn planned(&self) -> usize {
        self.count(|a| matches!(a, Action::Planned { .. }))
    }

    pub fn already_correct(&self) -> usize {
        self.count(|a| matches!(a, Action::AlreadyCorrect(_)))
    }

    pub fn unrecognized(&self) -> usize {
        self.count(|a| matches!(a, Action::Unrecognized(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(Action::is_failure)
    }

    fn count(&self, predicate: impl Fn(&Action) -> bool) -> usize {
        self.actions.iter().filter(|a| predicate(*a)).count()
    }
}
impl IntoIterator for Report {
    type Item = Action;
    type IntoIter = std::vec::IntoIter<Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.into_iter()
    }
}
