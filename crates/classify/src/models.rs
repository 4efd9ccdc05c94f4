//! Classification results.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};

/// An ordered set of tags.
///
/// Keeps insertion order (the tagging utility receives the tags in the order
/// the rule lists them) and silently ignores duplicates. Renders as the
/// comma-separated list expected on the tagging command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(Vec<String>);
impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tag, returning `false` if it was already present.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.contains(&tag) {
            return false;
        }
        self.0.push(tag);
        true
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}
impl<S: Into<String>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = Self::new();
        for tag in iter {
            tags.insert(tag);
        }
        tags
    }
}
impl From<&[&str]> for Tags {
    fn from(tags: &[&str]) -> Self {
        tags.iter().copied().collect()
    }
}
impl Display for Tags {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0.join(","))
    }
}

/// Where a recognized file belongs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Short name of the rule that produced this placement (`"nzzs"`, `"rg"`,
    /// `"dated"`, ...), for logging and reports.
    pub rule: &'static str,
    /// Destination directory, created on demand before the move.
    pub directory: PathBuf,
    /// Destination file name inside [`directory`](Self::directory).
    pub file_name: String,
    /// Tags to apply after a successful move. Empty means "move only".
    pub tags: Tags,
}
impl Placement {
    pub fn new(
        rule: &'static str,
        directory: impl Into<PathBuf>,
        file_name: impl Into<String>,
        tags: impl Into<Tags>,
    ) -> Self {
        Self {
            rule,
            directory: directory.into(),
            file_name: file_name.into(),
            tags: tags.into(),
        }
    }

    /// Full destination path.
    pub fn destination(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    pub fn is_destination(&self, path: impl AsRef<Path>) -> bool {
        self.destination() == path.as_ref()
    }
}

/// Outcome of classifying one file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// A rule matched: move the file (and tag it when tags are present).
    Matched(Placement),
    /// No rule matched and there is no leading date. The file stays put.
    Unrecognized,
}
impl Classification {
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    pub fn into_placement(self) -> Option<Placement> {
        match self {
            Self::Matched(placement) => Some(placement),
            Self::Unrecognized => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_keep_order_and_ignore_duplicates() {
        let mut tags = Tags::from(&["tFinance", "dBill"][..]);
        assert!(!tags.insert("dBill"));
        assert!(tags.insert("oZkb"));
        assert_eq!(tags.iter().collect::<Vec<_>>(), ["tFinance", "dBill", "oZkb"]);
        assert_eq!(tags.to_string(), "tFinance,dBill,oZkb");
    }

    #[test]
    fn test_empty_tags_render_empty() {
        let tags = Tags::new();
        assert!(tags.is_empty());
        assert_eq!(tags.to_string(), "");
    }

    #[test]
    fn test_placement_destination() {
        let placement = Placement::new("nzz", "/archive/imac/news/nzz", "20210101nzz.pdf", Tags::new());
        assert_eq!(placement.destination(), PathBuf::from("/archive/imac/news/nzz/20210101nzz.pdf"));
        assert!(placement.is_destination("/archive/imac/news/nzz/20210101nzz.pdf"));
        assert!(!placement.is_destination("/downloads/NZZ_20210101.pdf"));
    }
}
