//! Attach Finder tags to archived files.
//!
//! Tagging is delegated to the `tag` command line utility
//! (`tag -a <tags> <path>`). The utility is launched and left to run on its
//! own; its exit status is never awaited.

mod command;
pub mod error;
#[cfg(any(test, feature = "mock"))]
mod recording;

pub use crate::command::{DEFAULT_PROGRAM, TagCommand};
#[cfg(any(test, feature = "mock"))]
pub use crate::recording::RecordingTagger;
use crate::error::Result;
use std::path::Path;
use std::sync::Arc;

pub type TaggerHandle = Arc<dyn Tagger + Send + Sync>;

/// Something that can attach tags to a path.
pub trait Tagger: Send + Sync {
    /// Attach `tags`, a comma-separated list such as `"dNews,cDiary"`, to
    /// `path`.
    fn apply_tags(&self, path: &Path, tags: &str) -> Result<()>;
}

/// Reject empty tag lists and lists with empty members (`"a,,b"`).
pub(crate) fn validate(tags: &str) -> Result<()> {
    if tags.is_empty() || tags.split(',').any(|tag| tag.trim().is_empty()) {
        exn::bail!(error::ErrorKind::InvalidTags(tags.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("dNews", true)]
    #[case("cDiary,dNews", true)]
    #[case("", false)]
    #[case("dNews,", false)]
    #[case("a,,b", false)]
    fn test_validate(#[case] tags: &str, #[case] valid: bool) {
        assert_eq!(validate(tags).is_ok(), valid);
    }
}
