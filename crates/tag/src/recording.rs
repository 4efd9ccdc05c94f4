use crate::error::Result;
use crate::{Tagger, validate};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Tagger for tests: remembers every call instead of launching anything.
#[derive(Debug, Default)]
pub struct RecordingTagger {
    calls: Mutex<Vec<(PathBuf, String)>>,
}
impl RecordingTagger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(path, tags)` pair seen so far, in call order.
    pub fn calls(&self) -> Vec<(PathBuf, String)> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Tagger for RecordingTagger {
    fn apply_tags(&self, path: &Path, tags: &str) -> Result<()> {
        validate(tags)?;
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((path.to_path_buf(), tags.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls() {
        let tagger = RecordingTagger::new();
        tagger.apply_tags(Path::new("/a.pdf"), "dNews").unwrap();
        tagger.apply_tags(Path::new("/b.pdf"), "cDiary").unwrap();
        assert!(tagger.apply_tags(Path::new("/c.pdf"), "").is_err());
        assert_eq!(
            tagger.calls(),
            vec![(PathBuf::from("/a.pdf"), "dNews".to_string()), (PathBuf::from("/b.pdf"), "cDiary".to_string())]
        );
    }
}
