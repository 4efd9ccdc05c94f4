use crate::error::{ErrorKind, Result};
use crate::{Tagger, validate};
use exn::ResultExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Where the utility is usually installed by Homebrew.
pub const DEFAULT_PROGRAM: &str = "/usr/local/bin/tag";

/// Tags files by launching the external `tag` utility.
#[derive(Debug, Clone)]
pub struct TagCommand {
    program: PathBuf,
}
impl TagCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }

    /// Look for `tag` on the `PATH`, falling back to [`DEFAULT_PROGRAM`].
    pub fn discover() -> Self {
        match which::which("tag") {
            Ok(program) => {
                tracing::trace!(program = %program.display(), "Discovered tag utility in PATH");
                Self::new(program)
            },
            Err(_) => {
                tracing::info!(fallback = DEFAULT_PROGRAM, "Tag utility not found in PATH");
                Self::new(DEFAULT_PROGRAM)
            },
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, path: &Path, tags: &str) -> Command {
        let mut command = Command::new(&self.program);
        command.arg("-a").arg(tags).arg(path);
        command
    }
}
impl Default for TagCommand {
    fn default() -> Self {
        Self::discover()
    }
}

impl Tagger for TagCommand {
    fn apply_tags(&self, path: &Path, tags: &str) -> Result<()> {
        validate(tags)?;
        tracing::debug!(
            "{} -a {} {}",
            self.program.display(),
            tags,
            path.display()
        );
        // Fire and forget: the child is detached and never waited on.
        self.command(path, tags)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .or_raise(|| ErrorKind::Launch(self.program.clone()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        let tagger = TagCommand::new("/opt/bin/tag");
        let command = tagger.command(Path::new("/archive/imac/news/20210101_nzz.pdf"), "dNews,cDiary");
        assert_eq!(command.get_program(), "/opt/bin/tag");
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, ["-a", "dNews,cDiary", "/archive/imac/news/20210101_nzz.pdf"]);
    }

    #[test]
    fn test_missing_program() {
        let temp_dir = tempfile::tempdir().unwrap();
        let tagger = TagCommand::new(temp_dir.path().join("no-such-tag"));
        let err = tagger.apply_tags(Path::new("/tmp/x.pdf"), "dNews").unwrap_err();
        assert!(matches!(&*err, ErrorKind::Launch(_)));
    }

    #[test]
    fn test_empty_tags_rejected_before_launch() {
        let tagger = TagCommand::new("/definitely/not/here");
        let err = tagger.apply_tags(Path::new("/tmp/x.pdf"), "").unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidTags(_)));
    }

    #[test]
    fn test_discover_always_yields_a_program() {
        assert!(!TagCommand::discover().program().as_os_str().is_empty());
    }
}
