use crate::Archivist;
use crate::action::Action;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use renfiles_classify::Placement;
use renfiles_storage::Refusal;
use std::path::Path;

impl Archivist {
    /// Moves one entry to its placement and tags it.
    ///
    /// Refused moves and failed directory creation become
    /// [`Action::Failed`]; tagging failures are only logged, the move stands.
    #[tracing::instrument(level = "debug", skip_all, fields(source = %source.display(), rule = placement.rule))]
    pub(crate) fn place(&self, source: &Path, placement: &Placement) -> Result<Action> {
        let destination = placement.destination();
        if placement.is_destination(source) {
            tracing::debug!("Already at canonical path");
            return Ok(Action::AlreadyCorrect(source.to_path_buf()));
        }
        let tags = placement.tags.clone();

        if self.ctx.debug {
            tracing::debug!("mkdir {}", placement.directory.display());
        }
        if self.ctx.dry_run {
            if self.ctx.debug && !tags.is_empty() {
                tracing::debug!("tag -a {tags} {}", destination.display());
            }
            return Ok(Action::Planned {
                from: source.to_path_buf(),
                to: destination,
                tags,
            });
        }

        if let Err(err) = self.backend.create_dir_all(&placement.directory) {
            return match Refusal::from_error(&*err) {
                Some(refusal) => {
                    tracing::warn!(directory = %placement.directory.display(), %refusal, "Could not create destination directory");
                    Ok(Action::failed(source, refusal))
                },
                None => Err(err).or_raise(|| ErrorKind::Storage(source.to_path_buf())),
            };
        }

        let outcome = self
            .backend
            .relocate(source, &destination)
            .or_raise(|| ErrorKind::Storage(source.to_path_buf()))?;
        if let Some(refusal) = outcome.refused {
            tracing::warn!(destination = %destination.display(), %refusal, "Move refused");
            return Ok(Action::failed(source, refusal));
        }
        tracing::debug!(destination = %destination.display(), "Moved");

        if !tags.is_empty()
            && let Err(err) = self.tagger.apply_tags(&destination, &tags.to_string())
        {
            tracing::warn!(path = %destination.display(), %tags, error = ?err, "Tagging failed");
        }
        Ok(Action::Renamed {
            from: source.to_path_buf(),
            to: destination,
            tags,
        })
    }
}
