use crate::action::{Action, Report};
use crate::error::Result;
use renfiles_classify::{BackupSet, Layout};
use renfiles_storage::BackendHandle;
use renfiles_tag::TaggerHandle;
use std::path::{Path, PathBuf};
use time::UtcOffset;

/// Everything a run needs to know besides its collaborators.
///
/// Built once at startup and never modified.
#[derive(Debug, Clone)]
pub struct Context {
    /// Destination roots.
    pub layout: Layout,
    /// Downloads folder: documents (`.pdf`) and installers (`.dmg`).
    pub documents: PathBuf,
    /// Podcast source root; one sub-directory per show.
    pub podcasts: PathBuf,
    /// Bento backups (`.bentodb` directories); `None` skips the set.
    pub bento: Option<PathBuf>,
    /// Dated Shakehands backup folders; `None` skips the set.
    pub shakehands: Option<PathBuf>,
    /// Compute and report, but never create, move or tag anything.
    pub dry_run: bool,
    /// Log planned directory creations and tag command lines.
    pub debug: bool,
    /// Offset modification times are converted to before they are used as
    /// dates.
    pub offset: UtcOffset,
}
impl Context {
    /// A context reading documents and podcasts from the working directory,
    /// without backup sources, in UTC.
    pub fn new(layout: Layout) -> Self {
        let here = PathBuf::from(".");
        Self {
            layout,
            documents: here.clone(),
            podcasts: here,
            bento: None,
            shakehands: None,
            dry_run: false,
            debug: false,
            offset: UtcOffset::UTC,
        }
    }

    pub(crate) fn backup_source(&self, set: BackupSet) -> Option<&Path> {
        match set {
            BackupSet::Bento => self.bento.as_deref(),
            BackupSet::Shakehands => self.shakehands.as_deref(),
        }
    }
}

/// Moves and tags files according to the classification rules.
///
/// # Examples
///
/// ```no_run
/// use renfiles_archive::{Archivist, Context};
/// use renfiles_classify::Layout;
/// use renfiles_storage::backend::LocalBackend;
/// use renfiles_tag::TagCommand;
/// use std::sync::Arc;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut ctx = Context::new(Layout::new("/Users/me/archive"));
/// ctx.documents = "/Users/me/Downloads".into();
/// let archivist = Archivist::new(Arc::new(LocalBackend::default()), Arc::new(TagCommand::discover()), ctx);
/// let report = archivist.run(|action| println!("{action}"))?;
/// println!("{} moved, {} failed", report.renamed(), report.failed());
/// # Ok(())
/// # }
/// ```
pub struct Archivist {
    pub(crate) backend: BackendHandle,
    pub(crate) tagger: TaggerHandle,
    pub(crate) ctx: Context,
}
impl Archivist {
    pub fn new(backend: BackendHandle, tagger: TaggerHandle, ctx: Context) -> Self {
        Self { backend, tagger, ctx }
    }

    /// Processes every source in order, handing each [`Action`] to `observe`
    /// as soon as it happens.
    ///
    /// # Errors
    /// Only a storage failure that is not an ordinary refusal aborts the
    /// batch. Everything else is reported as an [`Action`].
    #[tracing::instrument(level = "debug", skip_all, fields(backend = self.backend.name(), dry_run = self.ctx.dry_run))]
    pub fn run(&self, mut observe: impl FnMut(&Action)) -> Result<Report> {
        let mut report = Report::default();
        {
            let mut sink = |action: Action| {
                observe(&action);
                report.push(action);
            };
            self.organize_documents(&mut sink)?;
            for set in BackupSet::ALL {
                self.organize_backups(set, &mut sink)?;
            }
            self.organize_software(&mut sink)?;
            self.organize_podcasts(&mut sink)?;
        }
        tracing::info!(
            renamed = report.renamed(),
            planned = report.planned(),
            already_correct = report.already_correct(),
            unrecognized = report.unrecognized(),
            failed = report.failed(),
            "Batch complete"
        );
        Ok(report)
    }
}
