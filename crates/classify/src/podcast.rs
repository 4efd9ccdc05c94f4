//! Podcast episode naming.
//!
//! Each show in [`SHOWS`] is downloaded into its own folder with a
//! show-specific prefix followed by the broadcast date. Episodes are renamed to
//! `<yyyyMMdd>sfdrs<Show>.mp4` and tagged as news. TED talks carry no date in
//! their name, so the file's modification time stands in for it.

use crate::error::{ErrorKind, Result};
use crate::layout::Layout;
use crate::models::{Placement, Tags};
use exn::{OptionExt, ResultExt};
use time::OffsetDateTime;
use time::macros::format_description;
use tracing::instrument;

/// Characters trailing every TED download name (`"-video.mp4"` style) that
/// are dropped before the new extension is appended.
const TED_TRAILER_LEN: usize = 10;

/// A subscribed show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Show {
    /// Folder below the podcast download root.
    pub source: &'static str,
    /// Prefix of every episode file name, immediately followed by the date.
    pub prefix: &'static str,
    /// Canonical show name used in destination names.
    pub name: &'static str,
}

/// All shows, in processing order.
pub const SHOWS: [Show; 9] = [
    Show::new("10vor10", "10vor10_", "10vor10"),
    Show::new("DOK", "dok_", "Dok"),
    Show::new("ECO", "eco_", "Eco"),
    Show::new("Einstein", "einstein_", "Einstein"),
    Show::new("Giacobbo---M--ller", "giacobbomueller_", "GiacobboMueller"),
    Show::new("Kassensturz", "kassensturz_", "Kassensturz"),
    Show::new("Reporter", "reporter_", "Reporter"),
    Show::new("Tagesschau", "ts20_", "Tagesschau"),
    Show::new("TEDTalks--video-", "tedtalks", "tedtalks"),
];

impl Show {
    pub const fn new(source: &'static str, prefix: &'static str, name: &'static str) -> Self {
        Self { source, prefix, name }
    }

    /// `true` for shows whose episodes are dated by modification time
    /// instead of by name.
    pub fn dated_by_modification(&self) -> bool {
        self.prefix.starts_with("tedtalks")
    }

    /// Computes where an episode belongs.
    ///
    /// The date window right after the prefix is taken as-is; neither the
    /// prefix nor the date is validated. `modified` must already be in the
    /// offset the archive is dated in, and is only consulted for shows that are
    /// [dated by modification](Self::dated_by_modification).
    ///
    /// # Errors
    /// [`ErrorKind::MalformedName`] when the name is too short for its window.
    #[instrument(level = "debug", skip(self, layout), fields(show = self.name))]
    pub fn map_episode(&self, file_name: &str, modified: OffsetDateTime, layout: &Layout) -> Result<Placement> {
        if self.dated_by_modification() {
            let date = modified
                .format(format_description!("[year][month][day]"))
                .or_raise(|| ErrorKind::DateFormat)?;
            let stem = file_name
                .len()
                .checked_sub(TED_TRAILER_LEN)
                .and_then(|end| file_name.get(..end))
                .ok_or_raise(|| ErrorKind::MalformedName(file_name.to_string()))?;
            return Ok(Placement::new(
                self.name,
                layout.podcasts().join(self.name),
                format!("{date}{}{stem}.mp4", self.name),
                Tags::from(&["tTech"][..]),
            ));
        }

        let start = self.prefix.len();
        let date = file_name
            .get(start..start + 8)
            .ok_or_raise(|| ErrorKind::MalformedName(file_name.to_string()))?;
        Ok(Placement::new(
            self.name,
            layout.podcasts().join(self.name.to_lowercase()),
            format!("{date}sfdrs{}.mp4", self.name),
            Tags::from(&["dNews"][..]),
        ))
    }
}
