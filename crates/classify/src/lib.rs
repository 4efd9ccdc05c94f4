//! Decides where a downloaded file belongs in the archive.
//!
//! Everything in this crate is pure: it looks at names (and, for one podcast,
//! a timestamp handed in by the caller) and returns a [`Placement`]. Moving and
//! tagging are left to the caller.
//!
//! - [`classify_document`]: PDFs, via the ordered document rule tables.
//! - [`Show::map_episode`]: podcast episodes, one [`Show`] per folder.
//! - [`BackupSet::map`]: dated backup directories.
//! - [`map_software`]: installer images.

mod backup;
mod date;
mod document;
pub mod error;
mod layout;
mod models;
mod podcast;

pub use crate::backup::{BackupSet, map_software};
pub use crate::date::{DateToken, Precision, parse_leading_date};
pub use crate::document::classify_document;
pub use crate::layout::Layout;
pub use crate::models::{Classification, Placement, Tags};
pub use crate::podcast::{SHOWS, Show};

use std::ops::Range;

/// Concatenates the given character windows of `name`, or `None` if any of
/// them is out of bounds or splits a character.
pub(crate) fn window(name: &str, ranges: &[Range<usize>]) -> Option<String> {
    ranges.iter().map(|range| name.get(range.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_concatenates() {
        assert_eq!(window("taz-ges-2021-01-05.pdf", &[8..12, 13..15, 16..18]).as_deref(), Some("20210105"));
    }

    #[test]
    fn test_window_out_of_bounds() {
        assert_eq!(window("short", &[0..4, 5..7]), None);
        assert_eq!(window("ab", &[0..4]), None);
    }
}
