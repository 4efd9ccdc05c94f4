//! Document (PDF) classification.
//!
//! Two ordered rule tables are consulted, first match wins:
//!
//! 1. [`FIXED_RULES`] recognise e-paper downloads by a literal prefix or
//!    suffix and rename them to `<date><canonical suffix>` inside a folder of
//!    the news root.
//! 2. Otherwise the name must start with a date (see
//!    [`parse_leading_date`](crate::parse_leading_date)). [`MARKER_RULES`] look
//!    at what follows the date to pick a folder and tags; the file keeps its
//!    name. A dated file with no known marker still moves to the archive root,
//!    untagged.
//!
//! The order of both tables is part of their behaviour: several markers share
//! leading letters and a name can satisfy more than one rule.

use crate::date::{DateToken, Precision, parse_leading_date};
use crate::layout::Layout;
use crate::models::{Classification, Placement, Tags};
use crate::window;
use std::ops::Range;
use std::path::PathBuf;
use tracing::instrument;

/// Byte offset at which markers are expected: right after a `yyyyMMdd` date.
const MARKER_OFFSET: usize = 8;

enum Matcher {
    Prefix(&'static str),
    Suffix(&'static str),
}
impl Matcher {
    fn matches(&self, file_name: &str) -> bool {
        match self {
            Matcher::Prefix(prefix) => file_name.starts_with(prefix),
            Matcher::Suffix(suffix) => file_name.ends_with(suffix),
        }
    }
}

/// An e-paper source with a fixed naming scheme.
struct FixedRule {
    name: &'static str,
    matcher: Matcher,
    /// Character windows that, concatenated, form the `yyyyMMdd` (or `yyyyMM`)
    /// part of the canonical name.
    date: &'static [Range<usize>],
    suffix: &'static str,
    /// Folder below [`Layout::news`].
    folder: &'static str,
    tags: &'static [&'static str],
}
impl FixedRule {
    /// `None` when the matcher doesn't fire or the name is too short for the
    /// date windows.
    fn apply(&self, file_name: &str, layout: &Layout) -> Option<Placement> {
        if !self.matcher.matches(file_name) {
            return None;
        }
        let Some(date) = window(file_name, self.date) else {
            tracing::debug!(file_name, rule = self.name, "Name too short for date window; skipping rule");
            return None;
        };
        Some(Placement::new(
            self.name,
            layout.news().join(self.folder),
            format!("{date}{}", self.suffix),
            Tags::from(self.tags),
        ))
    }
}

const FIXED_RULES: &[FixedRule] = &[
    // NZZ am Sonntag
    FixedRule {
        name: "nzzs",
        matcher: Matcher::Prefix("NZZS_"),
        date: &[5..13],
        suffix: "nzzs.pdf",
        folder: "nzzs",
        tags: &[],
    },
    FixedRule {
        name: "nzz",
        matcher: Matcher::Prefix("NZZ_"),
        date: &[4..12],
        suffix: "nzz.pdf",
        folder: "nzz",
        tags: &[],
    },
    // Zürichsee-Zeitung
    FixedRule {
        name: "zsz",
        matcher: Matcher::Suffix("_zsr.pdf"),
        date: &[0..8],
        suffix: "zsz.pdf",
        folder: "zsz",
        tags: &[],
    },
    FixedRule {
        name: "20min",
        matcher: Matcher::Prefix("ZH_"),
        date: &[3..11],
        suffix: "_20min.pdf",
        folder: "20min",
        tags: &[],
    },
    // Tages-Anzeiger, dated yyyy-MM-dd
    FixedRule {
        name: "tagesanzeiger",
        matcher: Matcher::Prefix("taz-ges-"),
        date: &[8..12, 13..15, 16..18],
        suffix: "tagesanzeiger.pdf",
        folder: "tagesanzeiger",
        tags: &[],
    },
    FixedRule {
        name: "sonntagszeitung",
        matcher: Matcher::Prefix("sonze-"),
        date: &[6..10, 11..13, 14..16],
        suffix: "sonntagszeitung.pdf",
        folder: "sonntagszeitung",
        tags: &[],
    },
    FixedRule {
        name: "nzzEquity",
        matcher: Matcher::Prefix("EQUITY_"),
        date: &[7..15],
        suffix: "nzzEquity.pdf",
        folder: "nzzEquity",
        tags: &[],
    },
    FixedRule {
        name: "nzzFolio",
        matcher: Matcher::Prefix("FOLIO_"),
        date: &[6..14],
        suffix: "nzzFolio.pdf",
        folder: "nzzFolio",
        tags: &[],
    },
    FixedRule {
        name: "nzzGesellschaft",
        matcher: Matcher::Prefix("GESE_"),
        date: &[5..13],
        suffix: "nzzGesellschaft.pdf",
        folder: "nzzGesellschaft",
        tags: &[],
    },
    // Monthly: only yyyyMM in the name, day is always "00".
    FixedRule {
        name: "acmCommunications",
        matcher: Matcher::Prefix("communications"),
        date: &[14..20],
        suffix: "00acmCommunications.pdf",
        folder: "acmCommunications",
        tags: &["oAcm", "dMagazine", "tTech"],
    },
    FixedRule {
        name: "computerworld",
        matcher: Matcher::Prefix("compw-"),
        date: &[6..10, 11..13, 14..16],
        suffix: "computerworld.pdf",
        folder: "computerworld",
        tags: &["dNews", "tTech"],
    },
];

enum Marker {
    /// Literal text at [`MARKER_OFFSET`].
    At(&'static str),
    /// Case-insensitive suffix of the whole name.
    Suffix(&'static str),
}
impl Marker {
    fn matches(&self, file_name: &str) -> bool {
        match self {
            Marker::At(marker) => file_name.get(MARKER_OFFSET..).is_some_and(|rest| rest.starts_with(marker)),
            Marker::Suffix(suffix) => file_name.to_lowercase().ends_with(suffix),
        }
    }
}

enum Location {
    /// Folder below [`Layout::news`].
    News(&'static str),
    /// Folder below [`Layout::archive`].
    Archive(&'static str),
    /// Folder below [`Layout::archive`], then one folder per year.
    ArchiveByYear(&'static str),
    Diary,
}
impl Location {
    fn resolve(&self, layout: &Layout, date: &DateToken<'_>) -> PathBuf {
        match self {
            Location::News(folder) => layout.news().join(folder),
            Location::Archive(folder) => layout.archive().join(folder),
            Location::ArchiveByYear(folder) => layout.archive().join(folder).join(date.year().unwrap_or_default()),
            Location::Diary => layout.diary(),
        }
    }
}

/// A document category recognised by what follows the leading date.
struct MarkerRule {
    name: &'static str,
    marker: Marker,
    min_precision: Precision,
    location: Location,
    tags: &'static [&'static str],
}
impl MarkerRule {
    const fn at(marker: &'static str, location: Location, tags: &'static [&'static str]) -> Self {
        Self {
            name: marker,
            marker: Marker::At(marker),
            min_precision: Precision::YearMonthDay,
            location,
            tags,
        }
    }

    const fn with_min_precision(mut self, precision: Precision) -> Self {
        self.min_precision = precision;
        self
    }

    fn apply(&self, file_name: &str, date: &DateToken<'_>, layout: &Layout) -> Option<Placement> {
        if date.precision() < self.min_precision || !self.marker.matches(file_name) {
            return None;
        }
        Some(Placement::new(self.name, self.location.resolve(layout, date), file_name, Tags::from(self.tags)))
    }
}

const MARKER_RULES: &[MarkerRule] = &[
    // Inside Channels
    MarkerRule::at("ic", Location::News("ic"), &["dNews", "tTech"]),
    // Invoices
    MarkerRule::at("rg", Location::Archive("done/finance"), &["tFinance", "dBill"]),
    MarkerRule::at("zkb", Location::Archive("done/finance"), &["tFinance", "dBill", "oZkb"]),
    // PostFinance
    MarkerRule::at("pf", Location::Archive("done/finance"), &["tFinance", "dBill", "oPost"]),
    // Salary statements
    MarkerRule::at("lohn", Location::Archive("done/finance"), &["tFinance", "dStatement"]),
    MarkerRule::at("slkk", Location::Archive("done/finance"), &["tFinance", "tInsurance", "oSlkk"]),
    // Meeting minutes
    MarkerRule::at("mmb", Location::Archive("done/adnovum"), &["dMinutes", "oAdnovum"]),
    // Postcards
    MarkerRule::at("karte", Location::Archive("done/corr"), &["dCorr", "DPcard"]),
    MarkerRule::at("diary", Location::Diary, &["oBruno", "dDiary"]),
    MarkerRule::at("abstract_", Location::ArchiveByYear("imac/abstract"), &["dAbstract"])
        .with_min_precision(Precision::Year),
    // KOF economic reports
    MarkerRule::at("kof", Location::News("kof"), &["dReport", "tEco"]),
    MarkerRule::at("book", Location::Archive("toSandisk/books"), &["dBook"]),
    MarkerRule::at("sise", Location::Archive("done/orgunits/sise"), &["oSise"]),
    MarkerRule::at("awuz", Location::Archive("done/orgunits/awuz"), &["oAwuzUzha"]),
    MarkerRule::at("informatikSpektrum", Location::News("informatikSpektrum"), &["tTech", "dArticle"]),
    // Presentations are recognised by the end of the name, wherever they sit
    // after the date. Must stay ahead of the contract markers.
    MarkerRule {
        name: "pres",
        marker: Marker::Suffix("pres.pdf"),
        min_precision: Precision::Year,
        location: Location::Archive("done/business"),
        tags: &["dPres"],
    },
    // Contracts
    MarkerRule::at("itc", Location::Archive("done/business"), &["dContract", "dItc"]),
    MarkerRule::at("swd", Location::Archive("done/business"), &["dContract", "dSwd"]),
    MarkerRule::at("sla", Location::Archive("done/business"), &["dContract", "dSla"]),
    MarkerRule::at("nda", Location::Archive("done/business"), &["dContract", "dNda"]),
    MarkerRule::at("offer", Location::Archive("done/business"), &["dContract", "dOffer"]),
];

/// Classifies a document by its file name.
///
/// Total and deterministic: every name yields exactly one [`Classification`].
///
/// ```
/// use renfiles_classify::{Classification, Layout, classify_document};
///
/// let layout = Layout::new("/archive");
/// let Classification::Matched(placement) = classify_document("NZZS_20210101epaper.pdf", &layout) else {
///     panic!("expected a match");
/// };
/// assert_eq!(placement.file_name, "20210101nzzs.pdf");
/// assert!(placement.tags.is_empty());
///
/// assert!(!classify_document("misc_no_date.pdf", &layout).is_matched());
/// ```
#[instrument(level = "debug", skip(layout))]
pub fn classify_document(file_name: &str, layout: &Layout) -> Classification {
    if let Some(placement) = FIXED_RULES.iter().find_map(|rule| rule.apply(file_name, layout)) {
        return Classification::Matched(placement);
    }

    let date = parse_leading_date(file_name);
    if date.is_none() {
        tracing::debug!(file_name, "Not recognized");
        return Classification::Unrecognized;
    }

    match MARKER_RULES.iter().find_map(|rule| rule.apply(file_name, &date, layout)) {
        Some(placement) => Classification::Matched(placement),
        None => {
            tracing::debug!(file_name, date = date.as_str(), "Leading date without a known marker");
            Classification::Matched(Placement::new("dated", layout.archive(), file_name, Tags::new()))
        },
    }
}
