//! Leading date detection.
//!
//! Downloads that were renamed by hand usually start with a `yyyyMMdd` date,
//! sometimes only `yyyyMM` or `yyyy`. [`parse_leading_date`] finds the longest
//! such prefix whose components are within range. There is no calendar
//! validation: `20210231` is accepted.

use std::ops::{Range, RangeInclusive};
use tracing::instrument;

/// How much of a date was found at the start of a string.
///
/// Ordered from least to most precise, so `precision >= Precision::YearMonth`
/// reads as "at least a month was found".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precision {
    /// No leading date.
    #[default]
    None,
    /// `yyyy`
    Year,
    /// `yyyyMM`
    YearMonth,
    /// `yyyyMMdd`
    YearMonthDay,
}
impl Precision {
    /// Number of leading characters covered by a token of this precision.
    pub const fn width(&self) -> usize {
        match self {
            Precision::None => 0,
            Precision::Year => 4,
            Precision::YearMonth => 6,
            Precision::YearMonthDay => 8,
        }
    }
}

/// A date found at the start of a string.
///
/// The token borrows its text from the parsed input and is always a prefix of
/// it, 0, 4, 6 or 8 characters long depending on [`Precision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateToken<'a> {
    precision: Precision,
    text: &'a str,
}
impl<'a> DateToken<'a> {
    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// `true` when no date was found.
    pub fn is_none(&self) -> bool {
        self.precision == Precision::None
    }

    /// The four year digits, if a date was found.
    pub fn year(&self) -> Option<&'a str> {
        self.text.get(0..4)
    }
}

const YEAR: (Range<usize>, RangeInclusive<i32>) = (0..4, 1..=2999);
const MONTH: (Range<usize>, RangeInclusive<i32>) = (4..6, 1..=12);
const DAY: (Range<usize>, RangeInclusive<i32>) = (6..8, 1..=31);

/// Extracts the most precise leading date from `s`.
///
/// Components are checked in order (year, month, day); the first one that is
/// missing, non-numeric or out of range stops the extension and the precision
/// reached so far is returned. Never fails: a string without a usable year
/// yields a token of [`Precision::None`] with empty text.
///
/// ```
/// use renfiles_classify::{Precision, parse_leading_date};
///
/// assert_eq!(parse_leading_date("20210115rg_invoice.pdf").as_str(), "20210115");
/// assert_eq!(parse_leading_date("202113_report.pdf").precision(), Precision::Year);
/// assert!(parse_leading_date("misc_no_date.pdf").is_none());
/// ```
#[instrument(level = "trace", ret)]
pub fn parse_leading_date(s: &str) -> DateToken<'_> {
    let precision = [YEAR, MONTH, DAY]
        .into_iter()
        .zip([Precision::Year, Precision::YearMonth, Precision::YearMonthDay])
        .take_while(|((window, valid), _)| component_in_range(s, window.clone(), valid))
        .last()
        .map(|(_, precision)| precision)
        .unwrap_or_default();
    // Every window that passed was sliced on character boundaries already.
    let text = s.get(..precision.width()).unwrap_or_default();
    DateToken { precision, text }
}

fn component_in_range(s: &str, window: Range<usize>, valid: &RangeInclusive<i32>) -> bool {
    s.get(window).and_then(|digits| digits.parse::<i32>().ok()).is_some_and(|value| valid.contains(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("20210115rg_invoice.pdf", Precision::YearMonthDay, "20210115")]
    #[case("20210101", Precision::YearMonthDay, "20210101")]
    #[case("29991231_far_future.pdf", Precision::YearMonthDay, "29991231")]
    #[case("20210231_no_calendar_check.pdf", Precision::YearMonthDay, "20210231")]
    #[case("202103_statement.pdf", Precision::YearMonth, "202103")]
    #[case("202103", Precision::YearMonth, "202103")]
    #[case("2021032", Precision::YearMonth, "202103")]
    #[case("20210100.pdf", Precision::YearMonth, "202101")]
    #[case("20210132.pdf", Precision::YearMonth, "202101")]
    #[case("2021abstract_notes.pdf", Precision::Year, "2021")]
    #[case("2021", Precision::Year, "2021")]
    #[case("20211.pdf", Precision::Year, "2021")]
    #[case("202100_zero_month.pdf", Precision::Year, "2021")]
    #[case("202113_bad_month.pdf", Precision::Year, "2021")]
    #[case("misc_no_date.pdf", Precision::None, "")]
    #[case("0000_file.pdf", Precision::None, "")]
    #[case("3000_file.pdf", Precision::None, "")]
    #[case("-001_negative.pdf", Precision::None, "")]
    #[case("202", Precision::None, "")]
    #[case("", Precision::None, "")]
    fn test_leading_date(#[case] input: &str, #[case] precision: Precision, #[case] text: &str) {
        let token = parse_leading_date(input);
        assert_eq!(token.precision(), precision);
        assert_eq!(token.as_str(), text);
        assert_eq!(token.as_str().len(), precision.width());
        assert!(input.starts_with(token.as_str()));
    }

    #[test]
    fn test_day_not_checked_after_bad_month() {
        // "13" would be a valid day, but an invalid month ends the search.
        assert_eq!(parse_leading_date("20211313").precision(), Precision::Year);
    }

    #[test]
    fn test_multibyte_characters_do_not_panic() {
        assert!(parse_leading_date("Zürich.pdf").is_none());
        assert_eq!(parse_leading_date("2021ü1").precision(), Precision::Year);
        assert_eq!(parse_leading_date("202101é_x").precision(), Precision::YearMonth);
    }

    #[test]
    fn test_year_accessor() {
        assert_eq!(parse_leading_date("20210115x").year(), Some("2021"));
        assert_eq!(parse_leading_date("nope").year(), None);
    }

    #[test]
    fn test_precision_ordering() {
        assert!(Precision::YearMonthDay > Precision::YearMonth);
        assert!(Precision::YearMonth > Precision::Year);
        assert!(Precision::Year > Precision::None);
    }
}
