//! Free-text and fixed-field date normalization.
//!
//! Catalog dates arrive as card-catalog strings ("Spr. 1999", "Oct. 5, 1987")
//! or as MARC fixed-field year codes with unknown digits ("19uu"). This module
//! turns them into ISO-8601 dates and [`DateRange`]s:
//!
//! - [`free_text_to_iso_date`] — a single `YYYY-MM-DD` from free text
//! - [`date_range_from_years`] — a range from two possibly partial years
//! - [`date_range_from_single_date`] — a day, month or year range from components
//!
//! Every bound is checked against the ISO-8601 calendar before it is returned.
//!
//! # Examples
//!
//! ```
//! use marcnorm::temporal::{date_range_from_years, free_text_to_iso_date};
//!
//! assert_eq!(free_text_to_iso_date("Spr. 1999").as_deref(), Some("1999-04-01"));
//! assert_eq!(free_text_to_iso_date("tomorrow"), None);
//!
//! let range = date_range_from_years("19uu", "19uu", "19uu").unwrap();
//! assert_eq!(range.gte(), "1900");
//! assert_eq!(range.lt(), Some("2000"));
//! ```

use crate::config::NormalizerConfig;
use crate::error::{NormalizeError, Result};
use crate::range::DateRange;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

lazy_static! {
    static ref FOUR_DIGIT_YEAR: Regex = Regex::new(r"(?:^|\D)(\d{4})(?:\D|$)").unwrap();
    static ref DEFAULT_NORMALIZER: TemporalNormalizer =
        TemporalNormalizer::new(&NormalizerConfig::default())
            .expect("default season vocabulary compiles");
}

/// Formats tried, in order, on cleaned-up free text.
const DAY_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d %Y",
    "%d %b %Y",
    "%B %d %Y",
    "%d %B %Y",
];

/// Formats tried on text naming only a month and year, prefixed with `1 `.
const FIRST_OF_MONTH_FORMATS: &[&str] = &["%d %b %Y", "%d %B %Y"];

/// Highest year a four-digit bound can name.
const MAX_YEAR: u32 = 9999;

#[derive(Debug)]
struct SeasonPattern {
    pattern: Regex,
    month: u32,
    day: u32,
}

/// Date normalizer compiled from a season vocabulary.
#[derive(Debug)]
pub struct TemporalNormalizer {
    seasons: Vec<SeasonPattern>,
    placeholders: Vec<char>,
}

impl TemporalNormalizer {
    /// Compile the season vocabulary and placeholder set of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::Config`] if a season pattern fails to compile.
    pub fn new(config: &NormalizerConfig) -> Result<Self> {
        let mut seasons = Vec::with_capacity(config.seasons.len());
        for season in &config.seasons {
            let names: Vec<String> = season
                .names
                .iter()
                .map(|n| n.trim().trim_end_matches('.'))
                .filter(|n| !n.is_empty())
                .map(regex::escape)
                .collect();
            // An empty alternation would match at every word boundary
            if names.is_empty() {
                continue;
            }
            let pattern = RegexBuilder::new(&format!(r"\b(?:{})\b\.?", names.join("|")))
                .case_insensitive(true)
                .build()
                .map_err(|e| NormalizeError::Config(e.to_string()))?;
            seasons.push(SeasonPattern {
                pattern,
                month: season.month,
                day: season.day,
            });
        }

        Ok(TemporalNormalizer {
            seasons,
            placeholders: config.unknown_digit_placeholders.clone(),
        })
    }

    /// Convert free text to a `YYYY-MM-DD` date.
    ///
    /// Text without a four-digit year yields `None`. A season name maps to
    /// its configured month and day; otherwise a small set of common date
    /// layouts is tried, falling back to month-only and year-only forms.
    #[must_use]
    pub fn free_text_to_iso_date(&self, s: &str) -> Option<String> {
        let year = FOUR_DIGIT_YEAR.captures(s)?.get(1)?.as_str();

        if let Some((month, day)) = self.season_of(s) {
            let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month, day)?;
            return Some(date.format("%Y-%m-%d").to_string());
        }

        parse_generic(s, year.parse().ok()?).map(|date| date.format("%Y-%m-%d").to_string())
    }

    /// Season mentioned earliest in `s`.
    fn season_of(&self, s: &str) -> Option<(u32, u32)> {
        self.seasons
            .iter()
            .filter_map(|season| {
                season
                    .pattern
                    .find(s)
                    .map(|m| (m.start(), season.month, season.day))
            })
            .min_by_key(|(start, _, _)| *start)
            .map(|(_, month, day)| (month, day))
    }

    /// Build a range from two possibly partial years.
    ///
    /// `first` is rounded down and `second` up, replacing unknown digits with
    /// `0` and `9`. The result is `{gte, lt: upper + 1}`, or `{gte, lte: "9999"}`
    /// when `upper + 1` has five digits.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::InvalidDate`] if either year is not four
    /// digits or placeholders, and [`NormalizeError::InconsistentRange`] if
    /// the rounded lower bound is after the rounded upper bound.
    pub fn date_range_from_years(&self, first: &str, second: &str, raw: &str) -> Result<DateRange> {
        let lower = self.round_year(first, '0', raw)?;
        let upper = self.round_year(second, '9', raw)?;

        if lower > upper {
            return Err(NormalizeError::InconsistentRange {
                raw: raw.to_string(),
                lower,
                upper,
            });
        }

        let next = upper
            .parse::<u32>()
            .map_err(|e| NormalizeError::invalid_date(raw, e.to_string()))?
            + 1;
        if next > MAX_YEAR {
            DateRange::inclusive(lower, MAX_YEAR.to_string())
        } else {
            DateRange::exclusive(lower, format!("{next:04}"))
        }
    }

    /// Build a range from year, month and day components.
    ///
    /// - `month` not two digits: the whole year, via [`Self::date_range_from_years`]
    /// - `day` two digits: `{gte: day, lte: end of day}`
    /// - otherwise the whole month, `{gte: first of month, lt: first of next month}`;
    ///   December ends at `lt: Dec 31 23:59:59` of the same year
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::InvalidDate`] if `year` is not four digits or a
    /// bound is not a real calendar date.
    pub fn date_range_from_single_date(
        &self,
        year: &str,
        month: &str,
        day: &str,
        raw: &str,
    ) -> Result<DateRange> {
        if !is_digits(year, 4) {
            return Err(NormalizeError::invalid_date(raw, "year must be four digits"));
        }
        if !is_digits(month, 2) {
            return self.date_range_from_years(year, year, raw);
        }

        if is_digits(day, 2) {
            let gte = format!("{year}-{month}-{day}");
            let lte = format!("{gte}T23:59:59");
            validate_iso(&gte, raw)?;
            validate_iso(&lte, raw)?;
            return DateRange::inclusive(gte, lte);
        }

        let gte = format!("{year}-{month}-01");
        validate_iso(&gte, raw)?;
        let month_number: u32 = month
            .parse()
            .map_err(|_| NormalizeError::invalid_date(raw, "month is not numeric"))?;
        let lt = if month_number == 12 {
            format!("{year}-12-31T23:59:59")
        } else {
            format!("{year}-{:02}-01", month_number + 1)
        };
        validate_iso(&lt, raw)?;
        DateRange::exclusive(gte, lt)
    }

    fn round_year(&self, year: &str, fill: char, raw: &str) -> Result<String> {
        let year = year.trim();
        if year.chars().count() != 4 {
            return Err(NormalizeError::invalid_date(
                raw,
                format!("year {year:?} is not four characters"),
            ));
        }
        year.chars()
            .map(|c| match c {
                d if d.is_ascii_digit() => Ok(d),
                p if self.placeholders.contains(&p) => Ok(fill),
                other => Err(NormalizeError::invalid_date(
                    raw,
                    format!("unexpected character {other:?} in year"),
                )),
            })
            .collect()
    }
}

/// Convert free text to a `YYYY-MM-DD` date using the default vocabulary.
///
/// See [`TemporalNormalizer::free_text_to_iso_date`].
#[must_use]
pub fn free_text_to_iso_date(s: &str) -> Option<String> {
    DEFAULT_NORMALIZER.free_text_to_iso_date(s)
}

/// Build a range from two possibly partial years using the default placeholders.
///
/// See [`TemporalNormalizer::date_range_from_years`].
///
/// # Errors
///
/// As [`TemporalNormalizer::date_range_from_years`].
pub fn date_range_from_years(first: &str, second: &str, raw: &str) -> Result<DateRange> {
    DEFAULT_NORMALIZER.date_range_from_years(first, second, raw)
}

/// Build a range from year, month and day components.
///
/// See [`TemporalNormalizer::date_range_from_single_date`].
///
/// # Errors
///
/// As [`TemporalNormalizer::date_range_from_single_date`].
pub fn date_range_from_single_date(
    year: &str,
    month: &str,
    day: &str,
    raw: &str,
) -> Result<DateRange> {
    DEFAULT_NORMALIZER.date_range_from_single_date(year, month, day, raw)
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

fn validate_iso(value: &str, raw: &str) -> Result<()> {
    let valid = if value.contains('T') {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
    } else {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
    };
    if valid {
        Ok(())
    } else {
        Err(NormalizeError::invalid_date(
            raw,
            format!("{value} is not an ISO-8601 date"),
        ))
    }
}

/// Parse `s` as a date in `year`. Layouts that read the year differently
/// (e.g. "Jan 1999" as Jan 19, year 99) are discarded.
fn parse_generic(s: &str, year: i32) -> Option<NaiveDate> {
    let in_year = |date: &NaiveDate| date.year() == year;
    let cleaned = s
        .replace([',', '.'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if let Some(date) = DAY_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&cleaned, fmt).ok().filter(in_year))
    {
        return Some(date);
    }

    // Month and year only: first of the month
    let month_first = format!("1 {cleaned}");
    if let Some(date) = FIRST_OF_MONTH_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&month_first, fmt).ok().filter(in_year))
        .or_else(|| {
            NaiveDate::parse_from_str(&format!("{cleaned}-01"), "%Y-%m-%d")
                .ok()
                .filter(in_year)
        })
    {
        return Some(date);
    }

    // Year only: first of the year
    if is_digits(&cleaned, 4) {
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------
    // Free text
    // ------------------------------------------------------------------

    #[test]
    fn test_seasons() {
        let cases = [
            ("Spr. 1999", "1999-04-01"),
            ("spring 1999", "1999-04-01"),
            ("Summer 2001", "2001-07-01"),
            ("Sum. 2001", "2001-07-01"),
            ("Fall 1987", "1987-10-01"),
            ("Autumn 1987", "1987-10-01"),
            ("Wint. 1960", "1960-01-01"),
            ("1960 winter", "1960-01-01"),
        ];
        for (input, expected) in cases {
            assert_eq!(free_text_to_iso_date(input).as_deref(), Some(expected), "{input}");
        }
    }

    #[test]
    fn test_season_word_inside_other_word_ignored() {
        // "Sprague" must not read as spring
        assert_eq!(free_text_to_iso_date("Sprague 1999").as_deref(), None);
    }

    #[test]
    fn test_generic_dates() {
        assert_eq!(free_text_to_iso_date("Oct. 5, 1987").as_deref(), Some("1987-10-05"));
        assert_eq!(free_text_to_iso_date("5 October 1987").as_deref(), Some("1987-10-05"));
        assert_eq!(free_text_to_iso_date("1987-10-05").as_deref(), Some("1987-10-05"));
        assert_eq!(free_text_to_iso_date("Jan. 1999").as_deref(), Some("1999-01-01"));
        assert_eq!(free_text_to_iso_date("1999").as_deref(), Some("1999-01-01"));
    }

    #[test]
    fn test_full_month_names() {
        assert_eq!(free_text_to_iso_date("October 5, 1987").as_deref(), Some("1987-10-05"));
        assert_eq!(free_text_to_iso_date("5 October 1987").as_deref(), Some("1987-10-05"));
        assert_eq!(free_text_to_iso_date("October 1987").as_deref(), Some("1987-10-01"));
    }

    #[test]
    fn test_no_year_is_none() {
        assert_eq!(free_text_to_iso_date("tomorrow"), None);
        assert_eq!(free_text_to_iso_date("Spring"), None);
        assert_eq!(free_text_to_iso_date("v. 12"), None);
    }

    #[test]
    fn test_unparseable_with_year_is_none() {
        assert_eq!(free_text_to_iso_date("ca. 1999 or later, maybe"), None);
    }

    // ------------------------------------------------------------------
    // Year ranges
    // ------------------------------------------------------------------

    #[test]
    fn test_years_with_unknown_digits() {
        let range = date_range_from_years("19uu", "19uu", "19uu").unwrap();
        assert_eq!(range.gte(), "1900");
        assert_eq!(range.lt(), Some("2000"));

        let range = date_range_from_years("195u", "1962", "195u-1962").unwrap();
        assert_eq!(range.gte(), "1950");
        assert_eq!(range.lt(), Some("1963"));
    }

    #[test]
    fn test_years_open_ended() {
        let range = date_range_from_years("1990", "9999", "1990-").unwrap();
        assert_eq!(range.gte(), "1990");
        assert_eq!(range.lte(), Some("9999"));

        let range = date_range_from_years("1990", "99uu", "1990-").unwrap();
        assert_eq!(range.lte(), Some("9999"));
    }

    #[test]
    fn test_years_reversed_rejected() {
        let err = date_range_from_years("2001", "1999", "2001-1999").unwrap_err();
        match err {
            NormalizeError::InconsistentRange { raw, lower, upper } => {
                assert_eq!(raw, "2001-1999");
                assert_eq!(lower, "2001");
                assert_eq!(upper, "1999");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_years_malformed_rejected() {
        assert!(matches!(
            date_range_from_years("19", "1999", "19-1999"),
            Err(NormalizeError::InvalidDate { .. })
        ));
        assert!(matches!(
            date_range_from_years("19#9", "1999", "raw"),
            Err(NormalizeError::InvalidDate { .. })
        ));
    }

    // ------------------------------------------------------------------
    // Single dates
    // ------------------------------------------------------------------

    #[test]
    fn test_single_date_month() {
        let range = date_range_from_single_date("2016", "10", "", "201610").unwrap();
        assert_eq!(range.gte(), "2016-10-01");
        assert_eq!(range.lt(), Some("2016-11-01"));
    }

    #[test]
    fn test_single_date_december_stays_in_year() {
        let range = date_range_from_single_date("2016", "12", "  ", "201612").unwrap();
        assert_eq!(range.gte(), "2016-12-01");
        assert_eq!(range.lt(), Some("2016-12-31T23:59:59"));
    }

    #[test]
    fn test_single_date_day() {
        let range = date_range_from_single_date("2016", "02", "29", "20160229").unwrap();
        assert_eq!(range.gte(), "2016-02-29");
        assert_eq!(range.lte(), Some("2016-02-29T23:59:59"));
    }

    #[test]
    fn test_single_date_without_month_covers_year() {
        let range = date_range_from_single_date("2016", "uu", "", "2016").unwrap();
        assert_eq!(range.gte(), "2016");
        assert_eq!(range.lt(), Some("2017"));
    }

    #[test]
    fn test_single_date_invalid_components() {
        assert!(date_range_from_single_date("16", "10", "", "16").is_err());
        assert!(date_range_from_single_date("19uu", "10", "", "19uu").is_err());
        assert!(date_range_from_single_date("2016", "13", "", "201613").is_err());
        assert!(date_range_from_single_date("2015", "02", "29", "20150229").is_err());
        assert!(date_range_from_single_date("2016", "00", "", "201600").is_err());
    }

    #[test]
    fn test_custom_vocabulary() {
        let mut config = NormalizerConfig::default();
        config.seasons.push(crate::config::Season {
            names: vec!["lente".to_string()],
            month: 3,
            day: 21,
        });
        config.unknown_digit_placeholders = vec!['?'];
        let normalizer = TemporalNormalizer::new(&config).unwrap();

        assert_eq!(
            normalizer.free_text_to_iso_date("Lente 1920").as_deref(),
            Some("1920-03-21")
        );
        let range = normalizer.date_range_from_years("19??", "19??", "19??").unwrap();
        assert_eq!(range.lt(), Some("2000"));
        assert!(normalizer.date_range_from_years("19uu", "19uu", "19uu").is_err());
    }
}
