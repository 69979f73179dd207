//! Volume and issue ranges from free-text enumeration.
//!
//! Item enumeration ("v. 23-25", "Bd. 4", "reel 12", "no. 3/4",
//! "12e jaarg.") is matched against an ordered table of label patterns. Only
//! the first pattern that matches anything is used, so "v. 3 no. 2" yields
//! the volume alone rather than two unrelated ranges.
//!
//! # Examples
//!
//! ```
//! use marcnorm::enumeration::parse_volume;
//!
//! assert_eq!(parse_volume("v. 23-25"), vec![[23, 25]]);
//! assert_eq!(parse_volume("v. 3 no. 2"), vec![[3, 3]]);
//! assert_eq!(parse_volume("no. 7"), vec![[7, 7]]);
//! assert!(parse_volume("Box 12 folder 3").is_empty());
//! ```

use crate::range::NumericRange;
use lazy_static::lazy_static;
use regex::Regex;

/// Kind of enumeration a pattern recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeLabel {
    /// "volume", "vol.", "v."
    Volume,
    /// "Bd." (Band)
    Band,
    /// "reel", "r."
    Reel,
    /// "no."
    Number,
    /// "jaarg." (jaargang), number before the label
    Jaargang,
    /// A bare 1-3 digit number making up the whole text
    Bare,
}

#[derive(Debug)]
struct VolumePattern {
    label: VolumeLabel,
    pattern: Regex,
}

// A run of numbers joined by range or list separators: "23", "23-25", "3/4", "1 - 2 - 3"
const NUMBERS: &str = r"(\d+(?:\s*[-–/]\s*\d+)*)";

lazy_static! {
    static ref DIGITS: Regex = Regex::new(r"\d+").unwrap();
    static ref PATTERNS: Vec<VolumePattern> = [
        (VolumeLabel::Volume, format!(r"(?i)\b(?:volume|vol\.|v\.)\s*{NUMBERS}")),
        (VolumeLabel::Band, format!(r"(?i)\bbd\.\s*{NUMBERS}")),
        (VolumeLabel::Reel, format!(r"(?i)\b(?:reel|r\.)\s*{NUMBERS}")),
        (VolumeLabel::Number, format!(r"(?i)\bno\.\s*{NUMBERS}")),
        (VolumeLabel::Jaargang, format!(r"(?i){NUMBERS}\s*(?:e|ste|de)?\.?\s*jaarg\.")),
        (VolumeLabel::Bare, r"^\s*(\d{1,3})\s*$".to_string()),
    ]
    .into_iter()
    .map(|(label, pattern)| VolumePattern {
        label,
        pattern: Regex::new(&pattern).unwrap(),
    })
    .collect();
}

/// Extract volume ranges from enumeration text.
///
/// Each match of the first matching pattern becomes one `[start, end]`
/// range: a single number gives `[n, n]`, two give `[lo, hi]`, more give
/// `[first, last]`. Matches with a number outside the 32-bit range are dropped.
#[must_use]
pub fn parse_volume(text: &str) -> Vec<[i32; 2]> {
    parse_volume_ranges(text)
        .map(|(_, ranges)| ranges.into_iter().map(Into::into).collect())
        .unwrap_or_default()
}

/// Like [`parse_volume`], also reporting which label matched.
///
/// The label is chosen by the first pattern that matches at all, so the
/// ranges may be empty when every number under that label was out of range.
#[must_use]
pub fn parse_volume_ranges(text: &str) -> Option<(VolumeLabel, Vec<NumericRange>)> {
    let volume_pattern = PATTERNS.iter().find(|p| p.pattern.is_match(text))?;
    let ranges = volume_pattern
        .pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).and_then(|m| range_of(m.as_str())))
        .collect();
    Some((volume_pattern.label, ranges))
}

fn range_of(numbers: &str) -> Option<NumericRange> {
    let parsed: Vec<i32> = DIGITS
        .find_iter(numbers)
        .map(|m| m.as_str().parse::<i32>().ok())
        .collect::<Option<Vec<_>>>()?;
    match parsed.as_slice() {
        [] => None,
        [only] => Some(NumericRange::single(*only)),
        [first, .., last] => Some(NumericRange::new(*first, *last)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_labels() {
        assert_eq!(parse_volume("v. 23-25"), vec![[23, 25]]);
        assert_eq!(parse_volume("V.4"), vec![[4, 4]]);
        assert_eq!(parse_volume("vol. 12"), vec![[12, 12]]);
        assert_eq!(parse_volume("Volume 3"), vec![[3, 3]]);
    }

    #[test]
    fn test_multiple_matches_of_one_label() {
        assert_eq!(parse_volume("v. 1-3, v. 5"), vec![[1, 3], [5, 5]]);
    }

    #[test]
    fn test_first_label_wins() {
        assert_eq!(parse_volume("v. 3 no. 2"), vec![[3, 3]]);
        assert_eq!(parse_volume("no. 2 reel 9"), vec![[9, 9]]);
        let (label, _) = parse_volume_ranges("no. 2").unwrap();
        assert_eq!(label, VolumeLabel::Number);
    }

    #[test]
    fn test_other_labels() {
        assert_eq!(parse_volume("Bd. 7"), vec![[7, 7]]);
        assert_eq!(parse_volume("reel 100-102"), vec![[100, 102]]);
        assert_eq!(parse_volume("r. 5"), vec![[5, 5]]);
        assert_eq!(parse_volume("no. 3/4"), vec![[3, 4]]);
        assert_eq!(parse_volume("12e jaarg."), vec![[12, 12]]);
    }

    #[test]
    fn test_more_than_two_numbers_collapse() {
        assert_eq!(parse_volume("v. 1-2-3"), vec![[1, 3]]);
    }

    #[test]
    fn test_reversed_numbers_are_reordered() {
        assert_eq!(parse_volume("v. 25-23"), vec![[23, 25]]);
    }

    #[test]
    fn test_bare_number_only_when_whole_text() {
        assert_eq!(parse_volume("42"), vec![[42, 42]]);
        assert_eq!(parse_volume(" 7 "), vec![[7, 7]]);
        assert!(parse_volume("1234").is_empty());
        assert!(parse_volume("Box 42").is_empty());
    }

    #[test]
    fn test_label_inside_word_ignored() {
        assert!(parse_volume("rev. 3").is_empty());
        assert!(parse_volume("nr. 5").is_empty());
    }

    #[test]
    fn test_out_of_range_numbers_dropped() {
        assert!(parse_volume("v. 99999999999").is_empty());
        assert_eq!(parse_volume("v. 99999999999, v. 2"), vec![[2, 2]]);
    }

    #[test]
    fn test_dropped_numbers_do_not_fall_through_to_next_label() {
        assert!(parse_volume("v. 99999999999 no. 3").is_empty());
        let (label, ranges) = parse_volume_ranges("v. 99999999999 no. 3").unwrap();
        assert_eq!(label, VolumeLabel::Volume);
        assert!(ranges.is_empty());
    }

    #[test]
    fn test_no_match() {
        assert!(parse_volume("").is_empty());
        assert!(parse_volume("index").is_empty());
        assert!(parse_volume_ranges("index").is_none());
    }
}
