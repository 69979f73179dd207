//! Typed date and numeric ranges.
//!
//! Both range types keep their lower bound at or below their upper bound.
//! Constructors either repair the order ([`NumericRange::new`],
//! [`DateRange::ordered`]) or reject inverted input with
//! [`NormalizeError::InvalidRange`]; no constructor returns an inverted range.
//!
//! Serialized, a [`DateRange`] is an object with `gte` and one of `lte`/`lt`,
//! and a [`NumericRange`] is a two-element array, which is the shape search
//! indexes expect for range fields.

use crate::error::{NormalizeError, Result};
use serde::{Deserialize, Serialize};

/// Order a pair so the smaller comes first.
pub fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if b < a {
        (b, a)
    } else {
        (a, b)
    }
}

/// Upper end of a [`DateRange`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpperBound {
    /// Inclusive bound
    Lte(String),
    /// Exclusive bound
    Lt(String),
}

impl UpperBound {
    /// The bound's date string
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            UpperBound::Lte(s) | UpperBound::Lt(s) => s,
        }
    }
}

/// A range of ISO-8601 dates (or truncated dates such as `"1999"`).
///
/// # Examples
///
/// ```
/// use marcnorm::DateRange;
///
/// let range = DateRange::exclusive("1900", "2000").unwrap();
/// assert_eq!(
///     serde_json::to_string(&range).unwrap(),
///     r#"{"gte":"1900","lt":"2000"}"#
/// );
/// assert!(DateRange::inclusive("2001", "1999").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "UncheckedDateRange")]
pub struct DateRange {
    gte: String,
    #[serde(flatten)]
    upper: UpperBound,
}

/// Wire form of a [`DateRange`] before its bounds are checked.
#[derive(Deserialize)]
struct UncheckedDateRange {
    gte: String,
    #[serde(flatten)]
    upper: UpperBound,
}

impl TryFrom<UncheckedDateRange> for DateRange {
    type Error = NormalizeError;

    fn try_from(raw: UncheckedDateRange) -> Result<Self> {
        match raw.upper {
            UpperBound::Lte(lte) => DateRange::inclusive(raw.gte, lte),
            UpperBound::Lt(lt) => DateRange::exclusive(raw.gte, lt),
        }
    }
}

impl DateRange {
    /// Build `{gte, lte}`.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::InvalidRange`] if `gte` sorts after `lte`.
    pub fn inclusive(gte: impl Into<String>, lte: impl Into<String>) -> Result<Self> {
        let (gte, lte) = (gte.into(), lte.into());
        if gte > lte {
            return Err(NormalizeError::InvalidRange {
                lower: gte,
                upper: lte,
            });
        }
        Ok(DateRange {
            gte,
            upper: UpperBound::Lte(lte),
        })
    }

    /// Build `{gte, lt}`.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::InvalidRange`] unless `gte` sorts strictly before `lt`.
    pub fn exclusive(gte: impl Into<String>, lt: impl Into<String>) -> Result<Self> {
        let (gte, lt) = (gte.into(), lt.into());
        if gte >= lt {
            return Err(NormalizeError::InvalidRange {
                lower: gte,
                upper: lt,
            });
        }
        Ok(DateRange {
            gte,
            upper: UpperBound::Lt(lt),
        })
    }

    /// Build an inclusive range from two bounds in either order.
    #[must_use]
    pub fn ordered(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (gte, lte) = ordered(a.into(), b.into());
        DateRange {
            gte,
            upper: UpperBound::Lte(lte),
        }
    }

    /// Inclusive lower bound
    #[must_use]
    pub fn gte(&self) -> &str {
        &self.gte
    }

    /// Upper bound
    #[must_use]
    pub fn upper(&self) -> &UpperBound {
        &self.upper
    }

    /// The inclusive upper bound, if this range has one
    #[must_use]
    pub fn lte(&self) -> Option<&str> {
        match &self.upper {
            UpperBound::Lte(s) => Some(s),
            UpperBound::Lt(_) => None,
        }
    }

    /// The exclusive upper bound, if this range has one
    #[must_use]
    pub fn lt(&self) -> Option<&str> {
        match &self.upper {
            UpperBound::Lt(s) => Some(s),
            UpperBound::Lte(_) => None,
        }
    }
}

/// An inclusive `[start, end]` range of 32-bit integers with `start <= end`.
///
/// # Examples
///
/// ```
/// use marcnorm::NumericRange;
///
/// let range = NumericRange::new(25, 23);
/// assert_eq!((range.start(), range.end()), (23, 25));
/// assert_eq!(serde_json::to_string(&range).unwrap(), "[23,25]");
/// assert!(NumericRange::from_wide(1, 1 << 40).is_none());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct NumericRange {
    start: i32,
    end: i32,
}

impl NumericRange {
    /// Build a range from two bounds in either order.
    #[must_use]
    pub fn new(a: i32, b: i32) -> Self {
        let (start, end) = ordered(a, b);
        NumericRange { start, end }
    }

    /// A range covering a single value
    #[must_use]
    pub fn single(n: i32) -> Self {
        NumericRange { start: n, end: n }
    }

    /// Build a range from wide integers, or `None` if either falls outside `i32`.
    #[must_use]
    pub fn from_wide(a: i64, b: i64) -> Option<Self> {
        Some(Self::new(i32::try_from(a).ok()?, i32::try_from(b).ok()?))
    }

    /// Lower bound
    #[must_use]
    pub fn start(&self) -> i32 {
        self.start
    }

    /// Upper bound
    #[must_use]
    pub fn end(&self) -> i32 {
        self.end
    }

    /// Whether `n` lies within the range
    #[must_use]
    pub fn contains(&self, n: i32) -> bool {
        (self.start..=self.end).contains(&n)
    }
}

impl From<(i32, i32)> for NumericRange {
    fn from((a, b): (i32, i32)) -> Self {
        Self::new(a, b)
    }
}

impl From<NumericRange> for (i32, i32) {
    fn from(range: NumericRange) -> Self {
        (range.start, range.end)
    }
}

impl From<NumericRange> for [i32; 2] {
    fn from(range: NumericRange) -> Self {
        [range.start, range.end]
    }
}
