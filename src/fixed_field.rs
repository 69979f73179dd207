//! Publication dates from the 008 fixed-length data elements.
//!
//! Positions 06-14 of a bibliographic 008 hold the type of date and two
//! four-character dates, with `u` standing for unknown digits:
//!
//! | Pos   | Element      | Example |
//! |-------|--------------|---------|
//! | 06    | Type of date | `m`     |
//! | 07-10 | Date 1       | `19uu`  |
//! | 11-14 | Date 2       | `1962`  |
//!
//! [`FixedFieldDates::date_range`] interprets the pair according to the type.

use crate::error::Result;
use crate::range::DateRange;
use crate::record::Record;
use crate::temporal;

/// Type-of-date code and the two dates of an 008 field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedFieldDates {
    /// Type of date/publication status (position 06)
    pub date_type: char,
    /// Date 1 (positions 07-10)
    pub date1: String,
    /// Date 2 (positions 11-14)
    pub date2: String,
}

impl FixedFieldDates {
    /// Read the date elements of an 008 field's content.
    ///
    /// Returns `None` if the content is shorter than 15 characters.
    #[must_use]
    pub fn parse(content: &str) -> Option<Self> {
        let chars: Vec<char> = content.chars().collect();
        if chars.len() < 15 {
            return None;
        }
        Some(FixedFieldDates {
            date_type: chars[6],
            date1: chars[7..11].iter().collect(),
            date2: chars[11..15].iter().collect(),
        })
    }

    /// Read the date elements of a record's 008 field.
    #[must_use]
    pub fn from_record(record: &Record) -> Option<Self> {
        record.get_control_field("008").and_then(Self::parse)
    }

    /// The date range the elements describe.
    ///
    /// - `s r t p`: Date 1 alone
    /// - `e`: Date 1 as the year, Date 2 as `MMDD`
    /// - `m i k q c d u`: Date 1 through Date 2 (Date 1 alone if Date 2 is blank)
    /// - `b n`, a blank Date 1, or any other code: `Ok(None)`
    ///
    /// # Errors
    ///
    /// Propagates [`NormalizeError::InvalidDate`](crate::error::NormalizeError::InvalidDate)
    /// and [`NormalizeError::InconsistentRange`](crate::error::NormalizeError::InconsistentRange)
    /// from the temporal normalizer.
    pub fn date_range(&self) -> Result<Option<DateRange>> {
        let raw = format!("{}{}{}", self.date_type, self.date1, self.date2);
        if is_blank(&self.date1) {
            return Ok(None);
        }

        let range = match self.date_type {
            's' | 'r' | 't' | 'p' => temporal::date_range_from_years(&self.date1, &self.date1, &raw),
            'e' => {
                let month: String = self.date2.chars().take(2).collect();
                let day: String = self.date2.chars().skip(2).collect();
                temporal::date_range_from_single_date(&self.date1, &month, &day, &raw)
            }
            'm' | 'i' | 'k' | 'q' | 'c' | 'd' | 'u' => {
                let end = if is_blank(&self.date2) {
                    &self.date1
                } else {
                    &self.date2
                };
                temporal::date_range_from_years(&self.date1, end, &raw)
            }
            _ => return Ok(None),
        };

        range.map(Some).map_err(|e| {
            tracing::debug!(raw = %raw, error = %e, "unusable fixed-field dates");
            e
        })
    }
}

fn is_blank(date: &str) -> bool {
    date.chars().all(|c| c == ' ' || c == '|' || c == '#')
}
