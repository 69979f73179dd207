//! Field predicates for narrowing a resolution to fields with given metadata.
//!
//! A [`FieldQuery`] matches on indicators, required subfields and subfield
//! patterns. It plugs into [`ResolveOptions::matching`](crate::resolver::ResolveOptions::matching)
//! so that, for example, only 246 fields with first indicator `1` are resolved.
//!
//! # Examples
//!
//! ```
//! use marcnorm::{Field, FieldQuery, RawField};
//!
//! let query = FieldQuery::new().indicator2(Some('0')).has_subfield('a');
//!
//! let lcsh = RawField::from(Field::builder("650", ' ', '0').subfield('a', "Cats").build());
//! let local = RawField::from(Field::builder("650", ' ', '4').subfield('a', "Cats").build());
//! assert!(query.matches(&lcsh));
//! assert!(!query.matches(&local));
//! ```

use crate::error::{NormalizeError, Result};
use crate::record::RawField;
use regex::Regex;

/// A query builder for finding fields matching complex criteria.
///
/// Control fields only match a query that constrains nothing but the tag.
#[derive(Debug, Clone, Default)]
pub struct FieldQuery {
    /// Optional tag filter. If None, matches all tags.
    pub tag: Option<String>,
    /// Optional first indicator filter. None = wildcard (match any)
    pub indicator1: Option<char>,
    /// Optional second indicator filter. None = wildcard (match any)
    pub indicator2: Option<char>,
    /// Required subfield codes (AND logic)
    pub required_subfields: Vec<char>,
    /// Subfield code and pattern its value must match
    pub subfield_pattern: Option<(char, Regex)>,
}

impl FieldQuery {
    /// Create a new query that matches all fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict query to fields with a specific tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Restrict query to fields with a specific first indicator.
    ///
    /// Passing `None` creates a wildcard that matches any character.
    #[must_use]
    pub fn indicator1(mut self, indicator: Option<char>) -> Self {
        self.indicator1 = indicator;
        self
    }

    /// Restrict query to fields with a specific second indicator.
    ///
    /// Passing `None` creates a wildcard that matches any character.
    #[must_use]
    pub fn indicator2(mut self, indicator: Option<char>) -> Self {
        self.indicator2 = indicator;
        self
    }

    /// Require the field to have a subfield with the given code.
    ///
    /// Multiple calls add additional required subfields (AND logic).
    #[must_use]
    pub fn has_subfield(mut self, code: char) -> Self {
        if !self.required_subfields.contains(&code) {
            self.required_subfields.push(code);
        }
        self
    }

    /// Require some value of subfield `code` to match `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::Config`] if the pattern is not a valid regex.
    pub fn subfield_matching(mut self, code: char, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| NormalizeError::Config(e.to_string()))?;
        self.subfield_pattern = Some((code, regex));
        Ok(self)
    }

    fn constrains_subfields(&self) -> bool {
        self.indicator1.is_some()
            || self.indicator2.is_some()
            || !self.required_subfields.is_empty()
            || self.subfield_pattern.is_some()
    }

    /// Check if a field matches all criteria in this query.
    #[must_use]
    pub fn matches(&self, field: &RawField) -> bool {
        if let Some(ref tag) = self.tag {
            if field.tag() != tag {
                return false;
            }
        }
        self.matches_content(field)
    }

    /// Check indicators and subfields only, ignoring the tag criterion.
    #[must_use]
    pub fn matches_content(&self, field: &RawField) -> bool {
        let Some(data) = field.as_data() else {
            return !self.constrains_subfields();
        };

        if let Some(ind1) = self.indicator1 {
            if data.indicator1 != ind1 {
                return false;
            }
        }

        if let Some(ind2) = self.indicator2 {
            if data.indicator2 != ind2 {
                return false;
            }
        }

        for &required_code in &self.required_subfields {
            if data.get_subfield(required_code).is_none() {
                return false;
            }
        }

        if let Some((code, ref pattern)) = self.subfield_pattern {
            if !data.subfields_by_code(code).any(|v| pattern.is_match(v)) {
                return false;
            }
        }

        true
    }
}
