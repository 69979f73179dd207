//! Static vocabularies used by the normalizers.
//!
//! This module provides the [`NormalizerConfig`] struct: season names for
//! free-text dates, the shelf-mark label vocabulary, the zero-pad width of
//! sortable keys and the placeholder characters standing for unknown year
//! digits. The defaults reproduce the built-in behavior; a TOML file can
//! replace any part of it.
//!
//! ```toml
//! shelf_labels = ["box", "v.", "no.", "r.", "tube", "folder"]
//! shelf_number_width = 8
//!
//! [[seasons]]
//! names = ["summer", "sum"]
//! month = 7
//! day = 1
//! ```

use crate::error::{NormalizeError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A season name and the calendar day it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    /// Spellings and abbreviations, matched case-insensitively with an optional trailing period
    pub names: Vec<String>,
    /// Month (1-12)
    pub month: u32,
    /// Day of month
    pub day: u32,
}

impl Season {
    fn new(names: &[&str], month: u32, day: u32) -> Self {
        Season {
            names: names.iter().map(ToString::to_string).collect(),
            month,
            day,
        }
    }
}

/// Configuration for the temporal normalizer and shelf-key generator.
///
/// # Examples
///
/// ```
/// use marcnorm::NormalizerConfig;
///
/// let config = NormalizerConfig::from_toml_str("shelf_number_width = 8").unwrap();
/// assert_eq!(config.shelf_number_width, 8);
/// assert_eq!(config.shelf_labels, NormalizerConfig::default().shelf_labels);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Season vocabulary for free-text dates
    pub seasons: Vec<Season>,
    /// Labels after which a shelf-mark number is zero-padded
    pub shelf_labels: Vec<String>,
    /// Width shelf-mark numbers are padded to
    pub shelf_number_width: usize,
    /// Characters standing for an unknown digit in a year
    pub unknown_digit_placeholders: Vec<char>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            seasons: vec![
                Season::new(&["summer", "summ", "sum"], 7, 1),
                Season::new(&["spring", "spr"], 4, 1),
                Season::new(&["fall", "autumn", "aut"], 10, 1),
                Season::new(&["winter", "wint", "win"], 1, 1),
            ],
            shelf_labels: ["box", "v.", "no.", "r.", "tube"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            shelf_number_width: 6,
            unknown_digit_placeholders: vec!['u', 'x', 'U', 'X'],
        }
    }
}

impl NormalizerConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML vocabulary file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::Config`] if the TOML is malformed or the
    /// vocabulary fails [`validate`](Self::validate).
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(|e| NormalizeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML vocabulary file.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::Io`] if the file cannot be read, otherwise
    /// as [`from_toml_str`](Self::from_toml_str).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Check the vocabulary for values the normalizers cannot use.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::Config`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        for season in &self.seasons {
            if season.names.iter().all(|n| n.trim().is_empty()) {
                return Err(NormalizeError::Config("season without names".to_string()));
            }
            // 2000 is a leap year, so Feb 29 is accepted
            if NaiveDate::from_ymd_opt(2000, season.month, season.day).is_none() {
                return Err(NormalizeError::Config(format!(
                    "season {:?} has invalid month/day {}/{}",
                    season.names, season.month, season.day
                )));
            }
        }
        if self.shelf_labels.iter().any(|l| l.trim().is_empty()) {
            return Err(NormalizeError::Config("empty shelf label".to_string()));
        }
        if self.shelf_number_width == 0 {
            return Err(NormalizeError::Config(
                "shelf_number_width must be positive".to_string(),
            ));
        }
        if self.unknown_digit_placeholders.iter().any(char::is_ascii_digit) {
            return Err(NormalizeError::Config(
                "digits cannot be unknown-digit placeholders".to_string(),
            ));
        }
        Ok(())
    }
}
