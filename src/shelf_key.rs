//! Sortable keys for shelf marks.
//!
//! Shelf marks sort badly as plain strings: "Box 10" sorts before "Box 9".
//! [`sortable_shelf_key`] zero-pads the first labelled number ("Box 27",
//! "v. 3", "no. 12", "r. 4", "Tube 2") or, failing that, a trailing number,
//! lowercases the label and collapses runs of whitespace.
//!
//! # Examples
//!
//! ```
//! use marcnorm::shelf_key::sortable_shelf_key;
//!
//! assert_eq!(
//!     sortable_shelf_key("*T-Mss 1991-010   Box 27"),
//!     "*T-Mss 1991-010 box 000027"
//! );
//! assert_eq!(sortable_shelf_key("JFE 86-498"), "JFE 86-000498");
//! ```

use crate::config::NormalizerConfig;
use crate::error::{NormalizeError, Result};
use lazy_static::lazy_static;
use regex::{Captures, Regex, RegexBuilder};

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s{2,}").unwrap();
    static ref DEFAULT_GENERATOR: ShelfKeyGenerator =
        ShelfKeyGenerator::new(&NormalizerConfig::default())
            .expect("default shelf label vocabulary compiles");
}

/// Shelf-key generator compiled from a label vocabulary.
#[derive(Debug)]
pub struct ShelfKeyGenerator {
    pattern: Regex,
    width: usize,
}

impl ShelfKeyGenerator {
    /// Compile the shelf labels and pad width of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::Config`] if the label pattern fails to compile.
    pub fn new(config: &NormalizerConfig) -> Result<Self> {
        let labels: Vec<String> = config
            .shelf_labels
            .iter()
            .map(|label| {
                let label = label.trim();
                let escaped = regex::escape(label);
                if label.starts_with(|c: char| c.is_alphanumeric()) {
                    format!(r"\b{escaped}")
                } else {
                    escaped
                }
            })
            .collect();

        let labelled = if labels.is_empty() {
            // Only trailing numbers qualify
            String::new()
        } else {
            format!(r"(?P<label>{})(?P<sep>\s*)(?P<num>\d+)|", labels.join("|"))
        };
        let pattern = RegexBuilder::new(&format!(r"{labelled}(?P<trailing>\d+)(?P<tail>\s*)$"))
            .case_insensitive(true)
            .build()
            .map_err(|e| NormalizeError::Config(e.to_string()))?;

        Ok(ShelfKeyGenerator {
            pattern,
            width: config.shelf_number_width,
        })
    }

    /// Build the sortable key for a shelf mark.
    #[must_use]
    pub fn key(&self, mark: &str) -> String {
        let padded = self.pattern.replacen(mark, 1, |caps: &Captures<'_>| {
            if let Some(num) = caps.name("num") {
                let label = caps.name("label").map_or("", |m| m.as_str());
                let sep = caps.name("sep").map_or("", |m| m.as_str());
                format!("{}{}{}", label.to_lowercase(), sep, self.pad(num.as_str()))
            } else {
                let trailing = caps.name("trailing").map_or("", |m| m.as_str());
                let tail = caps.name("tail").map_or("", |m| m.as_str());
                format!("{}{}", self.pad(trailing), tail)
            }
        });
        WHITESPACE_RUN.replace_all(&padded, " ").into_owned()
    }

    fn pad(&self, digits: &str) -> String {
        format!("{digits:0>width$}", width = self.width)
    }
}

/// Build the sortable key for a shelf mark using the default vocabulary.
///
/// See [`ShelfKeyGenerator::key`].
#[must_use]
pub fn sortable_shelf_key(mark: &str) -> String {
    DEFAULT_GENERATOR.key(mark)
}
