//! Link codes for MARC 880 (Alternate Graphic Representation) fields.
//!
//! The 880 field carries the same conceptual content as another field of the
//! record in a different script. Both sides carry **subfield 6** (Linkage):
//!
//! - `245: $6 880-01 $a Sefer ha-ḥayim` (primary field pointing at 880 occurrence 01)
//! - `880: $6 245-01/(2/r $a ספר החיים` (alternate pointing back at 245 occurrence 01)
//!
//! Subfield 6 format: `TAG-SEQ[/SCRIPT][/r]`
//! - `TAG`: the linked field tag
//! - `SEQ`: occurrence number pairing one primary with one alternate
//! - `SCRIPT`: optional script identification code
//! - `r`: optional right-to-left orientation flag

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag reserved for alternate-script fields.
pub const ALTERNATE_SCRIPT_TAG: &str = "880";

/// Subfield code carrying the link code.
pub const LINK_SUBFIELD: char = '6';

lazy_static! {
    // TAG-SEQ with at most one trailing punctuation character after SEQ
    static ref LINK_HEAD: Regex = Regex::new(r"^(\d{3})-(\d+)\D?$").unwrap();
}

/// Script of an alternate-script field, decoded from its MARC script code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptId {
    /// `(3`
    Arabic,
    /// `(B`
    Latin,
    /// `$1` (Chinese, Japanese, Korean)
    Cjk,
    /// `(N`
    Cyrillic,
    /// `(S`
    Greek,
    /// `(2`
    Hebrew,
}

impl ScriptId {
    /// Look up a MARC script identification code. Unknown codes yield `None`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "(3" => Some(ScriptId::Arabic),
            "(B" => Some(ScriptId::Latin),
            "$1" => Some(ScriptId::Cjk),
            "(N" => Some(ScriptId::Cyrillic),
            "(S" => Some(ScriptId::Greek),
            "(2" => Some(ScriptId::Hebrew),
            _ => None,
        }
    }

    /// The MARC script identification code
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            ScriptId::Arabic => "(3",
            ScriptId::Latin => "(B",
            ScriptId::Cjk => "$1",
            ScriptId::Cyrillic => "(N",
            ScriptId::Greek => "(S",
            ScriptId::Hebrew => "(2",
        }
    }

    /// Lowercase script name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ScriptId::Arabic => "arabic",
            ScriptId::Latin => "latin",
            ScriptId::Cjk => "cjk",
            ScriptId::Cyrillic => "cyrillic",
            ScriptId::Greek => "greek",
            ScriptId::Hebrew => "hebrew",
        }
    }
}

impl fmt::Display for ScriptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text direction of an alternate-script field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right
    #[default]
    Ltr,
    /// Right to left (`/r` flag)
    Rtl,
}

/// Parsed contents of subfield 6.
///
/// # Examples
///
/// ```
/// use marcnorm::field_linkage::{Direction, LinkCode, ScriptId};
///
/// let code = LinkCode::parse("245-01/(2/r").unwrap();
/// assert_eq!(code.linked_tag, "245");
/// assert_eq!(code.sequence, "01");
/// assert_eq!(code.script, Some(ScriptId::Hebrew));
/// assert_eq!(code.direction, Direction::Rtl);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCode {
    /// Tag of the field on the other side of the link
    pub linked_tag: String,
    /// Occurrence number pairing the two fields
    pub sequence: String,
    /// Decoded script, `None` when absent or unrecognized
    pub script: Option<ScriptId>,
    /// Field orientation
    pub direction: Direction,
}

impl LinkCode {
    /// Parse a subfield 6 value.
    ///
    /// Returns `None` when the value lacks a `TAG-SEQ` prefix or the sequence
    /// is not numeric. A single trailing non-digit after the sequence is
    /// tolerated and dropped.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.trim().split('/');
        let caps = LINK_HEAD.captures(parts.next()?)?;

        let linked_tag = caps.get(1)?.as_str().to_string();
        let sequence = caps.get(2)?.as_str().to_string();

        let mut script = None;
        let mut script_seen = false;
        let mut direction = Direction::Ltr;
        for part in parts {
            if part == "r" {
                direction = Direction::Rtl;
            } else if !script_seen {
                script_seen = true;
                script = ScriptId::from_code(part);
            }
        }

        Some(LinkCode {
            linked_tag,
            sequence,
            script,
            direction,
        })
    }

    /// Whether the field is flagged right-to-left
    #[must_use]
    pub fn is_rtl(&self) -> bool {
        self.direction == Direction::Rtl
    }
}

/// Parse a subfield 6 value. See [`LinkCode::parse`].
#[must_use]
pub fn parse_link_code(raw_subpart: &str) -> Option<LinkCode> {
    LinkCode::parse(raw_subpart)
}

/// Tag named by a subfield 6 value, even when the rest of it is malformed.
///
/// An alternate field whose sequence cannot be read still belongs to the tag
/// it names; it just cannot be paired with a primary.
#[must_use]
pub(crate) fn linked_tag_of(raw_subpart: &str) -> Option<&str> {
    let (tag, _) = raw_subpart.trim().split_once('-')?;
    (tag.len() == 3 && tag.chars().all(|c| c.is_ascii_digit())).then_some(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------
    // Basic parsing
    // ------------------------------------------------------------------

    #[test]
    fn test_parse_basic_link() {
        let code = parse_link_code("100-01").unwrap();
        assert_eq!(code.linked_tag, "100");
        assert_eq!(code.sequence, "01");
        assert_eq!(code.script, None);
        assert_eq!(code.direction, Direction::Ltr);
    }

    #[test]
    fn test_parse_direction_only() {
        let code = parse_link_code("245-02/r").unwrap();
        assert_eq!(code.sequence, "02");
        assert_eq!(code.script, None);
        assert!(code.is_rtl());
    }

    #[test]
    fn test_parse_three_digit_sequence() {
        let code = parse_link_code("880-001").unwrap();
        assert_eq!(code.linked_tag, "880");
        assert_eq!(code.sequence, "001");
    }

    // ------------------------------------------------------------------
    // Script codes
    // ------------------------------------------------------------------

    #[test]
    fn test_parse_script_codes() {
        let cases = [
            ("245-01/(3/r", ScriptId::Arabic, Direction::Rtl),
            ("245-01/(B", ScriptId::Latin, Direction::Ltr),
            ("245-01/$1", ScriptId::Cjk, Direction::Ltr),
            ("245-01/(N", ScriptId::Cyrillic, Direction::Ltr),
            ("245-01/(S", ScriptId::Greek, Direction::Ltr),
            ("245-01/(2/r", ScriptId::Hebrew, Direction::Rtl),
        ];
        for (raw, script, direction) in cases {
            let code = parse_link_code(raw).unwrap();
            assert_eq!(code.script, Some(script), "{raw}");
            assert_eq!(code.direction, direction, "{raw}");
        }
    }

    #[test]
    fn test_unknown_script_code_keeps_link() {
        let code = parse_link_code("260-03/(4").unwrap();
        assert_eq!(code.linked_tag, "260");
        assert_eq!(code.sequence, "03");
        assert_eq!(code.script, None);
    }

    #[test]
    fn test_script_round_trips_through_code() {
        for script in [ScriptId::Arabic, ScriptId::Cjk, ScriptId::Hebrew] {
            assert_eq!(ScriptId::from_code(script.code()), Some(script));
        }
        assert_eq!(ScriptId::Greek.to_string(), "greek");
    }

    // ------------------------------------------------------------------
    // Noise and invalid formats
    // ------------------------------------------------------------------

    #[test]
    fn test_trailing_punctuation_on_sequence_is_dropped() {
        let code = parse_link_code("245-01.").unwrap();
        assert_eq!(code.sequence, "01");
        let code = parse_link_code(" 245-02; ").unwrap();
        assert_eq!(code.sequence, "02");
    }

    #[test]
    fn test_parse_invalid_formats() {
        assert!(parse_link_code("").is_none());
        assert!(parse_link_code("24501").is_none());
        assert!(parse_link_code("245-").is_none());
        assert!(parse_link_code("245-ab").is_none());
        assert!(parse_link_code("24-01").is_none());
        assert!(parse_link_code("invalid-format").is_none());
    }

    #[test]
    fn test_linked_tag_of_malformed_sequence() {
        assert_eq!(linked_tag_of("245-ab"), Some("245"));
        assert_eq!(linked_tag_of("245-01/(2"), Some("245"));
        assert_eq!(linked_tag_of("nope"), None);
        assert_eq!(linked_tag_of("ab1-01"), None);
    }
}
