//! Resolution of variable fields together with their alternate-script counterparts.
//!
//! Resolving a tag collects the record's fields with that tag (the primaries),
//! pairs each with the 880 field that links back to it through subfield 6, and
//! extracts the requested subfields from both sides:
//!
//! ```text
//! 245  $6 880-01 $a Title $b subtitle      ─┐
//!                                           ├─> ResolvedValue { value: "Title subtitle",
//! 880  $6 245-01/(2/r $a שם                ─┘                   parallel: "שם" (hebrew, rtl) }
//! ```
//!
//! 880 fields linking to the tag that no primary claims are still emitted, as
//! orphaned parallels with no `value`, after every primary.
//!
//! The alternate-script fields of a record are indexed once per
//! [`RecordContext`]; every resolution then works on its own pool of
//! candidates, so contexts for different records can be used from different
//! threads without coordination.
//!
//! # Examples
//!
//! ```
//! use marcnorm::{resolve, Direction, Field, RawField, ResolveOptions};
//!
//! let fields = vec![
//!     RawField::from(
//!         Field::builder("245", '1', '0')
//!             .subfield('a', "Title")
//!             .subfield('b', "subtitle")
//!             .subfield('6', "880-01")
//!             .build(),
//!     ),
//!     RawField::from(
//!         Field::builder("880", '1', '0')
//!             .subfield('a', "שם")
//!             .subfield('6', "245-01/(2/r")
//!             .build(),
//!     ),
//! ];
//!
//! let values = resolve(&fields, "245", Some(&['a', 'b']), &ResolveOptions::default());
//! assert_eq!(values.len(), 1);
//! assert_eq!(values[0].value.as_deref(), Some("Title subtitle"));
//! let parallel = values[0].parallel.as_ref().unwrap();
//! assert_eq!(parallel.value, "שם");
//! assert_eq!(parallel.direction, Direction::Rtl);
//! ```

use crate::field_linkage::{
    linked_tag_of, Direction, LinkCode, ScriptId, ALTERNATE_SCRIPT_TAG, LINK_SUBFIELD,
};
use crate::field_query::FieldQuery;
use crate::record::{RawField, Record};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Predicate deciding whether a raw field takes part in a resolution.
pub type Prefilter = Arc<dyn Fn(&RawField) -> bool + Send + Sync>;

/// Extracted subfield values keyed by subfield code, in field order.
pub type SubpartMap = IndexMap<char, SubpartValue>;

/// Value(s) of one subfield code within a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubpartValue {
    /// The code occurs once
    Single(String),
    /// The code repeats; values in field order
    Repeated(Vec<String>),
}

impl SubpartValue {
    fn push(&mut self, value: String) {
        match self {
            SubpartValue::Single(first) => {
                *self = SubpartValue::Repeated(vec![std::mem::take(first), value]);
            }
            SubpartValue::Repeated(values) => values.push(value),
        }
    }

    /// First value for the code
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            SubpartValue::Single(v) => Some(v),
            SubpartValue::Repeated(vs) => vs.first().map(String::as_str),
        }
    }
}

/// One resolved occurrence of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedValue {
    /// Joined text of the primary field; `None` for an orphaned parallel
    pub value: Option<String>,
    /// Selected subfields of the primary field
    pub subpart_map: SubpartMap,
    /// Linked alternate-script counterpart
    pub parallel: Option<ResolvedParallel>,
}

/// The alternate-script side of a [`ResolvedValue`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedParallel {
    /// Joined text of the alternate-script field
    pub value: String,
    /// Selected subfields of the alternate-script field
    pub subpart_map: SubpartMap,
    /// Script named by the link code
    pub script: Option<ScriptId>,
    /// Direction named by the link code
    pub direction: Direction,
}

impl ResolvedValue {
    /// Whether this is an alternate-script field with no primary counterpart
    #[must_use]
    pub fn is_orphan(&self) -> bool {
        self.value.is_none() && self.parallel.is_some()
    }

    /// The parallel's text, if any
    #[must_use]
    pub fn parallel_value(&self) -> Option<&str> {
        self.parallel.as_ref().map(|p| p.value.as_str())
    }
}

/// Options controlling extraction and post-processing.
#[derive(Clone)]
pub struct ResolveOptions {
    /// Separator placed between subfield values
    pub joiner: String,
    /// Subfield codes to leave out; ignored when specific codes are requested
    pub exclude_subtags: Vec<char>,
    /// Only fields accepted by this predicate take part
    pub prefilter: Option<Prefilter>,
    /// Collapse entries with identical `(value, parallel.value)`
    pub dedupe: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            joiner: " ".to_string(),
            exclude_subtags: Vec::new(),
            prefilter: None,
            dedupe: true,
        }
    }
}

impl fmt::Debug for ResolveOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveOptions")
            .field("joiner", &self.joiner)
            .field("exclude_subtags", &self.exclude_subtags)
            .field("prefilter", &self.prefilter.as_ref().map(|_| ".."))
            .field("dedupe", &self.dedupe)
            .finish()
    }
}

impl ResolveOptions {
    /// Create default options: single-space joiner, dedupe on.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the separator placed between subfield values.
    #[must_use]
    pub fn joiner(mut self, joiner: &str) -> Self {
        self.joiner = joiner.to_string();
        self
    }

    /// Leave the given subfield codes out when no codes are requested.
    #[must_use]
    pub fn exclude(mut self, codes: &[char]) -> Self {
        self.exclude_subtags = codes.to_vec();
        self
    }

    /// Only resolve fields accepted by `predicate`.
    #[must_use]
    pub fn prefilter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&RawField) -> bool + Send + Sync + 'static,
    {
        self.prefilter = Some(Arc::new(predicate));
        self
    }

    /// Only resolve fields matching `query`.
    ///
    /// Alternate-script (880) fields are checked against the query's
    /// indicators and subfields only, so a tag criterion naming the primary
    /// tag keeps their parallels.
    #[must_use]
    pub fn matching(self, query: FieldQuery) -> Self {
        self.prefilter(move |field| {
            if field.tag() == ALTERNATE_SCRIPT_TAG {
                query.matches_content(field)
            } else {
                query.matches(field)
            }
        })
    }

    /// Turn deduplication on or off.
    #[must_use]
    pub fn dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    fn accepts(&self, field: &RawField) -> bool {
        self.prefilter.as_ref().map_or(true, |p| p(field))
    }
}

/// An alternate-script field and its parsed link code.
#[derive(Debug)]
struct Candidate<'a> {
    field: &'a RawField,
    link: Option<LinkCode>,
}

impl Candidate<'_> {
    fn sequence(&self) -> Option<&str> {
        self.link.as_ref().map(|l| l.sequence.as_str())
    }
}

/// Per-record resolution state.
///
/// Indexes the record's 880 fields by the tag they link to. The index is
/// read-only after construction; each call to [`RecordContext::resolve`]
/// claims candidates from its own pool.
#[derive(Debug)]
pub struct RecordContext<'a> {
    fields: &'a [RawField],
    alternates: HashMap<&'a str, Vec<Candidate<'a>>>,
}

impl<'a> RecordContext<'a> {
    /// Index the alternate-script fields of `fields`.
    #[must_use]
    pub fn new(fields: &'a [RawField]) -> Self {
        let mut alternates: HashMap<&'a str, Vec<Candidate<'a>>> = HashMap::new();

        for field in fields.iter().filter(|f| f.tag() == ALTERNATE_SCRIPT_TAG) {
            let Some(raw_link) = field.get_subfield(LINK_SUBFIELD) else {
                continue;
            };
            let link = LinkCode::parse(raw_link);
            if link.is_none() {
                tracing::trace!(link = raw_link, "unparseable link code on alternate field");
            }
            if let Some(linked_tag) = linked_tag_of(raw_link) {
                alternates
                    .entry(linked_tag)
                    .or_default()
                    .push(Candidate { field, link });
            }
        }

        RecordContext { fields, alternates }
    }

    /// Index the alternate-script fields of a record.
    #[must_use]
    pub fn from_record(record: &'a Record) -> Self {
        Self::new(record.raw_fields())
    }

    /// Resolve every occurrence of `tag`.
    ///
    /// With `wanted_subtags`, only those subfields are joined, in the order
    /// they occur in the field. Without it, every subfield except subfield 6
    /// and `options.exclude_subtags` is joined.
    #[must_use]
    pub fn resolve(
        &self,
        tag: &str,
        wanted_subtags: Option<&[char]>,
        options: &ResolveOptions,
    ) -> Vec<ResolvedValue> {
        let mut pool: Vec<Option<&Candidate<'a>>> = self
            .alternates
            .get(tag)
            .map(|candidates| {
                candidates
                    .iter()
                    .filter(|c| options.accepts(c.field))
                    .map(Some)
                    .collect()
            })
            .unwrap_or_default();

        let mut results = Vec::new();

        for primary in self
            .fields
            .iter()
            .filter(|f| f.tag() == tag && options.accepts(f))
        {
            let claimed = primary
                .get_subfield(LINK_SUBFIELD)
                .and_then(LinkCode::parse)
                .filter(|link| link.linked_tag == ALTERNATE_SCRIPT_TAG)
                .and_then(|link| claim(&mut pool, &link.sequence));

            let (value, subpart_map) = match extract(primary, wanted_subtags, options) {
                Some((value, map)) => (Some(value), map),
                None => (None, SubpartMap::new()),
            };
            let parallel = claimed.and_then(|c| to_parallel(c, wanted_subtags, options));

            results.push(ResolvedValue {
                value,
                subpart_map,
                parallel,
            });
        }

        // Orphans follow the primaries in encounter order; their own
        // sequence numbers are not used to interleave them.
        for orphan in pool.into_iter().flatten() {
            tracing::trace!(tag, sequence = orphan.sequence(), "orphaned alternate-script field");
            results.push(ResolvedValue {
                value: None,
                subpart_map: SubpartMap::new(),
                parallel: to_parallel(orphan, wanted_subtags, options),
            });
        }

        results.retain(|r| r.value.is_some() || r.parallel.is_some());

        if options.dedupe {
            let before = results.len();
            results = dedupe(results);
            let removed = before - results.len();
            if removed > 0 {
                tracing::debug!(tag, removed, "removed duplicate resolved values");
            }
        }

        results
    }
}

/// Resolve every occurrence of `tag` in `raw_fields`.
///
/// Builds a one-off [`RecordContext`]; use one context per record when
/// resolving several tags of the same record.
#[must_use]
pub fn resolve(
    raw_fields: &[RawField],
    tag: &str,
    wanted_subtags: Option<&[char]>,
    options: &ResolveOptions,
) -> Vec<ResolvedValue> {
    RecordContext::new(raw_fields).resolve(tag, wanted_subtags, options)
}

/// Collapse entries sharing `(value, parallel.value)`, keeping the first.
///
/// Entries with the same joined text but different subfield composition
/// count as duplicates.
#[must_use]
pub fn dedupe(values: Vec<ResolvedValue>) -> Vec<ResolvedValue> {
    let mut seen: HashSet<(Option<String>, Option<String>)> = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert((v.value.clone(), v.parallel_value().map(str::to_string))))
        .collect()
}

fn claim<'c, 'a>(pool: &mut [Option<&'c Candidate<'a>>], sequence: &str) -> Option<&'c Candidate<'a>> {
    pool.iter_mut()
        .find(|slot| slot.is_some_and(|c| c.sequence() == Some(sequence)))
        .and_then(Option::take)
}

fn to_parallel(
    candidate: &Candidate<'_>,
    wanted_subtags: Option<&[char]>,
    options: &ResolveOptions,
) -> Option<ResolvedParallel> {
    let (value, subpart_map) = extract(candidate.field, wanted_subtags, options)?;
    Some(ResolvedParallel {
        value,
        subpart_map,
        script: candidate.link.as_ref().and_then(|l| l.script),
        direction: candidate
            .link
            .as_ref()
            .map_or(Direction::Ltr, |l| l.direction),
    })
}

fn extract(
    field: &RawField,
    wanted_subtags: Option<&[char]>,
    options: &ResolveOptions,
) -> Option<(String, SubpartMap)> {
    let data = match field {
        RawField::Control(control) => {
            let content = control.content.trim();
            return (!content.is_empty()).then(|| (content.to_string(), SubpartMap::new()));
        }
        RawField::Data(data) => data,
    };

    let selected = |code: char| match wanted_subtags {
        Some(wanted) => wanted.contains(&code),
        None => code != LINK_SUBFIELD && !options.exclude_subtags.contains(&code),
    };

    let mut parts: Vec<&str> = Vec::new();
    let mut map = SubpartMap::new();
    for subfield in data.subfields.iter().filter(|sf| selected(sf.code)) {
        let value = subfield.value.trim();
        if value.is_empty() {
            continue;
        }
        parts.push(value);
        match map.get_mut(&subfield.code) {
            Some(existing) => existing.push(value.to_string()),
            None => {
                map.insert(subfield.code, SubpartValue::Single(value.to_string()));
            }
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some((parts.join(&options.joiner), map))
    }
}
