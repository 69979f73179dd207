//! Decoding of upstream JSON records into [`Record`]s.
//!
//! Records arrive from the catalog service as objects carrying a `varFields`
//! array. Each entry has a MARC tag (`marcTag`, falling back to the service's
//! own `fieldTag`) and either `subfields` or flat `content`:
//!
//! ```json
//! {
//!   "id": "10001936",
//!   "varFields": [
//!     { "fieldTag": "_", "marcTag": "008", "content": "850101s1985    nyu" },
//!     { "fieldTag": "t", "marcTag": "245", "ind1": "1", "ind2": "0",
//!       "subfields": [ { "tag": "a", "content": "Title" } ] }
//!   ]
//! }
//! ```
//!
//! Entries with subfields become [`Field`]s, entries without become
//! [`ControlField`]s. Entries with no usable tag are skipped.

use crate::error::Result;
use crate::record::{ControlField, Field, RawField, Record};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRecord {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    var_fields: Vec<WireVarField>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireVarField {
    field_tag: Option<String>,
    marc_tag: Option<String>,
    ind1: Option<String>,
    ind2: Option<String>,
    content: Option<String>,
    subfields: Option<Vec<WireSubfield>>,
}

#[derive(Debug, Deserialize)]
struct WireSubfield {
    tag: String,
    content: Option<String>,
}

impl WireVarField {
    fn into_raw_field(self) -> Option<RawField> {
        let tag = self
            .marc_tag
            .filter(|t| !t.trim().is_empty())
            .or(self.field_tag.filter(|t| !t.trim().is_empty()))?;

        match self.subfields {
            Some(subfields) => {
                let mut field = Field::new(&tag, indicator(self.ind1), indicator(self.ind2));
                for subfield in subfields {
                    if let Some(code) = subfield.tag.chars().next() {
                        field.add_subfield(code, subfield.content.as_deref().unwrap_or_default());
                    }
                }
                Some(RawField::Data(field))
            }
            None => Some(RawField::Control(ControlField {
                tag,
                content: self.content.unwrap_or_default(),
            })),
        }
    }
}

fn indicator(value: Option<String>) -> char {
    value.and_then(|v| v.chars().next()).unwrap_or(' ')
}

/// Decode a record from a JSON value.
///
/// # Errors
///
/// Returns [`NormalizeError::Json`](crate::error::NormalizeError::Json) if the
/// value does not have the record shape.
pub fn record_from_value(value: Value) -> Result<Record> {
    let wire: WireRecord = serde_json::from_value(value)?;

    let id = wire.id.and_then(|id| match id {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    });

    let mut record = Record::new(id);
    for var_field in wire.var_fields {
        match var_field.into_raw_field() {
            Some(field) => record.fields.push(field),
            None => tracing::trace!(record = ?record.id, "skipping varField without a tag"),
        }
    }
    Ok(record)
}

/// Decode a record from JSON text.
///
/// # Errors
///
/// Returns [`NormalizeError::Json`](crate::error::NormalizeError::Json) if the
/// text is not JSON or does not have the record shape.
///
/// # Examples
///
/// ```
/// use marcnorm::json::record_from_json;
///
/// let record = record_from_json(r#"{
///     "id": "b1",
///     "varFields": [
///         { "marcTag": "245", "ind1": "1", "ind2": "0",
///           "subfields": [ { "tag": "a", "content": "Title" } ] }
///     ]
/// }"#)?;
/// assert_eq!(record.fields_by_tag("245").count(), 1);
/// # Ok::<(), marcnorm::NormalizeError>(())
/// ```
pub fn record_from_json(json: &str) -> Result<Record> {
    record_from_value(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NormalizeError;
    use serde_json::json;

    #[test]
    fn test_decodes_data_and_control_fields() {
        let record = record_from_value(json!({
            "id": 10_001_936,
            "varFields": [
                { "fieldTag": "_", "marcTag": "008", "content": "850101s1985" },
                { "fieldTag": "t", "marcTag": "245", "ind1": "1", "ind2": "0",
                  "subfields": [
                      { "tag": "6", "content": "880-01" },
                      { "tag": "a", "content": "Title" }
                  ] }
            ]
        }))
        .unwrap();

        assert_eq!(record.id.as_deref(), Some("10001936"));
        assert_eq!(record.get_control_field("008"), Some("850101s1985"));
        let field = record.fields_by_tag("245").next().unwrap();
        assert_eq!(field.indicator1, '1');
        assert_eq!(field.get_subfield('6'), Some("880-01"));
    }

    #[test]
    fn test_falls_back_to_field_tag() {
        let record = record_from_value(json!({
            "varFields": [
                { "fieldTag": "y", "content": "note" },
                { "fieldTag": "n", "marcTag": "", "content": "other" },
                { "content": "untagged" }
            ]
        }))
        .unwrap();

        let tags: Vec<&str> = record.raw_fields().iter().map(RawField::tag).collect();
        assert_eq!(tags, vec!["y", "n"]);
        assert!(record.id.is_none());
    }

    #[test]
    fn test_missing_indicators_and_null_content() {
        let record = record_from_value(json!({
            "varFields": [
                { "marcTag": "650", "subfields": [ { "tag": "a", "content": null } ] }
            ]
        }))
        .unwrap();
        let field = record.fields_by_tag("650").next().unwrap();
        assert_eq!((field.indicator1, field.indicator2), (' ', ' '));
        assert_eq!(field.get_subfield('a'), Some(""));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(record_from_json("{"), Err(NormalizeError::Json(_))));
        assert!(matches!(
            record_from_json(r#"{"varFields": 3}"#),
            Err(NormalizeError::Json(_))
        ));
    }
}
