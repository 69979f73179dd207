//! Catalog record structures as delivered by the upstream record decoder.
//!
//! This module provides the field model the resolver works over:
//! - [`Record`] — an identifier plus the ordered list of raw fields
//! - [`RawField`] — one field, either a [`ControlField`] or a data [`Field`]
//! - [`Field`] — a tagged variable field with indicators and ordered [`Subfield`]s
//!
//! Fields are decoded once into these types; nothing downstream inspects the
//! shape of the original payload again.
//!
//! # Examples
//!
//! ```
//! use marcnorm::{Field, Record};
//!
//! let record = Record::builder()
//!     .id("b12345678")
//!     .control_field("008", "850101s1985    nyu           000 0 eng d")
//!     .field(
//!         Field::builder("245", '1', '0')
//!             .subfield('a', "Title")
//!             .subfield('b', "subtitle")
//!             .build(),
//!     )
//!     .build();
//!
//! assert_eq!(record.fields_by_tag("245").count(), 1);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A catalog record: an optional identifier and its fields in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Upstream record identifier
    pub id: Option<String>,
    /// All fields, control and data, in the order the source listed them
    pub fields: Vec<RawField>,
}

/// One field of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    /// A tagged data field with subfields
    Data(Field),
    /// A fixed field carrying flat content
    Control(ControlField),
}

/// A fixed (non-subfielded) field such as 001 or 008.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlField {
    /// Field tag (3 characters)
    pub tag: String,
    /// Flat field content
    pub content: String,
}

/// A variable data field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field tag (3 characters)
    pub tag: String,
    /// First indicator
    pub indicator1: char,
    /// Second indicator
    pub indicator2: char,
    /// Subfields (stored in `SmallVec` to avoid allocation for typical fields with 4 or fewer subfields)
    pub subfields: SmallVec<[Subfield; 4]>,
}

/// A subfield within a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subfield {
    /// Subfield code (single character)
    pub code: char,
    /// Subfield value
    pub value: String,
}

impl Record {
    /// Create an empty record with the given identifier
    #[must_use]
    pub fn new(id: Option<String>) -> Self {
        Record {
            id,
            fields: Vec::new(),
        }
    }

    /// Create a builder for fluently constructing records
    #[must_use]
    pub fn builder() -> RecordBuilder {
        RecordBuilder {
            record: Record::default(),
        }
    }

    /// Append a data field
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(RawField::Data(field));
    }

    /// Append a control field
    pub fn add_control_field(&mut self, tag: &str, content: &str) {
        self.fields.push(RawField::Control(ControlField {
            tag: tag.to_string(),
            content: content.to_string(),
        }));
    }

    /// Get the content of the first control field with a given tag
    #[must_use]
    pub fn get_control_field(&self, tag: &str) -> Option<&str> {
        self.fields.iter().find_map(|f| match f {
            RawField::Control(c) if c.tag == tag => Some(c.content.as_str()),
            _ => None,
        })
    }

    /// Iterate over data fields matching a specific tag
    pub fn fields_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Field> + 'a {
        self.fields.iter().filter_map(move |f| match f {
            RawField::Data(field) if field.tag == tag => Some(field),
            _ => None,
        })
    }

    /// Get all raw fields as a slice
    #[must_use]
    pub fn raw_fields(&self) -> &[RawField] {
        &self.fields
    }
}

impl RawField {
    /// The field tag
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            RawField::Data(f) => &f.tag,
            RawField::Control(c) => &c.tag,
        }
    }

    /// The data field, if this is one
    #[must_use]
    pub fn as_data(&self) -> Option<&Field> {
        match self {
            RawField::Data(f) => Some(f),
            RawField::Control(_) => None,
        }
    }

    /// The flat content, if this is a control field
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        match self {
            RawField::Control(c) => Some(&c.content),
            RawField::Data(_) => None,
        }
    }

    /// First value of a subfield code; always `None` for control fields
    #[must_use]
    pub fn get_subfield(&self, code: char) -> Option<&str> {
        self.as_data().and_then(|f| f.get_subfield(code))
    }
}

impl From<Field> for RawField {
    fn from(field: Field) -> Self {
        RawField::Data(field)
    }
}

impl From<ControlField> for RawField {
    fn from(field: ControlField) -> Self {
        RawField::Control(field)
    }
}

impl Field {
    /// Create a new data field
    #[must_use]
    pub fn new(tag: &str, indicator1: char, indicator2: char) -> Self {
        Field {
            tag: tag.to_string(),
            indicator1,
            indicator2,
            subfields: SmallVec::new(),
        }
    }

    /// Create a builder for constructing fields fluently
    ///
    /// # Examples
    ///
    /// ```
    /// use marcnorm::Field;
    ///
    /// let field = Field::builder("245", '1', '0')
    ///     .subfield('6', "880-01")
    ///     .subfield('a', "Title")
    ///     .build();
    /// assert_eq!(field.get_subfield('a'), Some("Title"));
    /// ```
    #[must_use]
    pub fn builder(tag: &str, indicator1: char, indicator2: char) -> FieldBuilder {
        FieldBuilder {
            field: Field::new(tag, indicator1, indicator2),
        }
    }

    /// Add a subfield
    pub fn add_subfield(&mut self, code: char, value: &str) {
        self.subfields.push(Subfield {
            code,
            value: value.to_string(),
        });
    }

    /// Get first value for a subfield code
    #[must_use]
    pub fn get_subfield(&self, code: char) -> Option<&str> {
        self.subfields
            .iter()
            .find(|sf| sf.code == code)
            .map(|sf| sf.value.as_str())
    }

    /// Iterate over subfields with a specific code
    pub fn subfields_by_code(&self, code: char) -> impl Iterator<Item = &str> {
        self.subfields
            .iter()
            .filter(move |sf| sf.code == code)
            .map(|sf| sf.value.as_str())
    }
}

/// Builder for fluently constructing records
#[derive(Debug)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    /// Set the record identifier
    #[must_use]
    pub fn id(mut self, id: &str) -> Self {
        self.record.id = Some(id.to_string());
        self
    }

    /// Append a control field
    #[must_use]
    pub fn control_field(mut self, tag: &str, content: &str) -> Self {
        self.record.add_control_field(tag, content);
        self
    }

    /// Append a data field
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.record.add_field(field);
        self
    }

    /// Build the record
    #[must_use]
    pub fn build(self) -> Record {
        self.record
    }
}

/// Builder for fluently constructing fields
#[derive(Debug)]
pub struct FieldBuilder {
    field: Field,
}

impl FieldBuilder {
    /// Add a subfield to the field being built
    #[must_use]
    pub fn subfield(mut self, code: char, value: &str) -> Self {
        self.field.add_subfield(code, value);
        self
    }

    /// Build the field
    #[must_use]
    pub fn build(self) -> Field {
        self.field
    }
}
