#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # marcnorm: MARC field resolution and normalization
//!
//! Turns the variable fields of a catalog record into values ready for a
//! search index: resolved text paired with its alternate-script (880)
//! counterpart, typed date ranges, volume ranges and sortable shelf keys.
//!
//! ## Quick Start
//!
//! ```
//! use marcnorm::{resolve, Field, Record, ResolveOptions};
//! use marcnorm::temporal::date_range_from_single_date;
//!
//! let record = Record::builder()
//!     .field(
//!         Field::builder("245", '1', '0')
//!             .subfield('6', "880-01")
//!             .subfield('a', "Title")
//!             .build(),
//!     )
//!     .field(
//!         Field::builder("880", '1', '0')
//!             .subfield('6', "245-01/(2/r")
//!             .subfield('a', "שם")
//!             .build(),
//!     )
//!     .build();
//!
//! let titles = resolve(record.raw_fields(), "245", Some(&['a']), &ResolveOptions::default());
//! assert_eq!(titles[0].parallel_value(), Some("שם"));
//!
//! let range = date_range_from_single_date("2016", "10", "", "201610").unwrap();
//! assert_eq!(range.lt(), Some("2016-11-01"));
//! ```
//!
//! ## Modules
//!
//! - [`record`] — Record and field structures (`Record`, `RawField`, `Field`, `Subfield`)
//! - [`field_linkage`] — Subfield 6 link codes, scripts and directions
//! - [`field_query`] — Field predicates for narrowing a resolution
//! - [`resolver`] — Primary/alternate-script field resolution
//! - [`range`] — Date and numeric range types
//! - [`temporal`] — Free-text and year-code date normalization
//! - [`fixed_field`] — 008 date elements
//! - [`enumeration`] — Volume/issue ranges from enumeration text
//! - [`shelf_key`] — Sortable keys for shelf marks
//! - [`config`] — Season and shelf-label vocabularies
//! - [`json`] — Upstream JSON record decoding
//! - [`batch`] — Parallel resolution across records
//! - [`error`] — Error types and result type

pub mod batch;
pub mod config;
pub mod enumeration;
pub mod error;
pub mod field_linkage;
pub mod field_query;
pub mod fixed_field;
pub mod json;
pub mod range;
/// Record and field structures (`Record`, `RawField`, `Field`, `Subfield`)
pub mod record;
pub mod resolver;
pub mod shelf_key;
pub mod temporal;

pub use config::{NormalizerConfig, Season};
pub use enumeration::{parse_volume, VolumeLabel};
pub use error::{NormalizeError, Result};
pub use field_linkage::{parse_link_code, Direction, LinkCode, ScriptId};
pub use field_query::FieldQuery;
pub use fixed_field::FixedFieldDates;
pub use range::{DateRange, NumericRange, UpperBound};
pub use record::{ControlField, Field, FieldBuilder, RawField, Record, RecordBuilder, Subfield};
pub use resolver::{
    dedupe, resolve, RecordContext, ResolveOptions, ResolvedParallel, ResolvedValue, SubpartValue,
};
pub use shelf_key::{sortable_shelf_key, ShelfKeyGenerator};
pub use temporal::{
    date_range_from_single_date, date_range_from_years, free_text_to_iso_date, TemporalNormalizer,
};
