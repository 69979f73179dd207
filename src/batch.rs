//! Parallel resolution across many records using Rayon.
//!
//! Each record gets its own [`RecordContext`], so records are independent
//! tasks on Rayon's work-stealing pool with no shared mutable state.
//!
//! # Examples
//!
//! ```
//! use marcnorm::batch::resolve_batch;
//! use marcnorm::{Field, Record, ResolveOptions};
//!
//! let records: Vec<Record> = (1..=3)
//!     .map(|n| {
//!         Record::builder()
//!             .field(Field::builder("245", '1', '0').subfield('a', &format!("Title {n}")).build())
//!             .build()
//!     })
//!     .collect();
//!
//! let resolved = resolve_batch(&records, "245", Some(&['a']), &ResolveOptions::default());
//! assert_eq!(resolved.len(), 3);
//! assert_eq!(resolved[2][0].value.as_deref(), Some("Title 3"));
//! ```

use crate::record::Record;
use crate::resolver::{RecordContext, ResolveOptions, ResolvedValue};
use rayon::prelude::*;

/// Resolve `tag` in every record in parallel, preserving record order.
#[must_use]
pub fn resolve_batch(
    records: &[Record],
    tag: &str,
    wanted_subtags: Option<&[char]>,
    options: &ResolveOptions,
) -> Vec<Vec<ResolvedValue>> {
    records
        .par_iter()
        .map(|record| RecordContext::from_record(record).resolve(tag, wanted_subtags, options))
        .collect()
}

/// Resolve several tags per record in parallel.
///
/// Returns, per record, one result list per entry of `queries`, sharing a
/// single [`RecordContext`] per record.
#[must_use]
pub fn resolve_batch_tags(
    records: &[Record],
    queries: &[(&str, Option<&[char]>)],
    options: &ResolveOptions,
) -> Vec<Vec<Vec<ResolvedValue>>> {
    records
        .par_iter()
        .map(|record| {
            let context = RecordContext::from_record(record);
            queries
                .iter()
                .map(|(tag, wanted)| context.resolve(tag, *wanted, options))
                .collect()
        })
        .collect()
}
