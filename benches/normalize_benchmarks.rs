#![allow(missing_docs)]
//! Benchmarks for field resolution and normalization.
//!
//! Measures resolver throughput on a record with linked 880 fields and the
//! cost of each text normalizer using Criterion.rs.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use marcnorm::batch::resolve_batch;
use marcnorm::{
    date_range_from_years, free_text_to_iso_date, parse_volume, sortable_shelf_key, Field,
    Record, RecordContext, ResolveOptions,
};

/// Build a record with `n` linked title/alternate pairs and some subjects.
fn linked_record(n: usize) -> Record {
    let mut builder = Record::builder().control_field("001", "bench");
    for i in 1..=n {
        builder = builder
            .field(
                Field::builder("246", '1', '3')
                    .subfield('6', &format!("880-{i:02}"))
                    .subfield('a', &format!("Variant title {i}"))
                    .build(),
            )
            .field(
                Field::builder("880", '1', '3')
                    .subfield('6', &format!("246-{i:02}/(2/r"))
                    .subfield('a', &format!("כותר {i}"))
                    .build(),
            )
            .field(
                Field::builder("650", ' ', '0')
                    .subfield('a', "Philosophy")
                    .subfield('x', &format!("History {}", i % 3))
                    .build(),
            );
    }
    builder.build()
}

fn benchmark_resolve(c: &mut Criterion) {
    let record = linked_record(20);
    let options = ResolveOptions::default();

    c.bench_function("resolve_linked_246", |b| {
        b.iter(|| {
            let context = RecordContext::from_record(black_box(&record));
            context.resolve("246", Some(&['a']), &options)
        });
    });

    c.bench_function("resolve_dedupe_650", |b| {
        b.iter(|| {
            let context = RecordContext::from_record(black_box(&record));
            context.resolve("650", None, &options)
        });
    });
}

fn benchmark_resolve_batch(c: &mut Criterion) {
    let records: Vec<Record> = (0..1_000).map(|_| linked_record(5)).collect();
    let options = ResolveOptions::default();

    c.bench_function("resolve_batch_1k_records", |b| {
        b.iter(|| resolve_batch(black_box(&records), "246", None, &options));
    });
}

fn benchmark_normalizers(c: &mut Criterion) {
    c.bench_function("free_text_to_iso_date", |b| {
        b.iter(|| free_text_to_iso_date(black_box("Oct. 5, 1987")));
    });

    c.bench_function("date_range_from_years", |b| {
        b.iter(|| date_range_from_years(black_box("19uu"), black_box("1962"), "19uu-1962"));
    });

    c.bench_function("parse_volume", |b| {
        b.iter(|| parse_volume(black_box("v. 23-25 no. 4")));
    });

    c.bench_function("sortable_shelf_key", |b| {
        b.iter(|| sortable_shelf_key(black_box("*T-Mss 1991-010   Box 27")));
    });
}

criterion_group!(
    benches,
    benchmark_resolve,
    benchmark_resolve_batch,
    benchmark_normalizers
);
criterion_main!(benches);
