//! Benchmarks for qualifier hashing and equality.
//!
//! Run with: `cargo bench -p qualia-qualifier`

use std::collections::HashMap;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use qualia_qualifier::{
    AttributeDescriptor, AttributeKind, AttributeValue, MarkerType, QualifierSet, QualifierValue,
    builtin,
};

fn config_type() -> MarkerType {
    MarkerType::builder("Config")
        .attribute(AttributeDescriptor::new("key", AttributeKind::String))
        .attribute(AttributeDescriptor::new(
            "profiles",
            AttributeKind::array_of(AttributeKind::String),
        ))
        .attribute(AttributeDescriptor::new("description", AttributeKind::String).non_binding())
        .build()
        .unwrap()
}

fn config(t: &MarkerType, key: usize, profiles: usize) -> QualifierValue {
    t.literal()
        .with("key", format!("app.setting.{key}"))
        .with(
            "profiles",
            AttributeValue::array((0..profiles).map(|p| format!("profile-{p}"))),
        )
        .with("description", "benchmark value")
        .build()
        .unwrap()
}

fn bench_hash_code(c: &mut Criterion) {
    let t = config_type();
    let mut group = c.benchmark_group("hash_code");

    for profiles in [0usize, 8, 64] {
        let value = config(&t, 1, profiles);
        group.bench_with_input(BenchmarkId::from_parameter(profiles), &value, |b, v| {
            b.iter(|| black_box(v).hash_code());
        });
    }

    group.finish();
}

fn bench_equality(c: &mut Criterion) {
    let t = config_type();
    let a = config(&t, 1, 16);
    let b = config(&t, 1, 16);

    c.bench_function("equals_independent_instances", |bench| {
        bench.iter(|| black_box(&a) == black_box(&b));
    });
}

fn bench_index_lookup(c: &mut Criterion) {
    let t = config_type();
    let mut index: HashMap<QualifierSet, usize> = HashMap::new();
    for key in 0..1_000 {
        let set: QualifierSet = [config(&t, key, 2), builtin::any()].into_iter().collect();
        index.insert(set, key);
    }
    let probe: QualifierSet = [builtin::any(), config(&t, 500, 2)].into_iter().collect();

    c.bench_function("qualifier_set_lookup_1000", |b| {
        b.iter(|| index.get(black_box(&probe)));
    });
}

criterion_group!(benches, bench_hash_code, bench_equality, bench_index_lookup);
criterion_main!(benches);
