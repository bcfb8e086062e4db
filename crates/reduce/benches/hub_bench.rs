//! Benchmarks for opmerge-reduce.
//!
//! Target: folding a mutation < 1μs, building a request for 100 fields < 100μs

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use opmerge_core::{FieldValue, Mutation};
use opmerge_reduce::{FieldReducer, ListReducer, MemoryObject, NumberReducer, ReducerFamily, ReductionHub};

fn schema(fields: usize) -> MemoryObject {
    (0..fields).fold(MemoryObject::new(), |object, i| {
        let family = if i % 2 == 0 {
            ReducerFamily::Number
        } else {
            ReducerFamily::List
        };
        object.with_field(format!("f{}", i), family)
    })
}

fn bench_number_reducer(c: &mut Criterion) {
    let mut group = c.benchmark_group("number");

    for size in [1, 10, 100, 1000] {
        let mutations: Vec<Mutation> = (0..size).map(|i| Mutation::increment("n", i as i64)).collect();

        group.bench_with_input(
            BenchmarkId::new("increments", size),
            &mutations,
            |b, mutations| {
                b.iter(|| {
                    let mut reducer = NumberReducer::new();
                    for m in mutations {
                        reducer.reduce(m.clone()).unwrap();
                    }
                    black_box(reducer.finalize())
                })
            },
        );
    }

    group.finish();
}

fn bench_list_reducer(c: &mut Criterion) {
    let mut group = c.benchmark_group("list");

    for size in [1, 10, 100] {
        let mutations: Vec<Mutation> = (0..size)
            .flat_map(|i: i64| {
                [
                    Mutation::add("tags", FieldValue::list([i, i + 1])),
                    Mutation::add_unique("tags", FieldValue::list([i + 2])),
                    Mutation::remove("tags", FieldValue::list([i])),
                ]
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::new("mixed_deltas", size),
            &mutations,
            |b, mutations| {
                b.iter(|| {
                    let mut reducer = ListReducer::new();
                    for m in mutations {
                        reducer.reduce(m.clone()).unwrap();
                    }
                    black_box(reducer.finalize())
                })
            },
        );
    }

    group.finish();
}

fn bench_build_request(c: &mut Criterion) {
    let mut group = c.benchmark_group("hub");

    for fields in [1, 10, 100] {
        let mut hub = ReductionHub::new(schema(fields));
        for i in 0..fields {
            let field = format!("f{}", i);
            if i % 2 == 0 {
                hub.append_mutation(Mutation::increment(field, 1i64)).unwrap();
            } else {
                hub.append_mutation(Mutation::add(field.clone(), FieldValue::list([1i64]))).unwrap();
                hub.append_mutation(Mutation::remove(field, FieldValue::list([2i64]))).unwrap();
            }
        }

        group.bench_with_input(BenchmarkId::new("build_request", fields), &hub, |b, hub| {
            b.iter(|| black_box(hub.build_request()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_number_reducer, bench_list_reducer, bench_build_request);
criterion_main!(benches);
