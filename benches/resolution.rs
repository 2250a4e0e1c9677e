use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scope_probe::controller::{request_pair, transient_pair};
use scope_probe::*;
use std::sync::Arc;

fn bench_singleton_hit(c: &mut Criterion) {
    let mut sc = ServiceCollection::new();
    sc.add_singleton(42u64);
    let sp = sc.build();

    // Prime the singleton
    let _ = sp.get::<u64>().unwrap();

    c.bench_function("singleton_hit_u64", |b| {
        b.iter(|| {
            let v = sp.get::<u64>().unwrap();
            black_box(v);
        })
    });
}

fn bench_scoped_per_scope(c: &mut Criterion) {
    let mut sc = ServiceCollection::new();
    sc.add_scoped_factory::<String, _>(|_| "request".to_string());
    let sp = sc.build();

    c.bench_function("scope_create_and_resolve", |b| {
        b.iter(|| {
            let scope = sp.create_scope();
            black_box(scope.get::<String>().unwrap());
        })
    });
}

fn bench_transient(c: &mut Criterion) {
    let mut sc = ServiceCollection::new();
    sc.add_transient_factory::<Vec<u8>, _>(|_| vec![0u8; 16]);
    let sp = sc.build();

    c.bench_function("transient_vec", |b| {
        b.iter(|| black_box(sp.get::<Vec<u8>>().unwrap()))
    });
}

fn bench_probe_requests(c: &mut Criterion) {
    let sp = container::build_with_source(Arc::new(CounterSource::new()), Lifetime::Transient);

    c.bench_function("probe_request_pair", |b| {
        b.iter(|| black_box(request_pair(&sp.create_scope()).unwrap()))
    });
    c.bench_function("probe_transient_pair", |b| {
        b.iter(|| black_box(transient_pair(&sp.create_scope()).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_singleton_hit,
    bench_scoped_per_scope,
    bench_transient,
    bench_probe_requests
);
criterion_main!(benches);
