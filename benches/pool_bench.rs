use criterion::{criterion_group, criterion_main};

mod common;

criterion_group!(
    pool_benches,
    common::bench_pool,
    common::bench_position,
    common::bench_trade,
);
criterion_main!(pool_benches);
