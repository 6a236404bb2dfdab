//! Criterion benchmarks for the allocation engine.
//!
//! Uses representative rosters — from the minimal spouse-only case to a
//! crowded ʿawl case — to measure pure pipeline overhead.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mawarith::mirath::{AllocationRunner, HeirCategory, Roster};
use rust_decimal::Decimal;

fn rosters() -> Vec<(&'static str, Roster)> {
    vec![
        ("spouse-only", Roster::new().with(HeirCategory::Husband, 1)),
        (
            "nuclear-family",
            Roster::new()
                .with(HeirCategory::Wife, 1)
                .with(HeirCategory::Son, 2)
                .with(HeirCategory::Daughter, 3),
        ),
        (
            "awl-thirteenths",
            Roster::new()
                .with(HeirCategory::Husband, 1)
                .with(HeirCategory::Daughter, 2)
                .with(HeirCategory::Father, 1),
        ),
        (
            "crowded",
            Roster::new()
                .with(HeirCategory::Wife, 4)
                .with(HeirCategory::Daughter, 2)
                .with(HeirCategory::SonsDaughter, 1)
                .with(HeirCategory::Mother, 1)
                .with(HeirCategory::PaternalGrandmother, 1)
                .with(HeirCategory::FullBrother, 3)
                .with(HeirCategory::FullSister, 2)
                .with(HeirCategory::MaternalBrother, 1)
                .with(HeirCategory::FullPaternalUncle, 1),
        ),
    ]
}

fn bench_allocation(c: &mut Criterion) {
    let estate = Decimal::from(1_000_000);
    let mut group = c.benchmark_group("allocation");

    for (name, roster) in rosters() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &roster, |b, roster| {
            b.iter(|| AllocationRunner::run(black_box(roster), black_box(estate)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_allocation);
criterion_main!(benches);
