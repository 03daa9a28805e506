//! # Chamber Benchmarks
//!
//! Measures the amplitude-vector hot paths: gate application, measurement
//! and marginal probabilities across chamber sizes.
//!
//! Run: `cargo bench --bench chamber_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qbr_quantum::{GateKind, QuantumChamber};

fn loaded(size: usize) -> QuantumChamber {
    let mut chamber = QuantumChamber::with_seed(size, 42).unwrap();
    let live: Vec<usize> = (0..size).step_by(2).collect();
    chamber.initialize(size, &live).unwrap();
    chamber
}

/// Benchmark single and controlled gates
fn bench_gates(c: &mut Criterion) {
    let mut group = c.benchmark_group("gates");

    for size in [4, 6, 10, 16] {
        let chamber = loaded(size);

        group.bench_with_input(BenchmarkId::new("hadamard", size), &size, |b, _| {
            let mut chamber = chamber.clone();
            b.iter(|| black_box(chamber.apply_gate(GateKind::H, 1, None)))
        });

        group.bench_with_input(BenchmarkId::new("cnot", size), &size, |b, _| {
            let mut chamber = chamber.clone();
            b.iter(|| black_box(chamber.apply_gate(GateKind::Cnot, 0, Some(size - 1))))
        });
    }

    group.finish();
}

/// Benchmark firing a whole chamber after some mixing
fn bench_measure(c: &mut Criterion) {
    let mut group = c.benchmark_group("measure");

    for size in [6, 10, 16] {
        let mut mixed = loaded(size);
        for p in 0..size {
            mixed.apply_gate(GateKind::H, p, None).unwrap();
        }
        mixed.apply_gate(GateKind::Cnot, 0, Some(1)).unwrap();

        group.bench_with_input(BenchmarkId::new("fire_all", size), &mixed, |b, mixed| {
            b.iter(|| {
                let mut chamber = mixed.clone();
                while let Some(shot) = chamber.fire_next() {
                    black_box(shot);
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("probabilities", size), &mixed, |b, mixed| {
            b.iter(|| black_box(mixed.probabilities()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_gates, bench_measure);
criterion_main!(benches);
