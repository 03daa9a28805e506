//! # Match Benchmarks
//!
//! Measures controller throughput: round setup and complete rounds played
//! through the command API.
//!
//! Run: `cargo bench --bench match_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qbr_game::{GameConfig, GameController, PlayerId};
use qbr_quantum::GateKind;

const GATES: [GateKind; 3] = [GateKind::H, GateKind::Cnot, GateKind::X];

fn controller(bullets: usize) -> GameController {
    let config = GameConfig {
        num_bullets: bullets,
        num_lives: u32::MAX,
        event_history_size: 0,
        ..GameConfig::default()
    };
    GameController::new(config.with_seed(7)).unwrap()
}

/// Benchmark round initialization
fn bench_round_setup(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_setup");

    for bullets in [4, 6, 10] {
        group.bench_with_input(BenchmarkId::from_parameter(bullets), &bullets, |b, &bullets| {
            b.iter(|| {
                let mut game = controller(bullets);
                game.start_new_round().unwrap();
                black_box(game.round())
            })
        });
    }

    group.finish();
}

/// Benchmark a full round: selection, one gate per turn, every bullet fired
fn bench_full_round(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_round");

    for bullets in [6, 10] {
        let mut game = controller(bullets);
        group.bench_with_input(BenchmarkId::from_parameter(bullets), &bullets, |b, _| {
            b.iter(|| {
                game.start_new_round().unwrap();
                game.submit_gate_selection(PlayerId::One, &GATES).unwrap();
                game.submit_gate_selection(PlayerId::Two, &GATES).unwrap();
                game.start_playing_phase().unwrap();
                while !game.is_round_over() {
                    let next = game.chamber().map_or(0, |c| c.current_position());
                    let _ = game.apply_gate(GateKind::H, next, None);
                    black_box(game.shoot(false).unwrap());
                }
                black_box(game.visible_bullet_states(PlayerId::One).unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_round_setup, bench_full_round);
criterion_main!(benches);
