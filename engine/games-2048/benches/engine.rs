use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use engine_core::{Direction, Game};
use games_2048::{Game2048, Grid};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn bench_reset(c: &mut Criterion) {
    let mut group = c.benchmark_group("game2048_reset");
    group.bench_function("reset_4x4", |b| {
        let mut game = Game2048::<4>::new(0.1, 42);
        b.iter(|| game.reset());
    });
    group.bench_function("reset_8x8", |b| {
        let mut game = Game2048::<8>::new(0.1, 42);
        b.iter(|| game.reset());
    });
    group.finish();
}

fn bench_swipe(c: &mut Criterion) {
    let mut group = c.benchmark_group("game2048_swipe");
    let busy = Grid::from_rows([[1, 1, 2, 2], [3, 0, 3, 1], [0, 2, 2, 0], [4, 4, 1, 1]]);
    for dir in Direction::ALL {
        group.bench_function(format!("grid_4x4_{}", dir), |b| {
            b.iter_batched(
                || busy,
                |mut grid| grid.swipe(dir),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_spawn(c: &mut Criterion) {
    let mut group = c.benchmark_group("game2048_spawn");
    group.bench_function("spawn_8x8", |b| {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        b.iter_batched(
            Grid::<8>::new,
            |mut grid| grid.spawn_random(&mut rng, 0.1),
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_reset, bench_swipe, bench_spawn);
criterion_main!(benches);
