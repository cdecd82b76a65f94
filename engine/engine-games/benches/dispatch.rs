use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use engine_games::{create_game_seeded, delete_game, get_score, reset_game, swipe};

fn bench_create_destroy(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch_lifecycle");
    for size in [2i64, 4, 8] {
        group.bench_function(format!("create_destroy_{}x{}", size, size), |b| {
            b.iter(|| {
                let game = create_game_seeded(size, 0.1, 42).unwrap();
                delete_game(size, game).unwrap();
            });
        });
    }
    group.finish();
}

fn bench_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch_operations");
    group.bench_function("score_4x4", |b| {
        let game = create_game_seeded(4, 0.1, 42).unwrap();
        b.iter(|| get_score(4, &game).unwrap());
    });
    group.bench_function("reset_then_swipe_4x4", |b| {
        b.iter_batched(
            || create_game_seeded(4, 0.1, 42).unwrap(),
            |mut game| {
                reset_game(4, &mut game).unwrap();
                swipe(4, &mut game, 0, 1).unwrap();
                game
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_create_destroy, bench_operations);
criterion_main!(benches);
