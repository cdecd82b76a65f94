use super::*;
use rand::SeedableRng;

fn row_after<const N: usize>(row: [u8; N], dir: Direction) -> ([u8; N], u64) {
    let mut rows = [[0u8; N]; N];
    rows[0] = row;
    let mut grid = Grid::from_rows(rows);
    let gained = grid.swipe(dir);
    (grid.rows()[0], gained)
}

#[test]
fn test_tile_strings() {
    assert_eq!(tile_to_str(0), "-");
    assert_eq!(tile_to_str(1), "2");
    assert_eq!(tile_to_str(11), "2048");
    assert_eq!(tile_to_str(65), "36893488147419103232");
    assert_eq!(tile_value(3), 8);
    assert_eq!(tile_value(64), u64::MAX);
}

#[test]
fn test_slide_left_packs_and_merges() {
    assert_eq!(row_after([0, 1, 0, 1], Direction::Left), ([2, 0, 0, 0], 4));
    assert_eq!(row_after([1, 0, 2, 0], Direction::Left), ([1, 2, 0, 0], 0));
    assert_eq!(row_after([3, 3, 3, 0], Direction::Left), ([4, 3, 0, 0], 16));
}

#[test]
fn test_merged_tile_does_not_merge_again() {
    assert_eq!(row_after([1, 1, 0, 2], Direction::Left), ([2, 2, 0, 0], 4));
    assert_eq!(row_after([2, 0, 1, 1], Direction::Right), ([0, 0, 2, 2], 4));
}

#[test]
fn test_tile_sum() {
    assert_eq!(Grid::<3>::new().tile_sum(), 0);
    assert_eq!(Grid::from_rows([[1, 0], [3, 2]]).tile_sum(), 2 + 8 + 4);
}

#[test]
fn test_slide_right_merges_from_the_wall() {
    assert_eq!(row_after([1, 1, 1, 0], Direction::Right), ([0, 0, 1, 2], 4));
    assert_eq!(row_after([2, 0, 0, 2], Direction::Right), ([0, 0, 0, 3], 8));
}

#[test]
fn test_each_tile_merges_at_most_once() {
    assert_eq!(row_after([1, 1, 1, 1], Direction::Left), ([2, 2, 0, 0], 8));
    assert_eq!(row_after([1, 1, 2, 0], Direction::Left), ([2, 2, 0, 0], 4));
    assert_eq!(row_after([1, 1, 0, 2], Direction::Left), ([2, 2, 0, 0], 4));
    assert_eq!(row_after([2, 1, 1, 0], Direction::Left), ([2, 2, 0, 0], 4));
}

#[test]
fn test_vertical_swipes() {
    let mut grid = Grid::from_rows([[1, 0, 2], [1, 0, 0], [0, 3, 2]]);
    let gained = grid.swipe(Direction::Up);
    assert_eq!(*grid.rows(), [[2, 3, 3], [0, 0, 0], [0, 0, 0]]);
    assert_eq!(gained, 4 + 8);

    let mut grid = Grid::from_rows([[1, 0, 2], [1, 0, 0], [0, 3, 2]]);
    grid.swipe(Direction::Down);
    assert_eq!(*grid.rows(), [[0, 0, 0], [0, 0, 0], [2, 3, 3]]);
}

#[test]
fn test_swipe_without_change_gains_nothing() {
    let mut grid = Grid::from_rows([[1, 2], [2, 1]]);
    let before = grid;
    for dir in Direction::ALL {
        assert_eq!(grid.swipe(dir), 0);
        assert_eq!(grid, before);
    }
}

#[test]
fn test_grid_queries() {
    let grid = Grid::from_rows([[0, 1, 0], [4, 0, 0], [0, 0, 2]]);
    assert_eq!(grid.num_empty_tiles(), 6);
    assert!(grid.has_tile(4));
    assert!(!grid.has_tile(3));
    assert_eq!(grid.max_tile(), 4);
    assert!(grid.is_empty(0, 0));
    assert_eq!(grid.read_tile(1, 0), 4);
    assert_eq!(Grid::<3>::new().max_tile(), 0);
}

#[test]
fn test_can_move() {
    assert!(Grid::<2>::new().can_move());
    assert!(Grid::from_rows([[1, 1], [2, 3]]).can_move());
    assert!(Grid::from_rows([[1, 2], [1, 3]]).can_move());
    assert!(!Grid::from_rows([[1, 2], [2, 1]]).can_move());
}

#[test]
fn test_spawn_random_fills_one_empty_cell() {
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let mut grid = Grid::<3>::new();

    for placed in 1..=9 {
        assert!(grid.spawn_random(&mut rng, 0.5));
        assert_eq!(grid.num_empty_tiles(), 9 - placed);
    }
    assert!(!grid.spawn_random(&mut rng, 0.5));
    assert!(grid.rows().iter().flatten().all(|&t| t == 1 || t == 2));
}

#[test]
fn test_spawn_respects_four_chance_extremes() {
    let mut rng = ChaCha20Rng::seed_from_u64(11);

    let mut twos = Grid::<4>::new();
    let mut fours = Grid::<4>::new();
    for _ in 0..16 {
        twos.spawn_random(&mut rng, 0.0);
        fours.spawn_random(&mut rng, 1.0);
    }
    assert!(twos.rows().iter().flatten().all(|&t| t == 1));
    assert!(fours.rows().iter().flatten().all(|&t| t == 2));
}

#[test]
fn test_grid_display() {
    let grid = Grid::from_rows([[0, 1], [11, 2]]);
    assert_eq!(
        grid.to_string(),
        "       -       2\n    2048       4\n"
    );
}

#[test]
fn test_new_game_has_one_tile_and_zero_score() {
    let game = Game2048::<4>::new(0.2, 7);
    assert_eq!(game.score(), 0);
    assert_eq!(game.grid().num_empty_tiles(), 15);
    assert!(!game.is_game_over());
    assert_eq!(Game2048::<4>::SIZE, 4);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = Game2048::<5>::new(0.3, 99);
    let mut b = Game2048::<5>::new(0.3, 99);
    for (row, col) in [(0, 1), (1, 0), (0, -1), (-1, 0), (0, 1), (1, 0)] {
        assert_eq!(a.swipe(row, col), b.swipe(row, col));
    }
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn test_reset_is_idempotent() {
    let mut game = Game2048::<3>::new(0.2, 5);
    let fresh = game.to_string();

    game.swipe(0, 1).unwrap();
    game.swipe(1, 0).unwrap();
    game.reset();
    let once = game.to_string();
    game.reset();
    let twice = game.to_string();

    assert_eq!(once, fresh);
    assert_eq!(once, twice);
    assert_eq!(game.score(), 0);
}

#[test]
fn test_swipe_scores_merges() {
    let grid = Grid::from_rows([[1, 1, 0, 0], [0; 4], [0; 4], [2, 0, 2, 0]]);
    let mut game = Game2048::with_grid(grid, 0.0, 1);

    assert_eq!(game.swipe(0, -1).unwrap(), 4 + 8);
    assert_eq!(game.score(), 12);
    assert_eq!(game.grid().read_tile(0, 0), 2);
    assert_eq!(game.grid().read_tile(3, 0), 3);
    // the board changed, so exactly one tile was spawned
    assert_eq!(game.grid().num_empty_tiles(), 16 - 3);
}

#[test]
fn test_unchanged_board_spawns_nothing() {
    let grid = Grid::from_rows([[1, 2, 0], [0; 3], [0; 3]]);
    let mut game = Game2048::with_grid(grid, 0.0, 1);

    assert_eq!(game.swipe(0, -1).unwrap(), 0);
    assert_eq!(*game.grid(), grid);
}

#[test]
fn test_invalid_direction_is_rejected() {
    let mut game = Game2048::<4>::new(0.2, 1);
    let before = game.to_string();

    for (row, col) in [(0, 0), (1, 1), (2, 0), (-1, -1)] {
        assert_eq!(
            game.swipe(row, col),
            Err(EngineError::InvalidDirection { row, col })
        );
    }
    assert_eq!(game.to_string(), before);
}

#[test]
fn test_game_over_detection() {
    // Swiping left frees (1, 1); the only possible spawn is a 2 that
    // matches none of its neighbours.
    let grid = Grid::from_rows([[1, 2], [0, 3]]);
    let mut game = Game2048::with_grid(grid, 0.0, 1);
    assert!(!game.is_game_over());

    game.swipe(0, -1).unwrap();
    assert_eq!(*game.grid(), Grid::from_rows([[1, 2], [3, 1]]));
    assert!(game.is_game_over());
    assert_eq!(game.swipe(0, 1), Err(EngineError::GameOver));
    assert_eq!(game.apply(Direction::Down), Err(EngineError::GameOver));
    assert_eq!(*game.grid(), Grid::from_rows([[1, 2], [3, 1]]));

    game.reset();
    assert!(!game.is_game_over());
}

#[test]
fn test_with_grid_detects_stuck_board() {
    let game = Game2048::with_grid(Grid::from_rows([[1, 2], [2, 1]]), 0.1, 1);
    assert!(game.is_game_over());
}

#[test]
fn test_display_shows_score_and_board() {
    let grid = Grid::from_rows([[1, 1], [0, 0]]);
    let mut game = Game2048::with_grid(grid, 0.0, 4);
    game.swipe(0, -1).unwrap();

    let text = game.to_string();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Score: 4"));
    assert_eq!(lines.next().map(str::len), Some(16));
    assert!(text.starts_with("Score: 4\n       4"));
    assert_eq!(text.lines().count(), 3);
}

#[test]
fn test_random_play_terminates_on_small_board() {
    let mut game = Game2048::<2>::new(0.5, 2024);
    let moves = [(0, 1), (1, 0), (0, -1), (-1, 0)];
    let mut turns = 0;
    while !game.is_game_over() && turns < 10_000 {
        let (row, col) = moves[turns % moves.len()];
        game.swipe(row, col).unwrap();
        turns += 1;
    }
    assert!(game.is_game_over());
    assert!(game.grid().max_tile() >= 2);
}
