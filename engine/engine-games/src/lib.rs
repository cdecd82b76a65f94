//! Size-erased access to the 2048 engine family
//!
//! This crate owns the one list of board sizes the workspace is built for and
//! the process-wide [`DispatchTable`] generated from it. Callers that only
//! learn the board size at run time use the free functions below, passing the
//! size tag as the first argument of every call.
//!
//! # Usage
//!
//! ```rust
//! use engine_games::{create_game, delete_game, get_score, render_game, swipe};
//!
//! let mut game = create_game(4, 0.1).unwrap();
//! swipe(4, &mut game, 0, 1).unwrap();
//! println!("{}", render_game(4, &game).unwrap());
//! assert!(get_score(4, &game).unwrap() < 100);
//! delete_game(4, game).unwrap();
//!
//! assert!(create_game(9, 0.1).is_err());
//! ```

use std::fmt;

use engine_core::size_dispatch;
use games_2048::Game2048;
use once_cell::sync::Lazy;

pub use engine_core::{
    DispatchError, DispatchTable, GameHandle, RejectedDestroy, SizeTag, SupportedSizes,
};

macro_rules! compiled_sizes {
    ($($size:literal),+ $(,)?) => {
        /// Board sizes with a compiled specialization, in ascending order
        pub const SUPPORTED_SIZES: &[u32] = &[$($size),+];

        fn build_table() -> DispatchTable {
            size_dispatch!(Game2048; $($size),+)
        }
    };
}

compiled_sizes!(2, 3, 4, 5, 6, 7, 8);

static TABLE: Lazy<DispatchTable> = Lazy::new(build_table);

/// The process-wide dispatch table
///
/// Built on first use and never modified afterwards, so it can be shared
/// freely between threads.
pub fn dispatcher() -> &'static DispatchTable {
    &TABLE
}

/// The supported board sizes
pub fn supported_sizes() -> &'static SupportedSizes {
    TABLE.supported_sizes()
}

/// Check if `size` has a compiled specialization
pub fn is_valid_game_size(size: SizeTag) -> bool {
    TABLE.is_supported(size)
}

/// Create a new game of the given size
///
/// `four_chance` is the probability that a spawned tile is a 4.
pub fn create_game(size: SizeTag, four_chance: f64) -> Result<GameHandle, DispatchError> {
    TABLE.create(size, four_chance)
}

/// Create a new game whose random tiles follow `seed`
pub fn create_game_seeded(
    size: SizeTag,
    four_chance: f64,
    seed: u64,
) -> Result<GameHandle, DispatchError> {
    TABLE.create_seeded(size, four_chance, seed)
}

/// Release a game
///
/// On failure the handle is returned inside the error.
pub fn delete_game(size: SizeTag, game: GameHandle) -> Result<(), RejectedDestroy> {
    TABLE.destroy(size, game)
}

pub fn reset_game(size: SizeTag, game: &mut GameHandle) -> Result<(), DispatchError> {
    TABLE.reset(size, game)
}

pub fn get_score(size: SizeTag, game: &GameHandle) -> Result<u64, DispatchError> {
    TABLE.score(size, game)
}

/// Swipe the board by `(dir_row, dir_col)`, returning the points gained
pub fn swipe(
    size: SizeTag,
    game: &mut GameHandle,
    dir_row: i32,
    dir_col: i32,
) -> Result<u64, DispatchError> {
    TABLE.apply_move(size, game, dir_row, dir_col)
}

pub fn is_game_over(size: SizeTag, game: &GameHandle) -> Result<bool, DispatchError> {
    TABLE.is_game_over(size, game)
}

/// Write the score and board to `out`
pub fn print_game(
    out: &mut dyn fmt::Write,
    size: SizeTag,
    game: &GameHandle,
) -> Result<(), DispatchError> {
    TABLE.render(size, game, out)
}

/// Render the score and board into a string
pub fn render_game(size: SizeTag, game: &GameHandle) -> Result<String, DispatchError> {
    TABLE.render_to_string(size, game)
}
