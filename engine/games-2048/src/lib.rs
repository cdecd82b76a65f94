//! 2048 game implementation for the Slide engine
//!
//! The board side length is a const generic, so every size is its own type:
//! `Game2048<4>` and `Game2048<5>` share code but not a type. The engine-games
//! crate erases the size again for run-time callers.
//!
//! [`Tablebase`] computes exact win chances and best moves for boards small
//! enough to enumerate.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::Game;
//! use games_2048::Game2048;
//!
//! let mut game = Game2048::<4>::new(0.1, 42);
//! game.swipe(0, 1).unwrap();
//! println!("{}", game);
//! ```

use std::fmt;

use engine_core::typed::{Direction, EngineError, Game};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

mod grid;
mod tablebase;

pub use grid::{tile_to_str, tile_value, Grid};
pub use tablebase::{Tablebase, TablebaseError};

/// A single 2048 game on an N x N board
///
/// Random tile placement comes from a ChaCha20 RNG seeded at construction.
/// `reset` re-seeds it, so a reset game always starts from the same board.
#[derive(Debug, Clone)]
pub struct Game2048<const N: usize> {
    grid: Grid<N>,
    score: u64,
    four_chance: f64,
    seed: u64,
    rng: ChaCha20Rng,
    game_over: bool,
}

impl<const N: usize> Game2048<N> {
    /// Start a game from an explicit board instead of a random first tile
    pub fn with_grid(grid: Grid<N>, four_chance: f64, seed: u64) -> Self {
        Self {
            grid,
            score: 0,
            four_chance,
            seed,
            rng: ChaCha20Rng::seed_from_u64(seed),
            game_over: !grid.can_move(),
        }
    }

    pub fn grid(&self) -> &Grid<N> {
        &self.grid
    }

    pub fn four_chance(&self) -> f64 {
        self.four_chance
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Apply a decoded move
    ///
    /// A tile is spawned only if the move changed the board.
    pub fn apply(&mut self, dir: Direction) -> Result<u64, EngineError> {
        if self.game_over {
            return Err(EngineError::GameOver);
        }
        let before = self.grid;
        let gained = self.grid.swipe(dir);
        self.score = self.score.saturating_add(gained);
        if self.grid != before {
            self.grid.spawn_random(&mut self.rng, self.four_chance);
            self.game_over = !self.grid.can_move();
        }
        Ok(gained)
    }
}

impl<const N: usize> Game for Game2048<N> {
    const SIZE: u32 = N as u32;

    fn new(four_chance: f64, seed: u64) -> Self {
        let mut game = Self::with_grid(Grid::new(), four_chance, seed);
        game.reset();
        game
    }

    fn reset(&mut self) {
        self.rng = ChaCha20Rng::seed_from_u64(self.seed);
        self.grid = Grid::new();
        self.grid.spawn_random(&mut self.rng, self.four_chance);
        self.score = 0;
        self.game_over = false;
    }

    fn score(&self) -> u64 {
        self.score
    }

    fn swipe(&mut self, dir_row: i32, dir_col: i32) -> Result<u64, EngineError> {
        self.apply(Direction::from_delta(dir_row, dir_col)?)
    }

    fn is_game_over(&self) -> bool {
        self.game_over
    }
}

impl<const N: usize> fmt::Display for Game2048<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {}", self.score)?;
        write!(f, "{}", self.grid)
    }
}

#[cfg(test)]
mod tests;
