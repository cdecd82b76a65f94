//! Adapter layer converting typed games to the erased interface
//!
//! This module provides the `GameAdapter` struct that turns any typed `Game`
//! specialization into an `ErasedGame`, so games whose board size lives in
//! their type can be stored and driven through `Box<dyn ErasedGame>`.

use std::any::Any;
use std::fmt;

use tracing::trace;

use crate::erased::ErasedGame;
use crate::typed::{EngineError, Game};

/// Adapter that converts typed games to the erased interface
///
/// The adapter reports `T::SIZE` as the board size and forwards every other
/// call to the wrapped game with identical arguments. Engine errors are
/// returned as they are.
///
/// # Example
///
/// ```rust
/// # use engine_core::adapter::GameAdapter;
/// # use engine_core::erased::ErasedGame;
/// # use engine_core::typed::{EngineError, Game};
/// # use std::fmt;
/// #
/// # #[derive(Debug)]
/// # struct Tiny {
/// #     score: u64,
/// # }
/// # impl fmt::Display for Tiny {
/// #     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
/// #         writeln!(f, "Score: {}", self.score)
/// #     }
/// # }
/// # impl Game for Tiny {
/// #     const SIZE: u32 = 2;
/// #     fn new(_four_chance: f64, _seed: u64) -> Self {
/// #         Tiny { score: 0 }
/// #     }
/// #     fn reset(&mut self) {
/// #         self.score = 0;
/// #     }
/// #     fn score(&self) -> u64 {
/// #         self.score
/// #     }
/// #     fn swipe(&mut self, _dir_row: i32, _dir_col: i32) -> Result<u64, EngineError> {
/// #         self.score += 4;
/// #         Ok(4)
/// #     }
/// #     fn is_game_over(&self) -> bool {
/// #         false
/// #     }
/// # }
///
/// let mut erased: Box<dyn ErasedGame> = GameAdapter::<Tiny>::boxed(0.1, 42);
///
/// // Now you can use the erased interface
/// erased.swipe(0, -1).unwrap();
/// assert_eq!(erased.size(), 2);
/// assert_eq!(erased.score(), 4);
/// ```
#[derive(Debug)]
pub struct GameAdapter<T: Game> {
    game: T,
}

impl<T: Game> GameAdapter<T> {
    /// Create a new adapter wrapping the given game
    pub fn new(game: T) -> Self {
        Self { game }
    }

    /// Construct a fresh `T` and return it behind the erased interface
    ///
    /// The signature matches [`crate::registry::GameFactory`], so
    /// `GameAdapter::<T>::boxed` can be placed directly in a dispatch table.
    pub fn boxed(four_chance: f64, seed: u64) -> Box<dyn ErasedGame> {
        Box::new(Self::new(T::new(four_chance, seed)))
    }

    /// Get a reference to the underlying game
    pub fn game(&self) -> &T {
        &self.game
    }

    /// Get a mutable reference to the underlying game
    pub fn game_mut(&mut self) -> &mut T {
        &mut self.game
    }

    /// Consume the adapter and return the underlying game
    pub fn into_inner(self) -> T {
        self.game
    }
}

impl<T: Game> ErasedGame for GameAdapter<T> {
    fn size(&self) -> u32 {
        T::SIZE
    }

    fn reset(&mut self) {
        self.game.reset();
    }

    fn score(&self) -> u64 {
        self.game.score()
    }

    fn swipe(&mut self, dir_row: i32, dir_col: i32) -> Result<u64, EngineError> {
        let gained = self.game.swipe(dir_row, dir_col)?;
        trace!(size = T::SIZE, dir_row, dir_col, gained, "Applied move");
        Ok(gained)
    }

    fn is_game_over(&self) -> bool {
        self.game.is_game_over()
    }

    fn render(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "{}", self.game)
    }

    fn as_any(&self) -> &dyn Any {
        &self.game
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut self.game
    }
}

#[cfg(test)]
#[path = "adapter_tests.rs"]
mod tests;
