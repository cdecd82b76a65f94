//! Erased Game interface for runtime polymorphism
//!
//! This trait hides the board size of a specialization behind a vtable so that
//! games of every supported size can be held through one type. All typed games
//! are converted to this interface via the adapter layer.

use std::any::Any;
use std::fmt;

use crate::typed::EngineError;

/// Size-erased game trait
///
/// Each method forwards to the specialization's typed counterpart; the board
/// size is reported by [`ErasedGame::size`] instead of being part of the type.
///
/// # Example Usage
///
/// ```rust
/// # use engine_core::erased::ErasedGame;
/// # use engine_core::typed::EngineError;
///
/// fn play_right(game: &mut dyn ErasedGame) -> Result<u64, EngineError> {
///     println!("Playing on a {0}x{0} board", game.size());
///     let gained = game.swipe(0, 1)?;
///     println!("Gained {} points, score now {}", gained, game.score());
///     Ok(gained)
/// }
/// ```
pub trait ErasedGame: Send + Sync + fmt::Debug + 'static {
    /// Board side length of the underlying specialization
    fn size(&self) -> u32;

    /// Restore the initial playable state
    fn reset(&mut self);

    /// Current score
    fn score(&self) -> u64;

    /// Apply a move given as a `(row, col)` step
    ///
    /// # Returns
    ///
    /// The points gained by tiles merging during the move.
    ///
    /// # Errors
    ///
    /// Returns the engine's `EngineError` unchanged.
    fn swipe(&mut self, dir_row: i32, dir_col: i32) -> Result<u64, EngineError>;

    /// Whether no move can change the board any more
    fn is_game_over(&self) -> bool;

    /// Write the textual representation of the game to `out`
    fn render(&self, out: &mut dyn fmt::Write) -> fmt::Result;

    /// Access the concrete specialization for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Mutable access to the concrete specialization for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
