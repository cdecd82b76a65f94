//! Owned handle to a size-erased game
//!
//! A `GameHandle` pairs the erased game with the board size it was created
//! for, so the dispatch table can check every caller-supplied size tag against
//! the handle instead of trusting it.

use crate::erased::ErasedGame;
use crate::typed::Game;

/// Opaque handle to a game created by a dispatch table
///
/// The handle is exclusively owned by the caller. Destroying it through
/// [`crate::registry::DispatchTable::destroy`] consumes it, so it cannot be
/// used or destroyed again afterwards.
///
/// # Example
///
/// ```rust,ignore
/// use engine_games::dispatcher;
///
/// let mut handle = dispatcher().create(4, 0.1).unwrap();
/// dispatcher().apply_move(4, &mut handle, 0, 1).unwrap();
/// println!("{}", dispatcher().render_to_string(4, &handle).unwrap());
/// dispatcher().destroy(4, handle).unwrap();
/// ```
#[derive(Debug)]
pub struct GameHandle {
    size: u32,
    game: Box<dyn ErasedGame>,
}

impl GameHandle {
    pub(crate) fn new(size: u32, game: Box<dyn ErasedGame>) -> Self {
        Self { size, game }
    }

    /// Board size this handle was created with
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Borrow the concrete specialization, if the handle holds a `T`
    pub fn downcast_ref<T: Game>(&self) -> Option<&T> {
        self.game.as_any().downcast_ref::<T>()
    }

    /// Mutably borrow the concrete specialization, if the handle holds a `T`
    pub fn downcast_mut<T: Game>(&mut self) -> Option<&mut T> {
        self.game.as_any_mut().downcast_mut::<T>()
    }

    pub(crate) fn game(&self) -> &dyn ErasedGame {
        self.game.as_ref()
    }

    pub(crate) fn game_mut(&mut self) -> &mut dyn ErasedGame {
        self.game.as_mut()
    }
}
