//! Board-size dispatch table
//!
//! This module maps a run-time size tag onto the one compile-time
//! specialization built for that size. The table is filled once from a fixed
//! list of sizes and never changes afterwards; every operation looks the tag up
//! in the same table, so construction, destruction and the operations in
//! between always agree on which sizes exist.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, warn};

use crate::erased::ErasedGame;
use crate::handle::GameHandle;
use crate::typed::EngineError;

/// Run-time board size tag supplied by callers
///
/// Signed so that zero and negative tags can be passed in and rejected.
pub type SizeTag = i64;

/// Factory function type creating a game of one fixed size
///
/// Arguments are the four-tile chance and the RNG seed.
pub type GameFactory = fn(f64, u64) -> Box<dyn ErasedGame>;

/// Sorted set of board sizes a dispatch table accepts
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SupportedSizes(Vec<u32>);

impl SupportedSizes {
    /// Whether `tag` names a supported size exactly
    pub fn contains(&self, tag: SizeTag) -> bool {
        u32::try_from(tag)
            .map(|size| self.0.binary_search(&size).is_ok())
            .unwrap_or(false)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SupportedSizes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, size) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", size)?;
        }
        f.write_str("}")
    }
}

/// Error returned by dispatch table operations
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Unsupported board size {requested}: size must be one of {supported}")]
    UnsupportedSize {
        requested: SizeTag,
        supported: SupportedSizes,
    },
    #[error("Size tag {requested} does not match handle created with size {actual}")]
    SizeMismatch { requested: u32, actual: u32 },
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Render(#[from] fmt::Error),
}

/// A destroy request that was refused
///
/// Ownership of the handle goes back to the caller untouched.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct RejectedDestroy {
    pub error: DispatchError,
    pub handle: GameHandle,
}

impl RejectedDestroy {
    /// Recover the handle that was not destroyed
    pub fn into_handle(self) -> GameHandle {
        self.handle
    }
}

/// Immutable mapping from board size to game factory
///
/// Build one with [`DispatchTable::new`] or the [`size_dispatch!`] macro.
///
/// # Example
///
/// ```rust,ignore
/// use engine_core::size_dispatch;
/// use games_2048::Game2048;
///
/// let table = size_dispatch!(Game2048; 2, 3, 4);
/// let mut handle = table.create(3, 0.1)?;
/// table.apply_move(3, &mut handle, 0, 1)?;
/// assert!(table.create(9, 0.1).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct DispatchTable {
    factories: BTreeMap<u32, GameFactory>,
    supported: SupportedSizes,
}

impl DispatchTable {
    /// Build a table from `(size, factory)` entries
    ///
    /// A size of zero can never be a board and is skipped. A size listed twice
    /// keeps the last factory.
    pub fn new(entries: impl IntoIterator<Item = (u32, GameFactory)>) -> Self {
        let mut factories = BTreeMap::new();
        for (size, factory) in entries {
            if size == 0 {
                warn!("Skipping zero board size in dispatch table");
                continue;
            }
            if factories.insert(size, factory).is_some() {
                warn!(size, "Overriding duplicate board size entry");
            }
        }
        let supported = SupportedSizes(factories.keys().copied().collect());
        Self {
            factories,
            supported,
        }
    }

    /// The exact set of sizes this table accepts
    pub fn supported_sizes(&self) -> &SupportedSizes {
        &self.supported
    }

    /// Check if a size tag is supported
    pub fn is_supported(&self, tag: SizeTag) -> bool {
        self.supported.contains(tag)
    }

    /// Create a new game for `tag` with a random seed
    ///
    /// # Errors
    ///
    /// `DispatchError::UnsupportedSize` if `tag` is not in the table; nothing
    /// is constructed in that case.
    pub fn create(&self, tag: SizeTag, four_chance: f64) -> Result<GameHandle, DispatchError> {
        self.create_seeded(tag, four_chance, rand::random())
    }

    /// Create a new game for `tag` whose random tiles follow `seed`
    pub fn create_seeded(
        &self,
        tag: SizeTag,
        four_chance: f64,
        seed: u64,
    ) -> Result<GameHandle, DispatchError> {
        let (size, factory) = self.lookup(tag)?;
        let game = factory(four_chance, seed);
        debug_assert_eq!(game.size(), size, "factory built the wrong board size");
        debug!(size, four_chance, seed, "Created game");
        Ok(GameHandle::new(size, game))
    }

    /// Release the game behind `handle`
    ///
    /// # Errors
    ///
    /// If `tag` is unsupported or does not match the handle, the handle is
    /// handed back inside `RejectedDestroy` and nothing is released.
    pub fn destroy(&self, tag: SizeTag, handle: GameHandle) -> Result<(), RejectedDestroy> {
        if let Err(error) = self.check(tag, &handle) {
            return Err(RejectedDestroy { error, handle });
        }
        debug!(size = handle.size(), "Destroyed game");
        drop(handle);
        Ok(())
    }

    /// Restore the game to its initial playable state
    pub fn reset(&self, tag: SizeTag, handle: &mut GameHandle) -> Result<(), DispatchError> {
        self.check(tag, handle)?;
        handle.game_mut().reset();
        Ok(())
    }

    /// Current score of the game
    pub fn score(&self, tag: SizeTag, handle: &GameHandle) -> Result<u64, DispatchError> {
        self.check(tag, handle)?;
        Ok(handle.game().score())
    }

    /// Apply a `(dir_row, dir_col)` move, returning the points gained
    ///
    /// Direction validation belongs to the engine; its errors come back as
    /// `DispatchError::Engine`.
    pub fn apply_move(
        &self,
        tag: SizeTag,
        handle: &mut GameHandle,
        dir_row: i32,
        dir_col: i32,
    ) -> Result<u64, DispatchError> {
        self.check(tag, handle)?;
        Ok(handle.game_mut().swipe(dir_row, dir_col)?)
    }

    /// Whether no move can change the board any more
    pub fn is_game_over(&self, tag: SizeTag, handle: &GameHandle) -> Result<bool, DispatchError> {
        self.check(tag, handle)?;
        Ok(handle.game().is_game_over())
    }

    /// Write the game's textual representation to `out`
    pub fn render(
        &self,
        tag: SizeTag,
        handle: &GameHandle,
        out: &mut dyn fmt::Write,
    ) -> Result<(), DispatchError> {
        self.check(tag, handle)?;
        handle.game().render(out)?;
        Ok(())
    }

    /// Render the game into a new string
    pub fn render_to_string(
        &self,
        tag: SizeTag,
        handle: &GameHandle,
    ) -> Result<String, DispatchError> {
        let mut text = String::new();
        self.render(tag, handle, &mut text)?;
        Ok(text)
    }

    fn lookup(&self, tag: SizeTag) -> Result<(u32, GameFactory), DispatchError> {
        let entry = u32::try_from(tag)
            .ok()
            .and_then(|size| self.factories.get(&size).map(|factory| (size, *factory)));
        match entry {
            Some(entry) => Ok(entry),
            None => {
                warn!(requested = tag, supported = %self.supported, "Rejected unsupported board size");
                Err(DispatchError::UnsupportedSize {
                    requested: tag,
                    supported: self.supported.clone(),
                })
            }
        }
    }

    fn check(&self, tag: SizeTag, handle: &GameHandle) -> Result<(), DispatchError> {
        let (size, _) = self.lookup(tag)?;
        if size != handle.size() {
            warn!(requested = size, actual = handle.size(), "Size tag does not match handle");
            return Err(DispatchError::SizeMismatch {
                requested: size,
                actual: handle.size(),
            });
        }
        Ok(())
    }
}

/// Build a [`DispatchTable`] from a const-generic game family and a size list
///
/// Each listed size `N` maps to `GameAdapter::<$game<N>>::boxed`, so the list
/// written here is the only place the supported sizes appear.
///
/// # Example
///
/// ```ignore
/// let table = size_dispatch!(Game2048; 2, 3, 4, 5, 6, 7, 8);
/// ```
#[macro_export]
macro_rules! size_dispatch {
    ($game:ident; $($size:literal),+ $(,)?) => {
        $crate::registry::DispatchTable::new([
            $((
                $size,
                $crate::adapter::GameAdapter::<$game<$size>>::boxed as $crate::registry::GameFactory,
            )),+
        ])
    };
}
