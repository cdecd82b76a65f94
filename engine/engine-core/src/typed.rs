//! Typed Game trait implemented by each compile-time board-size specialization
//!
//! A specialization bakes its board size into its type (for example a
//! const-generic `Game2048<4>`), so none of these methods take a size argument.
//! The adapter layer turns any implementation into the size-erased interface.

use std::fmt;

/// Error raised by an engine operation
///
/// The dispatch layer forwards these unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid direction ({row}, {col}): expected one of (-1, 0), (1, 0), (0, -1), (0, 1)")]
    InvalidDirection { row: i32, col: i32 },
    #[error("Game is over, no further moves are possible")]
    GameOver,
}

/// Swipe direction on a square board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions in a fixed order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Decode a `(row, col)` step into a direction
    ///
    /// Exactly one component must be non-zero and it must be `-1` or `1`.
    pub fn from_delta(row: i32, col: i32) -> Result<Self, EngineError> {
        match (row, col) {
            (-1, 0) => Ok(Direction::Up),
            (1, 0) => Ok(Direction::Down),
            (0, -1) => Ok(Direction::Left),
            (0, 1) => Ok(Direction::Right),
            _ => Err(EngineError::InvalidDirection { row, col }),
        }
    }

    /// The `(row, col)` step this direction moves tiles by
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        };
        f.write_str(name)
    }
}

/// Main trait for a size-specialized game
///
/// Rendering goes through `Display`.
///
/// # Example
///
/// ```rust
/// # use engine_core::typed::*;
/// # use std::fmt;
/// #[derive(Debug)]
/// struct Counter {
///     moves: u64,
/// }
///
/// impl fmt::Display for Counter {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         writeln!(f, "Score: {}", self.moves)
///     }
/// }
///
/// impl Game for Counter {
///     const SIZE: u32 = 1;
///
///     fn new(_four_chance: f64, _seed: u64) -> Self {
///         Counter { moves: 0 }
///     }
///     fn reset(&mut self) {
///         self.moves = 0;
///     }
///     fn score(&self) -> u64 {
///         self.moves
///     }
///     fn swipe(&mut self, dir_row: i32, dir_col: i32) -> Result<u64, EngineError> {
///         Direction::from_delta(dir_row, dir_col)?;
///         self.moves += 1;
///         Ok(1)
///     }
///     fn is_game_over(&self) -> bool {
///         false
///     }
/// }
///
/// let mut game = Counter::new(0.1, 7);
/// game.swipe(0, 1).unwrap();
/// assert_eq!(game.score(), 1);
/// ```
pub trait Game: fmt::Display + fmt::Debug + Send + Sync + 'static {
    /// Board side length baked into this specialization
    const SIZE: u32;

    /// Construct a new game
    ///
    /// * `four_chance` - Probability that a spawned tile is a 4 rather than a 2
    /// * `seed` - Seed for the game's random tile placement
    fn new(four_chance: f64, seed: u64) -> Self;

    /// Restore the initial playable state
    fn reset(&mut self);

    /// Current score
    fn score(&self) -> u64;

    /// Apply a move given as a `(row, col)` step, returning the points gained
    fn swipe(&mut self, dir_row: i32, dir_col: i32) -> Result<u64, EngineError>;

    /// Whether no move can change the board any more
    fn is_game_over(&self) -> bool;
}
