//! Exact win probabilities for small boards
//!
//! A tablebase enumerates every position reachable from a fresh game and
//! scores it backwards. A position where the player is to move is worth the
//! best of its moves; a move is worth the probability-weighted average of the
//! positions the next spawned tile can produce. Holding the tile
//! `2^(N*N + 1)` wins, and a board with no legal move loses.
//!
//! Only 2x2 boards are small enough to enumerate completely; larger sizes
//! fail with [`TablebaseError::TooLarge`] once the position limit is reached.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet, VecDeque};

use engine_core::Direction;
use tracing::{debug, info};

use crate::grid::Grid;

/// Moves in the order they are tried; on equal chances the earlier one wins
const MOVE_ORDER: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Up,
    Direction::Down,
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TablebaseError {
    #[error("{size}x{size} board has more than {limit} reachable positions")]
    TooLarge { size: usize, limit: usize },
}

/// Win probability of every reachable position on an N x N board
///
/// # Example
///
/// ```rust
/// use engine_core::Direction;
/// use games_2048::{Grid, Tablebase};
///
/// let tablebase = Tablebase::<2>::build(0.2, 10_000).unwrap();
/// let grid = Grid::from_rows([[1, 2], [0, 0]]);
/// assert_eq!(tablebase.best_move(&grid), Some(Direction::Down));
/// assert!(tablebase.query(&grid).is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Tablebase<const N: usize> {
    four_chance: f32,
    positions: HashMap<Grid<N>, f32>,
}

impl<const N: usize> Tablebase<N> {
    /// Exponent of the tile that wins the game
    pub const WIN_TILE: u8 = (N * N + 1) as u8;

    /// An empty tablebase; call [`Tablebase::init`] before querying
    pub fn new(four_chance: f32) -> Self {
        Self {
            four_chance,
            positions: HashMap::new(),
        }
    }

    /// Create and initialize a tablebase in one step
    pub fn build(four_chance: f32, limit: usize) -> Result<Self, TablebaseError> {
        let mut tablebase = Self::new(four_chance);
        tablebase.init(limit)?;
        Ok(tablebase)
    }

    pub fn four_chance(&self) -> f32 {
        self.four_chance
    }

    /// Number of scored positions
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Scored positions with their win chance, in no particular order
    pub fn positions(&self) -> impl Iterator<Item = (&Grid<N>, f32)> + '_ {
        self.positions.iter().map(|(grid, &chance)| (grid, chance))
    }

    /// Enumerate and score every position reachable from a fresh game
    ///
    /// # Errors
    ///
    /// `TablebaseError::TooLarge` if more than `limit` positions are
    /// reachable. Previously scored positions are kept in that case.
    pub fn init(&mut self, limit: usize) -> Result<(), TablebaseError> {
        let mut order: Vec<Grid<N>> = self.explore(limit)?.into_iter().collect();

        // Every spawn adds to the tile sum, so scoring from the largest sum
        // down sees each successor before the positions leading to it.
        order.sort_by_key(|grid| Reverse(grid.tile_sum()));

        self.positions.clear();
        self.positions.reserve(order.len());
        for grid in order {
            let chance = self.position_chance(&grid);
            self.positions.insert(grid, chance);
        }
        info!(
            size = N,
            positions = self.positions.len(),
            four_chance = self.four_chance,
            "Tablebase built"
        );
        Ok(())
    }

    /// Probability of reaching the winning tile from `grid` with best play
    ///
    /// Won and lost boards are scored directly; any other board must have
    /// been reached during [`Tablebase::init`], otherwise `None`.
    pub fn query(&self, grid: &Grid<N>) -> Option<f32> {
        Self::terminal(grid).or_else(|| self.positions.get(grid).copied())
    }

    /// Win chance after swiping `grid` toward `dir`
    ///
    /// `None` if the swipe does not change the board or a resulting
    /// position is unknown.
    pub fn move_chance(&self, grid: &Grid<N>, dir: Direction) -> Option<f32> {
        let mut swiped = *grid;
        swiped.swipe(dir);
        if swiped == *grid {
            return None;
        }
        let mut total = 0.0f32;
        for (child, weight) in self.spawns(&swiped) {
            total += weight * self.query(&child)?;
        }
        Some(total.clamp(0.0, 1.0))
    }

    /// The move with the highest win chance from `grid`
    ///
    /// `None` for won or lost boards and when no move leads to a known
    /// position.
    pub fn best_move(&self, grid: &Grid<N>) -> Option<Direction> {
        if Self::terminal(grid).is_some() {
            return None;
        }
        let mut best: Option<(Direction, f32)> = None;
        for dir in MOVE_ORDER {
            if let Some(chance) = self.move_chance(grid, dir) {
                if best.map_or(true, |(_, top)| chance > top) {
                    best = Some((dir, chance));
                }
            }
        }
        best.map(|(dir, _)| dir)
    }

    fn terminal(grid: &Grid<N>) -> Option<f32> {
        if grid.has_tile(Self::WIN_TILE) {
            Some(1.0)
        } else if !grid.can_move() {
            Some(0.0)
        } else {
            None
        }
    }

    fn position_chance(&self, grid: &Grid<N>) -> f32 {
        Self::terminal(grid).unwrap_or_else(|| {
            MOVE_ORDER
                .iter()
                .filter_map(|&dir| self.move_chance(grid, dir))
                .fold(0.0, f32::max)
        })
    }

    // Every board a single spawn can produce from `grid`, with its probability.
    fn spawns(&self, grid: &Grid<N>) -> Vec<(Grid<N>, f32)> {
        let empty = grid.num_empty_tiles() as f32;
        let mut children = Vec::with_capacity(2 * N * N);
        for row in 0..N {
            for col in 0..N {
                if !grid.is_empty(row, col) {
                    continue;
                }
                for (tile, chance) in [(1, 1.0 - self.four_chance), (2, self.four_chance)] {
                    let mut child = *grid;
                    child.write_tile(row, col, tile);
                    children.push((child, chance / empty));
                }
            }
        }
        children
    }

    fn explore(&self, limit: usize) -> Result<HashSet<Grid<N>>, TablebaseError> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        let mut visit = |grid: Grid<N>, queue: &mut VecDeque<Grid<N>>| {
            if seen.insert(grid) {
                if seen.len() > limit {
                    return Err(TablebaseError::TooLarge { size: N, limit });
                }
                queue.push_back(grid);
            }
            Ok(())
        };

        for (start, _) in self.spawns(&Grid::new()) {
            visit(start, &mut queue)?;
        }
        while let Some(grid) = queue.pop_front() {
            if Self::terminal(&grid).is_some() {
                continue;
            }
            for dir in MOVE_ORDER {
                let mut swiped = grid;
                swiped.swipe(dir);
                if swiped == grid {
                    continue;
                }
                for (child, _) in self.spawns(&swiped) {
                    visit(child, &mut queue)?;
                }
            }
        }

        debug!(size = N, positions = seen.len(), "Explored reachable positions");
        Ok(seen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Tablebase<2> {
        Tablebase::build(0.2, 10_000).unwrap()
    }

    #[test]
    fn test_chances_are_probabilities() {
        let tablebase = table();
        assert!(!tablebase.is_empty());
        for (grid, chance) in tablebase.positions() {
            assert!((0.0..=1.0).contains(&chance), "{:?} scored {}", grid, chance);
        }
        for start in [[[1, 0], [0, 0]], [[0, 0], [0, 2]]] {
            let chance = tablebase.query(&Grid::from_rows(start)).unwrap();
            assert!((0.0..=1.0).contains(&chance));
        }
    }

    #[test]
    fn test_terminal_positions() {
        let tablebase = table();
        let won = Grid::from_rows([[5, 0], [0, 0]]);
        let lost = Grid::from_rows([[1, 2], [2, 1]]);

        assert_eq!(tablebase.query(&won), Some(1.0));
        assert_eq!(tablebase.query(&lost), Some(0.0));
        assert_eq!(tablebase.best_move(&won), None);
        assert_eq!(tablebase.best_move(&lost), None);
        assert_eq!(Tablebase::<2>::WIN_TILE, 5);
    }

    #[test]
    fn test_forced_move() {
        // Only a downward swipe changes this board.
        let tablebase = table();
        let grid = Grid::from_rows([[1, 2], [0, 0]]);

        for dir in [Direction::Left, Direction::Right, Direction::Up] {
            assert_eq!(tablebase.move_chance(&grid, dir), None);
        }
        assert_eq!(tablebase.best_move(&grid), Some(Direction::Down));
        assert_eq!(
            tablebase.query(&grid),
            tablebase.move_chance(&grid, Direction::Down)
        );
    }

    #[test]
    fn test_winning_merge_is_chosen() {
        let tablebase = table();
        let grid = Grid::from_rows([[4, 4], [2, 1]]);

        assert_eq!(tablebase.move_chance(&grid, Direction::Left), Some(1.0));
        assert_eq!(tablebase.move_chance(&grid, Direction::Right), Some(1.0));
        assert_eq!(tablebase.move_chance(&grid, Direction::Up), None);
        assert_eq!(tablebase.best_move(&grid), Some(Direction::Left));
    }

    #[test]
    fn test_position_value_is_its_best_move() {
        let tablebase = table();
        for (grid, chance) in tablebase.positions() {
            let Some(dir) = tablebase.best_move(grid) else {
                continue;
            };
            assert_eq!(tablebase.move_chance(grid, dir), Some(chance));
            for other in Direction::ALL {
                if let Some(other_chance) = tablebase.move_chance(grid, other) {
                    assert!(other_chance <= chance);
                }
            }
        }
    }

    #[test]
    fn test_unreachable_position_is_unknown() {
        // A lone 16 never appears: every move is followed by a spawn.
        let tablebase = table();
        assert_eq!(tablebase.query(&Grid::from_rows([[4, 0], [0, 0]])), None);
    }

    #[test]
    fn test_position_limit() {
        assert_eq!(
            Tablebase::<2>::build(0.2, 10).unwrap_err(),
            TablebaseError::TooLarge { size: 2, limit: 10 }
        );
        assert!(Tablebase::<3>::build(0.1, 1_000).is_err());
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let a = table();
        let b = table();
        assert_eq!(a.len(), b.len());
        for (grid, chance) in a.positions() {
            assert_eq!(b.query(grid), Some(chance));
        }
    }
}
