//! Square 2048 board with a compile-time side length

use std::fmt;

use engine_core::Direction;
use rand::Rng;

/// Value of a tile stored as its exponent (`1` is a 2, `2` is a 4, ...)
///
/// Saturates at `u64::MAX` for exponents that do not fit.
pub fn tile_value(exp: u8) -> u64 {
    1u64.checked_shl(u32::from(exp)).unwrap_or(u64::MAX)
}

/// Text for one cell: `-` when empty, otherwise the tile's value
pub fn tile_to_str(exp: u8) -> String {
    if exp == 0 {
        return "-".to_string();
    }
    1u128
        .checked_shl(u32::from(exp))
        .map(|value| value.to_string())
        .unwrap_or_else(|| format!("2^{}", exp))
}

/// N x N grid of tile exponents, `0` meaning empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid<const N: usize> {
    tiles: [[u8; N]; N],
}

impl<const N: usize> Default for Grid<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Grid<N> {
    /// An empty grid
    pub const fn new() -> Self {
        Self {
            tiles: [[0; N]; N],
        }
    }

    /// Build a grid from rows of tile exponents
    pub const fn from_rows(tiles: [[u8; N]; N]) -> Self {
        Self { tiles }
    }

    pub fn rows(&self) -> &[[u8; N]; N] {
        &self.tiles
    }

    pub fn read_tile(&self, row: usize, col: usize) -> u8 {
        self.tiles[row][col]
    }

    pub fn write_tile(&mut self, row: usize, col: usize, tile: u8) {
        self.tiles[row][col] = tile;
    }

    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        self.tiles[row][col] == 0
    }

    pub fn num_empty_tiles(&self) -> usize {
        self.tiles.iter().flatten().filter(|&&tile| tile == 0).count()
    }

    /// Whether any cell holds exactly the tile `exp`
    pub fn has_tile(&self, exp: u8) -> bool {
        self.tiles.iter().flatten().any(|&tile| tile == exp)
    }

    /// Largest tile exponent on the board, `0` for an empty board
    pub fn max_tile(&self) -> u8 {
        self.tiles.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Slide every line toward `dir`, merging equal neighbours once
    ///
    /// Each tile takes part in at most one merge per swipe, so `[2, 2, 0, 4]`
    /// swiped left becomes `[4, 4, 0, 0]`, never `[8, 0, 0, 0]`.
    ///
    /// Returns the sum of the values of the tiles created by merges.
    pub fn swipe(&mut self, dir: Direction) -> u64 {
        let mut gained = 0u64;
        for line in 0..N {
            gained = gained.saturating_add(self.slide_line(dir, line));
        }
        gained
    }

    /// Sum of the values of all tiles on the board
    pub fn tile_sum(&self) -> u64 {
        self.tiles
            .iter()
            .flatten()
            .filter(|&&tile| tile != 0)
            .fold(0u64, |sum, &tile| sum.saturating_add(tile_value(tile)))
    }

    /// Whether some direction would change the board
    pub fn can_move(&self) -> bool {
        for row in 0..N {
            for col in 0..N {
                let tile = self.tiles[row][col];
                if tile == 0 {
                    return true;
                }
                if col + 1 < N && self.tiles[row][col + 1] == tile {
                    return true;
                }
                if row + 1 < N && self.tiles[row + 1][col] == tile {
                    return true;
                }
            }
        }
        false
    }

    /// Place a 2 (or a 4 with probability `four_chance`) on a random empty cell
    ///
    /// Returns `false` without touching the board when it is full.
    pub fn spawn_random<R: Rng>(&mut self, rng: &mut R, four_chance: f64) -> bool {
        let empty = self.num_empty_tiles();
        if empty == 0 {
            return false;
        }
        let tile = if rng.gen::<f64>() < four_chance { 2 } else { 1 };
        let target = rng.gen_range(0..empty);
        if let Some(cell) = self
            .tiles
            .iter_mut()
            .flatten()
            .filter(|tile| **tile == 0)
            .nth(target)
        {
            *cell = tile;
        }
        true
    }

    // Position of the k-th cell of a line, counted from the wall tiles move toward.
    fn cell(dir: Direction, line: usize, k: usize) -> (usize, usize) {
        match dir {
            Direction::Left => (line, k),
            Direction::Right => (line, N - 1 - k),
            Direction::Up => (k, line),
            Direction::Down => (N - 1 - k, line),
        }
    }

    fn slide_line(&mut self, dir: Direction, line: usize) -> u64 {
        let mut packed = [0u8; N];
        let mut len = 0;
        let mut last_merged = false;
        let mut gained = 0u64;

        for k in 0..N {
            let (row, col) = Self::cell(dir, line, k);
            let tile = self.tiles[row][col];
            if tile == 0 {
                continue;
            }
            if len > 0 && packed[len - 1] == tile && !last_merged {
                let merged = tile.saturating_add(1);
                packed[len - 1] = merged;
                gained = gained.saturating_add(tile_value(merged));
                last_merged = true;
            } else {
                packed[len] = tile;
                len += 1;
                last_merged = false;
            }
        }

        for (k, &tile) in packed.iter().enumerate() {
            let (row, col) = Self::cell(dir, line, k);
            self.tiles[row][col] = tile;
        }
        gained
    }
}

impl<const N: usize> fmt::Display for Grid<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.tiles {
            for &tile in row {
                write!(f, "{:>8}", tile_to_str(tile))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
