//! Level structure
//!
//! Represents a single dungeon level: a tile grid plus its level number.

use crate::tiles::{TileCode, TileGrid};
use crate::Result;

/// Level number, unique within a map container
pub type LevelId = u32;

/// The level every new map starts on
pub const FIRST_LEVEL: LevelId = 1;

/// A single dungeon level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelMap {
    /// Level number
    pub level: LevelId,

    grid: TileGrid,
}

impl LevelMap {
    /// Create a blank level
    ///
    /// Zero dimensions are raised to one so that a degenerate terminal
    /// still gets a usable single cell.
    pub fn new(height: usize, width: usize, level: LevelId) -> Self {
        Self {
            level,
            grid: TileGrid::new(height.max(1), width.max(1)),
        }
    }

    /// Wrap an existing grid
    pub fn from_grid(level: LevelId, grid: TileGrid) -> Self {
        Self { level, grid }
    }

    /// Build a level from row strings (handy for fixtures)
    pub fn from_lines(level: LevelId, lines: &[&str]) -> Result<Self> {
        let rows = lines
            .iter()
            .map(|line| line.chars().map(TileCode::from_char).collect::<Result<Vec<_>>>())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_grid(level, TileGrid::from_rows(rows)?))
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[inline]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Check whether a signed position falls inside the level
    pub fn contains(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height() && (col as usize) < self.width()
    }

    /// Get tile at position
    pub fn get_tile(&self, row: usize, col: usize) -> Option<TileCode> {
        self.grid.get(row, col)
    }

    /// Set tile at position, returning whether it was in bounds
    pub fn set_tile(&mut self, row: usize, col: usize, tile: TileCode) -> bool {
        self.grid.set(row, col, tile)
    }
}
