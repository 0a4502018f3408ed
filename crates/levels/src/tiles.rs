//! Tile system for levels
//!
//! A dungeon level is a rectangular grid of single-character tile codes.
//! The alphabet is closed: every cell holds one of the [`TileCode`] variants.

use crate::error::{LevelError, Result};

/// A single map tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileCode {
    /// Blank, nothing painted yet
    #[default]
    None,
    /// Open floor
    Room,
    DoorClosed,
    DoorOpen,
    StairsUp,
    StairsDown,
}

impl TileCode {
    /// Every tile code, in declaration order
    pub const ALL: [TileCode; 6] = [
        TileCode::None,
        TileCode::Room,
        TileCode::DoorClosed,
        TileCode::DoorOpen,
        TileCode::StairsUp,
        TileCode::StairsDown,
    ];

    /// Character used on screen and in map files
    #[inline]
    pub const fn as_char(self) -> char {
        match self {
            TileCode::None => ' ',
            TileCode::Room => '.',
            TileCode::DoorClosed => '#',
            TileCode::DoorOpen => '=',
            TileCode::StairsUp => '^',
            TileCode::StairsDown => 'v',
        }
    }

    /// Decode a tile character
    pub fn from_char(c: char) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|tile| tile.as_char() == c)
            .ok_or_else(|| LevelError::TileError(format!("Unknown tile character {:?}", c)))
    }
}

/// Finite transition table for a toggle key
///
/// Each entry maps a current tile to the next one. Any tile without an
/// entry moves to `entry`, which starts the cycle over.
#[derive(Debug, Clone, Copy)]
pub struct TileCycle {
    pub entry: TileCode,
    pub transitions: &'static [(TileCode, TileCode)],
}

impl TileCycle {
    /// Next tile for the given current tile
    pub fn next(&self, current: TileCode) -> TileCode {
        self.transitions
            .iter()
            .find(|(from, _)| *from == current)
            .map(|(_, to)| *to)
            .unwrap_or(self.entry)
    }
}

/// Stairs: down, up, then back to floor
pub const STAIRS_CYCLE: TileCycle = TileCycle {
    entry: TileCode::StairsDown,
    transitions: &[
        (TileCode::StairsDown, TileCode::StairsUp),
        (TileCode::StairsUp, TileCode::Room),
    ],
};

/// Doors: closed, open, then back to floor
pub const DOOR_CYCLE: TileCycle = TileCycle {
    entry: TileCode::DoorClosed,
    transitions: &[
        (TileCode::DoorClosed, TileCode::DoorOpen),
        (TileCode::DoorOpen, TileCode::Room),
    ],
};

/// Rectangular grid of tiles
///
/// Rows are stored in order and always share one width. Only whole-grid
/// construction and per-cell writes are exposed, so the dimensions can
/// never drift apart from the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    rows: Vec<Vec<TileCode>>,
    width: usize,
}

impl TileGrid {
    /// Create a grid filled with a single tile
    pub fn filled(height: usize, width: usize, tile: TileCode) -> Self {
        Self {
            rows: vec![vec![tile; width]; height],
            width,
        }
    }

    /// Create a blank grid
    pub fn new(height: usize, width: usize) -> Self {
        Self::filled(height, width, TileCode::None)
    }

    /// Build a grid from decoded rows
    ///
    /// Fails if any row differs in length from the first.
    pub fn from_rows(rows: Vec<Vec<TileCode>>) -> Result<Self> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(LevelError::TileError(format!(
                "Row {} has {} tiles, expected {}",
                index,
                row.len(),
                width
            )));
        }
        Ok(Self { rows, width })
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get tile at (row, col), or `None` outside the grid
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<TileCode> {
        self.rows.get(row)?.get(col).copied()
    }

    /// Set tile at (row, col)
    ///
    /// Returns `false` and leaves the grid alone when out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, tile: TileCode) -> bool {
        match self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = tile;
                true
            }
            None => false,
        }
    }

    /// Iterate over the rows
    pub fn rows(&self) -> impl Iterator<Item = &[TileCode]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Render one row as its tile characters
    pub fn row_string(&self, row: usize) -> Option<String> {
        self.rows
            .get(row)
            .map(|r| r.iter().map(|t| t.as_char()).collect())
    }
}
