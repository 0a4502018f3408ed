//! Position types for the editor grid and the screen

use serde::{Deserialize, Serialize};

/// Cell position inside a level grid (row-major, zero based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: usize,
    pub col: usize,
}

impl GridPosition {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Apply a signed delta, returning the raw signed target
    ///
    /// The result is not bounds checked; the map container decides whether
    /// the target is inside the level.
    pub fn offset(self, d_row: isize, d_col: isize) -> (isize, isize) {
        (self.row as isize + d_row, self.col as isize + d_col)
    }
}

/// Rectangle on the terminal, in screen cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: u16,
    pub left: u16,
    pub height: u16,
    pub width: u16,
}

impl Rect {
    pub const fn new(top: u16, left: u16, height: u16, width: u16) -> Self {
        Self { top, left, height, width }
    }

    /// Area left inside a one cell border
    pub fn inner(self) -> Rect {
        Rect {
            top: self.top.saturating_add(1),
            left: self.left.saturating_add(1),
            height: self.height.saturating_sub(2),
            width: self.width.saturating_sub(2),
        }
    }

    /// Convert an absolute screen cell into a position relative to this rectangle
    ///
    /// Cells above or left of the rectangle give negative coordinates.
    pub fn to_local(self, row: u16, col: u16) -> (isize, isize) {
        (
            row as isize - self.top as isize,
            col as isize - self.left as isize,
        )
    }
}
