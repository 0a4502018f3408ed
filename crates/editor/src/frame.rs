//! Screen layout and frame composition
//!
//! Everything here is pure: it turns a grid and a cursor into the lines the
//! terminal should print. The terminal module only does the painting.

use keepmap_core::{GridPosition, Rect};
use keepmap_levels::TileGrid;

/// Rows taken by the menu bar and the level line
pub const HEADER_ROWS: u16 = 2;

/// Rows kept free below the map window (spacer and status line)
pub const FOOTER_ROWS: u16 = 2;

/// Where each part of the editor goes on a terminal of a given size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub menu_row: u16,
    pub info_row: u16,
    /// Map window, border included
    pub map: Rect,
    pub status_row: u16,
    pub columns: u16,
}

impl Layout {
    pub fn from_size(columns: u16, rows: u16) -> Self {
        let map_height = rows.saturating_sub(HEADER_ROWS + FOOTER_ROWS);
        Self {
            menu_row: 0,
            info_row: 1,
            map: Rect::new(HEADER_ROWS, 0, map_height, columns),
            status_row: rows.saturating_sub(1),
            columns,
        }
    }

    /// Grid size (height, width) that fits inside the map window's border
    pub fn grid_size(&self) -> (usize, usize) {
        let inner = self.map.inner();
        (inner.height as usize, inner.width as usize)
    }
}

/// The inverted cursor cell, in absolute screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorCell {
    pub row: u16,
    pub col: u16,
    pub glyph: char,
}

/// A composed map window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Lines to print from `area.top` downwards, starting at `area.left`
    pub lines: Vec<String>,
    /// Grid cell shown in the window's top-left corner
    pub origin: GridPosition,
    /// Cursor cell, if the window has room to show it
    pub cursor: Option<CursorCell>,
}

/// Shift one axis of the viewport just enough to keep `cursor` in view
fn follow(origin: usize, cursor: usize, view: usize, len: usize) -> usize {
    if view == 0 {
        return 0;
    }
    let origin = origin.min(len.saturating_sub(view));
    if cursor < origin {
        cursor
    } else if cursor >= origin + view {
        cursor + 1 - view
    } else {
        origin
    }
}

/// Compose a bordered map window
///
/// Grid rows are copied verbatim, clipped to the window and padded with
/// blanks when the grid is narrower than the window. A grid larger than the
/// window is scrolled from `origin` so that the cursor cell stays visible.
pub fn compose(grid: &TileGrid, cursor: GridPosition, area: Rect, origin: GridPosition) -> Frame {
    if area.height < 2 || area.width < 2 {
        return Frame { lines: Vec::new(), origin: GridPosition::default(), cursor: None };
    }

    let inner = area.inner();
    let inner_h = inner.height as usize;
    let inner_w = inner.width as usize;
    let origin = GridPosition::new(
        follow(origin.row, cursor.row, inner_h, grid.height()),
        follow(origin.col, cursor.col, inner_w, grid.width()),
    );

    let horizontal = "─".repeat(inner_w);
    let mut lines = Vec::with_capacity(area.height as usize);
    lines.push(format!("┌{}┐", horizontal));

    let mut rows = grid.rows().skip(origin.row);
    for _ in 0..inner_h {
        let mut line = String::with_capacity(inner_w + 2);
        line.push('│');
        let tiles = rows.next().and_then(|row| row.get(origin.col..)).unwrap_or(&[]);
        line.extend(
            tiles
                .iter()
                .map(|tile| tile.as_char())
                .chain(std::iter::repeat(' '))
                .take(inner_w),
        );
        line.push('│');
        lines.push(line);
    }

    lines.push(format!("└{}┘", horizontal));

    let has_room = inner_h > 0 && inner_w > 0;
    let cursor = grid.get(cursor.row, cursor.col).filter(|_| has_room).map(|tile| CursorCell {
        row: inner.top + (cursor.row - origin.row) as u16,
        col: inner.left + (cursor.col - origin.col) as u16,
        glyph: tile.as_char(),
    });

    Frame { lines, origin, cursor }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keepmap_levels::{LevelMap, TileCode};

    const TOP_LEFT: GridPosition = GridPosition::new(0, 0);

    #[test]
    fn test_layout_matches_terminal() {
        let layout = Layout::from_size(80, 24);
        assert_eq!(layout.map, Rect::new(2, 0, 20, 80));
        assert_eq!(layout.grid_size(), (18, 78));
        assert_eq!(layout.status_row, 23);
    }

    #[test]
    fn test_layout_tiny_terminal() {
        let layout = Layout::from_size(3, 3);
        assert_eq!(layout.grid_size(), (0, 1));
    }

    #[test]
    fn test_compose_frame() {
        let level = LevelMap::from_lines(1, &[".#.", "v ^"]).unwrap();
        let frame = compose(level.grid(), GridPosition::new(1, 2), Rect::new(2, 0, 4, 5), TOP_LEFT);

        assert_eq!(frame.lines, vec!["┌───┐", "│.#.│", "│v ^│", "└───┘"]);
        assert_eq!(
            frame.cursor,
            Some(CursorCell { row: 4, col: 3, glyph: '^' })
        );
    }

    #[test]
    fn test_compose_pads_and_clips() {
        let level = LevelMap::from_lines(1, &["....", "....", "...."]).unwrap();

        // Wider window than grid: pad with blanks
        let frame = compose(level.grid(), TOP_LEFT, Rect::new(0, 0, 5, 8), TOP_LEFT);
        assert_eq!(frame.lines[1], "│....  │");
        assert_eq!(frame.origin, TOP_LEFT);

        // Smaller window: clip rows and columns
        let frame = compose(level.grid(), TOP_LEFT, Rect::new(0, 0, 3, 4), TOP_LEFT);
        assert_eq!(frame.lines, vec!["┌──┐", "│..│", "└──┘"]);
        assert_eq!(frame.cursor, Some(CursorCell { row: 1, col: 1, glyph: '.' }));
    }

    #[test]
    fn test_compose_degenerate_area() {
        let level = LevelMap::new(2, 2, 1);
        let frame = compose(level.grid(), TOP_LEFT, Rect::new(0, 0, 1, 10), TOP_LEFT);
        assert!(frame.lines.is_empty());
        assert!(frame.cursor.is_none());
    }

    #[test]
    fn test_compose_scrolls_to_cursor() {
        let mut level = LevelMap::new(10, 10, 1);
        level.set_tile(8, 8, TileCode::StairsUp);
        level.set_tile(9, 9, TileCode::Room);

        // 3 × 3 cells inside the border
        let area = Rect::new(0, 0, 5, 5);
        let frame = compose(level.grid(), GridPosition::new(8, 8), area, TOP_LEFT);

        assert_eq!(frame.origin, GridPosition::new(6, 6));
        assert_eq!(frame.lines[3], "│  ^│");
        assert_eq!(
            frame.cursor,
            Some(CursorCell { row: 3, col: 3, glyph: '^' })
        );

        // One step past the edge scrolls by one
        let frame = compose(level.grid(), GridPosition::new(9, 9), area, frame.origin);
        assert_eq!(frame.origin, GridPosition::new(7, 7));
        assert_eq!(frame.lines[2], "│ ^ │");
        assert_eq!(frame.cursor.map(|c| (c.row, c.col, c.glyph)), Some((3, 3, '.')));

        // Inside the current window the view stays put
        let frame = compose(level.grid(), GridPosition::new(8, 7), area, frame.origin);
        assert_eq!(frame.origin, GridPosition::new(7, 7));
        assert_eq!(frame.cursor.map(|c| (c.row, c.col)), Some((2, 1)));

        // Moving back above the window scrolls up to the cursor
        let frame = compose(level.grid(), GridPosition::new(1, 2), area, frame.origin);
        assert_eq!(frame.origin, GridPosition::new(1, 2));
        assert_eq!(frame.cursor.map(|c| (c.row, c.col)), Some((1, 1)));
    }

    #[test]
    fn test_compose_resets_origin_for_small_grid() {
        let level = LevelMap::new(2, 2, 1);
        let stale = GridPosition::new(5, 5);
        let frame = compose(level.grid(), GridPosition::new(1, 1), Rect::new(0, 0, 6, 6), stale);
        assert_eq!(frame.origin, TOP_LEFT);
        assert_eq!(frame.cursor.map(|c| (c.row, c.col)), Some((2, 2)));
    }
}
