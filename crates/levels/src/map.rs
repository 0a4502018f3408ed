//! Map container
//!
//! Owns every level of a dungeon, the points of interest, and the edit
//! state (cursor, active level, draw mode). All editing goes through here.

use crate::level::{LevelId, LevelMap, FIRST_LEVEL};
use crate::tiles::{TileCode, TileCycle, TileGrid, DOOR_CYCLE, STAIRS_CYCLE};
use crate::{LevelError, Result};
use keepmap_core::GridPosition;
use std::collections::BTreeMap;

/// Something that can draw the active level
///
/// Implementations put a border around their area, paint the grid rows
/// verbatim inside it, and invert the cell under the cursor.
pub trait LevelRenderer {
    type Error;

    fn draw_level(&mut self, grid: &TileGrid, cursor: GridPosition) -> std::result::Result<(), Self::Error>;
}

/// The aggregate root of an editing session
#[derive(Debug, Clone)]
pub struct MapContainer {
    /// Points of interest (marker -> label)
    points: BTreeMap<char, String>,

    /// Levels keyed by level number
    levels: BTreeMap<LevelId, LevelMap>,

    /// Level being edited; always a key of `levels`
    current_level: LevelId,

    /// Cursor, always inside the current level
    cursor: GridPosition,

    /// Whether moving the cursor paints floor
    draw_mode: bool,

    /// Set by edits, cleared when the owner redraws
    redraw_requested: bool,
}

impl MapContainer {
    /// Create a container with one blank level sized to the display area
    pub fn new(height: usize, width: usize) -> Self {
        let mut levels = BTreeMap::new();
        levels.insert(FIRST_LEVEL, LevelMap::new(height, width, FIRST_LEVEL));

        Self {
            points: BTreeMap::new(),
            levels,
            current_level: FIRST_LEVEL,
            cursor: GridPosition::default(),
            draw_mode: false,
            redraw_requested: false,
        }
    }

    /// Assemble a container from loaded parts
    ///
    /// The first level must be present; editing always starts there with
    /// the cursor in the top-left corner.
    pub fn from_parts(
        points: BTreeMap<char, String>,
        levels: impl IntoIterator<Item = LevelMap>,
    ) -> Result<Self> {
        let mut by_id = BTreeMap::new();
        for level in levels {
            let id = level.level;
            if by_id.insert(id, level).is_some() {
                return Err(LevelError::InvalidFormat(format!("Duplicate level {}", id)));
            }
        }

        if !by_id.contains_key(&FIRST_LEVEL) {
            return Err(LevelError::NotFound(format!("Level {}", FIRST_LEVEL)));
        }

        Ok(Self {
            points,
            levels: by_id,
            current_level: FIRST_LEVEL,
            cursor: GridPosition::default(),
            draw_mode: false,
            redraw_requested: false,
        })
    }

    /// Move the cursor to (row, col)
    ///
    /// Targets outside the current level leave the cursor where it is.
    /// In draw mode the destination cell becomes floor. A redraw is
    /// requested either way so the cursor highlight is always fresh.
    pub fn move_cursor(&mut self, row: isize, col: isize) -> GridPosition {
        if self.current_map().contains(row, col) {
            let target = GridPosition::new(row as usize, col as usize);
            if self.draw_mode {
                self.set_current_tile(target, TileCode::Room);
            }
            self.cursor = target;
        } else {
            tracing::trace!("Cursor target ({}, {}) outside level", row, col);
        }

        self.redraw_requested = true;
        self.cursor
    }

    /// Move the cursor by a delta
    pub fn move_cursor_by(&mut self, d_row: isize, d_col: isize) -> GridPosition {
        let (row, col) = self.cursor.offset(d_row, d_col);
        self.move_cursor(row, col)
    }

    /// Flip room draw mode
    ///
    /// No tile changes and no redraw; the boundary shows the mode itself.
    pub fn toggle_draw_mode(&mut self) -> bool {
        self.draw_mode = !self.draw_mode;
        tracing::debug!("Draw mode {}", if self.draw_mode { "on" } else { "off" });
        self.draw_mode
    }

    /// Cycle the tile under the cursor through the stairs states
    pub fn place_stairs(&mut self) -> TileCode {
        self.apply_cycle(&STAIRS_CYCLE)
    }

    /// Cycle the tile under the cursor through the door states
    pub fn place_door(&mut self) -> TileCode {
        self.apply_cycle(&DOOR_CYCLE)
    }

    fn apply_cycle(&mut self, cycle: &TileCycle) -> TileCode {
        let current = self.tile_at_cursor();
        let next = cycle.next(current);
        self.set_current_tile(self.cursor, next);
        self.redraw_requested = true;
        next
    }

    fn set_current_tile(&mut self, pos: GridPosition, tile: TileCode) {
        if let Some(level) = self.levels.get_mut(&self.current_level) {
            level.set_tile(pos.row, pos.col, tile);
        }
    }

    /// Draw the current level through a renderer
    ///
    /// Read-only; does not clear the redraw request.
    pub fn render<R: LevelRenderer>(&self, renderer: &mut R) -> std::result::Result<(), R::Error> {
        renderer.draw_level(self.current_map().grid(), self.cursor)
    }

    /// Take the pending redraw request, clearing it
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Ask the owner to redraw on its next turn
    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Level currently being edited
    pub fn current_map(&self) -> &LevelMap {
        &self.levels[&self.current_level]
    }

    pub fn current_level(&self) -> LevelId {
        self.current_level
    }

    pub fn cursor(&self) -> GridPosition {
        self.cursor
    }

    pub fn draw_mode(&self) -> bool {
        self.draw_mode
    }

    /// Tile under the cursor
    pub fn tile_at_cursor(&self) -> TileCode {
        self.current_map()
            .get_tile(self.cursor.row, self.cursor.col)
            .unwrap_or_default()
    }

    /// Get a level by number
    pub fn level(&self, id: LevelId) -> Option<&LevelMap> {
        self.levels.get(&id)
    }

    /// All levels in ascending level order
    pub fn levels(&self) -> impl Iterator<Item = &LevelMap> + '_ {
        self.levels.values()
    }

    /// Add or replace a level
    ///
    /// Replacing the current level keeps the cursor only if it still fits.
    pub fn insert_level(&mut self, level: LevelMap) -> Option<LevelMap> {
        let id = level.level;
        let replaced = self.levels.insert(id, level);
        if id == self.current_level {
            let map = self.current_map();
            if !map.contains(self.cursor.row as isize, self.cursor.col as isize) {
                self.cursor = GridPosition::default();
            }
            self.redraw_requested = true;
        }
        replaced
    }

    /// Points of interest in marker order
    pub fn points(&self) -> &BTreeMap<char, String> {
        &self.points
    }

    /// Add or relabel a point of interest
    ///
    /// Each point is stored on one line of the map file, so line breaks are
    /// refused in both the marker and the label.
    pub fn insert_point(
        &mut self,
        marker: char,
        label: impl Into<String>,
    ) -> Result<Option<String>> {
        let label = label.into();
        let is_break = |c: char| c == '\n' || c == '\r';
        if is_break(marker) || label.contains(is_break) {
            return Err(LevelError::InvalidFormat(format!(
                "Point {:?} must fit on one line",
                marker
            )));
        }
        Ok(self.points.insert(marker, label))
    }

    /// Remove a point of interest
    pub fn remove_point(&mut self, marker: char) -> Option<String> {
        self.points.remove(&marker)
    }
}
