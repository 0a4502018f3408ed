//! Edit session
//!
//! Reads one input event at a time, applies it to the map container, and
//! redraws before reading the next one.

use crate::command::{Command, InputEvent, PointerEvent, PointerKind};
use crate::ui::{InputSource, Screen};
use keepmap_core::Result;
use keepmap_levels::{MapContainer, MapWriter};
use std::path::PathBuf;

/// What the loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive editing session
pub struct EditSession<U> {
    map: MapContainer,
    ui: U,
    map_file: PathBuf,
    /// Pointer button held; position reports move the cursor
    dragging: bool,
}

impl<U: Screen + InputSource> EditSession<U> {
    /// Create a session over a map container
    pub fn new(map: MapContainer, ui: U, map_file: impl Into<PathBuf>) -> Self {
        Self {
            map,
            ui,
            map_file: map_file.into(),
            dragging: false,
        }
    }

    /// Run until quit or until input runs out
    pub fn run(&mut self) -> Result<()> {
        tracing::info!("Edit session started ({} save target)", self.map_file.display());

        self.ui.set_draw_mode(self.map.draw_mode())?;
        self.map.request_redraw();
        self.redraw_if_requested()?;

        while let Some(event) = self.ui.next_event()? {
            let flow = self.dispatch(event)?;
            self.redraw_if_requested()?;
            if flow == Flow::Quit {
                break;
            }
        }

        tracing::info!("Edit session ended");
        Ok(())
    }

    /// Apply a single input event
    pub fn dispatch(&mut self, event: InputEvent) -> Result<Flow> {
        match event {
            InputEvent::Command(command) => self.execute(command),
            InputEvent::Pointer(pointer) => {
                self.pointer(pointer);
                Ok(Flow::Continue)
            }
            InputEvent::Resize => {
                self.map.request_redraw();
                Ok(Flow::Continue)
            }
        }
    }

    fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Save => self.save()?,
            Command::ToggleDrawMode => {
                let on = self.map.toggle_draw_mode();
                self.ui.set_draw_mode(on)?;
            }
            Command::PlaceStairs => {
                self.map.place_stairs();
            }
            Command::PlaceDoor => {
                self.map.place_door();
            }
            Command::MoveUp | Command::MoveDown | Command::MoveLeft | Command::MoveRight => {
                if let Some((d_row, d_col)) = command.delta() {
                    self.map.move_cursor_by(d_row, d_col);
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn pointer(&mut self, event: PointerEvent) {
        match event.kind {
            PointerKind::Press => {
                self.dragging = true;
                self.map.move_cursor(event.row, event.col);
            }
            PointerKind::Release => {
                self.dragging = false;
            }
            PointerKind::Moved => {
                if self.dragging {
                    self.map.move_cursor(event.row, event.col);
                }
            }
        }
    }

    /// Write the map to the configured file
    ///
    /// A failed write is reported on the status line; the session goes on.
    fn save(&mut self) -> Result<()> {
        match MapWriter::save_file(&self.map, &self.map_file) {
            Ok(()) => {
                let message = format!("Saved to {}", self.map_file.display());
                self.ui.show_status(&message)?;
            }
            Err(e) => {
                tracing::error!("Save to {} failed: {}", self.map_file.display(), e);
                let message = format!("Save failed: {}", e);
                self.ui.show_status(&message)?;
            }
        }
        Ok(())
    }

    fn redraw_if_requested(&mut self) -> Result<()> {
        if self.map.take_redraw_request() {
            self.map.render(&mut self.ui)?;
        }
        Ok(())
    }

    pub fn map(&self) -> &MapContainer {
        &self.map
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// End the session, handing back the map
    pub fn into_map(self) -> MapContainer {
        self.map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keepmap_core::GridPosition;
    use keepmap_levels::{LevelLoader, LevelRenderer, TileCode, TileGrid};
    use std::collections::VecDeque;
    use std::io;

    #[derive(Default)]
    struct ScriptedUi {
        events: VecDeque<InputEvent>,
        frames: Vec<(Vec<String>, GridPosition)>,
        statuses: Vec<String>,
        draw_mode: Vec<bool>,
    }

    impl ScriptedUi {
        fn with_events(events: impl IntoIterator<Item = InputEvent>) -> Self {
            Self {
                events: events.into_iter().collect(),
                ..Default::default()
            }
        }
    }

    impl LevelRenderer for ScriptedUi {
        type Error = io::Error;

        fn draw_level(&mut self, grid: &TileGrid, cursor: GridPosition) -> io::Result<()> {
            let rows = (0..grid.height()).filter_map(|r| grid.row_string(r)).collect();
            self.frames.push((rows, cursor));
            Ok(())
        }
    }

    impl Screen for ScriptedUi {
        fn set_draw_mode(&mut self, on: bool) -> io::Result<()> {
            self.draw_mode.push(on);
            Ok(())
        }

        fn show_status(&mut self, message: &str) -> io::Result<()> {
            self.statuses.push(message.to_string());
            Ok(())
        }
    }

    impl InputSource for ScriptedUi {
        fn next_event(&mut self) -> io::Result<Option<InputEvent>> {
            Ok(self.events.pop_front())
        }
    }

    fn press(row: isize, col: isize) -> InputEvent {
        PointerEvent::new(PointerKind::Press, row, col).into()
    }

    fn moved(row: isize, col: isize) -> InputEvent {
        PointerEvent::new(PointerKind::Moved, row, col).into()
    }

    fn release(row: isize, col: isize) -> InputEvent {
        PointerEvent::new(PointerKind::Release, row, col).into()
    }

    #[test]
    fn test_arrow_moves_and_redraws() {
        let ui = ScriptedUi::with_events([
            Command::MoveDown.into(),
            Command::MoveRight.into(),
            Command::MoveUp.into(),
            Command::MoveUp.into(),
        ]);
        let mut session = EditSession::new(MapContainer::new(3, 3), ui, "unused.map");
        session.run().unwrap();

        assert_eq!(session.map().cursor(), GridPosition::new(0, 1));
        // Initial frame plus one per move, including the no-op at the top edge
        let cursors: Vec<GridPosition> = session.ui().frames.iter().map(|(_, c)| *c).collect();
        assert_eq!(
            cursors,
            vec![
                GridPosition::new(0, 0),
                GridPosition::new(1, 0),
                GridPosition::new(1, 1),
                GridPosition::new(0, 1),
                GridPosition::new(0, 1),
            ]
        );
    }

    #[test]
    fn test_quit_stops_reading_input() {
        let ui = ScriptedUi::with_events([
            Command::Quit.into(),
            Command::PlaceDoor.into(),
        ]);
        let mut session = EditSession::new(MapContainer::new(2, 2), ui, "unused.map");
        session.run().unwrap();

        assert_eq!(session.map().tile_at_cursor(), TileCode::None);
        assert_eq!(session.ui().events.len(), 1);
    }

    #[test]
    fn test_draw_mode_session() {
        let ui = ScriptedUi::with_events([
            Command::MoveDown.into(),
            Command::ToggleDrawMode.into(),
            Command::MoveRight.into(),
            Command::MoveRight.into(),
            Command::ToggleDrawMode.into(),
            Command::MoveDown.into(),
        ]);
        let mut session = EditSession::new(MapContainer::new(3, 4), ui, "unused.map");
        session.run().unwrap();

        let rows: Vec<String> = (0..3)
            .filter_map(|r| session.map().current_map().grid().row_string(r))
            .collect();
        assert_eq!(rows, vec!["    ", " .. ", "    "]);
        assert_eq!(session.ui().draw_mode, vec![false, true, false]);
    }

    #[test]
    fn test_toggle_draw_mode_does_not_redraw() {
        let ui = ScriptedUi::with_events([Command::ToggleDrawMode.into()]);
        let mut session = EditSession::new(MapContainer::new(2, 2), ui, "unused.map");
        session.run().unwrap();

        assert_eq!(session.ui().frames.len(), 1);
    }

    #[test]
    fn test_door_and_stairs_commands() {
        let ui = ScriptedUi::with_events([
            Command::PlaceDoor.into(),
            Command::MoveRight.into(),
            Command::PlaceStairs.into(),
            Command::PlaceStairs.into(),
        ]);
        let mut session = EditSession::new(MapContainer::new(1, 2), ui, "unused.map");
        session.run().unwrap();

        let level = session.map().current_map();
        assert_eq!(level.get_tile(0, 0), Some(TileCode::DoorClosed));
        assert_eq!(level.get_tile(0, 1), Some(TileCode::StairsUp));
        assert_eq!(session.ui().frames.last().unwrap().0, vec!["#^".to_string()]);
    }

    #[test]
    fn test_drag_paints_only_while_armed() {
        let ui = ScriptedUi::with_events([
            Command::ToggleDrawMode.into(),
            moved(0, 0),
            press(1, 0),
            moved(1, 1),
            moved(1, 2),
            release(1, 3),
            moved(2, 2),
        ]);
        let mut session = EditSession::new(MapContainer::new(3, 4), ui, "unused.map");
        session.run().unwrap();

        let rows: Vec<String> = (0..3)
            .filter_map(|r| session.map().current_map().grid().row_string(r))
            .collect();
        assert_eq!(rows, vec!["    ", "... ", "    "]);
        assert_eq!(session.map().cursor(), GridPosition::new(1, 2));
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_drag_outside_grid_is_clamped() {
        let ui = ScriptedUi::with_events([press(1, 1), moved(-1, 1), moved(1, 9)]);
        let mut session = EditSession::new(MapContainer::new(3, 3), ui, "unused.map");
        session.run().unwrap();

        assert_eq!(session.map().cursor(), GridPosition::new(1, 1));
        assert!(session.is_dragging());
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("keep.map");

        let ui = ScriptedUi::with_events([
            Command::PlaceStairs.into(),
            Command::Save.into(),
        ]);
        let mut session = EditSession::new(MapContainer::new(2, 2), ui, &path);
        session.run().unwrap();

        assert_eq!(session.ui().statuses.len(), 1);
        assert!(session.ui().statuses[0].starts_with("Saved to"));

        let loaded = LevelLoader::load_file(&path).unwrap();
        assert_eq!(loaded.current_map().get_tile(0, 0), Some(TileCode::StairsDown));
    }

    #[test]
    fn test_failed_save_keeps_session_running() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("no_such_dir").join("keep.map");

        let ui = ScriptedUi::with_events([
            Command::Save.into(),
            Command::PlaceDoor.into(),
        ]);
        let mut session = EditSession::new(MapContainer::new(2, 2), ui, &path);
        session.run().unwrap();

        assert!(session.ui().statuses[0].starts_with("Save failed"));
        assert_eq!(session.map().tile_at_cursor(), TileCode::DoorClosed);
        assert!(!path.exists());
    }

    #[test]
    fn test_resize_redraws() {
        let ui = ScriptedUi::with_events([InputEvent::Resize]);
        let mut session = EditSession::new(MapContainer::new(2, 2), ui, "unused.map");
        session.run().unwrap();

        assert_eq!(session.ui().frames.len(), 2);
    }

    #[test]
    fn test_dispatch_reports_quit() {
        let mut session = EditSession::new(MapContainer::new(2, 2), ScriptedUi::default(), "unused.map");
        assert_eq!(session.dispatch(Command::MoveDown.into()).unwrap(), Flow::Continue);
        assert_eq!(session.dispatch(Command::Quit.into()).unwrap(), Flow::Quit);
        assert_eq!(session.into_map().cursor(), GridPosition::new(1, 0));
    }
}
