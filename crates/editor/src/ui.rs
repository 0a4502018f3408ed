//! Display and input boundary
//!
//! The session talks to the terminal only through these traits, which keeps
//! it testable with an in-memory implementation.

use crate::command::InputEvent;
use keepmap_levels::LevelRenderer;
use std::io;

/// Output side of the boundary
///
/// `draw_level` (from [`LevelRenderer`]) draws the bordered map with the
/// cursor cell inverted and flushes.
pub trait Screen: LevelRenderer<Error = io::Error> {
    /// Refresh the draw mode indicator on the menu bar
    fn set_draw_mode(&mut self, on: bool) -> io::Result<()>;

    /// Replace the status line text
    fn show_status(&mut self, message: &str) -> io::Result<()>;
}

/// Input side of the boundary
pub trait InputSource {
    /// Block until the next event; `None` once input is exhausted
    fn next_event(&mut self) -> io::Result<Option<InputEvent>>;
}
