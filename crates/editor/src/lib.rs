//! # Keepmap Editor
//!
//! Interactive front end for the map container.
//!
//! ## Features
//! - Command set and pointer drag events, independent of any terminal
//! - Edit session loop with redraw after every edit
//! - Pure frame composition (border, grid rows, inverted cursor)
//! - Crossterm terminal implementation with menu bar and status line

pub mod command;
pub mod frame;
pub mod menu;
pub mod session;
pub mod terminal;
pub mod ui;

pub use command::{Command, InputEvent, KeyBinding, PointerEvent, PointerKind, KEY_BINDINGS};
pub use frame::{compose, Frame, Layout};
pub use menu::{MenuBar, MenuItem};
pub use session::{EditSession, Flow};
pub use terminal::TerminalUi;
pub use ui::{InputSource, Screen};
