//! Editor commands and input events
//!
//! The terminal adapter turns raw key and mouse events into these; the
//! session never sees key codes or pointer devices.

/// A discrete editing command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    ToggleDrawMode,
    PlaceStairs,
    PlaceDoor,
    Save,
    Quit,
}

/// A key binding shown on the menu bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: char,
    pub command: Command,
    pub text: &'static str,
}

/// Letter keys, in menu bar order
pub const KEY_BINDINGS: [KeyBinding; 5] = [
    KeyBinding { key: 'r', command: Command::ToggleDrawMode, text: "Room draw mode" },
    KeyBinding { key: 'd', command: Command::PlaceDoor, text: "Door" },
    KeyBinding { key: 't', command: Command::PlaceStairs, text: "Stairs" },
    KeyBinding { key: 's', command: Command::Save, text: "Save" },
    KeyBinding { key: 'q', command: Command::Quit, text: "Quit" },
];

impl Command {
    /// Look up the command bound to a letter key
    pub fn from_key(key: char) -> Option<Self> {
        KEY_BINDINGS
            .iter()
            .find(|binding| binding.key == key)
            .map(|binding| binding.command)
    }

    /// Row/column delta for movement commands
    pub fn delta(self) -> Option<(isize, isize)> {
        match self {
            Command::MoveUp => Some((-1, 0)),
            Command::MoveDown => Some((1, 0)),
            Command::MoveLeft => Some((0, -1)),
            Command::MoveRight => Some((0, 1)),
            _ => None,
        }
    }
}

/// Pointer button state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Button went down; arms drag tracking
    Press,
    /// Button went up; disarms drag tracking
    Release,
    /// Position report
    Moved,
}

/// Pointer event in grid coordinates
///
/// Coordinates may be negative or past the grid when the pointer is over
/// the border or the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub row: isize,
    pub col: isize,
}

impl PointerEvent {
    pub const fn new(kind: PointerKind, row: isize, col: isize) -> Self {
        Self { kind, row, col }
    }
}

/// Anything the input side can deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Command(Command),
    Pointer(PointerEvent),
    /// The display area changed size
    Resize,
}

impl From<Command> for InputEvent {
    fn from(command: Command) -> Self {
        InputEvent::Command(command)
    }
}

impl From<PointerEvent> for InputEvent {
    fn from(pointer: PointerEvent) -> Self {
        InputEvent::Pointer(pointer)
    }
}
