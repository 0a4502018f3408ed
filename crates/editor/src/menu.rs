//! Menu bar layout

use crate::command::{Command, KeyBinding, KEY_BINDINGS};

/// Gap between menu entries, in columns
const ITEM_GAP: usize = 2;

/// A placed menu entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub key: char,
    pub command: Command,
    pub label: String,
    /// Starting column
    pub pos_x: usize,
}

impl MenuItem {
    pub fn width(&self) -> usize {
        self.label.chars().count()
    }
}

/// The row of `key = text` entries across the top of the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuBar {
    items: Vec<MenuItem>,
}

impl MenuBar {
    /// Lay out the given bindings left to right
    pub fn new(bindings: &[KeyBinding]) -> Self {
        let mut x = 0;
        let items = bindings
            .iter()
            .map(|binding| {
                let label = format!("{} = {}", binding.key, binding.text);
                let item = MenuItem {
                    key: binding.key,
                    command: binding.command,
                    pos_x: x,
                    label,
                };
                x += item.width() + ITEM_GAP;
                item
            })
            .collect();

        Self { items }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Entry for a command, if it has one
    pub fn item_for(&self, command: Command) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.command == command)
    }
}

impl Default for MenuBar {
    fn default() -> Self {
        Self::new(&KEY_BINDINGS)
    }
}
