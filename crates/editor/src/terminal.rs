//! Crossterm terminal front end
//!
//! Implements [`Screen`] and [`InputSource`] on a real terminal: raw mode,
//! alternate screen, optional mouse capture. The terminal is restored when
//! the value is dropped.

use crate::command::{Command, InputEvent, PointerEvent, PointerKind};
use crate::frame::{compose, Layout};
use crate::menu::MenuBar;
use crate::ui::{InputSource, Screen};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use keepmap_core::{GridPosition, KeepError, Result};
use keepmap_levels::{LevelId, LevelRenderer, TileGrid};
use std::io::{self, Stdout, Write};

const NO_MOUSE_NOTE: &str = "No mouse support";

/// Terminal-backed editor UI
pub struct TerminalUi {
    out: Stdout,
    layout: Layout,
    menu: MenuBar,
    mouse: bool,
    draw_mode: bool,
    level: LevelId,
    status: String,
    /// Grid cell at the map window's top-left corner
    viewport: GridPosition,
}

fn terminal_error(e: io::Error) -> KeepError {
    KeepError::Terminal(e.to_string())
}

impl TerminalUi {
    /// Take over the terminal
    pub fn new(level: LevelId, mouse: bool) -> Result<Self> {
        let (columns, rows) = terminal::size().map_err(terminal_error)?;
        terminal::enable_raw_mode().map_err(terminal_error)?;

        // Dropping the value from here on restores the terminal
        let mut ui = Self {
            out: io::stdout(),
            layout: Layout::from_size(columns, rows),
            menu: MenuBar::default(),
            mouse,
            draw_mode: false,
            level,
            status: String::new(),
            viewport: GridPosition::default(),
        };
        ui.enter().map_err(terminal_error)?;
        Ok(ui)
    }

    fn enter(&mut self) -> io::Result<()> {
        execute!(self.out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        if self.mouse {
            execute!(self.out, EnableMouseCapture)?;
        }
        self.draw_chrome()
    }

    /// Current screen layout
    pub fn layout(&self) -> Layout {
        self.layout
    }

    fn draw_chrome(&mut self) -> io::Result<()> {
        self.queue_menu()?;

        let info_row = self.layout.info_row;
        queue!(
            self.out,
            MoveTo(0, info_row),
            Clear(ClearType::CurrentLine),
            Print(format!("Level {}", self.level))
        )?;
        if !self.mouse {
            let x = self.layout.columns.saturating_sub(NO_MOUSE_NOTE.len() as u16 + 2);
            queue!(self.out, MoveTo(x, info_row), Print(NO_MOUSE_NOTE))?;
        }

        self.queue_status()?;
        self.out.flush()
    }

    fn queue_menu(&mut self) -> io::Result<()> {
        let columns = self.layout.columns as usize;
        queue!(self.out, MoveTo(0, self.layout.menu_row), Clear(ClearType::CurrentLine))?;

        for item in self.menu.items() {
            if item.pos_x >= columns {
                break;
            }
            let text: String = item.label.chars().take(columns - item.pos_x).collect();
            let highlight = item.command == Command::ToggleDrawMode && self.draw_mode;

            queue!(self.out, MoveTo(item.pos_x as u16, self.layout.menu_row))?;
            if highlight {
                queue!(self.out, SetAttribute(Attribute::Reverse))?;
            }
            queue!(self.out, Print(text))?;
            if highlight {
                queue!(self.out, SetAttribute(Attribute::NoReverse))?;
            }
        }
        Ok(())
    }

    fn queue_status(&mut self) -> io::Result<()> {
        let text: String = self.status.chars().take(self.layout.columns as usize).collect();
        queue!(
            self.out,
            MoveTo(0, self.layout.status_row),
            Clear(ClearType::CurrentLine),
            Print(text)
        )
    }

    fn translate_key(key: KeyEvent) -> Option<InputEvent> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        let command = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
            KeyCode::Char(c) => Command::from_key(c)?,
            KeyCode::Up => Command::MoveUp,
            KeyCode::Down => Command::MoveDown,
            KeyCode::Left => Command::MoveLeft,
            KeyCode::Right => Command::MoveRight,
            _ => return None,
        };
        Some(command.into())
    }

    fn translate_mouse(&self, mouse: MouseEvent) -> Option<InputEvent> {
        let kind = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => PointerKind::Press,
            MouseEventKind::Up(MouseButton::Left) => PointerKind::Release,
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => PointerKind::Moved,
            _ => return None,
        };

        // The viewport's top-left cell sits just inside the map window's border
        let (row, col) = self.layout.map.inner().to_local(mouse.row, mouse.column);
        let row = row + self.viewport.row as isize;
        let col = col + self.viewport.col as isize;
        Some(PointerEvent::new(kind, row, col).into())
    }

    fn resize(&mut self, columns: u16, rows: u16) -> io::Result<()> {
        tracing::debug!("Terminal resized to {}x{}", columns, rows);
        self.layout = Layout::from_size(columns, rows);
        queue!(self.out, Clear(ClearType::All))?;
        self.draw_chrome()
    }
}

impl LevelRenderer for TerminalUi {
    type Error = io::Error;

    fn draw_level(&mut self, grid: &TileGrid, cursor: GridPosition) -> io::Result<()> {
        let area = self.layout.map;
        let frame = compose(grid, cursor, area, self.viewport);
        self.viewport = frame.origin;

        for (i, line) in frame.lines.iter().enumerate() {
            queue!(self.out, MoveTo(area.left, area.top + i as u16), Print(line))?;
        }

        if let Some(cell) = frame.cursor {
            queue!(
                self.out,
                MoveTo(cell.col, cell.row),
                SetAttribute(Attribute::Reverse),
                Print(cell.glyph),
                SetAttribute(Attribute::NoReverse)
            )?;
        }

        self.out.flush()
    }
}

impl Screen for TerminalUi {
    fn set_draw_mode(&mut self, on: bool) -> io::Result<()> {
        self.draw_mode = on;
        self.queue_menu()?;
        self.out.flush()
    }

    fn show_status(&mut self, message: &str) -> io::Result<()> {
        self.status = message.to_string();
        self.queue_status()?;
        self.out.flush()
    }
}

impl InputSource for TerminalUi {
    fn next_event(&mut self) -> io::Result<Option<InputEvent>> {
        loop {
            let translated = match event::read()? {
                Event::Key(key) => Self::translate_key(key),
                Event::Mouse(mouse) => self.translate_mouse(mouse),
                Event::Resize(columns, rows) => {
                    self.resize(columns, rows)?;
                    Some(InputEvent::Resize)
                }
                _ => None,
            };

            if translated.is_some() {
                return Ok(translated);
            }
        }
    }
}

impl Drop for TerminalUi {
    fn drop(&mut self) {
        if self.mouse {
            let _ = execute!(self.out, DisableMouseCapture);
        }
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
