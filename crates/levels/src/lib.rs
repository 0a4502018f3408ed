//! # Keepmap Levels System
//!
//! This crate holds the dungeon map model and its file format.
//!
//! ## Features
//! - Closed tile alphabet with toggle cycles for doors and stairs
//! - Multi-level map container with cursor and draw mode
//! - Plain text map writer and a strict loader for the same format
//!
//! ## Map Format
//!
//! Maps are stored as newline-delimited text:
//! - **Points of interest**: `<marker>: <label>`, then a blank line
//! - **Level blocks**: `Level <n>`, `<width> × <height>`, the rows, then a blank line

pub mod error;
pub mod level;
pub mod tiles;
pub mod map;
pub mod writer;
pub mod parser;

pub use error::{LevelError, Result};
pub use level::{LevelId, LevelMap, FIRST_LEVEL};
pub use tiles::{TileCode, TileCycle, TileGrid, DOOR_CYCLE, STAIRS_CYCLE};
pub use map::{LevelRenderer, MapContainer};
pub use writer::MapWriter;
pub use parser::LevelLoader;
