//! Map file parser
//!
//! Reads the text format produced by [`MapWriter`](crate::writer::MapWriter)
//! back into a [`MapContainer`]. Parsing is strict: any malformed header,
//! short row or unknown tile rejects the whole file.

use crate::level::{LevelId, LevelMap};
use crate::map::MapContainer;
use crate::tiles::{TileCode, TileGrid};
use crate::{LevelError, Result};
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{anychar, char, digit1, space0, u32 as level_number};
use nom::combinator::{all_consuming, map_res, opt, rest};
use nom::sequence::{pair, preceded, separated_pair, tuple};
use nom::IResult;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// `a: Some label`
fn point_line(input: &str) -> IResult<&str, (char, &str)> {
    separated_pair(anychar, pair(char(':'), opt(char(' '))), rest)(input)
}

/// `Level 3`
fn level_header(input: &str) -> IResult<&str, LevelId> {
    preceded(tag("Level "), level_number)(input)
}

fn dimension(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}

/// `40 × 12`, also accepting an ASCII `x`
fn dimension_line(input: &str) -> IResult<&str, (usize, usize)> {
    separated_pair(
        dimension,
        tuple((space0, alt((char('×'), char('x'))), space0)),
        dimension,
    )(input)
}

/// Run a line parser over a whole line, turning failures into a parse error
fn parse_whole<'a, O, F>(parser: F, line: &'a str, line_no: usize, what: &str) -> Result<O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    all_consuming(parser)(line)
        .map(|(_, out)| out)
        .map_err(|_| LevelError::ParseError {
            line: line_no,
            message: format!("Invalid {}: {:?}", what, line),
        })
}

/// Map file parser
pub struct LevelLoader;

impl LevelLoader {
    /// Load a map from a file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<MapContainer> {
        let path = path.as_ref();

        let data = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LevelError::NotFound(path.display().to_string()),
            _ => LevelError::FileError(e),
        })?;

        let map = Self::parse(&data)?;
        tracing::info!(
            "Loaded {} level(s) and {} point(s) from {}",
            map.levels().count(),
            map.points().len(),
            path.display()
        );
        Ok(map)
    }

    /// Parse map data from a string
    pub fn parse(data: &str) -> Result<MapContainer> {
        let lines: Vec<&str> = data.lines().collect();

        if lines.is_empty() {
            return Err(LevelError::InvalidFormat("Empty file".into()));
        }

        // Points of interest, up to the first blank line
        let mut points = BTreeMap::new();
        let mut i = 0;
        while i < lines.len() && !lines[i].is_empty() {
            let (marker, label) = parse_whole(point_line, lines[i], i + 1, "point of interest")?;
            if points.insert(marker, label.to_string()).is_some() {
                return Err(LevelError::ParseError {
                    line: i + 1,
                    message: format!("Duplicate marker {:?}", marker),
                });
            }
            i += 1;
        }

        if i >= lines.len() {
            return Err(LevelError::InvalidFormat("Missing separator after points".into()));
        }
        i += 1;

        let mut levels = Vec::new();
        let mut seen = BTreeSet::new();
        while i < lines.len() {
            if lines[i].is_empty() {
                i += 1;
                continue;
            }

            let (level, consumed) = Self::parse_level(&lines[i..], i + 1)?;
            if !seen.insert(level.level) {
                return Err(LevelError::ParseError {
                    line: i + 1,
                    message: format!("Duplicate level {}", level.level),
                });
            }
            levels.push(level);
            i += consumed;

            // Each body is followed by a blank line, except possibly at EOF
            if i < lines.len() {
                if !lines[i].is_empty() {
                    return Err(LevelError::ParseError {
                        line: i + 1,
                        message: "Expected blank line after level body".into(),
                    });
                }
                i += 1;
            }
        }

        if levels.is_empty() {
            return Err(LevelError::InvalidFormat("No levels".into()));
        }

        MapContainer::from_parts(points, levels)
    }

    /// Parse one level block, returning it and the number of lines used
    ///
    /// `first_line` is the 1-based line number of the `Level` header.
    fn parse_level(lines: &[&str], first_line: usize) -> Result<(LevelMap, usize)> {
        let id = parse_whole(level_header, lines[0], first_line, "level header")?;

        let dims = lines.get(1).copied().ok_or_else(|| LevelError::ParseError {
            line: first_line + 1,
            message: "Missing dimension line".into(),
        })?;
        let (width, height) = parse_whole(dimension_line, dims, first_line + 1, "dimension line")?;

        if width == 0 || height == 0 {
            return Err(LevelError::ParseError {
                line: first_line + 1,
                message: format!("Level {} has zero size {} × {}", id, width, height),
            });
        }

        let body = 2usize
            .checked_add(height)
            .and_then(|end| lines.get(2..end))
            .ok_or_else(|| LevelError::ParseError {
                line: first_line + lines.len(),
                message: format!("Level {} ends early: expected {} rows", id, height),
            })?;

        let mut rows = Vec::with_capacity(height);
        for (offset, line) in body.iter().enumerate() {
            let line_no = first_line + 2 + offset;
            let row = Self::parse_row(line, width, line_no)?;
            rows.push(row);
        }

        let grid = TileGrid::from_rows(rows)?;
        Ok((LevelMap::from_grid(id, grid), 2 + height))
    }

    /// Decode one grid row of exactly `width` tiles
    fn parse_row(line: &str, width: usize, line_no: usize) -> Result<Vec<TileCode>> {
        let row = line
            .chars()
            .map(TileCode::from_char)
            .collect::<Result<Vec<_>>>()
            .map_err(|e| LevelError::ParseError {
                line: line_no,
                message: e.to_string(),
            })?;

        if row.len() != width {
            return Err(LevelError::ParseError {
                line: line_no,
                message: format!("Row has {} tiles, expected {}", row.len(), width),
            });
        }

        Ok(row)
    }
}
