//! Map file writer
//!
//! Writes a map container as plain text:
//!
//! ```text
//! a: Treasure          <- one line per point of interest
//!                      <- blank separator
//! Level 1              <- per level, ascending
//! 3 × 2                <- width × height
//! ...                  <- `height` rows of `width` tile chars
//! .#.
//!                      <- blank separator
//! ```

use crate::map::MapContainer;
use crate::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Separator between width and height in the dimension line
pub const DIMENSION_SEPARATOR: char = '×';

/// Map file writer
pub struct MapWriter;

impl MapWriter {
    /// Write the container to any byte sink
    pub fn write_to<W: Write>(map: &MapContainer, out: &mut W) -> Result<()> {
        for (marker, label) in map.points() {
            writeln!(out, "{}: {}", marker, label)?;
        }
        writeln!(out)?;

        for level in map.levels() {
            writeln!(out, "Level {}", level.level)?;
            writeln!(out, "{} {} {}", level.width(), DIMENSION_SEPARATOR, level.height())?;

            let mut line = String::with_capacity(level.width());
            for row in level.grid().rows() {
                line.clear();
                line.extend(row.iter().map(|tile| tile.as_char()));
                writeln!(out, "{}", line)?;
            }
            writeln!(out)?;
        }

        Ok(())
    }

    /// Serialize to an in-memory string
    pub fn to_string(map: &MapContainer) -> Result<String> {
        let mut buf = Vec::new();
        Self::write_to(map, &mut buf)?;
        String::from_utf8(buf)
            .map_err(|e| crate::LevelError::InvalidFormat(e.to_string()))
    }

    /// Save to a file, replacing whatever was there
    ///
    /// A failure part way through can leave a truncated file behind.
    pub fn save_file<P: AsRef<Path>>(map: &MapContainer, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);

        Self::write_to(map, &mut out)?;
        out.flush()?;
        out.get_ref().sync_all()?;

        tracing::info!(
            "Saved {} level(s) and {} point(s) to {}",
            map.levels().count(),
            map.points().len(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelMap;
    use crate::LevelError;

    #[test]
    fn test_write_single_level() {
        let mut map = MapContainer::new(2, 3);
        map.insert_point('a', "Treasure").unwrap();

        let text = MapWriter::to_string(&map).unwrap();
        let lines: Vec<&str> = text.split('\n').collect();

        assert_eq!(lines[0], "a: Treasure");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Level 1");
        assert_eq!(lines[3], "3 × 2");
        assert_eq!(lines[4], "   ");
        assert_eq!(lines[5], "   ");
        assert_eq!(lines[6], "");
        // Final newline of the blank separator
        assert_eq!(lines[7], "");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn test_write_without_points() {
        let map = MapContainer::new(1, 1);
        let text = MapWriter::to_string(&map).unwrap();
        assert_eq!(text, "\nLevel 1\n1 × 1\n \n\n");
    }

    #[test]
    fn test_write_tiles_verbatim() {
        let mut map = MapContainer::new(2, 4);
        map.insert_level(LevelMap::from_lines(1, &[".#=.", "v^ ."]).unwrap());

        let text = MapWriter::to_string(&map).unwrap();
        assert!(text.contains("\n.#=.\nv^ .\n"));
    }

    #[test]
    fn test_levels_sorted_by_id() {
        let mut map = MapContainer::new(1, 1);
        map.insert_level(LevelMap::new(1, 2, 7));
        map.insert_level(LevelMap::new(1, 3, 3));
        map.insert_level(LevelMap::new(1, 4, 12));

        let text = MapWriter::to_string(&map).unwrap();
        let ids: Vec<&str> = text
            .lines()
            .filter(|line| line.starts_with("Level "))
            .collect();
        assert_eq!(ids, vec!["Level 1", "Level 3", "Level 7", "Level 12"]);
    }

    #[test]
    fn test_points_in_marker_order() {
        let mut map = MapContainer::new(1, 1);
        map.insert_point('z', "Exit").unwrap();
        map.insert_point('b', "Boss: the big one").unwrap();
        map.insert_point('a', "Altar").unwrap();

        let text = MapWriter::to_string(&map).unwrap();
        assert!(text.starts_with("a: Altar\nb: Boss: the big one\nz: Exit\n\nLevel 1\n"));
    }

    #[test]
    fn test_save_file_truncates() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("keep.map");
        std::fs::write(&path, "x".repeat(4096)).unwrap();

        let map = MapContainer::new(2, 2);
        MapWriter::save_file(&map, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "\nLevel 1\n2 × 2\n  \n  \n\n");
    }

    #[test]
    fn test_save_file_unwritable() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("keep.map");

        let map = MapContainer::new(2, 2);
        let result = MapWriter::save_file(&map, &path);
        assert!(matches!(result, Err(LevelError::FileError(_))));
    }
}
