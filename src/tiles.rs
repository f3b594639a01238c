// src/tiles.rs

use glam::{IVec2, Vec2};
use thiserror::Error;

use crate::geometry::{self, TILE_PIXELS};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerrainKind {
    Solid,
    Air,
    Floor,
    ShortcutEntrance,
    Slope,
}

impl TerrainKind {
    pub fn is_solid(self) -> bool {
        self == TerrainKind::Solid
    }
}

/// Which way the open face of a diagonal slope points.
/// `UpLeft` means the tile is solid below and to the right of its diagonal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlopeOrientation {
    UpLeft = 0,
    UpRight = 1,
    DownLeft = 2,
    DownRight = 3,
}

impl SlopeOrientation {
    pub const ALL: [SlopeOrientation; 4] = [
        SlopeOrientation::UpLeft,
        SlopeOrientation::UpRight,
        SlopeOrientation::DownLeft,
        SlopeOrientation::DownRight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Read-only classification of a room's tiles.
///
/// Queries outside `0..width` / `0..height` must answer `Air` with no slope,
/// so neighbour inspection at the room border needs no special casing.
pub trait TileSource {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn terrain(&self, x: i32, y: i32) -> TerrainKind;
    /// `None` for non-slope tiles and for slopes that do not form a clean diagonal.
    fn slope(&self, x: i32, y: i32) -> Option<SlopeOrientation>;

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width() && y < self.height()
    }

    fn tile_center(&self, x: i32, y: i32) -> Vec2 {
        geometry::tile_center(x, y)
    }

    fn tile_at_position(&self, pos: Vec2) -> IVec2 {
        geometry::tile_containing(pos)
    }

    fn terrain_at_position(&self, pos: Vec2) -> TerrainKind {
        let tile = self.tile_at_position(pos);
        self.terrain(tile.x, tile.y)
    }

    /// Room extent in world units.
    fn pixel_size(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32) * TILE_PIXELS
    }

    /// Length of the room's bounding-box diagonal in world units.
    fn diagonal(&self) -> f32 {
        self.pixel_size().length()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub terrain: TerrainKind,
    pub slope: Option<SlopeOrientation>,
}

impl Tile {
    pub const AIR: Tile = Tile { terrain: TerrainKind::Air, slope: None };
    pub const SOLID: Tile = Tile { terrain: TerrainKind::Solid, slope: None };

    pub fn slope(orientation: SlopeOrientation) -> Self {
        Self { terrain: TerrainKind::Slope, slope: Some(orientation) }
    }

    pub fn broken_slope() -> Self {
        Self { terrain: TerrainKind::Slope, slope: None }
    }

    pub fn from_char(c: char) -> Option<Tile> {
        let tile = match c {
            '#' => Tile::SOLID,
            '.' | ' ' => Tile::AIR,
            '-' => Tile { terrain: TerrainKind::Floor, slope: None },
            '=' => Tile { terrain: TerrainKind::ShortcutEntrance, slope: None },
            // Numpad layout: the digit points where the open face looks.
            '7' => Tile::slope(SlopeOrientation::UpLeft),
            '9' => Tile::slope(SlopeOrientation::UpRight),
            '1' => Tile::slope(SlopeOrientation::DownLeft),
            '3' => Tile::slope(SlopeOrientation::DownRight),
            '?' => Tile::broken_slope(),
            _ => return None,
        };
        Some(tile)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("unknown tile character {ch:?} at column {column}, line {line}")]
    UnknownTile { ch: char, column: usize, line: usize },
    #[error("line {line} has {found} tiles, expected {expected}")]
    RaggedRow { line: usize, found: usize, expected: usize },
}

/// Dense row-major tile storage, `y = 0` at the bottom.
#[derive(Clone, Debug)]
pub struct TileGrid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            tiles: vec![Tile::AIR; (width * height) as usize],
        }
    }

    pub fn filled(width: i32, height: i32, tile: Tile) -> Self {
        let mut grid = Self::new(width, height);
        grid.tiles.iter_mut().for_each(|t| *t = tile);
        grid
    }

    /// Parses a text map. The first line is the top row.
    pub fn from_ascii(text: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.is_empty())
            .collect();
        let height = lines.len();
        let width = lines.first().map_or(0, |l| l.chars().count());

        let mut grid = TileGrid::new(width as i32, height as i32);
        for (line_idx, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridError::RaggedRow { line: line_idx + 1, found, expected: width });
            }
            let y = (height - 1 - line_idx) as i32;
            for (column, ch) in line.chars().enumerate() {
                let tile = Tile::from_char(ch).ok_or(GridError::UnknownTile {
                    ch,
                    column: column + 1,
                    line: line_idx + 1,
                })?;
                grid.set(column as i32, y, tile);
            }
        }
        Ok(grid)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && x < self.width && y < self.height {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Tile {
        self.index(x, y).map_or(Tile::AIR, |i| self.tiles[i])
    }

    /// Writes are ignored outside the grid.
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = tile;
        }
    }

    pub fn fill_rect(&mut self, min: IVec2, max: IVec2, tile: Tile) {
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                self.set(x, y, tile);
            }
        }
    }
}

impl TileSource for TileGrid {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn terrain(&self, x: i32, y: i32) -> TerrainKind {
        self.get(x, y).terrain
    }

    fn slope(&self, x: i32, y: i32) -> Option<SlopeOrientation> {
        let tile = self.get(x, y);
        match tile.terrain {
            TerrainKind::Slope => tile.slope,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_first_line_is_top_row() {
        let grid = TileGrid::from_ascii("#..\n.9-\n").unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.terrain(0, 1), TerrainKind::Solid);
        assert_eq!(grid.terrain(0, 0), TerrainKind::Air);
        assert_eq!(grid.slope(1, 0), Some(SlopeOrientation::UpRight));
        assert_eq!(grid.terrain(2, 0), TerrainKind::Floor);
    }

    #[test]
    fn out_of_bounds_reads_as_air() {
        let grid = TileGrid::filled(2, 2, Tile::SOLID);
        assert_eq!(grid.terrain(-1, 0), TerrainKind::Air);
        assert_eq!(grid.terrain(0, 2), TerrainKind::Air);
        assert_eq!(grid.slope(5, 5), None);
        assert!(!grid.in_bounds(2, 0));
    }

    #[test]
    fn broken_slope_has_no_orientation() {
        let grid = TileGrid::from_ascii("?").unwrap();
        assert_eq!(grid.terrain(0, 0), TerrainKind::Slope);
        assert_eq!(grid.slope(0, 0), None);
    }

    #[test]
    fn rejects_bad_maps() {
        assert_eq!(
            TileGrid::from_ascii("#x#").unwrap_err(),
            GridError::UnknownTile { ch: 'x', column: 2, line: 1 }
        );
        assert_eq!(
            TileGrid::from_ascii("###\n##").unwrap_err(),
            GridError::RaggedRow { line: 2, found: 2, expected: 3 }
        );
    }

    #[test]
    fn diagonal_covers_room() {
        let grid = TileGrid::new(3, 4);
        assert_eq!(grid.pixel_size(), Vec2::new(60.0, 80.0));
        assert!((grid.diagonal() - 100.0).abs() < 1e-4);
        assert_eq!(grid.terrain_at_position(Vec2::new(59.0, 79.0)), TerrainKind::Air);
    }
}
