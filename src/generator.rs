// src/generator.rs

use rand::Rng;
use crate::tiles::{SlopeOrientation, TerrainKind, Tile, TileGrid, TileSource};

/// Random cave-like rooms with a solid border, for demos and benchmarks.
pub struct RoomGenerator;

impl RoomGenerator {
    /// Cellular-automaton cave: random fill, then `smoothing_passes` rounds of the 4-5 rule.
    pub fn generate_cave(
        rng: &mut impl Rng,
        width: i32,
        height: i32,
        fill_chance: f64,
        smoothing_passes: usize,
    ) -> TileGrid {
        let mut grid = TileGrid::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let tile = if Self::is_border(&grid, x, y) || rng.gen_bool(fill_chance) {
                    Tile::SOLID
                } else {
                    Tile::AIR
                };
                grid.set(x, y, tile);
            }
        }

        for _ in 0..smoothing_passes {
            let mut next = grid.clone();
            for y in 0..height {
                for x in 0..width {
                    let walls = Self::solid_neighbours(&grid, x, y);
                    let solid = Self::is_border(&grid, x, y)
                        || walls > 4
                        || (walls == 4 && grid.terrain(x, y).is_solid());
                    next.set(x, y, if solid { Tile::SOLID } else { Tile::AIR });
                }
            }
            grid = next;
        }
        grid
    }

    /// Adds slope tiles in air cells that sit in an inner corner of two solid faces.
    pub fn add_slopes(rng: &mut impl Rng, grid: &mut TileGrid, chance: f64) {
        for y in 1..grid.height() - 1 {
            for x in 1..grid.width() - 1 {
                if grid.terrain(x, y) != TerrainKind::Air || !rng.gen_bool(chance) {
                    continue;
                }
                let below = grid.terrain(x, y - 1).is_solid();
                let above = grid.terrain(x, y + 1).is_solid();
                let left = grid.terrain(x - 1, y).is_solid();
                let right = grid.terrain(x + 1, y).is_solid();
                let orientation = match (below, above, left, right) {
                    (true, false, true, false) => SlopeOrientation::UpRight,
                    (true, false, false, true) => SlopeOrientation::UpLeft,
                    (false, true, true, false) => SlopeOrientation::DownRight,
                    (false, true, false, true) => SlopeOrientation::DownLeft,
                    _ => continue,
                };
                grid.set(x, y, Tile::slope(orientation));
            }
        }
    }

    /// Uniform noise with no smoothing; a worst case for edge count.
    pub fn generate_noise(rng: &mut impl Rng, width: i32, height: i32, fill_chance: f64) -> TileGrid {
        let mut grid = TileGrid::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if rng.gen_bool(fill_chance) {
                    grid.set(x, y, Tile::SOLID);
                }
            }
        }
        grid
    }

    fn is_border(grid: &TileGrid, x: i32, y: i32) -> bool {
        x == 0 || y == 0 || x == grid.width() - 1 || y == grid.height() - 1
    }

    fn solid_neighbours(grid: &TileGrid, x: i32, y: i32) -> usize {
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if (dx != 0 || dy != 0) && grid.terrain(x + dx, y + dy).is_solid() {
                    count += 1;
                }
            }
        }
        count
    }
}
