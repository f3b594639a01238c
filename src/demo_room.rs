// src/demo_room.rs

use glam::{IVec2, Vec2};
use crate::geometry::tile_center;
use crate::tiles::{GridError, TileGrid};

/// Two chambers joined by a gap under an overhang, with a mound and a shortcut entrance.
const DEMO_ROOM: &str = "\
##############################
#............##..............#
#............##..............#
#...####.....##......####....#
#...####.....1#......####....#
#............................#
#............................#
#.......7##9.................#
#......7####9.........=......#
#------##############--------#
##############################";

pub const DEMO_PATROL_TILES: [IVec2; 4] = [
    IVec2::new(3, 5),
    IVec2::new(12, 5),
    IVec2::new(24, 8),
    IVec2::new(24, 5),
];

pub fn create_demo_room() -> Result<TileGrid, GridError> {
    TileGrid::from_ascii(DEMO_ROOM)
}

/// Waypoints of the demo patrol in world units.
pub fn demo_patrol() -> Vec<Vec2> {
    DEMO_PATROL_TILES.iter().map(|t| tile_center(t.x, t.y)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::{SlopeOrientation, TerrainKind, TileSource};

    #[test]
    fn demo_room_parses_and_patrol_is_open() {
        let room = create_demo_room().unwrap();
        assert_eq!(room.width(), 30);
        assert_eq!(room.height(), 11);
        for tile in DEMO_PATROL_TILES {
            assert!(!room.terrain(tile.x, tile.y).is_solid(), "{:?} is solid", tile);
        }
    }

    #[test]
    fn demo_slopes_lean_on_solid_tiles() {
        let room = create_demo_room().unwrap();
        let mut slopes = 0;
        for y in 0..room.height() {
            for x in 0..room.width() {
                if room.terrain(x, y) != TerrainKind::Slope {
                    continue;
                }
                slopes += 1;
                // Solid sides are the ones opposite the open face.
                let (dx, dy) = match room.slope(x, y).unwrap() {
                    SlopeOrientation::UpLeft => (1, -1),
                    SlopeOrientation::UpRight => (-1, -1),
                    SlopeOrientation::DownLeft => (1, 1),
                    SlopeOrientation::DownRight => (-1, 1),
                };
                assert!(room.terrain(x + dx, y).is_solid(), "slope at ({}, {}) has no side wall", x, y);
                assert!(room.terrain(x, y + dy).is_solid(), "slope at ({}, {}) has no floor or ceiling", x, y);
            }
        }
        assert_eq!(slopes, 5);
    }
}
