// src/mapping_lib/edge_detection.rs

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::geometry::{Direction, Rotation, CLASSIC_HALF_SIZE, QUARTER_TURNS};
use crate::mapping_lib::graph::GraphBuilder;
use crate::tiles::{SlopeOrientation, TerrainKind, TileSource};

const H: f32 = CLASSIC_HALF_SIZE;

/// Direction each slope orientation's open face looks, indexed by `SlopeOrientation::index`.
const SLOPE_TABLE: [Direction; 4] = [
    Direction::UpLeft,
    Direction::UpRight,
    Direction::DownLeft,
    Direction::DownRight,
];

/// Right-hand see-through corner handling for the sub-tile routine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeakGuard {
    /// Extra vertex only on the left end of an open top face.
    #[default]
    LeftOnly,
    /// Also insert the extra vertex on the right end when TopRight is solid and Right is not.
    Symmetric,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeDetection {
    /// Whole-tile faces, one edge per exposed side.
    Legacy,
    /// Per-quadrant shapes with notched corners, `shrink` world units from the tile centre.
    SubTile { shrink: f32, leak_guard: LeakGuard },
}

impl EdgeDetection {
    pub fn for_tile_size(tile_size: f32, leak_guard: LeakGuard) -> Self {
        if tile_size >= H {
            EdgeDetection::Legacy
        } else {
            EdgeDetection::SubTile { shrink: tile_size, leak_guard }
        }
    }

    /// How far slope diagonals reach into their tile.
    pub fn shrink(&self) -> f32 {
        match self {
            EdgeDetection::Legacy => H,
            EdgeDetection::SubTile { shrink, .. } => *shrink,
        }
    }

    /// Emits the exposed boundary of the solid tile at `(x, y)`.
    pub fn add_solid_edges<T: TileSource + ?Sized>(
        &self,
        tiles: &T,
        x: i32,
        y: i32,
        builder: &mut GraphBuilder,
    ) {
        match *self {
            EdgeDetection::Legacy => {
                for dir in [Direction::Left, Direction::Down, Direction::Right, Direction::Up] {
                    let neighbour = IVec2::new(x, y) + dir.offset();
                    if has_edge(tiles, x, y, dir)
                        && !has_edge(tiles, neighbour.x, neighbour.y, dir.rotated(4))
                    {
                        add_face_edge(tiles, x, y, dir, builder);
                    }
                }
            }
            EdgeDetection::SubTile { shrink, leak_guard } => {
                let shape = SubTileShape { shrink, leak_guard };
                for (phase, rotation) in QUARTER_TURNS.iter().enumerate() {
                    shape.emit(tiles, IVec2::new(x, y), phase, rotation, builder);
                }
            }
        }
    }
}

/// Whether the tile at `(x, y)` has a full face on side `dir` (axis directions only).
pub fn has_edge<T: TileSource + ?Sized>(tiles: &T, x: i32, y: i32, dir: Direction) -> bool {
    match tiles.terrain(x, y) {
        TerrainKind::Solid => true,
        TerrainKind::Air | TerrainKind::Floor | TerrainKind::ShortcutEntrance => false,
        TerrainKind::Slope => {
            let Some(slope) = tiles.slope(x, y) else {
                return false;
            };
            use SlopeOrientation::*;
            match dir {
                Direction::Up => matches!(slope, DownRight | DownLeft),
                Direction::Right => matches!(slope, UpLeft | DownLeft),
                Direction::Down => matches!(slope, UpRight | UpLeft),
                Direction::Left => matches!(slope, DownRight | UpRight),
                _ => false,
            }
        }
    }
}

fn add_face_edge<T: TileSource + ?Sized>(
    tiles: &T,
    x: i32,
    y: i32,
    dir: Direction,
    builder: &mut GraphBuilder,
) {
    let mid = tiles.tile_center(x, y);
    // Faces wind clockwise around the tile.
    let (from, to) = match dir {
        Direction::Up => (Vec2::new(-H, H), Vec2::new(H, H)),
        Direction::Right => (Vec2::new(H, H), Vec2::new(H, -H)),
        Direction::Down => (Vec2::new(H, -H), Vec2::new(-H, -H)),
        Direction::Left => (Vec2::new(-H, -H), Vec2::new(-H, H)),
        _ => return,
    };
    builder.add_segment(mid + from, mid + to);
}

/// Emits the blocking diagonal of a slope tile.
pub fn add_slope_edge(
    builder: &mut GraphBuilder,
    mid: Vec2,
    slope: SlopeOrientation,
    shrink: f32,
) {
    let s = shrink;
    // The second endpoint registers first for UpRight and DownRight.
    let (a, b) = match slope {
        SlopeOrientation::UpLeft => {
            let a = builder.add_corner(mid + Vec2::new(-s, -H));
            let b = builder.add_corner(mid + Vec2::new(H, s));
            (a, b)
        }
        SlopeOrientation::UpRight => {
            let b = builder.add_corner(mid + Vec2::new(s, -H));
            let a = builder.add_corner(mid + Vec2::new(-H, s));
            (a, b)
        }
        SlopeOrientation::DownLeft => {
            let a = builder.add_corner(mid + Vec2::new(H, -s));
            let b = builder.add_corner(mid + Vec2::new(-s, H));
            (a, b)
        }
        SlopeOrientation::DownRight => {
            let b = builder.add_corner(mid + Vec2::new(-H, -s));
            let a = builder.add_corner(mid + Vec2::new(s, H));
            (a, b)
        }
    };
    builder.push_edge(a, b);
}

/// Solid test on one face of a neighbour, with `face` given in the rotated frame of `phase`.
fn is_solid<T: TileSource + ?Sized>(tiles: &T, tile: IVec2, face: Direction, phase: usize) -> bool {
    match tiles.terrain(tile.x, tile.y) {
        TerrainKind::Solid => true,
        TerrainKind::Slope => match tiles.slope(tile.x, tile.y) {
            None => false,
            Some(slope) => {
                // Re-express the face relative to an UpRight slope, whose Down..=Left faces are solid.
                let relative = (face.index() + 9 - SLOPE_TABLE[slope.index()].index() + 2 * phase) % 8;
                let relative = Direction::from_index(relative);
                relative >= Direction::Down && relative <= Direction::Left
            }
        },
        _ => false,
    }
}

/// Whether `tile` is a slope whose open face looks along `dir` in the rotated frame of `phase`.
fn is_slope<T: TileSource + ?Sized>(tiles: &T, tile: IVec2, dir: Direction, phase: usize) -> bool {
    match tiles.slope(tile.x, tile.y) {
        Some(slope) => dir.rotated(2 * phase) == SLOPE_TABLE[slope.index()],
        None => false,
    }
}

struct SubTileShape {
    shrink: f32,
    leak_guard: LeakGuard,
}

impl SubTileShape {
    /// Works on the top side of the tile in the local frame; the caller cycles the four frames.
    fn emit<T: TileSource + ?Sized>(
        &self,
        tiles: &T,
        tile: IVec2,
        phase: usize,
        rotation: &Rotation,
        builder: &mut GraphBuilder,
    ) {
        let s = self.shrink;
        let at = |offset: IVec2| tile + rotation.transform_offset(offset);
        let left = at(IVec2::new(-1, 0));
        let top_left = at(IVec2::new(-1, 1));
        let top = at(IVec2::new(0, 1));
        let top_right = at(IVec2::new(1, 1));
        let right = at(IVec2::new(1, 0));

        let mut vertices: Vec<Vec2> = Vec::with_capacity(4);

        if is_solid(tiles, left, Direction::Right, phase) && is_solid(tiles, top, Direction::Down, phase) {
            // L-shaped concavity: notch the corner unless it is already enclosed.
            if is_slope(tiles, left, Direction::UpLeft, phase) || is_slope(tiles, top, Direction::UpLeft, phase) {
                vertices.push(Vec2::new(-H, s));
                vertices.push(Vec2::new(-s, H));
            } else if !is_solid(tiles, top_left, Direction::DownRight, phase) {
                vertices.push(Vec2::new(-H, s));
                vertices.push(Vec2::new(-s, s));
                vertices.push(Vec2::new(-s, H));
            }
        } else if !is_solid(tiles, top, Direction::Down, phase) {
            if is_solid(tiles, left, Direction::Right, phase) {
                vertices.push(Vec2::new(-H, s));
            } else {
                // See-through corner at a diagonal junction.
                if is_solid(tiles, top_left, Direction::DownRight, phase) {
                    vertices.push(Vec2::new(-H, H));
                }
                vertices.push(Vec2::new(-s, s));
            }
            if is_solid(tiles, right, Direction::Left, phase) {
                vertices.push(Vec2::new(H, s));
            } else {
                vertices.push(Vec2::new(s, s));
                if self.leak_guard == LeakGuard::Symmetric
                    && is_solid(tiles, top_right, Direction::DownLeft, phase)
                {
                    vertices.push(Vec2::new(H, H));
                }
            }
        }

        let mid = tiles.tile_center(tile.x, tile.y);
        for pair in vertices.windows(2) {
            builder.add_segment(
                mid + rotation.transform_point(pair[0]),
                mid + rotation.transform_point(pair[1]),
            );
        }
    }
}
