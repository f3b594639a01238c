// src/geometry.rs

use glam::{IVec2, Vec2};

/// World units per tile edge.
pub const TILE_PIXELS: f32 = 20.0;
/// Half of a tile edge. Also the sub-tile shrink value that selects legacy edge detection.
pub const CLASSIC_HALF_SIZE: f32 = 10.0;

/// Eight compass directions in clockwise order starting at Up.
/// The discriminants matter: face tests rotate a direction by adding multiples of 2 mod 8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Up = 0,
    UpRight = 1,
    Right = 2,
    DownRight = 3,
    Down = 4,
    DownLeft = 5,
    Left = 6,
    UpLeft = 7,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::Left,
        Direction::UpLeft,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Direction {
        Self::ALL[index % 8]
    }

    /// Rotates clockwise by `steps` eighth-turns.
    pub fn rotated(self, steps: usize) -> Direction {
        Self::from_index(self.index() + steps)
    }

    pub fn offset(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, 1),
            Direction::UpRight => IVec2::new(1, 1),
            Direction::Right => IVec2::new(1, 0),
            Direction::DownRight => IVec2::new(1, -1),
            Direction::Down => IVec2::new(0, -1),
            Direction::DownLeft => IVec2::new(-1, -1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::UpLeft => IVec2::new(-1, 1),
        }
    }
}

/// A 2x2 transform with entries in {-1, 0, 1}, stored row-major.
/// Used to run one edge-shape routine under four quarter-turn frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rotation {
    m11: i32,
    m12: i32,
    m21: i32,
    m22: i32,
}

pub const ROTATE_0: Rotation = Rotation::new(1, 0, 0, 1);
pub const ROTATE_90: Rotation = Rotation::new(0, 1, -1, 0);
pub const ROTATE_180: Rotation = Rotation::new(-1, 0, 0, -1);
pub const ROTATE_270: Rotation = Rotation::new(0, -1, 1, 0);

/// Quarter-turn frames in phase order. Phase `p` turns the local frame `p * 90` degrees clockwise.
pub const QUARTER_TURNS: [Rotation; 4] = [ROTATE_0, ROTATE_90, ROTATE_180, ROTATE_270];

impl Rotation {
    pub const fn new(m11: i32, m12: i32, m21: i32, m22: i32) -> Self {
        Self { m11, m12, m21, m22 }
    }

    pub fn transform_offset(&self, v: IVec2) -> IVec2 {
        IVec2::new(
            self.m11 * v.x + self.m12 * v.y,
            self.m21 * v.x + self.m22 * v.y,
        )
    }

    // Entries are unit or zero, so the float path is exact.
    pub fn transform_point(&self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.m11 as f32 * v.x + self.m12 as f32 * v.y,
            self.m21 as f32 * v.x + self.m22 as f32 * v.y,
        )
    }
}

/// Hashable identity of a position under exact equality. Both zeros map to the same key.
pub fn position_key(p: Vec2) -> (u32, u32) {
    let canon = |v: f32| if v == 0.0 { 0.0f32.to_bits() } else { v.to_bits() };
    (canon(p.x), canon(p.y))
}

/// Centre of the tile at `(x, y)` in world units.
pub fn tile_center(x: i32, y: i32) -> Vec2 {
    Vec2::new(
        x as f32 * TILE_PIXELS + CLASSIC_HALF_SIZE,
        y as f32 * TILE_PIXELS + CLASSIC_HALF_SIZE,
    )
}

pub fn tile_containing(pos: Vec2) -> IVec2 {
    IVec2::new(
        (pos.x / TILE_PIXELS).floor() as i32,
        (pos.y / TILE_PIXELS).floor() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_turn_moves_top_to_right() {
        assert_eq!(ROTATE_90.transform_offset(IVec2::new(0, 1)), IVec2::new(1, 0));
        assert_eq!(ROTATE_180.transform_offset(IVec2::new(0, 1)), IVec2::new(0, -1));
        assert_eq!(ROTATE_270.transform_offset(IVec2::new(0, 1)), IVec2::new(-1, 0));
    }

    #[test]
    fn rotation_agrees_with_direction_table() {
        // Rotating an offset by phase p matches rotating the direction by 2p eighth-turns.
        for (phase, rotation) in QUARTER_TURNS.iter().enumerate() {
            for dir in Direction::ALL {
                assert_eq!(
                    rotation.transform_offset(dir.offset()),
                    dir.rotated(phase * 2).offset(),
                    "phase {} dir {:?}",
                    phase,
                    dir
                );
            }
        }
    }

    #[test]
    fn point_transform_is_exact() {
        let p = Vec2::new(-10.0, 7.3);
        assert_eq!(ROTATE_90.transform_point(p), Vec2::new(7.3, 10.0));
        assert_eq!(ROTATE_180.transform_point(ROTATE_180.transform_point(p)), p);
    }

    #[test]
    fn signed_zero_shares_a_key() {
        assert_eq!(position_key(Vec2::new(0.0, 5.0)), position_key(Vec2::new(-0.0, 5.0)));
        assert_ne!(position_key(Vec2::new(1.0, 5.0)), position_key(Vec2::new(5.0, 1.0)));
    }

    #[test]
    fn tile_centres_and_lookup() {
        assert_eq!(tile_center(0, 0), Vec2::new(10.0, 10.0));
        assert_eq!(tile_center(2, 1), Vec2::new(50.0, 30.0));
        assert_eq!(tile_containing(Vec2::new(50.0, 30.0)), IVec2::new(2, 1));
        assert_eq!(tile_containing(Vec2::new(-0.5, 39.9)), IVec2::new(-1, 1));
    }
}
