// src/vertex.rs

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// GPU-facing vertex of the occlusion mesh. Positions are in world units.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable, PartialEq)]
pub struct ShadowVertex {
    pub position: [f32; 2],
}

impl ShadowVertex {
    pub fn new(position: [f32; 2]) -> Self {
        Self { position }
    }

    pub const STRIDE: usize = std::mem::size_of::<ShadowVertex>();
}

impl From<Vec2> for ShadowVertex {
    fn from(v: Vec2) -> Self {
        Self::new(v.to_array())
    }
}
