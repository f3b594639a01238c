// src/lib.rs

pub mod config;
pub mod demo_room;
pub mod generator;
pub mod geometry;
pub mod mapping_lib;
pub mod occlusion_lib;
pub mod tiles;
pub mod vertex;

pub use config::{ConfigError, OcclusionConfig, RenderMode};
pub use mapping_lib::{SilhouetteGraph, SilhouetteMapper};
pub use occlusion_lib::{OcclusionController, ShadowMesh, ShadowMeshBuilder, ViewerOcclusionState};
pub use tiles::{TileGrid, TileSource};
