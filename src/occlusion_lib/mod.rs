// src/occlusion_lib/mod.rs

pub mod controller;
pub mod hide_registry;
pub mod shadow_mesh;
pub mod viewer;

pub use controller::{FrameOcclusion, OcclusionController, SessionState, ViewerFrame};
pub use hide_registry::{HidePass, HideRegistry, Hideable, RenderTag};
pub use shadow_mesh::{far_distance_for, ShadowMesh, ShadowMeshBuilder};
pub use viewer::{
    EyeSample, ScreenBlockAlpha, TransitVessel, Viewer, ViewerOcclusionState, ViewerPresence,
    ViewerSample,
};
// The presenter composes viewers with a stencil per pass:
// mesh sets bit 1, a full-screen quad sets bit 0 where bit 1 is clear, another quad clears bit 1;
// after all viewers, the out-of-view blocker draws where bit 0 is set.
