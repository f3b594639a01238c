// src/mapping_lib/mod.rs

pub mod edge_detection;
pub mod graph;
pub mod mapper;

pub use edge_detection::{EdgeDetection, LeakGuard};
pub use graph::{Edge, GraphBuilder, SilhouetteGraph};
pub use mapper::{MappingPhase, SilhouetteMapper, DEFAULT_STEP_BUDGET};
