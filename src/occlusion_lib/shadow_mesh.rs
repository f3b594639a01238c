// src/occlusion_lib/shadow_mesh.rs

use glam::Vec2;

use crate::geometry::TILE_PIXELS;
use crate::mapping_lib::SilhouetteGraph;
use crate::tiles::TileSource;
use crate::vertex::ShadowVertex;

/// Projection distance guaranteed to push far vertices past every point of the room.
pub fn far_distance_for<T: TileSource + ?Sized>(tiles: &T) -> f32 {
    tiles.diagonal() + TILE_PIXELS
}

/// Occlusion fan for one eye position.
///
/// `vertices[..half]` are the silhouette corners, `vertices[half..]` their projections away
/// from the eye. Every edge contributes two triangles to `indices`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShadowMesh {
    pub vertices: Vec<Vec2>,
    pub indices: Vec<u32>,
    /// Eye the current vertices were projected from.
    pub eye: Option<Vec2>,
}

impl ShadowMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    pub fn to_vertices(&self) -> Vec<ShadowVertex> {
        self.vertices.iter().map(|v| ShadowVertex::from(*v)).collect()
    }

    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.to_vertices()).to_vec()
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Builds per-eye occlusion meshes over one finished silhouette.
pub struct ShadowMeshBuilder<'g> {
    graph: &'g SilhouetteGraph,
}

impl<'g> ShadowMeshBuilder<'g> {
    pub fn new(graph: &'g SilhouetteGraph) -> Self {
        Self { graph }
    }

    /// Index topology; fixed for the lifetime of the graph.
    pub fn indices(&self) -> Vec<u32> {
        let half = self.graph.half() as u32;
        let mut indices = Vec::with_capacity(self.graph.edges().len() * 6);
        for edge in self.graph.edges() {
            let (a, b) = (edge.a as u32, edge.b as u32);
            indices.extend_from_slice(&[a, b, a + half]);
            indices.extend_from_slice(&[b, b + half, a + half]);
        }
        indices
    }

    /// Mesh with topology in place and every far vertex still sitting on its corner.
    pub fn empty_mesh(&self) -> ShadowMesh {
        ShadowMesh {
            vertices: self.graph.corners().to_vec(),
            indices: self.indices(),
            eye: None,
        }
    }

    pub fn project(&self, eye: Vec2, far_distance: f32) -> ShadowMesh {
        let mut mesh = self.empty_mesh();
        self.project_into(eye, far_distance, &mut mesh);
        mesh
    }

    /// Rewrites `mesh` for `eye`, reusing its buffers.
    ///
    /// A corner that coincides with the eye has no direction; it keeps the direction it had
    /// in the mesh's previous projection, or collapses onto itself if there is none.
    pub fn project_into(&self, eye: Vec2, far_distance: f32, mesh: &mut ShadowMesh) {
        let half = self.graph.half();
        if mesh.vertices.len() != half * 2 || mesh.indices.len() != self.graph.edges().len() * 6 {
            *mesh = self.empty_mesh();
        }

        let corners = self.graph.corners();
        for i in 0..half {
            let corner = corners[i];
            let direction = (corner - eye).try_normalize().unwrap_or_else(|| {
                mesh.eye
                    .and_then(|previous_eye| (mesh.vertices[i + half] - previous_eye).try_normalize())
                    .unwrap_or(Vec2::ZERO)
            });
            mesh.vertices[i] = corner;
            mesh.vertices[i + half] = eye + direction * far_distance;
        }
        mesh.eye = Some(eye);
    }
}
