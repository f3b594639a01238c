// src/occlusion_lib/controller.rs

use std::sync::Arc;
use log::{debug, info};

use crate::config::OcclusionConfig;
use crate::mapping_lib::{SilhouetteGraph, SilhouetteMapper};
use crate::occlusion_lib::shadow_mesh::{far_distance_for, ShadowMesh, ShadowMeshBuilder};
use crate::occlusion_lib::viewer::{Viewer, ViewerOcclusionState, ViewerPresence};
use crate::tiles::TileSource;

/// Per-tick facts about the surrounding game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionState {
    /// Shortcut and creature data of the room can be queried.
    pub room_ready: bool,
    pub arena: bool,
    pub players_spawned: bool,
    pub player_count: usize,
}

impl Default for SessionState {
    fn default() -> Self {
        Self { room_ready: true, arena: false, players_spawned: true, player_count: 1 }
    }
}

impl SessionState {
    /// Occlusion is suppressed before an arena round starts and in multiplayer arenas.
    pub fn hides_occlusion(&self) -> bool {
        self.arena && (!self.players_spawned || self.player_count > 1)
    }
}

/// Everything the presenter needs for one viewer in one displayed frame.
#[derive(Clone, Debug)]
pub struct ViewerFrame<'a> {
    pub eye: glam::Vec2,
    pub screen_block_alpha: f32,
    pub mesh: &'a ShadowMesh,
}

#[derive(Clone, Debug)]
pub struct FrameOcclusion<'a> {
    pub hide_all: bool,
    /// One slot per viewer; `None` for viewers with no eye in this room.
    pub viewers: Vec<Option<ViewerFrame<'a>>>,
}

/// Owns the occlusion state of one room: its silhouette mapping and every viewer's state.
pub struct OcclusionController<R: TileSource> {
    room: R,
    config: OcclusionConfig,
    mapper: SilhouetteMapper,
    viewers: Vec<ViewerOcclusionState>,
    meshes: Vec<ShadowMesh>,
    hide_all: bool,
}

impl<R: TileSource> OcclusionController<R> {
    pub fn new(room: R, viewer_count: usize, config: OcclusionConfig) -> Self {
        let mapper = SilhouetteMapper::new(config.tile_size, config.leak_guard);
        debug!(
            "occlusion controller for {}x{} room, {} viewers",
            room.width(),
            room.height(),
            viewer_count
        );
        Self {
            room,
            config,
            mapper,
            viewers: vec![ViewerOcclusionState::new(); viewer_count],
            meshes: vec![ShadowMesh::default(); viewer_count],
            hide_all: false,
        }
    }

    pub fn room(&self) -> &R {
        &self.room
    }

    pub fn config(&self) -> &OcclusionConfig {
        &self.config
    }

    pub fn mapper(&self) -> &SilhouetteMapper {
        &self.mapper
    }

    pub fn viewer(&self, index: usize) -> Option<&ViewerOcclusionState> {
        self.viewers.get(index)
    }

    pub fn hide_all(&self) -> bool {
        self.hide_all
    }

    /// Finishes mapping synchronously. Must run before the first frame is drawn.
    pub fn prepare(&mut self) -> Arc<SilhouetteGraph> {
        if !self.mapper.is_done() {
            info!("finishing silhouette mapping synchronously");
        }
        self.mapper.advance_to_completion(&self.room)
    }

    /// Once-per-tick update. `viewers[i]` feeds viewer slot `i`; extra entries are ignored.
    pub fn late_update(&mut self, session: &SessionState, viewers: &[&dyn Viewer]) {
        self.hide_all = session.hides_occlusion();
        if !session.room_ready {
            return;
        }

        if !self.mapper.is_done() {
            self.mapper.advance(&self.room, self.config.mapper_budget);
        }

        for (index, (state, viewer)) in self.viewers.iter_mut().zip(viewers.iter()).enumerate() {
            if state.tick(*viewer) == ViewerPresence::Cleared {
                debug!("viewer {} left the room", index);
            }
        }
    }

    /// Builds the occlusion output for a displayed frame at fraction `t` of the current tick.
    pub fn draw_frame(&mut self, t: f32) -> FrameOcclusion<'_> {
        let graph = self.prepare();
        let builder = ShadowMeshBuilder::new(&graph);
        let far_distance = far_distance_for(&self.room);

        let mut samples = Vec::with_capacity(self.viewers.len());
        for (state, mesh) in self.viewers.iter_mut().zip(self.meshes.iter_mut()) {
            let sample = state.sample(&self.room, t);
            if let Some(sample) = sample {
                builder.project_into(sample.eye, far_distance, mesh);
            }
            samples.push(sample);
        }

        let viewers = samples
            .into_iter()
            .zip(self.meshes.iter())
            .map(|(sample, mesh)| {
                sample.map(|s| ViewerFrame { eye: s.eye, screen_block_alpha: s.screen_block_alpha, mesh })
            })
            .collect();

        FrameOcclusion { hide_all: self.hide_all, viewers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::TileGrid;
    use glam::Vec2;

    struct Standing(Vec2);

    impl Viewer for Standing {
        fn is_physically_present(&self) -> bool {
            true
        }
        fn body_position(&self) -> Option<Vec2> {
            Some(self.0)
        }
        fn active_transit_vessel(&self) -> Option<crate::occlusion_lib::viewer::TransitVessel<'_>> {
            None
        }
    }

    fn room() -> TileGrid {
        TileGrid::from_ascii("#####\n#...#\n#.#.#\n#...#\n#####").unwrap()
    }

    #[test]
    fn arena_rules_hide_everything() {
        let lobby = SessionState { arena: true, players_spawned: false, ..Default::default() };
        let crowd = SessionState { arena: true, player_count: 2, ..Default::default() };
        let story = SessionState { player_count: 4, ..Default::default() };
        assert!(lobby.hides_occlusion());
        assert!(crowd.hides_occlusion());
        assert!(!story.hides_occlusion());
    }

    #[test]
    fn room_not_ready_skips_mapping() {
        let mut controller = OcclusionController::new(room(), 1, OcclusionConfig::default());
        let viewer = Standing(Vec2::new(30.0, 30.0));
        let session = SessionState { room_ready: false, ..Default::default() };
        controller.late_update(&session, &[&viewer]);
        assert!(controller.viewer(0).unwrap().eye().is_none());
        assert!(!controller.mapper().is_done());
    }

    #[test]
    fn draw_frame_forces_mapping_and_projects_each_viewer() {
        let mut controller = OcclusionController::new(room(), 2, OcclusionConfig::default());
        let viewer = Standing(Vec2::new(30.0, 30.0));
        controller.late_update(&SessionState::default(), &[&viewer]);

        let frame = controller.draw_frame(1.0);
        assert!(!frame.hide_all);
        assert_eq!(frame.viewers.len(), 2);
        let first = frame.viewers[0].as_ref().unwrap();
        assert_eq!(first.eye, Vec2::new(30.0, 30.0));
        assert!(first.mesh.triangle_count() > 0);
        assert!(frame.viewers[1].is_none());
    }
}
