// src/mapping_lib/mapper.rs

use std::sync::Arc;
use log::{debug, info, warn};

use crate::geometry::CLASSIC_HALF_SIZE;
use crate::mapping_lib::edge_detection::{add_slope_edge, EdgeDetection, LeakGuard};
use crate::mapping_lib::graph::{GraphBuilder, SilhouetteGraph};
use crate::tiles::{TerrainKind, TileSource};

/// Steps per tick that keep mapping cost flat on large rooms.
pub const DEFAULT_STEP_BUDGET: usize = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MappingPhase {
    FindingEdges,
    DuplicatingPoints,
    Done,
}

#[derive(Clone, Debug, Default)]
struct MapperCursor {
    x: i32,
    y: i32,
    // Near-half size, fixed when the tile scan ends.
    half: usize,
    builder: GraphBuilder,
}

/// Incrementally turns a tile grid into a `SilhouetteGraph`.
///
/// `advance` does a bounded amount of work and remembers where it stopped.
/// Every call must see the same `TileSource`; the mapper does not hold on to it.
#[derive(Clone, Debug)]
pub struct SilhouetteMapper {
    detection: EdgeDetection,
    phase: MappingPhase,
    cursor: MapperCursor,
    graph: Option<Arc<SilhouetteGraph>>,
}

impl SilhouetteMapper {
    pub fn new(tile_size: f32, leak_guard: LeakGuard) -> Self {
        let clamped = tile_size.clamp(0.0, CLASSIC_HALF_SIZE);
        if clamped != tile_size {
            warn!("tile size {} outside [0, {}], using {}", tile_size, CLASSIC_HALF_SIZE, clamped);
        }
        Self::with_detection(EdgeDetection::for_tile_size(clamped, leak_guard))
    }

    pub fn with_detection(detection: EdgeDetection) -> Self {
        Self {
            detection,
            phase: MappingPhase::FindingEdges,
            cursor: MapperCursor::default(),
            graph: None,
        }
    }

    pub fn detection(&self) -> EdgeDetection {
        self.detection
    }

    pub fn phase(&self) -> MappingPhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == MappingPhase::Done
    }

    /// The finished graph. `None` until mapping reaches `Done`.
    pub fn graph(&self) -> Option<&Arc<SilhouetteGraph>> {
        self.graph.as_ref()
    }

    /// Performs up to `budget` elementary steps and returns how many were taken.
    pub fn advance<T: TileSource + ?Sized>(&mut self, tiles: &T, budget: usize) -> usize {
        let mut steps = 0;
        while steps < budget {
            match self.phase {
                MappingPhase::FindingEdges => self.find_edges_step(tiles),
                MappingPhase::DuplicatingPoints => self.duplicate_step(),
                MappingPhase::Done => break,
            }
            steps += 1;
        }
        steps
    }

    /// Maps whatever is left in one go and returns the graph.
    pub fn advance_to_completion<T: TileSource + ?Sized>(&mut self, tiles: &T) -> Arc<SilhouetteGraph> {
        self.advance(tiles, usize::MAX);
        match &self.graph {
            Some(graph) => graph.clone(),
            // advance only stops early on budget exhaustion, which usize::MAX never reaches
            None => Arc::new(SilhouetteGraph::empty()),
        }
    }

    fn find_edges_step<T: TileSource + ?Sized>(&mut self, tiles: &T) {
        let cursor = &mut self.cursor;
        let (x, y) = (cursor.x, cursor.y);
        let terrain = tiles.terrain(x, y);

        if terrain == TerrainKind::Slope {
            if let Some(slope) = tiles.slope(x, y) {
                add_slope_edge(&mut cursor.builder, tiles.tile_center(x, y), slope, self.detection.shrink());
            }
        }
        if terrain == TerrainKind::Solid {
            self.detection.add_solid_edges(tiles, x, y, &mut cursor.builder);
        }

        cursor.x += 1;
        if cursor.x >= tiles.width() {
            cursor.x = 0;
            cursor.y += 1;
            if cursor.y >= tiles.height() {
                cursor.half = cursor.builder.corner_count();
                debug!(
                    "edge scan of {}x{} finished: {} corners, {} edges",
                    tiles.width(),
                    tiles.height(),
                    cursor.half,
                    cursor.builder.edge_count()
                );
                if cursor.half == 0 {
                    self.finish();
                } else {
                    self.phase = MappingPhase::DuplicatingPoints;
                }
            }
        }
    }

    fn duplicate_step(&mut self) {
        let cursor = &mut self.cursor;
        cursor.builder.push_far_copy(cursor.x as usize);
        cursor.x += 1;
        if cursor.x as usize >= cursor.half {
            self.finish();
        }
    }

    fn finish(&mut self) {
        let cursor = std::mem::take(&mut self.cursor);
        let graph = cursor.builder.finish(cursor.half);
        info!(
            "silhouette ready: {} corners, {} edges ({:?})",
            graph.half(),
            graph.edges().len(),
            self.detection
        );
        self.graph = Some(Arc::new(graph));
        self.phase = MappingPhase::Done;
    }
}
