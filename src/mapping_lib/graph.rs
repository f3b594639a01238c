// src/mapping_lib/graph.rs

use std::collections::HashMap;
use glam::Vec2;

use crate::geometry::position_key;

/// One silhouette segment, as indices into the near half of the corner list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }
}

/// Finished silhouette of a room: `corners[..half]` are wall-attached,
/// `corners[half..]` are the reserved far slots (initially copies of the near half).
#[derive(Clone, Debug, PartialEq)]
pub struct SilhouetteGraph {
    corners: Vec<Vec2>,
    edges: Vec<Edge>,
    half: usize,
}

impl SilhouetteGraph {
    pub(crate) fn from_parts(corners: Vec<Vec2>, edges: Vec<Edge>, half: usize) -> Self {
        debug_assert_eq!(corners.len(), half * 2);
        debug_assert!(edges.iter().all(|e| e.a < half && e.b < half));
        Self { corners, edges, half }
    }

    pub fn empty() -> Self {
        Self { corners: Vec::new(), edges: Vec::new(), half: 0 }
    }

    pub fn corners(&self) -> &[Vec2] {
        &self.corners
    }

    pub fn near_corners(&self) -> &[Vec2] {
        &self.corners[..self.half]
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn half(&self) -> usize {
        self.half
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edge_endpoints(&self, edge: Edge) -> (Vec2, Vec2) {
        (self.corners[edge.a], self.corners[edge.b])
    }
}

/// Accumulates corners (deduplicated by exact position) and edges while a room is scanned.
#[derive(Clone, Debug, Default)]
pub struct GraphBuilder {
    corners: Vec<Vec2>,
    lookup: HashMap<(u32, u32), usize>,
    edges: Vec<Edge>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of `pos`, registering it if no corner sits exactly there yet.
    pub fn add_corner(&mut self, pos: Vec2) -> usize {
        let next = self.corners.len();
        let index = *self.lookup.entry(position_key(pos)).or_insert(next);
        if index == next {
            self.corners.push(pos);
        }
        index
    }

    pub fn push_edge(&mut self, a: usize, b: usize) {
        self.edges.push(Edge::new(a, b));
    }

    pub fn add_segment(&mut self, from: Vec2, to: Vec2) {
        let a = self.add_corner(from);
        let b = self.add_corner(to);
        self.push_edge(a, b);
    }

    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn corner(&self, index: usize) -> Vec2 {
        self.corners[index]
    }

    /// Appends a raw copy of corner `index` without touching the lookup.
    /// Used only for the far half, which must not take part in deduplication.
    pub(crate) fn push_far_copy(&mut self, index: usize) {
        let pos = self.corners[index];
        self.corners.push(pos);
    }

    pub(crate) fn finish(self, half: usize) -> SilhouetteGraph {
        SilhouetteGraph::from_parts(self.corners, self.edges, half)
    }
}
