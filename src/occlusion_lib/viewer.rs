// src/occlusion_lib/viewer.rs

use glam::{IVec2, Vec2};
use log::trace;

use crate::geometry::{CLASSIC_HALF_SIZE, TILE_PIXELS};
use crate::tiles::TileSource;

/// Screen-block alpha change per tick while fading.
pub const SCREEN_BLOCK_STEP: f32 = 0.1;
/// Faster fade-out while travelling through a shortcut into open space.
pub const TRANSIT_FADE_STEP: f32 = 0.2;
/// Shortcut vessels advance one tile every this many ticks.
pub const SHORTCUT_TICKS_PER_TILE: f32 = 3.0;

/// A creature being carried through a shortcut between two tiles.
#[derive(Clone, Copy)]
pub struct TransitVessel<'a> {
    pub origin_tile: IVec2,
    pub destination_tile: IVec2,
    /// The shortcut system's own per-tick counter, `0..3` within one tile hop.
    pub progress_counter: u32,
    /// The vessel has just entered the shortcut and is not out of the entrance yet.
    pub entering_shortcut: bool,
    /// The vessel's room is the one this state tracks.
    pub bound_for_this_room: bool,
    /// Tiles of the room the vessel travels through, once that room is loaded.
    pub destination_room: Option<&'a dyn TileSource>,
}

impl<'a> TransitVessel<'a> {
    /// Eye position between the two tiles, in world units.
    pub fn interpolated_eye(&self) -> Vec2 {
        let t = (self.progress_counter as f32 + 1.0) / SHORTCUT_TICKS_PER_TILE;
        self.origin_tile.as_vec2().lerp(self.destination_tile.as_vec2(), t) * TILE_PIXELS
            + Vec2::splat(CLASSIC_HALF_SIZE)
    }
}

/// Host-side view of one viewer, queried once per tick.
pub trait Viewer {
    fn is_physically_present(&self) -> bool;
    fn body_position(&self) -> Option<Vec2>;
    fn active_transit_vessel(&self) -> Option<TransitVessel<'_>>;
}

/// Current and previous tick value of the eye.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyeSample {
    pub current: Vec2,
    pub previous: Vec2,
}

impl EyeSample {
    pub fn at(&self, t: f32) -> Vec2 {
        self.previous.lerp(self.current, t)
    }
}

/// Full-screen darken factor in `[0, 1]`, with its previous tick value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenBlockAlpha {
    pub current: f32,
    pub previous: f32,
}

impl Default for ScreenBlockAlpha {
    fn default() -> Self {
        Self { current: 1.0, previous: 1.0 }
    }
}

impl ScreenBlockAlpha {
    pub fn at(&self, t: f32) -> f32 {
        self.previous + (self.current - self.previous) * t
    }

    fn step(&mut self, delta: f32) {
        self.current = (self.current + delta).clamp(0.0, 1.0);
    }

    fn snap_opaque(&mut self) {
        self.current = 1.0;
        self.previous = 1.0;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerPresence {
    Tracking,
    Cleared,
}

/// What the presenter needs from one viewer for one displayed frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewerSample {
    pub eye: Vec2,
    pub screen_block_alpha: f32,
}

#[derive(Clone, Debug, Default)]
pub struct ViewerOcclusionState {
    eye: Option<EyeSample>,
    alpha: ScreenBlockAlpha,
}

impl ViewerOcclusionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eye(&self) -> Option<EyeSample> {
        self.eye
    }

    pub fn alpha(&self) -> ScreenBlockAlpha {
        self.alpha
    }

    pub fn clear(&mut self) {
        self.eye = None;
        self.alpha = ScreenBlockAlpha::default();
    }

    /// One simulation tick.
    pub fn tick<V: Viewer + ?Sized>(&mut self, viewer: &V) -> ViewerPresence {
        let vessel = viewer.active_transit_vessel();
        let present = viewer.is_physically_present();
        let in_vessel_here = vessel.as_ref().map_or(false, |v| v.bound_for_this_room);
        if !present && !in_vessel_here {
            self.clear();
            return ViewerPresence::Cleared;
        }

        let previous_eye = self.eye.map(|e| e.current);
        self.alpha.previous = self.alpha.current;

        let mut eye = viewer.body_position().or(previous_eye);

        let entering = vessel.as_ref().map_or(false, |v| v.entering_shortcut);
        if !present || entering {
            self.alpha.step(SCREEN_BLOCK_STEP);
        } else {
            self.alpha.step(-SCREEN_BLOCK_STEP);
        }

        if let Some(vessel) = vessel {
            let transit_eye = vessel.interpolated_eye();
            eye = Some(transit_eye);
            if let Some(room) = vessel.destination_room {
                if room.terrain_at_position(transit_eye).is_solid() {
                    self.alpha.current = 1.0;
                } else {
                    self.alpha.current = (self.alpha.previous - TRANSIT_FADE_STEP).clamp(0.0, 1.0);
                }
            }
            trace!("transit eye {:?} alpha {}", transit_eye, self.alpha.current);
        }

        self.eye = eye.map(|current| EyeSample {
            current,
            previous: previous_eye.unwrap_or(current),
        });
        ViewerPresence::Tracking
    }

    /// Interpolated state for a displayed frame at fraction `t` of the current tick.
    ///
    /// An eye inside a solid tile of `room` blacks the screen out at once, with no fade.
    pub fn sample<T: TileSource + ?Sized>(&mut self, room: &T, t: f32) -> Option<ViewerSample> {
        let t = t.clamp(0.0, 1.0);
        let eye = self.eye?.at(t);
        if room.terrain_at_position(eye).is_solid() {
            self.alpha.snap_opaque();
        }
        Some(ViewerSample { eye, screen_block_alpha: self.alpha.at(t) })
    }
}
