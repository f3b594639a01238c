// src/main.rs

use std::error::Error;
use glam::{IVec2, Vec2};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use los_occlusion::demo_room::{create_demo_room, demo_patrol};
use los_occlusion::generator::RoomGenerator;
use los_occlusion::occlusion_lib::{SessionState, TransitVessel, Viewer};
use los_occlusion::{OcclusionConfig, OcclusionController, TileGrid, TileSource};

const DEMO_TICKS: usize = 120;
const FRAMES_PER_TICK: usize = 2;
const WALK_SPEED: f32 = 4.0;

/// Walks back and forth along a list of waypoints.
struct Patroller {
    waypoints: Vec<Vec2>,
    target: usize,
    position: Vec2,
}

impl Patroller {
    fn new(waypoints: Vec<Vec2>) -> Self {
        let position = waypoints.first().copied().unwrap_or(Vec2::ZERO);
        Self { waypoints, target: 1, position }
    }

    fn step(&mut self) {
        let Some(&goal) = self.waypoints.get(self.target) else {
            return;
        };
        let to_goal = goal - self.position;
        if to_goal.length() <= WALK_SPEED {
            self.position = goal;
            self.target = (self.target + 1) % self.waypoints.len();
        } else {
            self.position += to_goal.normalize_or_zero() * WALK_SPEED;
        }
    }
}

impl Viewer for Patroller {
    fn is_physically_present(&self) -> bool {
        true
    }

    fn body_position(&self) -> Option<Vec2> {
        Some(self.position)
    }

    fn active_transit_vessel(&self) -> Option<TransitVessel<'_>> {
        None
    }
}

/// Crawls through a shortcut along a row of tiles, one tile every three ticks.
struct ShortcutTraveller<'r> {
    room: &'r TileGrid,
    row: i32,
    ticks: u32,
}

impl Viewer for ShortcutTraveller<'_> {
    fn is_physically_present(&self) -> bool {
        false
    }

    fn body_position(&self) -> Option<Vec2> {
        None
    }

    fn active_transit_vessel(&self) -> Option<TransitVessel<'_>> {
        let hop = (self.ticks / 3) as i32 % self.room.width().max(1);
        Some(TransitVessel {
            origin_tile: IVec2::new(hop, self.row),
            destination_tile: IVec2::new(hop + 1, self.row),
            progress_counter: self.ticks % 3,
            entering_shortcut: self.ticks < 3,
            bound_for_this_room: true,
            destination_room: Some(self.room as &dyn TileSource),
        })
    }
}

fn load_config() -> Result<OcclusionConfig, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            info!("loading occlusion config from {}", path);
            Ok(OcclusionConfig::load_from_path(path)?)
        }
        None => Ok(OcclusionConfig::default()),
    }
}

fn load_room() -> Result<TileGrid, Box<dyn Error>> {
    match std::env::var("LOS_CAVE_SEED").ok().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => {
            info!("generating cave room from seed {}", seed);
            let mut rng = StdRng::seed_from_u64(seed);
            let mut room = RoomGenerator::generate_cave(&mut rng, 60, 40, 0.45, 4);
            RoomGenerator::add_slopes(&mut rng, &mut room, 0.5);
            Ok(room)
        }
        Some(Err(e)) => {
            warn!("ignoring LOS_CAVE_SEED: {}", e);
            Ok(create_demo_room()?)
        }
        None => Ok(create_demo_room()?),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = load_config()?;
    let room = load_room()?;
    let transit_room = room.clone();
    info!(
        "room {}x{} tiles, mode {:?}, tile size {}",
        room.width(),
        room.height(),
        config.render_mode,
        config.tile_size
    );

    let mut patroller = Patroller::new(demo_patrol());
    let mut traveller = ShortcutTraveller { room: &transit_room, row: 2, ticks: 0 };
    let mut controller = OcclusionController::new(room, 2, config);
    let session = SessionState::default();

    for tick in 0..DEMO_TICKS {
        patroller.step();
        traveller.ticks += 1;
        let viewers: [&dyn Viewer; 2] = [&patroller, &traveller];
        controller.late_update(&session, &viewers);

        if tick % 20 != 0 {
            continue;
        }
        for frame in 0..FRAMES_PER_TICK {
            let t = (frame + 1) as f32 / FRAMES_PER_TICK as f32;
            let occlusion = controller.draw_frame(t);
            for (index, viewer) in occlusion.viewers.iter().enumerate() {
                if let Some(v) = viewer {
                    info!(
                        "tick {} t {:.2} viewer {}: eye ({:.1}, {:.1}) alpha {:.2}, {} shadow triangles",
                        tick,
                        t,
                        index,
                        v.eye.x,
                        v.eye.y,
                        v.screen_block_alpha,
                        v.mesh.triangle_count()
                    );
                }
            }
        }
    }

    let tint = controller.config().blocker_tint([0.05, 0.05, 0.08, 1.0]);
    info!("blocker tint {:?}", tint);
    Ok(())
}
