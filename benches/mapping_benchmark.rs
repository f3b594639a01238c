// benches/mapping_benchmark.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use los_occlusion::generator::RoomGenerator;
use los_occlusion::mapping_lib::{LeakGuard, DEFAULT_STEP_BUDGET, SilhouetteMapper};
use los_occlusion::occlusion_lib::{far_distance_for, ShadowMeshBuilder};
use los_occlusion::tiles::TileGrid;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn create_cave(rng: &mut impl Rng) -> TileGrid {
    let mut room = RoomGenerator::generate_cave(rng, 120, 80, 0.45, 4);
    RoomGenerator::add_slopes(rng, &mut room, 0.5);
    room
}

fn mapping_benchmark_fn(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let room = create_cave(&mut rng);

    let mut group = c.benchmark_group("SilhouetteMapping");

    group.bench_function("legacy_full_room", |b| {
        b.iter(|| {
            let mut mapper = SilhouetteMapper::new(10.0, LeakGuard::LeftOnly);
            mapper.advance_to_completion(black_box(&room))
        })
    });

    group.bench_function("sub_tile_full_room", |b| {
        b.iter(|| {
            let mut mapper = SilhouetteMapper::new(6.0, LeakGuard::LeftOnly);
            mapper.advance_to_completion(black_box(&room))
        })
    });

    group.bench_function("sub_tile_one_tick_budget", |b| {
        let mut mapper = SilhouetteMapper::new(6.0, LeakGuard::LeftOnly);
        b.iter(|| {
            if mapper.is_done() {
                mapper = SilhouetteMapper::new(6.0, LeakGuard::LeftOnly);
            }
            mapper.advance(black_box(&room), DEFAULT_STEP_BUDGET)
        })
    });
    group.finish();
}

fn projection_benchmark_fn(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let room = create_cave(&mut rng);
    let graph = SilhouetteMapper::new(6.0, LeakGuard::LeftOnly).advance_to_completion(&room);
    let builder = ShadowMeshBuilder::new(&graph);
    let far = far_distance_for(&room);

    const NUM_EYES: usize = 100;
    let eyes: Vec<Vec2> = (0..NUM_EYES)
        .map(|_| Vec2::new(rng.gen_range(0.0..2400.0), rng.gen_range(0.0..1600.0)))
        .collect();

    let mut group = c.benchmark_group("ShadowProjection");
    group.bench_function("project_into_100_eyes_reused_mesh", |b| {
        let mut mesh = builder.empty_mesh();
        let mut eye_iter = eyes.iter().cycle();

        b.iter(|| {
            let eye = eye_iter.next().copied().unwrap_or(Vec2::ZERO);
            builder.project_into(black_box(eye), far, black_box(&mut mesh));
        })
    });
    group.finish();
}

criterion_group!(benches, mapping_benchmark_fn, projection_benchmark_fn);
criterion_main!(benches);
