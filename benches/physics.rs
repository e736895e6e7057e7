//! Benchmarks for tether rope simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use tether::*;

fn bench_rope_step(c: &mut Criterion) {
    c.bench_function("rope_51_nodes_60_steps", |b| {
        b.iter(|| {
            let mut rope: Rope<f32> = RopeBuilder::new(RopeConfig::new())
                .with_node_count(51)
                .build_rope(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0), true, true)
                .unwrap();
            for _ in 0..60 {
                rope.step(1.0 / 60.0, &mut NoOpStepObserver).unwrap();
            }
            rope.positions()
        });
    });
}

fn bench_winch(c: &mut Criterion) {
    c.bench_function("winch_retract_120_steps", |b| {
        b.iter(|| {
            let mut rope: Rope<f32> = RopeBuilder::new(RopeConfig::new())
                .build_rope(Vec2::new(0.0, 0.0), Vec2::new(0.0, -6.0), true, false)
                .unwrap();
            let mut winch = Winch::default();
            winch.start_retract();
            for _ in 0..120 {
                rope.step(1.0 / 60.0, &mut NoOpStepObserver).unwrap();
                winch.update(&mut rope, 1.0 / 60.0);
            }
            rope.current_length()
        });
    });
}

fn bench_world(c: &mut Criterion) {
    c.bench_function("world_20_ropes_60_ticks", |b| {
        b.iter(|| {
            let mut world = RopeWorld::new();
            let mut bodies = vec![];
            for i in 0..20 {
                let x = i as f32;
                let rope = RopeBuilder::new(RopeConfig::new())
                    .build_rope(Vec2::new(x, 0.0), Vec2::new(x, -3.0), true, true)
                    .unwrap();
                let h = world.spawn(rope);
                world.attach_cutter(h, CutterConfig::default()).unwrap();
                world.attach_bridge(h, i, BridgeConfig::default()).unwrap();
                bodies.push(PointBody::new(Vec2::new(x, -3.5), 1.0).with_gravity(Vec2::new(0.0, -9.81)));
            }
            for _ in 0..60 {
                world.tick(1.0 / 60.0, &mut bodies, &mut NoOpStepObserver);
                for body in bodies.iter_mut() {
                    body.integrate(1.0 / 60.0);
                }
            }
            world.len()
        });
    });
}

criterion_group!(benches, bench_rope_step, bench_winch, bench_world);
criterion_main!(benches);
