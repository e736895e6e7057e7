use tether::{CutterConfig, NoOpStepObserver, RopeBuilder, RopeConfig, RopeEvent, RopeWorld, Vec2, WinchConfig};

fn run_world() -> (Vec<RopeEvent>, Vec<Vec<Vec2<f32>>>) {
    let mut world = RopeWorld::new();
    let rope = RopeBuilder::new(RopeConfig::new())
        .build_rope(Vec2::new(0.0, 5.0), Vec2::new(6.0, 5.0), true, true)
        .unwrap();
    let h = world.spawn(rope);
    world.attach_cutter(h, CutterConfig::default()).unwrap();
    world.attach_winch(h, WinchConfig::default()).unwrap();
    world.start_retract(h).unwrap();

    let mut events = Vec::new();
    for tick in 0..180 {
        if world.contains(h) {
            let x = 6.0 + tick as f32 * 0.05;
            world.move_anchors(h, None, Some(Vec2::new(x, 5.0))).unwrap();
        }
        events.extend(world.tick_without_bodies(1.0 / 60.0, &mut NoOpStepObserver));
    }
    let positions = world.handles().map(|h| world.rope(h).unwrap().positions()).collect();
    (events, positions)
}

#[test]
fn world_run_is_deterministic() {
    let (first_events, first) = run_world();
    for _ in 0..3 {
        let (events, positions) = run_world();
        assert_eq!(events, first_events);
        assert_eq!(positions.len(), first.len());
        for (a, b) in first.iter().zip(positions.iter()) {
            for (p, q) in a.iter().zip(b.iter()) {
                assert_eq!(p.x, q.x);
                assert_eq!(p.y, q.y);
            }
        }
    }
}

#[test]
fn dragged_rope_eventually_snaps() {
    let (events, positions) = run_world();
    assert!(events.iter().any(|e| matches!(e, RopeEvent::Split { .. })));
    assert_eq!(positions.len(), 2);
}
