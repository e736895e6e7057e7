use tether::{NoOpStepObserver, Rope, RopeBuilder, RopeConfig, Vec2, Winch, WinchConfig, WinchState};

const DT: f32 = 1.0 / 60.0;

fn free_hanging() -> Rope<f32> {
    RopeBuilder::new(RopeConfig::new())
        .build_rope(Vec2::new(0.0, 0.0), Vec2::new(0.0, -4.0), true, false)
        .unwrap()
}

fn run(rope: &mut Rope<f32>, winch: &mut Winch<f32>, ticks: usize) {
    for _ in 0..ticks {
        rope.step(DT, &mut NoOpStepObserver).unwrap();
        winch.update(rope, DT);
    }
}

#[test]
fn retract_shortens_free_rope() {
    let mut rope = free_hanging();
    let mut winch = Winch::new(WinchConfig::default());
    let before = rope.current_length();

    winch.start_retract();
    run(&mut rope, &mut winch, 60);

    assert!(winch.is_retracting());
    assert!(rope.current_length() < before - 0.5, "length {} vs {}", rope.current_length(), before);
    assert!(rope.pinned_interior_count() > 0);
    assert!(winch.last_reeled_index(&rope).unwrap() > 0);
    assert!(rope.last().pos.y > -4.0);
}

#[test]
fn release_pays_rope_back_out() {
    let mut rope = free_hanging();
    let mut winch = Winch::new(WinchConfig::default());
    winch.start_retract();
    run(&mut rope, &mut winch, 30);
    let held = rope.pinned_interior_count();
    assert!(held > 0);

    winch.start_release();
    run(&mut rope, &mut winch, 240);

    assert_eq!(rope.pinned_interior_count(), 0);
    assert_eq!(winch.state(), WinchState::Idle);
}

#[test]
fn retract_without_room_goes_idle() {
    let mut rope = RopeBuilder::new(RopeConfig::<f32>::new())
        .with_node_count(2)
        .build_rope(Vec2::new(0.0, 0.0), Vec2::new(0.0, -1.0), true, false)
        .unwrap();
    let mut winch = Winch::default();
    winch.start_retract();
    winch.update(&mut rope, DT);
    assert_eq!(winch.state(), WinchState::Idle);
}

#[test]
fn stop_retract_is_idempotent() {
    let mut rope = free_hanging();
    let mut winch = Winch::default();
    winch.start_retract();
    run(&mut rope, &mut winch, 5);
    winch.stop_retract();
    winch.stop_retract();
    assert_eq!(winch.state(), WinchState::Idle);

    let snapshot = rope.pinned_interior_count();
    run(&mut rope, &mut winch, 5);
    assert_eq!(rope.pinned_interior_count(), snapshot);
}

#[test]
fn speed_multiplier_speeds_up_reeling() {
    let mut slow_rope = free_hanging();
    let mut fast_rope = free_hanging();
    let mut slow = Winch::default();
    let mut fast = Winch::default();
    fast.set_speed_multiplier(3.0);
    slow.start_retract();
    fast.start_retract();
    run(&mut slow_rope, &mut slow, 30);
    run(&mut fast_rope, &mut fast, 30);
    assert!(fast_rope.current_length() < slow_rope.current_length());
}

#[test]
fn reeled_nodes_follow_moving_anchor() {
    let mut rope = free_hanging();
    let mut winch = Winch::default();
    winch.start_retract();
    run(&mut rope, &mut winch, 30);
    winch.stop_retract();
    let reeled = winch.last_reeled_index(&rope).unwrap();
    assert!(reeled >= 1);

    rope.move_anchors(Some(Vec2::new(2.0, 1.0)), None);
    rope.step(DT, &mut NoOpStepObserver).unwrap();
    for i in 0..=reeled {
        let p = rope.node(i).pos;
        assert!((p.x - 2.0).abs() < 0.02 && (p.y - 1.0).abs() < 0.02, "node {} at {:?}", i, p);
    }
}

#[test]
fn partly_reeled_node_follows_anchor_after_stop() {
    let mut rope = free_hanging();
    let mut winch = Winch::default();
    winch.start_retract();
    run(&mut rope, &mut winch, 12);
    winch.stop_retract();

    let held = winch.last_reeled_index(&rope).unwrap() + 1;
    assert!(rope.node(held).pinned);
    let offset = rope.node(held).pos - rope.first().pos;
    let gap = rope.node(held).pos.distance(rope.node(held - 1).pos);
    let ideal = rope.ideal_length();

    rope.move_anchors(Some(Vec2::new(3.0, 2.0)), None);
    run(&mut rope, &mut winch, 120);

    let moved = rope.node(held).pos - rope.first().pos;
    assert!((moved.x - offset.x).abs() < 1e-4 && (moved.y - offset.y).abs() < 1e-4, "held node at {:?}", rope.node(held).pos);
    assert!((rope.node(held).pos.distance(rope.node(held - 1).pos) - gap).abs() < 1e-4);
    assert!((rope.ideal_length() - ideal).abs() < 1e-3);
}
