use tether::{CutterConfig, NoOpStepObserver, Rope, RopeBuilder, RopeConfig, RopeCutter, RopeError, Vec2};

fn taut_rope() -> Rope<f32> {
    RopeBuilder::new(RopeConfig::new())
        .build_rope(Vec2::new(0.0, 0.0), Vec2::new(0.0, -4.0), true, true)
        .unwrap()
}

#[test]
fn split_shares_boundary_position() {
    let rope = taut_rope();
    let cutter = RopeCutter::new(CutterConfig::default());
    let (left, right) = cutter.cut_at(&rope, 10).unwrap();

    assert_eq!(left.len(), 11);
    assert_eq!(right.len(), 11);
    assert_eq!(left.last().pos, right.first().pos);
    assert_eq!(left.last().pos, rope.node(10).pos);
    assert!(!left.last().pinned && !right.first().pinned);
}

#[test]
fn children_keep_their_outer_anchor() {
    let rope = taut_rope();
    let cutter = RopeCutter::new(CutterConfig::default());
    let (left, right) = cutter.cut_at(&rope, 10).unwrap();

    assert_eq!(left.start_anchor(), rope.start_anchor());
    assert!(left.end_anchor().detached);
    assert!(right.start_anchor().detached);
    assert_eq!(right.end_anchor(), rope.end_anchor());
    assert!(!RopeCutter::can_be_cut(&left));
    assert!(!RopeCutter::can_be_cut(&right));
}

#[test]
fn fragments_separate_after_cut() {
    let rope = taut_rope();
    let cutter = RopeCutter::new(CutterConfig::default());
    let (mut left, mut right) = cutter.cut_at(&rope, 10).unwrap();
    left.step(1.0 / 60.0, &mut NoOpStepObserver).unwrap();
    right.step(1.0 / 60.0, &mut NoOpStepObserver).unwrap();
    assert!(left.last().pos.y > right.first().pos.y);
}

#[test]
fn auto_cut_fires_once_when_overstretched() {
    let mut rope = taut_rope();
    let mut cutter = RopeCutter::new(CutterConfig::default());
    assert_eq!(cutter.try_auto_cut(&rope), None);

    rope.move_anchors(None, Some(Vec2::new(0.0, -10.0)));
    rope.step(1.0 / 60.0, &mut NoOpStepObserver).unwrap();
    assert_eq!(cutter.try_auto_cut(&rope), Some(10));
    assert!(cutter.has_cut());
    assert_eq!(cutter.try_auto_cut(&rope), None);
}

#[test]
fn manual_cut_respects_latch() {
    let rope = taut_rope();
    let mut cutter = RopeCutter::new(CutterConfig::default());
    assert!(cutter.cut_manually(&rope, 5).is_ok());
    assert_eq!(cutter.cut_manually(&rope, 5).unwrap_err(), RopeError::NotCuttable);
}

#[test]
fn loose_end_is_not_cuttable() {
    let rope = RopeBuilder::new(RopeConfig::<f32>::new())
        .build_rope(Vec2::new(0.0, 0.0), Vec2::new(0.0, -4.0), true, false)
        .unwrap();
    let mut cutter = RopeCutter::new(CutterConfig::default());
    assert!(!RopeCutter::can_be_cut(&rope));
    assert_eq!(cutter.cut_manually(&rope, 5).unwrap_err(), RopeError::NotCuttable);
    assert!(!cutter.has_cut());
}

#[test]
fn two_node_rope_cannot_be_cut() {
    let rope = RopeBuilder::new(RopeConfig::<f32>::new())
        .with_node_count(2)
        .build_rope(Vec2::new(0.0, 0.0), Vec2::new(0.0, -4.0), true, true)
        .unwrap();
    let mut cutter = RopeCutter::new(CutterConfig::default());
    assert!(!RopeCutter::can_be_cut(&rope));
    assert_eq!(cutter.recommended_cut_index(&rope), None);
    assert!(cutter.cut_manually(&rope, 1).is_err());
}
