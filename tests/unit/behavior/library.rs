use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Rect, Vec2};

use super::*;
use crate::{
    behavior::core::Behavior,
    capability::audio::{AudioBearing, SoundHandle},
    capability::transform::Transform,
    stage::node::Node,
};

fn stage_with_target() -> (Stage, NodeId, BehaviorCtx) {
    let mut stage = Stage::new();
    let target = stage.insert(Node::unbounded().with_transform(Transform::default()));
    let node = stage.attach(target, Node::unbounded()).unwrap();
    let ctx = BehaviorCtx {
        node,
        target,
        progress: 0.0,
    };
    (stage, target, ctx)
}

fn at_progress(ctx: &BehaviorCtx, progress: f64) -> BehaviorCtx {
    BehaviorCtx { progress, ..*ctx }
}

fn position(stage: &Stage, id: NodeId) -> Vec2 {
    stage
        .get(id)
        .and_then(|n| n.transform.as_ref())
        .map(|t| t.position)
        .unwrap_or(Vec2::ZERO)
}

struct CountingSound {
    plays: Rc<RefCell<u32>>,
}

impl SoundHandle for CountingSound {
    fn play(&mut self) {
        *self.plays.borrow_mut() += 1;
    }
    fn stop(&mut self) {}
    fn pause(&mut self) {}
    fn resume(&mut self) {}
    fn set_volume(&mut self, _volume: f64) {}
}

#[test]
fn fade_in_out_tracks_the_envelope() {
    let (mut stage, target, ctx) = stage_with_target();
    let mut fade = FadeInOut::new(0.25);

    fade.update(&mut stage, &at_progress(&ctx, 0.1), 16.0);
    let opacity = stage
        .get(target)
        .and_then(|n| n.transform.as_ref())
        .map(|t| t.opacity)
        .unwrap();
    assert!((opacity - 0.4).abs() < 1e-12);

    fade.update(&mut stage, &at_progress(&ctx, 0.5), 16.0);
    assert_eq!(
        stage.get(target).and_then(|n| n.transform.as_ref()).map(|t| t.opacity),
        Some(1.0)
    );
}

#[test]
fn fade_without_transform_idles_instead_of_panicking() {
    let mut stage = Stage::new();
    let target = stage.insert(Node::unbounded()); // no Transform anywhere
    let node = stage.attach(target, Node::unbounded()).unwrap();
    let ctx = BehaviorCtx {
        node,
        target,
        progress: 0.5,
    };
    let mut fade = FadeInOut::new(0.25);
    assert_eq!(fade.update(&mut stage, &ctx, 16.0), Tick::Continue);
    assert_eq!(fade.update(&mut stage, &ctx, 16.0), Tick::Continue);
}

#[test]
fn slide_in_out_returns_to_base_through_the_middle() {
    let (mut stage, target, ctx) = stage_with_target();
    if let Some(t) = stage.get_mut(target).and_then(|n| n.transform.as_mut()) {
        t.position = Vec2::new(100.0, 50.0);
    }
    let mut slide = SlideInOut::new(Vec2::new(0.0, 200.0), 0.25);
    slide.on_play(&mut stage, &ctx);

    slide.update(&mut stage, &at_progress(&ctx, 0.0), 16.0);
    assert_eq!(position(&stage, target), Vec2::new(100.0, 250.0));

    slide.update(&mut stage, &at_progress(&ctx, 0.5), 16.0);
    assert_eq!(position(&stage, target), Vec2::new(100.0, 50.0));
}

#[test]
fn slide_to_interpolates_from_captured_start() {
    let (mut stage, target, ctx) = stage_with_target();
    if let Some(t) = stage.get_mut(target).and_then(|n| n.transform.as_mut()) {
        t.position = Vec2::new(0.0, 0.0);
    }
    let mut slide = SlideTo::new(Vec2::new(100.0, 0.0), Ease::Linear);
    slide.on_play(&mut stage, &ctx);

    slide.update(&mut stage, &at_progress(&ctx, 0.5), 16.0);
    assert_eq!(position(&stage, target), Vec2::new(50.0, 0.0));

    slide.update(&mut stage, &at_progress(&ctx, 1.0), 16.0);
    assert_eq!(position(&stage, target), Vec2::new(100.0, 0.0));
}

#[test]
fn ballistic_accelerates_downward() {
    let (mut stage, target, ctx) = stage_with_target();
    let mut ballistic = Ballistic::new(Vec2::new(10.0, 0.0), 100.0, 0.0);

    ballistic.update(&mut stage, &ctx, 1000.0);
    let after_one = position(&stage, target);
    ballistic.update(&mut stage, &ctx, 1000.0);
    let after_two = position(&stage, target);

    assert!(after_one.y > 0.0);
    // Second second falls further than the first.
    assert!(after_two.y - after_one.y > after_one.y);
    assert!((after_two.x - 20.0).abs() < 1e-9);
}

#[test]
fn drag_bleeds_off_velocity() {
    let (mut stage, target, ctx) = stage_with_target();
    let mut ballistic = Ballistic::new(Vec2::new(100.0, 0.0), 0.0, 0.5);

    ballistic.update(&mut stage, &ctx, 1000.0);
    let first = position(&stage, target).x;
    ballistic.update(&mut stage, &ctx, 1000.0);
    let second = position(&stage, target).x - first;
    assert!(second < first);
}

#[test]
fn bounce_reflects_off_walls() {
    let (mut stage, target, ctx) = stage_with_target();
    if let Some(t) = stage.get_mut(target).and_then(|n| n.transform.as_mut()) {
        t.position = Vec2::new(80.0, 40.0);
    }
    let mut bounce = BounceMotion::new(
        Vec2::new(100.0, 0.0),
        Rect::new(0.0, 0.0, 100.0, 100.0),
        Vec2::new(10.0, 10.0),
    );

    // 0.5 s: would reach x=130; clamps to the wall and flips vx.
    let tick = bounce.update(&mut stage, &ctx, 500.0);
    assert_eq!(tick, Tick::Continue);
    assert_eq!(position(&stage, target).x, 90.0);
    assert!(bounce.velocity.x < 0.0);
}

#[test]
fn bounce_corner_hit_finishes_the_target() {
    let (mut stage, target, ctx) = stage_with_target();
    if let Some(t) = stage.get_mut(target).and_then(|n| n.transform.as_mut()) {
        t.position = Vec2::new(85.0, 85.0);
    }
    let mut bounce = BounceMotion::new(
        Vec2::new(500.0, 500.0),
        Rect::new(0.0, 0.0, 100.0, 100.0),
        Vec2::new(10.0, 10.0),
    );

    let tick = bounce.update(&mut stage, &ctx, 100.0);
    assert_eq!(tick, Tick::FinishTarget);
    assert_eq!(position(&stage, target), Vec2::new(90.0, 90.0));
}

#[test]
fn hue_rotate_advances_and_wraps() {
    let (mut stage, target, ctx) = stage_with_target();
    let mut hue = HueRotate::new(90.0);

    hue.update(&mut stage, &ctx, 1000.0);
    assert_eq!(
        stage
            .get(target)
            .and_then(|n| n.transform.as_ref())
            .and_then(|t| t.filter.clone()),
        Some("hue-rotate(90.0deg)".to_owned())
    );

    for _ in 0..3 {
        hue.update(&mut stage, &ctx, 1000.0);
    }
    // 4 x 90 deg wraps back to 0.
    assert_eq!(
        stage
            .get(target)
            .and_then(|n| n.transform.as_ref())
            .and_then(|t| t.filter.clone()),
        Some("hue-rotate(0.0deg)".to_owned())
    );
}

#[test]
fn sound_cue_fires_on_its_configured_edge() {
    let plays = Rc::new(RefCell::new(0));
    let mut stage = Stage::new();
    let target = stage.insert(Node::unbounded().with_audio(AudioBearing::new(Box::new(
        CountingSound { plays: plays.clone() },
    ))));
    let node = stage.attach(target, Node::unbounded()).unwrap();
    let ctx = BehaviorCtx {
        node,
        target,
        progress: 0.0,
    };

    let mut start_cue = SoundCue::new(CueAt::Start);
    start_cue.on_play(&mut stage, &ctx);
    start_cue.on_finish(&mut stage, &ctx);
    assert_eq!(*plays.borrow(), 1);

    let mut finish_cue = SoundCue::new(CueAt::Finish);
    finish_cue.on_play(&mut stage, &ctx);
    assert_eq!(*plays.borrow(), 1);
    finish_cue.on_finish(&mut stage, &ctx);
    assert_eq!(*plays.borrow(), 2);
}

#[test]
fn sound_cue_without_audio_is_a_quiet_no_op() {
    let mut stage = Stage::new();
    let target = stage.insert(Node::unbounded());
    let node = stage.attach(target, Node::unbounded()).unwrap();
    let ctx = BehaviorCtx {
        node,
        target,
        progress: 0.0,
    };
    let mut cue = SoundCue::new(CueAt::Start);
    cue.on_play(&mut stage, &ctx); // must not panic
}
