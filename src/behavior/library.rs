//! Reusable behaviors shared by the effect catalog.
//!
//! Each behavior is typed against a capability, not a node kind: it asks the
//! stage for its target's Transform or sound handle and tolerates a missing
//! capability with a single logged warning. Which behaviors mount on which
//! nodes is catalog configuration, not engine code.

use kurbo::{Rect, Vec2};

use crate::{
    animation::ease::{Ease, envelope},
    behavior::core::{Behavior, BehaviorCtx, Tick},
    stage::arena::{NodeId, Stage},
};

fn transform_target(stage: &Stage, ctx: &BehaviorCtx, warned: &mut bool) -> Option<NodeId> {
    match stage.transform_anchor(ctx.target) {
        Some(anchor) => Some(anchor),
        None => {
            if !*warned {
                *warned = true;
                tracing::warn!(?ctx.target, "behavior target exposes no Transform; behavior idles");
            }
            None
        }
    }
}

/// Opacity envelope: ramp in over the first `fade_time` of progress, hold,
/// ramp out over the last `fade_time`.
#[derive(Debug)]
pub struct FadeInOut {
    /// Fraction of progress spent on each ramp, in `[0, 0.5]`.
    pub fade_time: f64,
    warned: bool,
}

impl FadeInOut {
    /// Fade with the given ramp fraction.
    pub fn new(fade_time: f64) -> Self {
        Self {
            fade_time,
            warned: false,
        }
    }
}

impl Behavior for FadeInOut {
    fn update(&mut self, stage: &mut Stage, ctx: &BehaviorCtx, _dt_ms: f64) -> Tick {
        if let Some(anchor) = transform_target(stage, ctx, &mut self.warned) {
            if let Some(transform) = stage.get_mut(anchor).and_then(|n| n.transform.as_mut()) {
                transform.opacity = envelope(ctx.progress, self.fade_time);
            }
        }
        Tick::Continue
    }
}

/// Slide-in/out riding the same envelope as [`FadeInOut`]: the target sits
/// at `base + offset` at the range edges and at `base` through the middle.
#[derive(Debug)]
pub struct SlideInOut {
    /// Displacement applied at zero envelope (fully slid out).
    pub offset: Vec2,
    /// Ramp fraction shared with the fade envelope.
    pub fade_time: f64,
    base: Option<Vec2>,
    warned: bool,
}

impl SlideInOut {
    /// Slide from/to `offset` with the given ramp fraction.
    pub fn new(offset: Vec2, fade_time: f64) -> Self {
        Self {
            offset,
            fade_time,
            base: None,
            warned: false,
        }
    }
}

impl Behavior for SlideInOut {
    fn on_play(&mut self, stage: &mut Stage, ctx: &BehaviorCtx) {
        if let Some(anchor) = transform_target(stage, ctx, &mut self.warned) {
            self.base = stage
                .get(anchor)
                .and_then(|n| n.transform.as_ref())
                .map(|t| t.position);
        }
    }

    fn update(&mut self, stage: &mut Stage, ctx: &BehaviorCtx, _dt_ms: f64) -> Tick {
        let Some(base) = self.base else {
            return Tick::Continue;
        };
        if let Some(anchor) = transform_target(stage, ctx, &mut self.warned) {
            if let Some(transform) = stage.get_mut(anchor).and_then(|n| n.transform.as_mut()) {
                let out = 1.0 - envelope(ctx.progress, self.fade_time);
                transform.position = base + self.offset * out;
            }
        }
        Tick::Continue
    }
}

/// Eased one-way glide from the position captured at play time to `to`.
#[derive(Debug)]
pub struct SlideTo {
    /// Destination position.
    pub to: Vec2,
    /// Easing curve applied to progress.
    pub ease: Ease,
    start: Option<Vec2>,
    warned: bool,
}

impl SlideTo {
    /// Glide to `to` through `ease`.
    pub fn new(to: Vec2, ease: Ease) -> Self {
        Self {
            to,
            ease,
            start: None,
            warned: false,
        }
    }
}

impl Behavior for SlideTo {
    fn on_play(&mut self, stage: &mut Stage, ctx: &BehaviorCtx) {
        if let Some(anchor) = transform_target(stage, ctx, &mut self.warned) {
            self.start = stage
                .get(anchor)
                .and_then(|n| n.transform.as_ref())
                .map(|t| t.position);
        }
    }

    fn update(&mut self, stage: &mut Stage, ctx: &BehaviorCtx, _dt_ms: f64) -> Tick {
        let Some(start) = self.start else {
            return Tick::Continue;
        };
        if let Some(anchor) = transform_target(stage, ctx, &mut self.warned) {
            if let Some(transform) = stage.get_mut(anchor).and_then(|n| n.transform.as_mut()) {
                let t = self.ease.apply(ctx.progress);
                transform.position = start + (self.to - start) * t;
            }
        }
        Tick::Continue
    }
}

/// Velocity integration with gravity and drag (confetti, debris).
#[derive(Debug)]
pub struct Ballistic {
    /// Current velocity in px/s.
    pub velocity: Vec2,
    /// Downward acceleration in px/s^2.
    pub gravity: f64,
    /// Velocity fraction lost per second.
    pub drag: f64,
    warned: bool,
}

impl Ballistic {
    /// Launch with `velocity` under `gravity` and `drag`.
    pub fn new(velocity: Vec2, gravity: f64, drag: f64) -> Self {
        Self {
            velocity,
            gravity,
            drag,
            warned: false,
        }
    }
}

impl Behavior for Ballistic {
    fn update(&mut self, stage: &mut Stage, ctx: &BehaviorCtx, dt_ms: f64) -> Tick {
        let dt = dt_ms / 1000.0;
        self.velocity.y += self.gravity * dt;
        let damp = (1.0 - self.drag * dt).max(0.0);
        self.velocity *= damp;
        if let Some(anchor) = transform_target(stage, ctx, &mut self.warned) {
            if let Some(transform) = stage.get_mut(anchor).and_then(|n| n.transform.as_mut()) {
                transform.position += self.velocity * dt;
            }
        }
        Tick::Continue
    }
}

/// DVD-style edge bounce inside `bounds`; a simultaneous two-edge hit is a
/// corner and finishes the target.
#[derive(Debug)]
pub struct BounceMotion {
    /// Current velocity in px/s.
    pub velocity: Vec2,
    /// Bounce area in surface pixels.
    pub bounds: Rect,
    /// Target extents (position is the top-left corner).
    pub size: Vec2,
    warned: bool,
}

impl BounceMotion {
    /// Bounce with `velocity` inside `bounds` for a target of `size`.
    pub fn new(velocity: Vec2, bounds: Rect, size: Vec2) -> Self {
        Self {
            velocity,
            bounds,
            size,
            warned: false,
        }
    }
}

impl Behavior for BounceMotion {
    fn update(&mut self, stage: &mut Stage, ctx: &BehaviorCtx, dt_ms: f64) -> Tick {
        let dt = dt_ms / 1000.0;
        let Some(anchor) = transform_target(stage, ctx, &mut self.warned) else {
            return Tick::Continue;
        };
        let Some(transform) = stage.get_mut(anchor).and_then(|n| n.transform.as_mut()) else {
            return Tick::Continue;
        };

        let mut pos = transform.position + self.velocity * dt;
        let mut hit_x = false;
        let mut hit_y = false;
        if pos.x <= self.bounds.x0 {
            pos.x = self.bounds.x0;
            self.velocity.x = self.velocity.x.abs();
            hit_x = true;
        } else if pos.x + self.size.x >= self.bounds.x1 {
            pos.x = self.bounds.x1 - self.size.x;
            self.velocity.x = -self.velocity.x.abs();
            hit_x = true;
        }
        if pos.y <= self.bounds.y0 {
            pos.y = self.bounds.y0;
            self.velocity.y = self.velocity.y.abs();
            hit_y = true;
        } else if pos.y + self.size.y >= self.bounds.y1 {
            pos.y = self.bounds.y1 - self.size.y;
            self.velocity.y = -self.velocity.y.abs();
            hit_y = true;
        }
        transform.position = pos;

        if hit_x && hit_y {
            Tick::FinishTarget
        } else {
            Tick::Continue
        }
    }
}

/// Continuous hue rotation through the target's filter string.
#[derive(Debug)]
pub struct HueRotate {
    /// Rotation speed in degrees per second.
    pub degrees_per_sec: f64,
    hue: f64,
    warned: bool,
}

impl HueRotate {
    /// Rotate hue at `degrees_per_sec`.
    pub fn new(degrees_per_sec: f64) -> Self {
        Self {
            degrees_per_sec,
            hue: 0.0,
            warned: false,
        }
    }
}

impl Behavior for HueRotate {
    fn update(&mut self, stage: &mut Stage, ctx: &BehaviorCtx, dt_ms: f64) -> Tick {
        self.hue = (self.hue + self.degrees_per_sec * dt_ms / 1000.0).rem_euclid(360.0);
        if let Some(anchor) = transform_target(stage, ctx, &mut self.warned) {
            if let Some(transform) = stage.get_mut(anchor).and_then(|n| n.transform.as_mut()) {
                transform.filter = Some(format!("hue-rotate({:.1}deg)", self.hue));
            }
        }
        Tick::Continue
    }
}

/// When a [`SoundCue`] fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CueAt {
    /// On the behavior node's `on_play`.
    Start,
    /// On the behavior node's `on_finish`.
    Finish,
}

/// Fire the nearest ancestor sound handle at a lifecycle edge.
#[derive(Debug)]
pub struct SoundCue {
    /// Which edge triggers the cue.
    pub at: CueAt,
    warned: bool,
}

impl SoundCue {
    /// Cue at the given edge.
    pub fn new(at: CueAt) -> Self {
        Self { at, warned: false }
    }

    fn fire(&mut self, stage: &mut Stage, ctx: &BehaviorCtx) {
        let Some(anchor) = stage.audio_anchor(ctx.target) else {
            if !self.warned {
                self.warned = true;
                tracing::warn!(?ctx.target, "sound cue target bears no audio; cue skipped");
            }
            return;
        };
        let Some(node) = stage.get_mut(anchor) else { return };
        if node.asset.as_ref().is_some_and(|s| !s.usable()) {
            return;
        }
        if let Some(audio) = node.audio.as_mut() {
            audio.handle.play();
        }
    }
}

impl Behavior for SoundCue {
    fn on_play(&mut self, stage: &mut Stage, ctx: &BehaviorCtx) {
        if self.at == CueAt::Start {
            self.fire(stage, ctx);
        }
    }

    fn on_finish(&mut self, stage: &mut Stage, ctx: &BehaviorCtx) {
        if self.at == CueAt::Finish {
            self.fire(stage, ctx);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/behavior/library.rs"]
mod tests;
