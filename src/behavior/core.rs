use crate::stage::arena::{NodeId, Stage};

/// Where a behavior hook is running: its own node and its target.
///
/// The target is the behavior node's parent in the tree. Behaviors hold no
/// reference of their own to the target; they resolve it through the stage
/// every hook, so a reaped target simply stops resolving.
#[derive(Clone, Copy, Debug)]
pub struct BehaviorCtx {
    /// The behavior node itself.
    pub node: NodeId,
    /// The node this behavior mutates (the behavior node's parent).
    pub target: NodeId,
    /// Progress of the behavior node, inheriting the nearest bounded
    /// ancestor when the behavior itself is unbounded.
    pub progress: f64,
}

/// Outcome of one behavior tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Keep going.
    Continue,
    /// Finish the behavior node, leaving the target alive.
    FinishSelf,
    /// Finish the target (and with it this behavior).
    FinishTarget,
}

/// Reusable per-tick logic mounted on a node.
///
/// A behavior participates in the normal node lifecycle; these hooks fire at
/// the matching transitions of its own node. Implementations are typed
/// against capabilities (query the stage for the target's Transform or
/// audio), never against concrete node kinds, so one behavior serves any
/// node exposing what it needs. A target missing the required capability is
/// tolerated with a logged warning, not a panic; authoring bugs inside a
/// behavior (NaN parameters) are allowed to propagate.
pub trait Behavior {
    /// One-time setup when the behavior node starts playing.
    fn on_play(&mut self, _stage: &mut Stage, _ctx: &BehaviorCtx) {}

    /// Per-tick mutation of the target. `dt_ms` is the frame delta in
    /// milliseconds.
    fn update(&mut self, _stage: &mut Stage, _ctx: &BehaviorCtx, _dt_ms: f64) -> Tick {
        Tick::Continue
    }

    /// Teardown when the behavior node finishes (own expiry or cascade).
    fn on_finish(&mut self, _stage: &mut Stage, _ctx: &BehaviorCtx) {}
}
