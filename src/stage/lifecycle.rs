//! Lifecycle driving for the node tree.
//!
//! State machine: `New -> Initializing -> Ready -> Playing (<-> Paused)
//! -> Finished`. All transitions run synchronously inside a frame's call
//! stack; the only latency is `Initializing`, which is frame-polled until
//! the node's asset and all children started by its `init` fan-out settle.

use crate::{
    assets::loader::{AssetLoader, AssetPoll, AssetStatus},
    behavior::core::{BehaviorCtx, Tick},
    capability::{
        render::{DrawCommand, DrawSurface},
        transform::Transform,
    },
    scene::settings::Settings,
    stage::arena::{NodeId, Stage},
    stage::node::{Lifespan, NodeState},
};

impl Stage {
    /// `New -> Initializing`: reset `elapsed`, request this node's asset,
    /// fan out to all currently-present children. Not retroactive: children
    /// attached later are progressed individually by the parent's update
    /// pass instead of re-opening the fan-in.
    pub fn init(&mut self, id: NodeId, loader: &mut dyn AssetLoader) {
        let Some(node) = self.get_mut(id) else { return };
        if node.state != NodeState::New {
            return;
        }
        node.state = NodeState::Initializing;
        node.elapsed = 0.0;
        if let Some(slot) = node.asset.as_mut() {
            slot.status = AssetStatus::Pending;
            let key = slot.key.clone();
            loader.request(&key);
        }
        let children = node.children.clone();
        for child in children {
            self.init(child, loader);
        }
    }

    /// Advance an `Initializing` node: poll its own asset, recurse into
    /// still-initializing children, and flip to `Ready` once everything has
    /// settled. A failed asset settles the node anyway (degraded, logged);
    /// a dead asset never stalls a tree.
    pub fn poll_readiness(&mut self, id: NodeId, loader: &mut dyn AssetLoader) {
        let Some(node) = self.get_mut(id) else { return };
        if node.state != NodeState::Initializing {
            return;
        }
        if let Some(slot) = node.asset.as_mut() {
            if slot.status == AssetStatus::Pending {
                match loader.poll(&slot.key) {
                    AssetPoll::Pending => {}
                    AssetPoll::Ready => slot.status = AssetStatus::Ready,
                    AssetPoll::Failed => {
                        slot.status = AssetStatus::Failed;
                        tracing::warn!(key = %slot.key, "asset load failed; node degrades to no-op");
                    }
                }
            }
        }

        let children = self.get(id).map(|n| n.children.clone()).unwrap_or_default();
        for child in children {
            // A child attached mid-init is simply folded into this poll.
            self.init(child, loader);
            self.poll_readiness(child, loader);
        }

        let Some(node) = self.get(id) else { return };
        let own_settled = node.asset.as_ref().is_none_or(|s| s.settled());
        let fan_in_done = node.children.iter().all(|&c| {
            self.get(c).is_none_or(|n| {
                !matches!(n.state, NodeState::New | NodeState::Initializing)
            })
        });
        if own_settled && fan_in_done {
            if let Some(node) = self.get_mut(id) {
                node.state = NodeState::Ready;
            }
        }
    }

    /// `Ready -> Playing`. No-op from any other state, so callers may fire
    /// it without knowing where the node is. Runs the behavior's `on_play`
    /// and auto-plays currently-`Ready` children in declaration order,
    /// depth-first, parent-first.
    pub fn play(&mut self, id: NodeId) {
        let Some(node) = self.get_mut(id) else { return };
        if node.state != NodeState::Ready {
            return;
        }
        node.state = NodeState::Playing;

        if node.behavior.is_some() {
            let target = node.parent;
            let ctx = BehaviorCtx {
                node: id,
                target,
                progress: self.progress(id),
            };
            if let Some(mut behavior) = self.get_mut(id).and_then(|n| n.behavior.take()) {
                behavior.on_play(self, &ctx);
                if let Some(n) = self.get_mut(id) {
                    if n.state != NodeState::Finished && n.behavior.is_none() {
                        n.behavior = Some(behavior);
                    }
                }
            }
        }

        let children = self.get(id).map(|n| n.children.clone()).unwrap_or_default();
        for child in children {
            self.play(child);
        }
    }

    /// One tick while `Playing`: advance `elapsed` (finishing immediately on
    /// duration expiry, with no post-finish mutation this tick), run the
    /// behavior, progress each child one lifecycle step, then reap finished
    /// children. The children list never holds a `Finished` node once this
    /// returns.
    pub fn update(&mut self, id: NodeId, dt_ms: f64, loader: &mut dyn AssetLoader) {
        let Some(node) = self.get_mut(id) else { return };
        if node.state != NodeState::Playing {
            return;
        }
        node.elapsed += dt_ms;
        if let Lifespan::Bounded(duration) = node.lifespan {
            if node.elapsed >= duration {
                node.elapsed = duration;
                self.finish(id);
                return;
            }
        }

        if self.tick_behavior(id, dt_ms) {
            return;
        }

        let children = self.get(id).map(|n| n.children.clone()).unwrap_or_default();
        for child in children {
            let Some(state) = self.get(child).map(|n| n.state) else {
                continue;
            };
            match state {
                NodeState::New => {
                    self.init(child, loader);
                    self.poll_readiness(child, loader);
                }
                NodeState::Initializing => self.poll_readiness(child, loader),
                NodeState::Ready => self.play(child),
                NodeState::Playing => self.update(child, dt_ms, loader),
                NodeState::Paused | NodeState::Finished => {}
            }
        }

        self.reap_children(id);

        let finish_empty = self
            .get(id)
            .map(|n| {
                n.state == NodeState::Playing && n.finish_when_childless && n.children.is_empty()
            })
            .unwrap_or(false);
        if finish_empty {
            self.finish(id);
        }
    }

    /// `* -> Finished`, idempotent. Runs the behavior's `on_finish`, stops a
    /// looping sound, cascades to all children (removing their slots), then
    /// clears the children list and the parent link. The parent link is
    /// cleared exactly once; a finished node can never re-enter the live
    /// tree.
    pub fn finish(&mut self, id: NodeId) {
        let Some(node) = self.get_mut(id) else { return };
        if node.state == NodeState::Finished {
            return;
        }
        node.state = NodeState::Finished;
        let target = node.parent;

        if let Some(mut behavior) = node.behavior.take() {
            let ctx = BehaviorCtx {
                node: id,
                target,
                progress: self.progress(id),
            };
            behavior.on_finish(self, &ctx);
        }

        if let Some(node) = self.get_mut(id) {
            if let Some(audio) = node.audio.as_mut() {
                if audio.looping {
                    audio.handle.stop();
                }
            }
        }

        let children = self
            .get_mut(id)
            .map(|n| std::mem::take(&mut n.children))
            .unwrap_or_default();
        for child in children {
            self.finish(child);
            self.remove(child);
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = NodeId::NIL;
        }
    }

    /// Freeze a playing subtree: `Playing -> Paused` recursively, pausing
    /// sound handles on the transition edge. Draw continues while paused and
    /// `elapsed` holds without later compensation.
    pub fn pause(&mut self, id: NodeId) {
        let Some(node) = self.get_mut(id) else { return };
        if node.state != NodeState::Playing {
            return;
        }
        node.state = NodeState::Paused;
        if let Some(audio) = node.audio.as_mut() {
            audio.handle.pause();
        }
        let children = node.children.clone();
        for child in children {
            self.pause(child);
        }
    }

    /// Thaw a paused subtree: `Paused -> Playing` recursively, resuming
    /// sound handles on the transition edge.
    pub fn resume(&mut self, id: NodeId) {
        let Some(node) = self.get_mut(id) else { return };
        if node.state != NodeState::Paused {
            return;
        }
        node.state = NodeState::Playing;
        if let Some(audio) = node.audio.as_mut() {
            audio.handle.resume();
        }
        let children = node.children.clone();
        for child in children {
            self.resume(child);
        }
    }

    /// Normalized `[0, 1]` progress: `elapsed/duration` for bounded nodes,
    /// the nearest bounded ancestor's progress for unbounded ones, `0` with
    /// neither. Exactly `1` after a duration-expiry finish.
    pub fn progress(&self, id: NodeId) -> f64 {
        let mut cur = id;
        while let Some(node) = self.get(cur) {
            if let Lifespan::Bounded(duration) = node.lifespan {
                if duration <= 0.0 {
                    return 1.0;
                }
                return (node.elapsed / duration).clamp(0.0, 1.0);
            }
            cur = node.parent;
        }
        0.0
    }

    /// Top-down draw delegation: emit one [`DrawCommand`] per visible
    /// renderable node in declaration order, then recurse. Paused nodes keep
    /// drawing; nodes whose asset died draw nothing.
    pub fn draw(&self, id: NodeId, surface: &mut dyn DrawSurface) {
        let Some(node) = self.get(id) else { return };
        if !matches!(node.state, NodeState::Playing | NodeState::Paused) {
            return;
        }
        if let Some(renderable) = &node.renderable {
            let asset_usable = node.asset.as_ref().is_none_or(|s| s.usable());
            if renderable.visible && asset_usable {
                let fallback = Transform::default();
                let transform = node.transform.as_ref().unwrap_or(&fallback);
                surface.draw(&DrawCommand {
                    payload: &renderable.payload,
                    transform,
                    name: node.name.as_deref(),
                });
            }
        }
        let children = node.children.clone();
        for child in children {
            self.draw(child, surface);
        }
    }

    /// Push-based settings cascade: re-derive every sound handle's effective
    /// volume in this subtree. Pause edges are handled separately by
    /// [`pause`](Stage::pause)/[`resume`](Stage::resume).
    pub fn cascade_settings(&mut self, id: NodeId, settings: &Settings) {
        let Some(node) = self.get_mut(id) else { return };
        if let Some(audio) = node.audio.as_mut() {
            let effective = (audio.volume * settings.master_volume).clamp(0.0, 1.0);
            audio.handle.set_volume(effective);
        }
        let children = node.children.clone();
        for child in children {
            self.cascade_settings(child, settings);
        }
    }

    /// Run the node's behavior for one tick. Returns `true` when the node
    /// finished as a result and the caller must stop mutating it this tick.
    fn tick_behavior(&mut self, id: NodeId, dt_ms: f64) -> bool {
        let Some(node) = self.get(id) else { return true };
        if node.behavior.is_none() {
            return false;
        }
        let target = node.parent;
        let ctx = BehaviorCtx {
            node: id,
            target,
            progress: self.progress(id),
        };
        let Some(mut behavior) = self.get_mut(id).and_then(|n| n.behavior.take()) else {
            return false;
        };
        let tick = behavior.update(self, &ctx, dt_ms);
        if let Some(node) = self.get_mut(id) {
            if node.state != NodeState::Finished && node.behavior.is_none() {
                node.behavior = Some(behavior);
            }
        }
        match tick {
            Tick::Continue => false,
            Tick::FinishSelf => {
                self.finish(id);
                true
            }
            Tick::FinishTarget => {
                self.finish(target);
                true
            }
        }
    }

    /// Drop every `Finished` (or vanished) child and free its slot. Keeps
    /// declaration order for the survivors.
    fn reap_children(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else { return };
        if node.state == NodeState::Finished {
            return;
        }
        let current = node.children.clone();
        let mut kept = Vec::with_capacity(current.len());
        for child in current {
            match self.get(child).map(|n| n.state) {
                Some(NodeState::Finished) => {
                    self.remove(child);
                }
                None => {}
                Some(_) => kept.push(child),
            }
        }
        if let Some(node) = self.get_mut(id) {
            node.children = kept;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/lifecycle.rs"]
mod tests;
