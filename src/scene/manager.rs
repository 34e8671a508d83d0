use std::collections::HashMap;

use crate::{
    assets::loader::AssetLoader,
    capability::render::DrawSurface,
    foundation::error::{LimelightError, LimelightResult},
    scene::factory::{SceneFactory, TriggerHandler},
    scene::settings::{Settings, SettingsDelta},
    stage::arena::{NodeId, Stage},
    stage::node::NodeState,
};

struct ActiveScene {
    scene_type: String,
    root: NodeId,
    triggerable: bool,
    trigger: Option<Box<dyn TriggerHandler>>,
}

/// Routing and frame-driving layer over the node tree.
///
/// Owns the [`Stage`], the factory registry, the FIFO active-scene list and
/// the authoritative [`Settings`]. The host render loop calls
/// [`tick`](SceneManager::tick) once per frame; the transport boundary feeds
/// [`handle_event`](SceneManager::handle_event) and
/// [`apply_settings`](SceneManager::apply_settings).
pub struct SceneManager {
    stage: Stage,
    loader: Box<dyn AssetLoader>,
    factories: HashMap<String, Box<dyn SceneFactory>>,
    active: Vec<ActiveScene>,
    settings: Settings,
}

impl SceneManager {
    /// Manager loading assets through `loader`.
    pub fn new(loader: Box<dyn AssetLoader>) -> Self {
        Self {
            stage: Stage::new(),
            loader,
            factories: HashMap::new(),
            active: Vec::new(),
            settings: Settings::default(),
        }
    }

    /// Register the factory for `scene_type`. Registering a type twice is a
    /// catalog bug and errors.
    pub fn register_factory(
        &mut self,
        scene_type: impl Into<String>,
        factory: Box<dyn SceneFactory>,
    ) -> LimelightResult<()> {
        let scene_type = scene_type.into();
        if self.factories.contains_key(&scene_type) {
            return Err(LimelightError::validation(format!(
                "scene type '{scene_type}' is already registered"
            )));
        }
        self.factories.insert(scene_type, factory);
        Ok(())
    }

    /// Trigger ingress: route one external event.
    ///
    /// An active triggerable scene of this type absorbs the payload;
    /// otherwise the registered factory builds a fresh scene. This is a
    /// fire-and-forget boundary: unknown types and factory failures
    /// (malformed payloads) are logged and dropped, never an error to the
    /// transport. Only host-API misuse, a factory handing back a root that
    /// does not resolve, surfaces as `Err`.
    #[tracing::instrument(skip(self, payload))]
    pub fn handle_event(
        &mut self,
        scene_type: &str,
        payload: Option<&serde_json::Value>,
    ) -> LimelightResult<()> {
        let stage = &self.stage;
        let reusable = self.active.iter().position(|s| {
            s.scene_type == scene_type
                && s.triggerable
                && stage
                    .get(s.root)
                    .is_some_and(|n| n.state() != NodeState::Finished)
        });
        if let Some(index) = reusable {
            let root = self.active[index].root;
            if let Some(mut handler) = self.active[index].trigger.take() {
                handler.trigger(&mut self.stage, root, payload, &self.settings);
                self.active[index].trigger = Some(handler);
            }
            return Ok(());
        }

        let Some(factory) = self.factories.get(scene_type) else {
            tracing::warn!(scene_type, "unknown scene type; event dropped");
            return Ok(());
        };
        let spec = match factory.build(&mut self.stage, payload, &self.settings) {
            Ok(spec) => spec,
            Err(err) => {
                tracing::warn!(scene_type, %err, "scene factory failed; event dropped");
                return Ok(());
            }
        };
        if !self.stage.contains(spec.root) {
            return Err(LimelightError::trigger(format!(
                "factory for '{scene_type}' returned a dead root"
            )));
        }
        self.stage.cascade_settings(spec.root, &self.settings);
        tracing::debug!(scene_type, root = ?spec.root, "scene created");
        self.active.push(ActiveScene {
            scene_type: scene_type.to_owned(),
            root: spec.root,
            triggerable: spec.triggerable,
            trigger: spec.trigger,
        });
        Ok(())
    }

    /// Settings ingress: fold a delta in and push the resulting edges into
    /// every active scene. Volume changes re-derive handle volumes; a pause
    /// toggle freezes or thaws each tree exactly once, on the edge.
    pub fn apply_settings(&mut self, delta: &SettingsDelta) {
        let change = self.settings.apply(delta);
        if change.volume_changed {
            for scene in &self.active {
                self.stage.cascade_settings(scene.root, &self.settings);
            }
        }
        if change.pause_toggled {
            for scene in &self.active {
                if self.settings.paused {
                    self.stage.pause(scene.root);
                } else {
                    self.stage.resume(scene.root);
                }
            }
        }
    }

    /// One frame: progress every active scene in FIFO creation order
    /// (`init` when `New`, readiness poll while `Initializing`, `play` when
    /// `Ready`, `update` while `Playing`), draw the survivors, then reap
    /// `Finished` scenes after one final guaranteed `finish`.
    ///
    /// While paused, lifecycle progression stops but draw continues.
    #[tracing::instrument(skip(self, surface))]
    pub fn tick(&mut self, dt_ms: f64, surface: &mut dyn DrawSurface) {
        for scene in &self.active {
            let root = scene.root;
            if !self.settings.paused {
                match self.stage.get(root).map(|n| n.state()) {
                    Some(NodeState::New) => {
                        self.stage.init(root, self.loader.as_mut());
                        self.stage.poll_readiness(root, self.loader.as_mut());
                    }
                    Some(NodeState::Initializing) => {
                        self.stage.poll_readiness(root, self.loader.as_mut());
                    }
                    Some(NodeState::Ready) => self.stage.play(root),
                    Some(NodeState::Playing) => {
                        self.stage.update(root, dt_ms, self.loader.as_mut());
                    }
                    Some(NodeState::Paused) | Some(NodeState::Finished) | None => {}
                }
            }
            self.stage.draw(root, surface);
        }

        let stage = &mut self.stage;
        self.active.retain(|scene| {
            let done = stage
                .get(scene.root)
                .is_none_or(|n| n.state() == NodeState::Finished);
            if done {
                // One last finish so cleanup hooks always ran.
                stage.finish(scene.root);
                stage.remove(scene.root);
                tracing::debug!(scene_type = %scene.scene_type, "scene reaped");
            }
            !done
        });
    }

    /// Current global settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The node tree (host introspection, tests).
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Mutable tree access for hosts that spawn outside the factory path.
    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    /// Number of active scenes.
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Roots of active scenes of `scene_type`, in FIFO order.
    pub fn active_roots_of(&self, scene_type: &str) -> Vec<NodeId> {
        self.active
            .iter()
            .filter(|s| s.scene_type == scene_type)
            .map(|s| s.root)
            .collect()
    }
}

impl std::fmt::Debug for SceneManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneManager")
            .field("active", &self.active.len())
            .field("factories", &self.factories.len())
            .field("settings", &self.settings)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/manager.rs"]
mod tests;
