use crate::{
    foundation::error::LimelightResult,
    scene::settings::Settings,
    stage::arena::{NodeId, Stage},
};

/// Scene-defined reaction to a repeated trigger of a triggerable scene,
/// typically "attach one more element to the existing root".
pub trait TriggerHandler {
    /// Handle one more trigger payload against the live scene.
    fn trigger(
        &mut self,
        stage: &mut Stage,
        root: NodeId,
        payload: Option<&serde_json::Value>,
        settings: &Settings,
    );
}

/// A freshly built scene: an un-initialized (`New`) root plus routing
/// metadata. The manager owns calling `init` from here on.
pub struct SceneSpec {
    /// Root node of the scene tree, state `New`.
    pub root: NodeId,
    /// Triggerable scenes persist and absorb repeated events of their type;
    /// non-triggerable ones get a fresh instance per event.
    pub triggerable: bool,
    /// Trigger reaction for triggerable scenes.
    pub trigger: Option<Box<dyn TriggerHandler>>,
}

/// Effect-catalog entry: builds one scene tree for its registered type.
pub trait SceneFactory {
    /// Build a new scene into `stage`, leaving the root `New`.
    fn build(
        &self,
        stage: &mut Stage,
        payload: Option<&serde_json::Value>,
        settings: &Settings,
    ) -> LimelightResult<SceneSpec>;
}

impl std::fmt::Debug for SceneSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneSpec")
            .field("root", &self.root)
            .field("triggerable", &self.triggerable)
            .field("trigger", &self.trigger.is_some())
            .finish()
    }
}
