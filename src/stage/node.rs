use crate::{
    assets::loader::AssetSlot,
    behavior::core::Behavior,
    capability::{audio::AudioBearing, render::Renderable, transform::Transform},
    stage::arena::NodeId,
};

/// Lifecycle state of a node. See the transition rules in
/// [`crate::stage::lifecycle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum NodeState {
    /// Created, not initialized.
    New,
    /// `init` ran; waiting for own asset and child fan-in.
    Initializing,
    /// All readiness settled; waiting for `play`.
    Ready,
    /// Ticking; `elapsed` advances.
    Playing,
    /// Frozen mid-play; `elapsed` holds, draw continues.
    Paused,
    /// Terminal. No outgoing transition.
    Finished,
}

/// How long a node plays before finishing on its own.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Lifespan {
    /// Auto-finish after this many milliseconds of play.
    Bounded(f64),
    /// Never auto-finish; only an explicit or cascaded `finish` ends it.
    Unbounded,
}

/// The single generic tree unit: every scene, visual, sound and behavior
/// is a `Node`.
///
/// Concrete kinds differ only in which capability components they compose
/// (`transform`, `renderable`, `audio`, `asset`) and whether a [`Behavior`]
/// is mounted. Composition, not inheritance, is the extension mechanism.
pub struct Node {
    pub(crate) state: NodeState,
    pub(crate) lifespan: Lifespan,
    pub(crate) elapsed: f64,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: NodeId,
    pub(crate) behavior: Option<Box<dyn Behavior>>,
    /// Debug-only name; never load-bearing.
    pub name: Option<String>,
    /// Spatial/visual capability.
    pub transform: Option<Transform>,
    /// Drawable capability.
    pub renderable: Option<Renderable>,
    /// Sound capability.
    pub audio: Option<AudioBearing>,
    /// External asset this node waits on during `init`.
    pub asset: Option<AssetSlot>,
    /// Auto-finish once the last child is reaped (container scenes whose
    /// lifetime is "until all spawned elements are done").
    pub finish_when_childless: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl Node {
    /// Unbounded node with no capabilities.
    pub fn unbounded() -> Self {
        Self {
            state: NodeState::New,
            lifespan: Lifespan::Unbounded,
            elapsed: 0.0,
            children: Vec::new(),
            parent: NodeId::NIL,
            behavior: None,
            name: None,
            transform: None,
            renderable: None,
            audio: None,
            asset: None,
            finish_when_childless: false,
        }
    }

    /// Node that auto-finishes after `millis` of play.
    pub fn bounded(millis: f64) -> Self {
        Self {
            lifespan: Lifespan::Bounded(millis),
            ..Self::unbounded()
        }
    }

    /// Set the debug name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Compose a Transform capability.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Compose a Renderable capability.
    pub fn with_renderable(mut self, renderable: Renderable) -> Self {
        self.renderable = Some(renderable);
        self
    }

    /// Compose an audio capability.
    pub fn with_audio(mut self, audio: AudioBearing) -> Self {
        self.audio = Some(audio);
        self
    }

    /// Wait on an external asset during `init`.
    pub fn with_asset(mut self, slot: AssetSlot) -> Self {
        self.asset = Some(slot);
        self
    }

    /// Mount a behavior; the node becomes a behavior node mutating its
    /// parent each tick.
    pub fn with_behavior(mut self, behavior: Box<dyn Behavior>) -> Self {
        self.behavior = Some(behavior);
        self
    }

    /// Auto-finish once all children are gone.
    pub fn finishing_when_childless(mut self) -> Self {
        self.finish_when_childless = true;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> NodeState {
        self.state
    }

    /// Configured lifespan.
    pub fn lifespan(&self) -> Lifespan {
        self.lifespan
    }

    /// Milliseconds accumulated while `Playing`.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Ordered owned children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Non-owning parent link; nil for roots and finished nodes.
    pub fn parent(&self) -> NodeId {
        self.parent
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("lifespan", &self.lifespan)
            .field("elapsed", &self.elapsed)
            .field("children", &self.children.len())
            .field("behavior", &self.behavior.is_some())
            .finish()
    }
}
