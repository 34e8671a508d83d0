use crate::capability::transform::Transform;

/// Drawable payload a node exposes to the host renderer.
///
/// The engine never touches pixels: `payload` is a logical key the host
/// resolves against its own media cache (an image, video element, or text
/// block it prepared when the asset loaded).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Renderable {
    /// Logical drawable key resolved by the host renderer.
    pub payload: String,
    /// Skip drawing while `false` without finishing the node.
    pub visible: bool,
}

impl Renderable {
    /// Visible renderable for `payload`.
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            visible: true,
        }
    }
}

/// One draw delegation from the engine to the host renderer.
#[derive(Debug)]
pub struct DrawCommand<'a> {
    /// Logical drawable key (see [`Renderable::payload`]).
    pub payload: &'a str,
    /// Transform of the node being drawn (engine default if the node
    /// composes no Transform).
    pub transform: &'a Transform,
    /// Debug-only node name, when set.
    pub name: Option<&'a str>,
}

/// Host-implemented draw target.
///
/// The engine walks the tree top-down once per frame and emits one call per
/// visible renderable node, in declaration order.
pub trait DrawSurface {
    /// Draw one node. Ordering equals paint order.
    fn draw(&mut self, cmd: &DrawCommand<'_>);
}
