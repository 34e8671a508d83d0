use kurbo::Vec2;

/// Spatial/visual state a node exposes to behaviors and the renderer.
///
/// Behaviors mutate this component; the host renderer consumes it via
/// [`crate::DrawCommand`]. `filter` carries a CSS-style filter string the
/// renderer applies verbatim (hue rotation, blur).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    /// Position in surface pixels.
    pub position: Vec2,
    /// Per-axis scale, default `(1, 1)`.
    pub scale: Vec2,
    /// Rotation in radians.
    pub rotation: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Optional renderer filter string, e.g. `hue-rotate(90deg)`.
    pub filter: Option<String>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
            opacity: 1.0,
            filter: None,
        }
    }
}

impl Transform {
    /// Build a transform at `position` with default scale/rotation/opacity.
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}
