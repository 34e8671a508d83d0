/// Easing curves applied to a normalized `[0, 1]` progress value.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Identity.
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in-out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in-out.
    InOutCubic,
}

impl Ease {
    /// Map progress `t` through this curve. Input is clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

/// Trapezoid envelope shared by the fade and slide behaviors.
///
/// Ramps linearly `0 -> 1` over the first `fade_time` fraction of progress,
/// holds at `1` through the middle, and ramps `1 -> 0` over the last
/// `fade_time`. A `fade_time` of `0` holds at `1` for the whole range; values
/// above `0.5` overlap in the middle and are clamped per-side.
pub fn envelope(progress: f64, fade_time: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    let f = fade_time.clamp(0.0, 0.5);
    if f == 0.0 {
        return 1.0;
    }
    if p < f {
        p / f
    } else if p > 1.0 - f {
        (1.0 - p) / f
    } else {
        1.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
