/// Convenience result type used across Limelight.
pub type LimelightResult<T> = Result<T, LimelightError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum LimelightError {
    /// Invalid user-provided or effect-catalog data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while routing a trigger event (factory construction failures).
    #[error("trigger error: {0}")]
    Trigger(String),

    /// Tree-structure violations (attaching to a finished or missing node).
    #[error("stage error: {0}")]
    Stage(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LimelightError {
    /// Build a [`LimelightError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LimelightError::Trigger`] value.
    pub fn trigger(msg: impl Into<String>) -> Self {
        Self::Trigger(msg.into())
    }

    /// Build a [`LimelightError::Stage`] value.
    pub fn stage(msg: impl Into<String>) -> Self {
        Self::Stage(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
