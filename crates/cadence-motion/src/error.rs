//! Error types for the animation core.

use thiserror::Error;

/// Result type for animation operations.
pub type Result<T> = std::result::Result<T, AnimationError>;

/// Errors that can occur while authoring or playing animations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// `play` was called with an id that was never registered.
    #[error("animation '{0}' is not registered")]
    UnknownAnimation(String),

    /// Easing name lookup failed.
    #[error("unknown easing function: {0}")]
    UnknownEasing(String),

    /// Transition kind lookup failed.
    #[error("unknown transition type: {0}")]
    UnknownTransition(String),

    /// The transition has an enter recipe only.
    #[error("transition '{0}' has no exit recipe")]
    MissingExitRecipe(String),

    /// Definition failed validation.
    #[error("invalid animation definition '{id}': {reason}")]
    InvalidDefinition { id: String, reason: String },

    /// Definition JSON could not be parsed.
    #[error("failed to parse animation definition: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for AnimationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
