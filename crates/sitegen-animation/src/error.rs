//! Error types for animation compilation.

use thiserror::Error;

/// Result type alias for animation compilation.
pub type Result<T> = std::result::Result<T, AnimationError>;

/// Errors that can occur while compiling an animation.
#[derive(Error, Debug)]
pub enum AnimationError {
    /// Backend name outside `css`, `framerMotion`, `gsap`.
    #[error("Unknown animation backend: {0}")]
    UnknownBackend(String),

    /// Prop bundle serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
