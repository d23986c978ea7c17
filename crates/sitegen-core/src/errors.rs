//! Error types for the sitegen model.

use thiserror::Error;

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by tree edits, timeline edits and page validation.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Duplicate element id: {0}")]
    DuplicateElementId(String),

    #[error("Element {id} records parent {recorded:?} but sits under {actual:?}")]
    ParentMismatch {
        id: String,
        recorded: Option<String>,
        actual: Option<String>,
    },

    #[error("Cannot move element {id} into its own subtree ({target})")]
    MoveIntoDescendant { id: String, target: String },

    #[error("Invalid slug '{0}': expected lowercase letters, digits and hyphens")]
    InvalidSlug(String),

    #[error("Animation not found: {0}")]
    AnimationNotFound(String),

    #[error("Track not found: {0}")]
    TrackNotFound(String),

    #[error("Keyframe not found: {0}")]
    KeyframeNotFound(String),

    #[error("Unknown animation preset: {0}")]
    UnknownPreset(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
