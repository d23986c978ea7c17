//! Error types for code generation.

use crate::generators::FormatError;
use thiserror::Error;

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code generation.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// Invalid page input.
    #[error("Invalid page: {0}")]
    Core(#[from] sitegen_core::CoreError),

    /// Animation compilation failed.
    #[error("Animation error: {0}")]
    Animation(#[from] sitegen_animation::AnimationError),

    /// Template rendering error.
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    /// Invalid template.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),

    /// The source formatter rejected or failed on generated code.
    #[error("Code formatting error: {0}")]
    Format(#[from] FormatError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An animation id that cannot name a generated file.
    #[error("Invalid animation id '{0}': expected letters, digits, hyphens and underscores")]
    InvalidAnimationId(String),

    /// Two pages in one site share a slug.
    #[error("A page with slug '{0}' already exists in this project")]
    DuplicateSlug(String),
}
