//! Page, element and project source generators.

pub mod element;
pub mod formatter;
pub mod page;
pub mod templates;

pub use element::{generate_markup, MarkupOptions};
pub use formatter::{FormatError, SourceFormatter, SourceLanguage, TidyFormatter};
pub use page::{component_name, route_config, PageGenerator, PageOptions};
pub use templates::TemplateEngine;

use crate::error::Result;
use serde::Serialize;
use std::path::Path;

/// Generated project output.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GeneratedProject {
    /// Generated files, in generation order.
    pub files: Vec<GeneratedFile>,
}

impl GeneratedProject {
    /// Look up a file by its project-relative path.
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Write every file under `root`, creating directories as needed.
    pub fn write_to(&self, root: &Path) -> Result<()> {
        for file in &self.files {
            let target = root.join(&file.path);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&target, &file.content)?;
            tracing::debug!(path = %target.display(), bytes = file.content.len(), "wrote file");
        }
        Ok(())
    }
}

/// A generated file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedFile {
    /// File path relative to project root, `/`-separated.
    pub path: String,
    /// File content.
    pub content: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}
