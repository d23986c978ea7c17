//! Next.js source generation for sitegen pages.
//!
//! Turns a [`PageConfig`](sitegen_core::PageConfig) element tree into a
//! formatted page module: Tailwind classes from style maps, JSX markup,
//! render-mode scaffolding and metadata. Animations are bound to their
//! elements through `sitegen-animation`.
//!
//! # Example
//!
//! ```
//! use sitegen_codegen::{PageGenerator, PageOptions};
//! use sitegen_core::{Element, ElementType, PageConfig};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let page = PageConfig::new("p1", "Home", "index")
//!     .with_element(Element::new("title", ElementType::Text).with_content("Hello"));
//! let source = PageGenerator::new()?
//!     .generate_page(&page, &PageOptions::default())
//!     .await?;
//! assert!(source.contains("export default function Home()"));
//! # Ok::<(), sitegen_codegen::CodegenError>(())
//! # }).unwrap();
//! ```

pub mod error;
pub mod generators;
pub mod project;
pub mod styles;

pub use error::{CodegenError, Result};
pub use generators::{
    component_name, generate_markup, route_config, FormatError, GeneratedFile, GeneratedProject,
    MarkupOptions, PageGenerator, PageOptions, SourceFormatter, SourceLanguage, TemplateEngine,
    TidyFormatter,
};
pub use project::{ProjectGenerator, SiteConfig};
pub use styles::map_styles;
