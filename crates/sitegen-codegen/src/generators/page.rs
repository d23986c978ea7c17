//! Next.js page assembly.

use super::element::{generate_markup, MarkupOptions};
use super::formatter::{FormatError, SourceFormatter, SourceLanguage, TidyFormatter};
use super::templates::{page_template, TemplateEngine, LAYOUT_TEMPLATE};
use crate::error::Result;
use serde::Serialize;
use sitegen_animation::{binding_for, AnimationBackend};
use sitegen_core::element::{contains_interactive, contains_type};
use sitegen_core::{Animation, ElementType, MetaValue, PageConfig, RenderMode};
use std::sync::Arc;
use std::time::Duration;

pub use super::templates::component_name;

/// Options for page generation.
#[derive(Debug, Clone)]
pub struct PageOptions {
    /// Animations to bind to elements on the page.
    pub animations: Vec<Animation>,
    /// How the animations are delivered.
    pub backend: AnimationBackend,
    /// Extra import lines, after the built-in ones.
    pub imports: Vec<String>,
    /// JSX rendered inside `<main>` after the layout.
    pub mounts: Vec<String>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            animations: Vec::new(),
            backend: AnimationBackend::Css,
            imports: Vec::new(),
            mounts: Vec::new(),
        }
    }
}

impl PageOptions {
    pub fn with_animations(mut self, animations: Vec<Animation>) -> Self {
        self.animations = animations;
        self
    }

    pub fn with_backend(mut self, backend: AnimationBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_import(mut self, line: impl Into<String>) -> Self {
        self.imports.push(line.into());
        self
    }

    pub fn with_mount(mut self, jsx: impl Into<String>) -> Self {
        self.mounts.push(jsx.into());
        self
    }

    fn uses_motion(&self) -> bool {
        !self.animations.is_empty() && self.backend == AnimationBackend::FramerMotion
    }
}

#[derive(Serialize)]
struct PageData<'p> {
    name: &'p str,
    markup: String,
}

/// Generates page modules from page configs.
pub struct PageGenerator {
    engine: TemplateEngine<'static>,
    formatter: Arc<dyn SourceFormatter>,
    format_timeout: Option<Duration>,
}

impl PageGenerator {
    /// Create a generator using the built-in [`TidyFormatter`].
    pub fn new() -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::with_page_templates()?,
            formatter: Arc::new(TidyFormatter),
            format_timeout: None,
        })
    }

    /// Use a different source formatter.
    pub fn with_formatter(mut self, formatter: Arc<dyn SourceFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Fail formatting with [`FormatError::TimedOut`] after `timeout`.
    pub fn with_format_timeout(mut self, timeout: Duration) -> Self {
        self.format_timeout = Some(timeout);
        self
    }

    async fn format(&self, source: &str, language: SourceLanguage) -> std::result::Result<String, FormatError> {
        match self.format_timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.formatter.format(source, language))
                .await
                .map_err(|_| FormatError::TimedOut(timeout))?,
            None => self.formatter.format(source, language).await,
        }
    }

    /// Generate the complete, formatted page module.
    #[tracing::instrument(skip_all, fields(page = %page.id, mode = ?page.render_mode))]
    pub async fn generate_page(&self, page: &PageConfig, options: &PageOptions) -> Result<String> {
        let needs_client = !options.animations.is_empty()
            || contains_interactive(&page.layout)
            || page.render_mode == RenderMode::Client;

        let mut source = String::new();
        if needs_client {
            source.push_str("\"use client\";\n\n");
        }
        source.push_str(&collect_imports(page, options));
        source.push_str("\n\n");
        source.push_str(&generate_metadata(page)?);
        source.push_str("\n\n");
        source.push_str(&self.generate_component(page, options)?);

        tracing::debug!(
            client = needs_client,
            animations = options.animations.len(),
            bytes = source.len(),
            "assembled page"
        );

        Ok(self.format(&source, SourceLanguage::Tsx).await?)
    }

    /// Render the page component for its render mode, without formatting.
    pub fn generate_component(&self, page: &PageConfig, options: &PageOptions) -> Result<String> {
        let markup_options = markup_options(&options.animations, options.backend)?;
        let markup = page
            .layout
            .iter()
            .map(|element| generate_markup(element, &markup_options))
            .chain(options.mounts.iter().cloned())
            .collect::<Vec<_>>()
            .join("\n");

        self.engine.render(
            page_template(page.render_mode),
            &PageData {
                name: &page.name,
                markup,
            },
        )
    }

    /// Layout module wrapping the page, generated only when auth is enabled.
    #[tracing::instrument(skip_all, fields(page = %page.id))]
    pub async fn generate_page_layout(&self, page: &PageConfig, has_auth: bool) -> Result<Option<String>> {
        if !has_auth {
            return Ok(None);
        }
        let source = self.engine.render(
            LAYOUT_TEMPLATE,
            &PageData {
                name: &page.name,
                markup: String::new(),
            },
        )?;
        Ok(Some(self.format(&source, SourceLanguage::Tsx).await?))
    }
}

/// Bind each animation to its element. A later animation for the same
/// element replaces an earlier one.
pub fn markup_options(animations: &[Animation], backend: AnimationBackend) -> Result<MarkupOptions> {
    let mut options = MarkupOptions::default();
    for animation in animations {
        options
            .bindings
            .insert(animation.element_id.clone(), binding_for(animation, backend)?);
    }
    Ok(options)
}

/// Import lines for the page, one per line.
pub fn collect_imports(page: &PageConfig, options: &PageOptions) -> String {
    let mut imports = vec!["import { Metadata } from \"next\";"];
    if contains_type(&page.layout, ElementType::Image) {
        imports.push("import Image from \"next/image\";");
    }
    if options.uses_motion() {
        imports.push("import { motion } from \"framer-motion\";");
    }
    imports.extend(options.imports.iter().map(String::as_str));
    imports.join("\n")
}

fn quote_single(value: &str) -> String {
    format!(
        "'{}'",
        value.replace('\\', "\\\\").replace('\'', "\\'").replace('\n', "\\n")
    )
}

fn meta_literal(value: &MetaValue) -> Result<String> {
    Ok(match value {
        MetaValue::List(items) => serde_json::to_string(items)?,
        MetaValue::Text(text) => quote_single(text),
        MetaValue::Number(n) => quote_single(&n.to_string()),
        MetaValue::Bool(b) => quote_single(&b.to_string()),
        MetaValue::Other(json) if json.is_array() => json.to_string(),
        MetaValue::Other(json) => quote_single(&json.to_string()),
    })
}

/// The `export const metadata` block.
///
/// Without page meta the title falls back to the page name.
pub fn generate_metadata(page: &PageConfig) -> Result<String> {
    let entries = match page.meta {
        None => vec![format!("  title: {},", quote_single(&page.name))],
        Some(ref meta) => meta
            .entries()
            .map(|(key, value)| Ok(format!("  {}: {},", key, meta_literal(value)?)))
            .collect::<Result<Vec<_>>>()?,
    };

    let mut block = String::from("export const metadata: Metadata = {\n");
    for entry in entries {
        block.push_str(&entry);
        block.push('\n');
    }
    block.push_str("};");
    Ok(block)
}

/// Route segment config exported next to the page.
pub fn route_config(page: &PageConfig) -> &'static str {
    match page.render_mode {
        RenderMode::Static | RenderMode::Client => "",
        RenderMode::Server => "export const dynamic = 'force-dynamic';",
        RenderMode::Incremental => "export const revalidate = 3600; // Revalidate at most once every hour",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sitegen_core::{easing, AnimationType, Element, PageMeta, Value};

    fn fade(element_id: &str) -> Animation {
        Animation::new("fade-in", element_id, AnimationType::Entry).with_track(
            "opacity",
            easing::EASE_IN_OUT,
            [(0.0, Value::from(0.0)), (1000.0, Value::from(1.0))],
        )
    }

    #[tokio::test]
    async fn test_empty_static_page() {
        let generator = PageGenerator::new().unwrap();
        let page = PageConfig::new("p1", "Home", "home");
        let source = generator.generate_page(&page, &PageOptions::default()).await.unwrap();

        assert!(!source.contains("use client"));
        assert!(source.starts_with("import { Metadata } from \"next\";\n\nexport const metadata: Metadata = {\n  title: 'Home',\n};"));
        assert!(source.contains("export default function Home() {\n  return (\n    <main></main>\n  );\n}\n"));
        assert_eq!(route_config(&page), "");
    }

    #[tokio::test]
    async fn test_interactive_element_needs_client() {
        let generator = PageGenerator::new().unwrap();
        let page = PageConfig::new("p1", "Contact", "contact").with_element(
            Element::new("wrap", ElementType::Container)
                .with_child(Element::new("send", ElementType::Button).with_content("Send")),
        );
        let source = generator.generate_page(&page, &PageOptions::default()).await.unwrap();
        assert!(source.starts_with("\"use client\";\n\nimport { Metadata } from \"next\";"));
    }

    #[tokio::test]
    async fn test_client_mode_has_loading_gate() {
        let generator = PageGenerator::new().unwrap();
        let page = PageConfig::new("p1", "Dashboard", "dashboard").with_render_mode(RenderMode::Client);
        let source = generator.generate_page(&page, &PageOptions::default()).await.unwrap();
        assert!(source.starts_with("\"use client\";"));
        assert!(source.contains("'use client';\n\nimport { useState, useEffect } from 'react';"));
        assert!(source.contains("if (isLoading) {\n    return <div>Loading...</div>;\n  }"));
    }

    #[tokio::test]
    async fn test_server_mode_is_async() {
        let generator = PageGenerator::new().unwrap();
        let page = PageConfig::new("p1", "Feed", "feed").with_render_mode(RenderMode::Server);
        let source = generator.generate_page(&page, &PageOptions::default()).await.unwrap();
        assert!(source.contains("export default async function Feed() {"));
        assert_eq!(route_config(&page), "export const dynamic = 'force-dynamic';");
    }

    #[tokio::test]
    async fn test_comment_like_text_formats() {
        let generator = PageGenerator::new().unwrap();
        for content in ["Use /* as a wildcard", "5` wide", "see http://example.com"] {
            let page = PageConfig::new("p1", "Docs", "docs")
                .with_element(Element::new("t", ElementType::Text).with_content(content));
            let source = generator.generate_page(&page, &PageOptions::default()).await;
            assert!(source.is_ok(), "{:?}: {:?}", content, source);
        }
    }

    #[test]
    fn test_imports() {
        let page = PageConfig::new("p1", "Gallery", "gallery").with_element(
            Element::new("box", ElementType::Container).with_child(Element::new("img", ElementType::Image)),
        );
        let css = PageOptions::default().with_animations(vec![fade("box")]);
        assert_eq!(
            collect_imports(&page, &css),
            "import { Metadata } from \"next\";\nimport Image from \"next/image\";"
        );

        let motion = css.with_backend(AnimationBackend::FramerMotion);
        assert!(collect_imports(&page, &motion).ends_with("import { motion } from \"framer-motion\";"));

        let none = PageOptions::default().with_backend(AnimationBackend::FramerMotion);
        assert!(!collect_imports(&page, &none).contains("framer-motion"));

        let styled = PageOptions::default().with_import("import \"./animations.css\";");
        assert!(collect_imports(&page, &styled).ends_with("\nimport \"./animations.css\";"));
    }

    #[test]
    fn test_mounts_render_after_layout() {
        let generator = PageGenerator::new().unwrap();
        let page = PageConfig::new("p1", "Home", "home")
            .with_element(Element::new("t", ElementType::Text).with_content("Hi"));
        let options = PageOptions::default().with_mount("<Animations />");
        let component = generator.generate_component(&page, &options).unwrap();
        assert!(component.contains("    <main>\n      <p data-element-id=\"t\">Hi</p>\n      <Animations />\n    </main>\n"));
    }

    #[test]
    fn test_metadata_entries() {
        let meta = PageMeta::new()
            .with("title", "Bob's Shop")
            .with("keywords", vec!["shoes".to_string(), "boots".to_string()]);
        let page = PageConfig::new("p1", "Shop", "shop").with_meta(meta);
        assert_eq!(
            generate_metadata(&page).unwrap(),
            "export const metadata: Metadata = {\n  title: 'Bob\\'s Shop',\n  keywords: [\"shoes\",\"boots\"],\n};"
        );

        let meta = PageMeta::new()
            .with("openGraph", MetaValue::Other(serde_json::json!({"type": "website"})))
            .with("authors", MetaValue::Other(serde_json::json!(["Ann", 2])));
        let page = PageConfig::new("p1", "Shop", "shop").with_meta(meta);
        assert_eq!(
            generate_metadata(&page).unwrap(),
            "export const metadata: Metadata = {\n  openGraph: '{\"type\":\"website\"}',\n  authors: [\"Ann\",2],\n};"
        );
    }

    #[tokio::test]
    async fn test_motion_bindings_on_page() {
        let generator = PageGenerator::new().unwrap();
        let page = PageConfig::new("p1", "Landing", "landing")
            .with_element(Element::new("hero", ElementType::Text).with_content("Welcome"));
        let options = PageOptions::default()
            .with_animations(vec![fade("hero")])
            .with_backend(AnimationBackend::FramerMotion);
        let source = generator.generate_page(&page, &options).await.unwrap();
        assert!(source.starts_with("\"use client\";"));
        assert!(source.contains("<motion.p data-element-id=\"hero\" variants={"));
        assert!(source.contains("</motion.p>"));
    }

    #[test]
    fn test_later_animation_wins() {
        let first = fade("hero");
        let second = Animation::new("pulse", "hero", AnimationType::Hover);
        let options = markup_options(&[first, second], AnimationBackend::FramerMotion).unwrap();
        match &options.bindings["hero"] {
            sitegen_animation::AnimationBinding::MotionProps(attrs) => {
                assert!(attrs.contains("whileHover=\"animate\""))
            }
            other => panic!("unexpected binding {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_layout_only_with_auth() {
        let generator = PageGenerator::new().unwrap();
        let page = PageConfig::new("p1", "My Cool Page!", "cool");
        assert!(generator.generate_page_layout(&page, false).await.unwrap().is_none());
        let layout = generator.generate_page_layout(&page, true).await.unwrap().unwrap();
        assert!(layout.starts_with("export default function MyCoolPageLayout({"));
        assert!(layout.contains("<div className=\"page-layout\">"));
    }

    struct BrokenFormatter;

    #[async_trait]
    impl SourceFormatter for BrokenFormatter {
        async fn format(&self, _source: &str, _language: SourceLanguage) -> std::result::Result<String, FormatError> {
            Err(FormatError::Failed("prettier crashed".to_string()))
        }
    }

    struct SlowFormatter;

    #[async_trait]
    impl SourceFormatter for SlowFormatter {
        async fn format(&self, source: &str, _language: SourceLanguage) -> std::result::Result<String, FormatError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(source.to_string())
        }
    }

    #[tokio::test]
    async fn test_formatter_error_propagates() {
        let generator = PageGenerator::new().unwrap().with_formatter(Arc::new(BrokenFormatter));
        let page = PageConfig::new("p1", "Home", "home");
        let err = generator.generate_page(&page, &PageOptions::default()).await.unwrap_err();
        assert!(matches!(
            err,
            crate::CodegenError::Format(FormatError::Failed(ref msg)) if msg == "prettier crashed"
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_format_timeout() {
        let generator = PageGenerator::new()
            .unwrap()
            .with_formatter(Arc::new(SlowFormatter))
            .with_format_timeout(Duration::from_millis(100));
        let page = PageConfig::new("p1", "Home", "home");
        let err = generator.generate_page(&page, &PageOptions::default()).await.unwrap_err();
        assert!(matches!(err, crate::CodegenError::Format(FormatError::TimedOut(_))));
    }
}
