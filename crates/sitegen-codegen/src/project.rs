//! Whole-site generation into a Next.js app directory tree.

use crate::error::{CodegenError, Result};
use crate::generators::page::{route_config, PageGenerator, PageOptions};
use crate::generators::{GeneratedFile, GeneratedProject};
use serde::{Deserialize, Serialize};
use sitegen_animation::{css, gsap, AnimationBackend};
use sitegen_core::page::is_valid_slug;
use sitegen_core::{Animation, CoreError, PageConfig};
use std::collections::HashSet;

/// Slug of the page served at the site root.
pub const INDEX_SLUG: &str = "index";

fn default_backend() -> AnimationBackend {
    AnimationBackend::Css
}

/// A site as exported from the builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub name: String,
    /// Package name, lowercase alphanumerics and hyphens.
    pub slug: String,
    /// Wrap each page in an auth layout.
    #[serde(default)]
    pub has_auth: bool,
    #[serde(default = "default_backend")]
    pub animation_backend: AnimationBackend,
    #[serde(default)]
    pub pages: Vec<PageConfig>,
    /// Animations for elements on any page.
    #[serde(default)]
    pub animations: Vec<Animation>,
}

impl SiteConfig {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            has_auth: false,
            animation_backend: default_backend(),
            pages: Vec::new(),
            animations: Vec::new(),
        }
    }

    pub fn with_page(mut self, page: PageConfig) -> Self {
        self.pages.push(page);
        self
    }

    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animations.push(animation);
        self
    }

    pub fn with_backend(mut self, backend: AnimationBackend) -> Self {
        self.animation_backend = backend;
        self
    }

    pub fn with_auth(mut self, has_auth: bool) -> Self {
        self.has_auth = has_auth;
        self
    }

    /// Animations whose element lives on `page`.
    pub fn animations_for(&self, page: &PageConfig) -> Vec<Animation> {
        let mut ids = HashSet::new();
        for element in &page.layout {
            element.walk(&mut |e| {
                ids.insert(e.id.as_str());
            });
        }
        self.animations
            .iter()
            .filter(|a| ids.contains(a.element_id.as_str()))
            .cloned()
            .collect()
    }
}

/// Directory of a page under `app/`; the index page lives at the root.
pub fn page_dir(page: &PageConfig) -> String {
    if page.slug == INDEX_SLUG {
        "app".to_string()
    } else {
        format!("app/{}", page.slug)
    }
}

/// Generates a [`GeneratedProject`] from a [`SiteConfig`].
pub struct ProjectGenerator {
    pages: PageGenerator,
}

impl ProjectGenerator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pages: PageGenerator::new()?,
        })
    }

    /// Use a configured page generator (custom formatter, timeout).
    pub fn with_page_generator(pages: PageGenerator) -> Self {
        Self { pages }
    }

    #[tracing::instrument(skip_all, fields(site = %site.slug, pages = site.pages.len()))]
    pub async fn generate(&self, site: &SiteConfig) -> Result<GeneratedProject> {
        if !is_valid_slug(&site.slug) {
            return Err(CoreError::InvalidSlug(site.slug.clone()).into());
        }

        if let Some(animation) = site.animations.iter().find(|a| !is_valid_animation_id(&a.id)) {
            return Err(CodegenError::InvalidAnimationId(animation.id.clone()));
        }

        let mut project = GeneratedProject::default();
        let mut slugs = HashSet::new();

        for page in &site.pages {
            page.validate()?;
            if !slugs.insert(page.slug.as_str()) {
                return Err(CodegenError::DuplicateSlug(page.slug.clone()));
            }

            let dir = page_dir(page);
            let animations = site.animations_for(page);
            let options = animation_hooks(
                PageOptions::default()
                    .with_animations(animations.clone())
                    .with_backend(site.animation_backend),
            );

            let mut source = self.pages.generate_page(page, &options).await?;
            let config = route_config(page);
            if !config.is_empty() {
                source.push('\n');
                source.push_str(config);
                source.push('\n');
            }
            project.files.push(GeneratedFile::new(format!("{}/page.tsx", dir), source));

            if let Some(layout) = self.pages.generate_page_layout(page, site.has_auth).await? {
                project.files.push(GeneratedFile::new(format!("{}/layout.tsx", dir), layout));
            }

            project.files.extend(animation_files(&dir, &animations, site.animation_backend));
            tracing::debug!(page = %page.slug, animations = animations.len(), "generated page files");
        }

        project
            .files
            .push(GeneratedFile::new("package.json", package_json(site)?));
        Ok(project)
    }
}

/// True if `id` is non-empty ASCII alphanumerics, hyphens and underscores.
pub fn is_valid_animation_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Stylesheet written next to a page when the CSS backend is used.
pub const ANIMATION_STYLESHEET: &str = "animations.css";

/// Private folder (not a route) holding a page's GSAP modules.
pub const ANIMATION_MODULE_DIR: &str = "_animations";

/// Wire the page to the files [`animation_files`] writes for it.
///
/// CSS pages import their stylesheet. GSAP pages mount a client component
/// that runs every animation module from an effect.
fn animation_hooks(options: PageOptions) -> PageOptions {
    if options.animations.is_empty() {
        return options;
    }
    match options.backend {
        AnimationBackend::Css => options.with_import(format!("import \"./{}\";", ANIMATION_STYLESHEET)),
        AnimationBackend::Gsap => options
            .with_import(format!("import Animations from \"./{}\";", ANIMATION_MODULE_DIR))
            .with_mount("<Animations />"),
        AnimationBackend::FramerMotion => options,
    }
}

/// Client component that runs each GSAP module once mounted.
fn gsap_runner(animations: &[Animation]) -> String {
    let mut imports = String::from("'use client';\n\nimport { useEffect } from 'react';\n");
    let mut calls = String::new();
    for (index, animation) in animations.iter().enumerate() {
        imports.push_str(&format!("import run{} from './{}';\n", index, animation.id));
        calls.push_str(&format!("    run{}();\n", index));
    }
    format!(
        "{}\nexport default function Animations() {{\n  useEffect(() => {{\n{}  }}, []);\n\n  return null;\n}}\n",
        imports, calls
    )
}

/// Standalone animation files for backends that need them.
///
/// CSS animations share one stylesheet per page. Each GSAP animation gets
/// its own module under [`ANIMATION_MODULE_DIR`], plus an `index.tsx` runner.
/// Framer Motion props are inlined in the page.
pub fn animation_files(dir: &str, animations: &[Animation], backend: AnimationBackend) -> Vec<GeneratedFile> {
    if animations.is_empty() {
        return Vec::new();
    }
    match backend {
        AnimationBackend::Css => {
            let stylesheet = animations
                .iter()
                .map(|a| css::compile(a).implementation)
                .collect::<Vec<_>>()
                .join("\n");
            vec![GeneratedFile::new(format!("{}/{}", dir, ANIMATION_STYLESHEET), stylesheet)]
        }
        AnimationBackend::Gsap => {
            let module_dir = format!("{}/{}", dir, ANIMATION_MODULE_DIR);
            let mut files: Vec<GeneratedFile> = animations
                .iter()
                .map(|a| {
                    GeneratedFile::new(
                        format!("{}/{}.ts", module_dir, a.id),
                        gsap::generate_module(a, &gsap::compile(a).code),
                    )
                })
                .collect();
            files.push(GeneratedFile::new(format!("{}/index.tsx", module_dir), gsap_runner(animations)));
            files
        }
        AnimationBackend::FramerMotion => Vec::new(),
    }
}

/// `package.json` with the runtime dependencies the backend needs.
pub fn package_json(site: &SiteConfig) -> Result<String> {
    let mut dependencies = serde_json::Map::new();
    dependencies.insert("next".into(), "^14.0.0".into());
    dependencies.insert("react".into(), "^18.2.0".into());
    dependencies.insert("react-dom".into(), "^18.2.0".into());
    if !site.animations.is_empty() {
        match site.animation_backend {
            AnimationBackend::FramerMotion => {
                dependencies.insert("framer-motion".into(), "^10.16.0".into());
            }
            AnimationBackend::Gsap => {
                dependencies.insert("gsap".into(), "^3.12.0".into());
            }
            AnimationBackend::Css => {}
        }
    }

    let manifest = serde_json::json!({
        "name": site.slug,
        "version": "0.1.0",
        "private": true,
        "scripts": {
            "dev": "next dev",
            "build": "next build",
            "start": "next start"
        },
        "dependencies": serde_json::Value::Object(dependencies)
    });
    let mut json = serde_json::to_string_pretty(&manifest)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitegen_core::{easing, AnimationType, Element, ElementType, RenderMode, Value};

    fn site() -> SiteConfig {
        SiteConfig::new("Acme", "acme")
            .with_page(
                PageConfig::new("p1", "Home", INDEX_SLUG)
                    .with_element(Element::new("hero", ElementType::Text).with_content("Hi")),
            )
            .with_page(PageConfig::new("p2", "Blog", "blog").with_render_mode(RenderMode::Incremental))
            .with_animation(
                Animation::new("fade-in", "hero", AnimationType::Entry).with_track(
                    "opacity",
                    easing::LINEAR,
                    [(0.0, Value::from(0.0)), (1000.0, Value::from(1.0))],
                ),
            )
    }

    #[tokio::test]
    async fn test_file_tree() {
        let project = ProjectGenerator::new().unwrap().generate(&site()).await.unwrap();
        let paths: Vec<&str> = project.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            ["app/page.tsx", "app/animations.css", "app/blog/page.tsx", "package.json"]
        );

        let home = project.file("app/page.tsx").unwrap();
        assert!(home.content.contains("className=\"element-hero\""));
        assert!(home.content.contains("\nimport \"./animations.css\";\n"));
        assert!(!project.file("app/blog/page.tsx").unwrap().content.contains("animations.css"));
        let blog = project.file("app/blog/page.tsx").unwrap();
        assert!(blog
            .content
            .ends_with("export const revalidate = 3600; // Revalidate at most once every hour\n"));
        let css = project.file("app/animations.css").unwrap();
        assert!(css.content.starts_with("@keyframes fade_in {"));
    }

    #[tokio::test]
    async fn test_auth_layouts_and_gsap_modules() {
        let site = site().with_auth(true).with_backend(AnimationBackend::Gsap);
        let project = ProjectGenerator::new().unwrap().generate(&site).await.unwrap();
        assert!(project.file("app/layout.tsx").is_some());
        assert!(project.file("app/blog/layout.tsx").is_some());
        let module = project.file("app/_animations/fade-in.ts").unwrap();
        assert!(module.content.contains("export default function runAnimation() {"));
        assert!(module.content.contains("document.querySelector('#element-hero')"));

        let runner = project.file("app/_animations/index.tsx").unwrap();
        assert!(runner.content.starts_with("'use client';\n"));
        assert!(runner.content.contains("import run0 from './fade-in';"));
        assert!(runner.content.contains("  useEffect(() => {\n    run0();\n  }, []);"));

        let home = project.file("app/page.tsx").unwrap();
        assert!(home.content.contains("id=\"element-hero\""));
        assert!(home.content.contains("import Animations from \"./_animations\";"));
        assert!(home.content.contains("      <Animations />\n    </main>"));
        assert!(project.file("app/blog/_animations/index.tsx").is_none());
    }

    #[tokio::test]
    async fn test_unsafe_animation_id_rejected() {
        let site = site().with_backend(AnimationBackend::Gsap).with_animation(Animation::new(
            "../../../escape",
            "hero",
            AnimationType::Entry,
        ));
        let err = ProjectGenerator::new().unwrap().generate(&site).await.unwrap_err();
        assert!(matches!(err, CodegenError::InvalidAnimationId(ref id) if id == "../../../escape"));
        assert!(is_valid_animation_id("fade-in_2"));
        assert!(!is_valid_animation_id("a.b"));
        assert!(!is_valid_animation_id(""));
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let site = site().with_page(PageConfig::new("p3", "Blog Again", "blog"));
        let err = ProjectGenerator::new().unwrap().generate(&site).await.unwrap_err();
        assert!(matches!(err, CodegenError::DuplicateSlug(ref slug) if slug == "blog"));
    }

    #[tokio::test]
    async fn test_invalid_page_rejected() {
        let site = SiteConfig::new("Acme", "acme").with_page(PageConfig::new("p1", "Bad", "Bad Slug"));
        let err = ProjectGenerator::new().unwrap().generate(&site).await.unwrap_err();
        assert!(matches!(err, CodegenError::Core(CoreError::InvalidSlug(_))));
    }

    #[test]
    fn test_package_json_dependencies() {
        let css: serde_json::Value = serde_json::from_str(&package_json(&site()).unwrap()).unwrap();
        assert_eq!(css["name"], "acme");
        assert!(css["dependencies"].get("framer-motion").is_none());

        let motion = site().with_backend(AnimationBackend::FramerMotion);
        let json: serde_json::Value = serde_json::from_str(&package_json(&motion).unwrap()).unwrap();
        assert_eq!(json["dependencies"]["framer-motion"], "^10.16.0");

        let gsap = site().with_backend(AnimationBackend::Gsap);
        let json: serde_json::Value = serde_json::from_str(&package_json(&gsap).unwrap()).unwrap();
        assert_eq!(json["dependencies"]["gsap"], "^3.12.0");
    }

    #[test]
    fn test_site_config_json() {
        let json = r#"{"name": "Acme", "slug": "acme", "pages": [{"id": "1", "name": "Home", "slug": "index"}]}"#;
        let site: SiteConfig = serde_json::from_str(json).unwrap();
        assert_eq!(site.animation_backend, AnimationBackend::Css);
        assert!(!site.has_auth);
        assert_eq!(page_dir(&site.pages[0]), "app");
    }

    #[test]
    fn test_write_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let project = GeneratedProject {
            files: vec![GeneratedFile::new("app/blog/page.tsx", "export default function Blog() {}\n")],
        };
        project.write_to(dir.path()).unwrap();
        let written = std::fs::read_to_string(dir.path().join("app/blog/page.tsx")).unwrap();
        assert_eq!(written, "export default function Blog() {}\n");
    }
}
