//! Template engine and the Next.js page templates.

use crate::error::{CodegenError, Result};
use handlebars::Handlebars;
use serde::Serialize;
use sitegen_core::RenderMode;

/// The `<main>` wrapper shared by every page template. An empty layout
/// renders as `<main></main>`.
macro_rules! main_block {
    () => {
        "    <main>{{#if markup}}\n{{indent markup 6}}\n    {{/if}}</main>"
    };
}

pub const STATIC_PAGE: &str = concat!(
    "export default function {{component_name name}}() {\n",
    "  return (\n",
    main_block!(),
    "\n  );\n",
    "}\n",
);

pub const SERVER_PAGE: &str = concat!(
    "export default async function {{component_name name}}() {\n",
    "  // Server-side data fetching goes here\n",
    "\n",
    "  return (\n",
    main_block!(),
    "\n  );\n",
    "}\n",
);

pub const INCREMENTAL_PAGE: &str = concat!(
    "export default function {{component_name name}}({ data }) {\n",
    "  return (\n",
    main_block!(),
    "\n  );\n",
    "}\n",
    "\n",
    "export async function getStaticProps() {\n",
    "  return {\n",
    "    props: {\n",
    "      data: {},\n",
    "    },\n",
    "    revalidate: 3600,\n",
    "  };\n",
    "}\n",
    "\n",
    "export async function getStaticPaths() {\n",
    "  return {\n",
    "    paths: [],\n",
    "    fallback: 'blocking',\n",
    "  };\n",
    "}\n",
);

pub const CLIENT_PAGE: &str = concat!(
    "'use client';\n",
    "\n",
    "import { useState, useEffect } from 'react';\n",
    "\n",
    "export default function {{component_name name}}() {\n",
    "  const [isLoading, setIsLoading] = useState(true);\n",
    "\n",
    "  useEffect(() => {\n",
    "    setIsLoading(false);\n",
    "  }, []);\n",
    "\n",
    "  if (isLoading) {\n",
    "    return <div>Loading...</div>;\n",
    "  }\n",
    "\n",
    "  return (\n",
    main_block!(),
    "\n  );\n",
    "}\n",
);

pub const PAGE_LAYOUT: &str = concat!(
    "export default function {{component_name name}}Layout({\n",
    "  children,\n",
    "}: {\n",
    "  children: React.ReactNode;\n",
    "}) {\n",
    "  return (\n",
    "    <div className=\"page-layout\">\n",
    "      {/* Auth check could be added here */}\n",
    "      {children}\n",
    "    </div>\n",
    "  );\n",
    "}\n",
);

/// Registered template name for a render mode.
pub fn page_template(mode: RenderMode) -> &'static str {
    match mode {
        RenderMode::Static => "page_static",
        RenderMode::Server => "page_server",
        RenderMode::Incremental => "page_incremental",
        RenderMode::Client => "page_client",
    }
}

pub const LAYOUT_TEMPLATE: &str = "page_layout";

/// Template engine using Handlebars.
///
/// Output is never HTML-escaped; generated source is escaped where it is
/// built.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Create a new template engine.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);

        Self::register_helpers(&mut handlebars);

        Self { handlebars }
    }

    /// Create an engine with the page and layout templates registered.
    pub fn with_page_templates() -> Result<Self> {
        let mut engine = Self::new();
        engine.register_template(page_template(RenderMode::Static), STATIC_PAGE)?;
        engine.register_template(page_template(RenderMode::Server), SERVER_PAGE)?;
        engine.register_template(page_template(RenderMode::Incremental), INCREMENTAL_PAGE)?;
        engine.register_template(page_template(RenderMode::Client), CLIENT_PAGE)?;
        engine.register_template(LAYOUT_TEMPLATE, PAGE_LAYOUT)?;
        Ok(engine)
    }

    /// Register a template.
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(CodegenError::InvalidTemplate)?;
        Ok(())
    }

    /// Render a template.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.handlebars
            .render(name, data)
            .map_err(CodegenError::TemplateError)
    }

    /// Render a template string directly.
    pub fn render_string<T: Serialize>(&self, template: &str, data: &T) -> Result<String> {
        self.handlebars
            .render_template(template, data)
            .map_err(CodegenError::TemplateError)
    }

    fn register_helpers(handlebars: &mut Handlebars) {
        // Component name helper
        handlebars.register_helper(
            "component_name",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let param = h
                        .param(0)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or("");
                    out.write(&component_name(param))?;
                    Ok(())
                },
            ),
        );

        // Indent helper
        handlebars.register_helper(
            "indent",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let content = h
                        .param(0)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or("");
                    let spaces = h
                        .param(1)
                        .and_then(|v| v.value().as_u64())
                        .unwrap_or(2) as usize;
                    out.write(&indent(content, spaces))?;
                    Ok(())
                },
            ),
        );
    }
}

impl<'a> Default for TemplateEngine<'a> {
    fn default() -> Self {
        Self::new()
    }
}

/// Indent every non-blank line of `content` by `spaces`.
pub fn indent(content: &str, spaces: usize) -> String {
    let indent = " ".repeat(spaces);
    content
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// React component name for a page name.
///
/// Splits on anything that is not an ASCII letter or digit and capitalizes
/// the first letter of each token: `"My Cool Page!"` becomes `MyCoolPage`.
/// Names that would not form an identifier (empty, or starting with a
/// digit) are prefixed with `Page`.
pub fn component_name(name: &str) -> String {
    let joined: String = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| {
            let mut chars = token.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();

    match joined.chars().next() {
        Some(first) if !first.is_ascii_digit() => joined,
        _ => format!("Page{}", joined),
    }
}
