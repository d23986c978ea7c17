//! JSX markup for element trees.

use crate::styles::map_styles;
use indexmap::IndexMap;
use sitegen_animation::AnimationBinding;
use sitegen_core::{Element, ElementType};

/// Options for markup generation.
#[derive(Debug, Clone, Default)]
pub struct MarkupOptions {
    /// Animation binding per element id.
    pub bindings: IndexMap<String, AnimationBinding>,
}

impl MarkupOptions {
    pub fn with_binding(mut self, element_id: impl Into<String>, binding: AnimationBinding) -> Self {
        self.bindings.insert(element_id.into(), binding);
        self
    }

    fn binding(&self, element: &Element) -> Option<&AnimationBinding> {
        self.bindings.get(&element.id)
    }
}

/// Base tag for an element type.
pub fn base_tag(element_type: ElementType) -> &'static str {
    match element_type {
        ElementType::Container | ElementType::Custom => "div",
        ElementType::Text => "p",
        ElementType::Image => "Image",
        ElementType::Button => "button",
        ElementType::Form => "form",
        ElementType::Input => "input",
    }
}

fn tag_for(element: &Element, binding: Option<&AnimationBinding>) -> String {
    let base = base_tag(element.element_type);
    match binding {
        Some(AnimationBinding::MotionProps(_)) if element.element_type != ElementType::Image => {
            format!("motion.{}", base)
        }
        _ => base.to_string(),
    }
}

/// Escape a value for a double-quoted JSX attribute.
pub fn escape_attribute(value: &str) -> String {
    value.replace('"', "&quot;").replace('\n', "&#10;")
}

/// Escape characters JSX would read as markup or expressions.
///
/// Backticks and a `/` opening `//` or `/*` become string expressions so
/// text never reads as a template literal or comment.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' => out.push_str("{'{'}"),
            '}' => out.push_str("{'}'}"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '`' => out.push_str("{'`'}"),
            '/' if matches!(chars.peek(), Some('/') | Some('*')) => out.push_str("{'/'}"),
            _ => out.push(c),
        }
    }
    out
}

fn attributes(element: &Element, binding: Option<&AnimationBinding>) -> Vec<String> {
    let mut attrs = Vec::new();

    let mut classes = map_styles(&element.styles);
    if let Some(AnimationBinding::ClassName(class)) = binding {
        if !classes.is_empty() {
            classes.push(' ');
        }
        classes.push_str(class);
    }
    if !classes.is_empty() {
        attrs.push(format!("className=\"{}\"", escape_attribute(&classes)));
    }

    attrs.push(format!("data-element-id=\"{}\"", escape_attribute(&element.id)));

    let prop = |key: &str| {
        element
            .props
            .get(key)
            .filter(|v| v.is_truthy())
            .map(|v| escape_attribute(&v.to_string()))
    };

    match element.element_type {
        ElementType::Image => {
            if let Some(src) = element.src.as_deref().filter(|s| !s.is_empty()) {
                attrs.push(format!("src=\"{}\"", escape_attribute(src)));
            }
            if let Some(alt) = element.alt.as_deref().filter(|s| !s.is_empty()) {
                attrs.push(format!("alt=\"{}\"", escape_attribute(alt)));
            }
            attrs.push("width={500}".to_string());
            attrs.push("height={300}".to_string());
        }
        ElementType::Input => {
            attrs.push(format!("type=\"{}\"", prop("type").unwrap_or_else(|| "text".to_string())));
            if let Some(placeholder) = prop("placeholder") {
                attrs.push(format!("placeholder=\"{}\"", placeholder));
            }
        }
        ElementType::Button => {
            attrs.push(format!("type=\"{}\"", prop("type").unwrap_or_else(|| "button".to_string())));
        }
        ElementType::Form => {
            attrs.push("onSubmit={(e) => e.preventDefault()}".to_string());
        }
        ElementType::Container | ElementType::Text | ElementType::Custom => {}
    }

    match binding {
        Some(AnimationBinding::MotionProps(props)) if element.element_type != ElementType::Image => {
            attrs.push(props.clone());
        }
        Some(AnimationBinding::ElementId(id)) => {
            attrs.push(format!("id=\"{}\"", escape_attribute(id)));
        }
        _ => {}
    }

    attrs
}

fn indent_lines(block: &str) -> String {
    block
        .lines()
        .map(|line| if line.is_empty() { String::new() } else { format!("  {}", line) })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_children(element: &Element, options: &MarkupOptions) -> Option<String> {
    if element.children.is_empty() {
        return None;
    }
    let markup = element
        .children
        .iter()
        .map(|child| generate_markup(child, options))
        .collect::<Vec<_>>()
        .join("\n");
    Some(markup)
}

/// Render `element` and its subtree as JSX.
///
/// Image and input elements are self-closing and never render content or
/// children. Elements with rendered children place each child on its own
/// line, indented by two spaces.
pub fn generate_markup(element: &Element, options: &MarkupOptions) -> String {
    let binding = options.binding(element);
    let tag = tag_for(element, binding);
    let attrs = attributes(element, binding).join(" ");

    if element.element_type.is_void() {
        return format!("<{} {} />", tag, attrs);
    }

    let inline = |text: String| format!("<{tag} {attrs}>{text}</{tag}>", tag = tag, attrs = attrs, text = text);
    let block = |children: String| {
        format!(
            "<{tag} {attrs}>\n{children}\n</{tag}>",
            tag = tag,
            attrs = attrs,
            children = indent_lines(&children)
        )
    };

    match element.element_type {
        ElementType::Text => inline(escape_text(element.content.as_deref().unwrap_or(""))),
        ElementType::Button => {
            let label = element.content.as_deref().filter(|c| !c.is_empty()).unwrap_or("Button");
            inline(escape_text(label))
        }
        ElementType::Custom => match element.props.get("component").filter(|c| c.is_truthy()) {
            Some(component) => inline(component.to_string()),
            None => render_children(element, options).map_or_else(|| inline(String::new()), block),
        },
        _ => render_children(element, options).map_or_else(|| inline(String::new()), block),
    }
}
