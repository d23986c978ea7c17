//! Page configuration.

use crate::element::Element;
use crate::errors::{CoreError, Result};
use crate::tree;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How Next.js should render a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RenderMode {
    #[default]
    Static,
    Server,
    Incremental,
    Client,
}

/// A metadata value: a list (keywords), a scalar, or any other JSON the
/// editor stored under a free-form key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    List(Vec<String>),
    Text(String),
    Number(f64),
    Bool(bool),
    Other(serde_json::Value),
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        MetaValue::Text(s.to_string())
    }
}

impl From<Vec<String>> for MetaValue {
    fn from(items: Vec<String>) -> Self {
        MetaValue::List(items)
    }
}

/// SEO metadata for a page, in the order the editor stored it.
///
/// Known keys are `title`, `description`, `ogImage`, `canonical`,
/// `keywords` and `robots`; anything else is carried through as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageMeta {
    fields: IndexMap<String, MetaValue>,
}

impl PageMeta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, keeping its original position if already present.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.fields.get(key)
    }

    pub fn title(&self) -> Option<&str> {
        match self.fields.get("title") {
            Some(MetaValue::Text(title)) => Some(title),
            _ => None,
        }
    }

    pub fn keywords(&self) -> Option<&[String]> {
        match self.fields.get("keywords") {
            Some(MetaValue::List(keywords)) => Some(keywords),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Present entries as `(key, value)` pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }
}

/// A page as stored by the builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub render_mode: RenderMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
    #[serde(default)]
    pub layout: Vec<Element>,
    #[serde(default)]
    pub is_published: bool,
}

/// True if `slug` is non-empty lowercase alphanumerics and hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

impl PageConfig {
    pub fn new(id: impl Into<String>, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            render_mode: RenderMode::Static,
            meta: None,
            layout: Vec::new(),
            is_published: false,
        }
    }

    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = mode;
        self
    }

    pub fn with_meta(mut self, meta: PageMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.layout.push(element);
        self
    }

    /// Parse a page from editor JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the invariants the generators rely on: slug format, unique
    /// element ids and parent ids that agree with the tree.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_slug(&self.slug) {
            return Err(CoreError::InvalidSlug(self.slug.clone()));
        }
        tree::collect_ids(&self.layout)?;
        tree::check_parent_ids(&self.layout)
    }
}
