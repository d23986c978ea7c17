//! Page elements as produced by the editor canvas.

use crate::value::{deserialize_value_map, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Style declarations keyed by camelCase CSS property name, in editor order.
pub type StyleMap = IndexMap<String, Value>;

/// Type-specific element props (input `type`, `placeholder`, custom `component`, ...).
pub type PropMap = IndexMap<String, Value>;

/// The closed set of element kinds the canvas can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Container,
    Text,
    Image,
    Button,
    Form,
    Input,
    Custom,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Text => "text",
            Self::Image => "image",
            Self::Button => "button",
            Self::Form => "form",
            Self::Input => "input",
            Self::Custom => "custom",
        }
    }

    /// Element kinds that need client-side JavaScript.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Button | Self::Form | Self::Input)
    }

    /// Element kinds rendered as self-closing tags.
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Image | Self::Input)
    }
}

/// A node in the page tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, deserialize_with = "deserialize_value_map")]
    pub styles: StyleMap,
    #[serde(
        default,
        deserialize_with = "deserialize_value_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub props: PropMap,
    #[serde(default)]
    pub children: Vec<Element>,
    /// Id of the containing element. Derived from tree position; see
    /// [`crate::tree::sync_parent_ids`].
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl Element {
    /// Create a new root element.
    pub fn new(id: impl Into<String>, element_type: ElementType) -> Self {
        Self {
            id: id.into(),
            element_type,
            content: None,
            src: None,
            alt: None,
            styles: StyleMap::new(),
            props: PropMap::new(),
            children: Vec::new(),
            parent_id: None,
        }
    }

    /// Set the text payload.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set image source and alt text.
    pub fn with_image(mut self, src: impl Into<String>, alt: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self.alt = Some(alt.into());
        self
    }

    /// Add a style declaration.
    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    /// Add a prop.
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Add a child element, fixing up its parent id.
    pub fn with_child(mut self, mut child: Element) -> Self {
        child.parent_id = Some(self.id.clone());
        self.children.push(child);
        self
    }

    /// Get a prop as a string.
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(Value::as_str)
    }

    /// True if this element or any descendant matches `predicate`.
    pub fn any(&self, predicate: &impl Fn(&Element) -> bool) -> bool {
        predicate(self) || self.children.iter().any(|child| child.any(predicate))
    }

    /// Visit this element and all descendants in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Number of elements in this subtree, including self.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Element::subtree_len).sum::<usize>()
    }
}

/// True if any element in `elements` (at any depth) has type `element_type`.
pub fn contains_type(elements: &[Element], element_type: ElementType) -> bool {
    elements
        .iter()
        .any(|e| e.any(&|node: &Element| node.element_type == element_type))
}

/// True if any element in `elements` (at any depth) is interactive.
pub fn contains_interactive(elements: &[Element]) -> bool {
    elements
        .iter()
        .any(|e| e.any(&|node: &Element| node.element_type.is_interactive()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_builder() {
        let elem = Element::new("root", ElementType::Container)
            .with_style("display", "flex")
            .with_child(Element::new("label", ElementType::Text).with_content("Hello"));

        assert_eq!(elem.children.len(), 1);
        assert_eq!(elem.children[0].parent_id.as_deref(), Some("root"));
        assert_eq!(elem.subtree_len(), 2);
    }

    #[test]
    fn test_deserialize_editor_json() {
        let json = r#"{
            "id": "a1",
            "type": "input",
            "styles": { "width": "100%", "zIndex": 10 },
            "props": { "placeholder": "Email" },
            "children": [],
            "parentId": null
        }"#;
        let elem: Element = serde_json::from_str(json).unwrap();
        assert_eq!(elem.element_type, ElementType::Input);
        assert_eq!(elem.prop_str("placeholder"), Some("Email"));
        assert_eq!(elem.styles.get("zIndex"), Some(&Value::Number(10.0)));
        let keys: Vec<_> = elem.styles.keys().collect();
        assert_eq!(keys, ["width", "zIndex"]);
    }

    #[test]
    fn test_null_styles_and_props_skipped() {
        let json = r#"{
            "id": "a1",
            "type": "text",
            "styles": { "color": null, "fontSize": "16px" },
            "props": { "placeholder": null }
        }"#;
        let elem: Element = serde_json::from_str(json).unwrap();
        let keys: Vec<_> = elem.styles.keys().collect();
        assert_eq!(keys, ["fontSize"]);
        assert!(elem.props.is_empty());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let elem: Element = serde_json::from_str(r#"{"id": "t", "type": "text"}"#).unwrap();
        assert!(elem.styles.is_empty());
        assert!(elem.children.is_empty());
        assert!(elem.content.is_none());
    }

    #[test]
    fn test_contains_type_searches_depth() {
        let tree = vec![Element::new("a", ElementType::Container).with_child(
            Element::new("b", ElementType::Container)
                .with_child(Element::new("c", ElementType::Image)),
        )];
        assert!(contains_type(&tree, ElementType::Image));
        assert!(!contains_type(&tree, ElementType::Form));
        assert!(!contains_interactive(&tree));
    }
}
