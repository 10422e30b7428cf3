//! # Page Elements
//!
//! A page is a single tree of [`Element`]s rooted at a `__body` node.
//! Container kinds own their children directly, so every node has exactly
//! one parent and the tree cannot contain cycles.

use crate::content::{Content, FormProps, Record, Styles};
use crate::kind::ElementKind;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Id of the page root
pub const ROOT_ID: &str = "__body";

/// Opaque element identifier, unique within a page
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn root() -> Self {
        Self(ROOT_ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT_ID
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ElementId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for ElementId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ElementId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A node in the page tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,

    #[serde(rename = "type")]
    pub kind: ElementKind,

    /// Label shown in the editor chrome. Not unique.
    pub name: String,

    #[serde(default)]
    pub styles: Styles,

    pub content: Content,

    /// Only meaningful on `form` elements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_props: Option<FormProps>,
}

/// Wire form of [`Element`] before `content` is read against `type`
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawElement {
    id: ElementId,
    #[serde(rename = "type")]
    kind: ElementKind,
    name: String,
    #[serde(default)]
    styles: Styles,
    content: serde_json::Value,
    #[serde(default)]
    form_props: Option<FormProps>,
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawElement::deserialize(deserializer)?;
        let content = Content::from_value(raw.kind, raw.content)
            .map_err(|err| D::Error::custom(format!("element {}: {}", raw.id, err)))?;

        Ok(Self {
            id: raw.id,
            kind: raw.kind,
            name: raw.name,
            styles: raw.styles,
            content,
            form_props: raw.form_props,
        })
    }
}

impl Element {
    /// Build a container element with no children
    pub fn container(id: impl Into<ElementId>, kind: ElementKind, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            styles: Styles::new(),
            content: Content::empty_children(),
            form_props: None,
        }
    }

    /// Build a leaf element; the kind is taken from the record
    pub fn leaf(id: impl Into<ElementId>, name: impl Into<String>, record: Record) -> Self {
        Self {
            id: id.into(),
            kind: record.kind(),
            name: name.into(),
            styles: Styles::new(),
            content: Content::Record(record),
            form_props: None,
        }
    }

    /// A fresh page root
    pub fn body() -> Self {
        Self::container(ROOT_ID, ElementKind::Body, "Body")
    }

    /// The "nothing selected" sentinel
    pub fn empty() -> Self {
        Self::container(ElementId::default(), ElementKind::Empty, "")
    }

    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<crate::StyleValue>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.content = Content::Children(children);
        self
    }

    pub fn with_form_props(mut self, form_props: FormProps) -> Self {
        self.form_props = Some(form_props);
        self
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    pub fn is_empty_sentinel(&self) -> bool {
        self.kind == ElementKind::Empty
    }

    pub fn children(&self) -> Option<&[Element]> {
        self.content.as_children()
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Element>> {
        match &mut self.content {
            Content::Children(children) => Some(children),
            Content::Record(_) => None,
        }
    }

    pub fn record(&self) -> Option<&Record> {
        self.content.as_record()
    }

    /// True when `content` has the shape `kind` requires.
    /// Only checks this node, not its descendants.
    pub fn shape_matches(&self) -> bool {
        match (&self.content, self.kind) {
            (Content::Children(children), ElementKind::Empty) => children.is_empty(),
            (Content::Children(_), kind) => kind.is_container(),
            (Content::Record(record), kind) => record.kind() == kind,
        }
    }

    /// Depth-first search for `id`, including `self`
    pub fn find(&self, id: &str) -> Option<&Element> {
        if self.id == id {
            return Some(self);
        }

        self.children()?.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id == id {
            return Some(self);
        }

        self.children_mut()?
            .iter_mut()
            .find_map(|child| child.find_mut(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// The container directly holding `id`
    pub fn parent_of(&self, id: &str) -> Option<&Element> {
        let children = self.children()?;
        if children.iter().any(|child| child.id == id) {
            return Some(self);
        }

        children.iter().find_map(|child| child.parent_of(id))
    }

    /// Ids from `self` down to `id`, both ends included
    pub fn path_to(&self, id: &str) -> Option<Vec<ElementId>> {
        if self.id == id {
            return Some(vec![self.id.clone()]);
        }

        let mut path = self
            .children()?
            .iter()
            .find_map(|child| child.path_to(id))?;
        path.insert(0, self.id.clone());
        Some(path)
    }

    /// Number of nodes below `self`
    pub fn descendant_count(&self) -> usize {
        self.children()
            .map(|children| children.iter().map(|c| 1 + c.descendant_count()).sum())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Record;

    fn text(id: &str, value: &str) -> Element {
        Element::leaf(id, "Text", Record::Text { inner_text: value.to_string() })
    }

    fn sample_tree() -> Element {
        Element::body().with_children(vec![
            Element::container("hero", ElementKind::Section, "Hero").with_children(vec![
                text("title", "Welcome"),
                Element::container("cols", ElementKind::TwoColumn, "Columns")
                    .with_children(vec![text("left", "L"), text("right", "R")]),
            ]),
            text("footer", "bye"),
        ])
    }

    #[test]
    fn test_find_nested() {
        let tree = sample_tree();
        assert_eq!(tree.find("right").map(|e| e.name.as_str()), Some("Text"));
        assert!(tree.find("missing").is_none());
        assert!(tree.contains(ROOT_ID));
    }

    #[test]
    fn test_parent_and_path() {
        let tree = sample_tree();
        assert_eq!(tree.parent_of("left").map(|e| e.id.as_str()), Some("cols"));
        assert_eq!(tree.parent_of("footer").map(|e| e.id.as_str()), Some(ROOT_ID));
        assert!(tree.parent_of(ROOT_ID).is_none());

        let path = tree.path_to("left").unwrap();
        let ids: Vec<&str> = path.iter().map(ElementId::as_str).collect();
        assert_eq!(ids, vec![ROOT_ID, "hero", "cols", "left"]);
    }

    #[test]
    fn test_descendant_count() {
        assert_eq!(sample_tree().descendant_count(), 6);
        assert_eq!(Element::body().descendant_count(), 0);
    }

    #[test]
    fn test_shape_matches() {
        assert!(text("a", "hi").shape_matches());
        assert!(Element::body().shape_matches());
        assert!(Element::empty().shape_matches());

        let mut broken = text("b", "hi");
        broken.kind = ElementKind::Button;
        assert!(!broken.shape_matches());

        let mut leaf_with_children = Element::container("c", ElementKind::Container, "C");
        leaf_with_children.kind = ElementKind::Image;
        assert!(!leaf_with_children.shape_matches());
    }

    #[test]
    fn test_element_json_shape() {
        let json = serde_json::json!({
            "id": "a",
            "type": "text",
            "name": "Text",
            "styles": { "color": "blue" },
            "content": { "innerText": "hi" }
        });

        let element: Element = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(element.kind, ElementKind::Text);
        assert_eq!(element.record().and_then(Record::inner_text), Some("hi"));
        assert!(element.form_props.is_none());
        assert_eq!(serde_json::to_value(&element).unwrap(), json);
    }

    #[test]
    fn test_nested_element_json() {
        let json = serde_json::json!({
            "id": "hero",
            "type": "section",
            "name": "Hero",
            "content": [
                { "id": "hr", "type": "divider", "name": "Divider", "content": {} },
                { "id": "cta", "type": "button", "name": "CTA", "content": { "innerText": "Go" } }
            ]
        });

        let element: Element = serde_json::from_value(json).unwrap();
        let children = element.children().unwrap();
        assert_eq!(children[0].record(), Some(&Record::Divider));
        assert_eq!(
            children[1].record(),
            Some(&Record::Button { inner_text: "Go".to_string(), href: None })
        );
    }

    #[test]
    fn test_element_json_names_bad_node() {
        let json = serde_json::json!({
            "id": "hero",
            "type": "section",
            "name": "Hero",
            "content": [{ "id": "t", "type": "text", "name": "Text", "content": [] }]
        });

        let err = serde_json::from_value::<Element>(json).unwrap_err();
        assert!(err.to_string().contains("element t"));
    }
}
