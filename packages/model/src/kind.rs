use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Whether an element kind holds child elements or a typed record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KindCategory {
    Container,
    Record,
}

/// Closed set of element kinds.
///
/// The serialized tag is the same string the drag palette emits as its
/// `componentType`, so `"2Col".parse::<ElementKind>()` resolves a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementKind {
    #[serde(rename = "__body")]
    Body,
    #[serde(rename = "container")]
    Container,
    #[serde(rename = "section")]
    Section,
    #[serde(rename = "2Col")]
    TwoColumn,
    #[serde(rename = "3Col")]
    ThreeColumn,
    #[serde(rename = "form")]
    Form,
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "link")]
    Link,
    #[serde(rename = "button")]
    Button,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "list")]
    List,
    #[serde(rename = "tabs")]
    Tabs,
    #[serde(rename = "spacer")]
    Spacer,
    #[serde(rename = "divider")]
    Divider,
    #[serde(rename = "input")]
    Input,
    #[serde(rename = "textarea")]
    Textarea,
    #[serde(rename = "checkbox")]
    Checkbox,
    #[serde(rename = "select")]
    Select,
    #[serde(rename = "icon")]
    Icon,
    #[serde(rename = "embed")]
    Embed,
    #[serde(rename = "countdown")]
    Countdown,
    /// Marker kind of the "nothing selected" sentinel. Never part of a tree.
    #[serde(rename = "__empty")]
    Empty,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unknown element kind: {0}")]
pub struct UnknownKind(pub String);

impl ElementKind {
    /// Every kind a user can place on a page, in palette order
    pub const PLACEABLE: [ElementKind; 21] = [
        ElementKind::Container,
        ElementKind::Section,
        ElementKind::TwoColumn,
        ElementKind::ThreeColumn,
        ElementKind::Form,
        ElementKind::Text,
        ElementKind::Link,
        ElementKind::Button,
        ElementKind::Image,
        ElementKind::Video,
        ElementKind::List,
        ElementKind::Tabs,
        ElementKind::Spacer,
        ElementKind::Divider,
        ElementKind::Input,
        ElementKind::Textarea,
        ElementKind::Checkbox,
        ElementKind::Select,
        ElementKind::Icon,
        ElementKind::Embed,
        ElementKind::Countdown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Body => "__body",
            ElementKind::Container => "container",
            ElementKind::Section => "section",
            ElementKind::TwoColumn => "2Col",
            ElementKind::ThreeColumn => "3Col",
            ElementKind::Form => "form",
            ElementKind::Text => "text",
            ElementKind::Link => "link",
            ElementKind::Button => "button",
            ElementKind::Image => "image",
            ElementKind::Video => "video",
            ElementKind::List => "list",
            ElementKind::Tabs => "tabs",
            ElementKind::Spacer => "spacer",
            ElementKind::Divider => "divider",
            ElementKind::Input => "input",
            ElementKind::Textarea => "textarea",
            ElementKind::Checkbox => "checkbox",
            ElementKind::Select => "select",
            ElementKind::Icon => "icon",
            ElementKind::Embed => "embed",
            ElementKind::Countdown => "countdown",
            ElementKind::Empty => "__empty",
        }
    }

    pub fn category(&self) -> KindCategory {
        match self {
            ElementKind::Body
            | ElementKind::Container
            | ElementKind::Section
            | ElementKind::TwoColumn
            | ElementKind::ThreeColumn
            | ElementKind::Form
            | ElementKind::Empty => KindCategory::Container,
            _ => KindCategory::Record,
        }
    }

    pub fn is_container(&self) -> bool {
        self.category() == KindCategory::Container
    }

    /// Kinds that may only exist in one fixed place (root, or nowhere)
    pub fn is_reserved(&self) -> bool {
        matches!(self, ElementKind::Body | ElementKind::Empty)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PLACEABLE_AND_RESERVED
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

const PLACEABLE_AND_RESERVED: [ElementKind; 23] = {
    let p = ElementKind::PLACEABLE;
    [
        ElementKind::Body,
        ElementKind::Empty,
        p[0], p[1], p[2], p[3], p[4], p[5], p[6], p[7], p[8], p[9], p[10],
        p[11], p[12], p[13], p[14], p[15], p[16], p[17], p[18], p[19], p[20],
    ]
};
