//! # Element Content
//!
//! On the wire `content` is untagged: a list of children for container kinds,
//! or the bare fields of the record for leaf kinds (`{"innerText": "hi"}`).
//! The element's `type` decides which one is read.

use crate::element::Element;
use crate::kind::ElementKind;
use serde::de::Error as _;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Presentation property value, passed to renderers untouched.
/// Whole numbers stay whole so `16` is written back as `16`, not `16.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Integer(n) => write!(f, "{}", n),
            StyleValue::Float(n) => write!(f, "{}", n),
            StyleValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Integer(value.into())
    }
}

impl From<i64> for StyleValue {
    fn from(value: i64) -> Self {
        StyleValue::Integer(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Float(value)
    }
}

/// Property name → value. Ordered so outlines and snapshots are stable.
pub type Styles = BTreeMap<String, StyleValue>;

/// Either the children of a container or the fields of a leaf
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Children(Vec<Element>),
    Record(Record),
}

impl Content {
    pub fn empty_children() -> Self {
        Content::Children(Vec::new())
    }

    pub fn as_children(&self) -> Option<&[Element]> {
        match self {
            Content::Children(children) => Some(children),
            Content::Record(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Content::Record(record) => Some(record),
            Content::Children(_) => None,
        }
    }

    /// Read wire content for an element of `kind`
    pub fn from_value(kind: ElementKind, value: Value) -> Result<Self, serde_json::Error> {
        if !kind.is_container() {
            return Record::from_fields(kind, value).map(Content::Record);
        }

        match value {
            Value::Array(_) => serde_json::from_value(value).map(Content::Children),
            _ => Err(serde_json::Error::custom(format!(
                "content of a `{}` element must be a list of elements",
                kind
            ))),
        }
    }
}

impl Serialize for Content {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Content::Children(children) => children.serialize(serializer),
            Content::Record(record) => record.to_fields().serialize(serializer),
        }
    }
}

impl From<Record> for Content {
    fn from(record: Record) -> Self {
        Content::Record(record)
    }
}

impl From<Vec<Element>> for Content {
    fn from(children: Vec<Element>) -> Self {
        Content::Children(children)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListType {
    Ordered,
    Unordered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub label: String,
    pub body: String,
}

/// Typed fields of a leaf element. One variant per record kind.
///
/// Serde on `Record` itself is externally tagged (`{"text": {...}}`);
/// element content uses [`Record::from_fields`] and [`Record::to_fields`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Record {
    Text {
        inner_text: String,
    },
    Link {
        inner_text: String,
        href: String,
    },
    Button {
        inner_text: String,
        #[serde(default)]
        href: Option<String>,
    },
    Image {
        src: String,
        #[serde(default)]
        alt: String,
    },
    Video {
        src: String,
        #[serde(default)]
        autoplay: bool,
    },
    List {
        items: Vec<String>,
        list_type: ListType,
    },
    Tabs {
        tabs: Vec<Tab>,
    },
    Spacer,
    Divider,
    Input {
        field_name: String,
        #[serde(default)]
        placeholder: String,
        input_type: String,
        #[serde(default)]
        required: bool,
    },
    Textarea {
        field_name: String,
        #[serde(default)]
        placeholder: String,
        rows: u32,
    },
    Checkbox {
        field_name: String,
        label: String,
        #[serde(default)]
        checked: bool,
    },
    Select {
        field_name: String,
        options: Vec<String>,
    },
    Icon {
        name: String,
    },
    Embed {
        html: String,
    },
    Countdown {
        target: String,
        #[serde(default)]
        expired_text: String,
    },
}

impl Record {
    /// The element kind this record is the content of
    pub fn kind(&self) -> ElementKind {
        match self {
            Record::Text { .. } => ElementKind::Text,
            Record::Link { .. } => ElementKind::Link,
            Record::Button { .. } => ElementKind::Button,
            Record::Image { .. } => ElementKind::Image,
            Record::Video { .. } => ElementKind::Video,
            Record::List { .. } => ElementKind::List,
            Record::Tabs { .. } => ElementKind::Tabs,
            Record::Spacer => ElementKind::Spacer,
            Record::Divider => ElementKind::Divider,
            Record::Input { .. } => ElementKind::Input,
            Record::Textarea { .. } => ElementKind::Textarea,
            Record::Checkbox { .. } => ElementKind::Checkbox,
            Record::Select { .. } => ElementKind::Select,
            Record::Icon { .. } => ElementKind::Icon,
            Record::Embed { .. } => ElementKind::Embed,
            Record::Countdown { .. } => ElementKind::Countdown,
        }
    }

    /// Build the record of `kind` from its bare fields.
    /// `Spacer` and `Divider` carry no fields and accept `{}` or `null`.
    pub fn from_fields(kind: ElementKind, fields: Value) -> Result<Self, serde_json::Error> {
        if kind.is_container() {
            return Err(serde_json::Error::custom(format!(
                "`{}` elements hold children, not fields",
                kind
            )));
        }

        let tagged = match (kind, fields) {
            (ElementKind::Spacer | ElementKind::Divider, Value::Null | Value::Object(_)) => {
                Value::String(kind.as_str().to_string())
            }
            (_, Value::Object(fields)) => {
                let mut tagged = Map::new();
                tagged.insert(kind.as_str().to_string(), Value::Object(fields));
                Value::Object(tagged)
            }
            (_, other) => {
                return Err(serde_json::Error::custom(format!(
                    "content of a `{}` element must be an object, found {}",
                    kind, other
                )))
            }
        };

        serde_json::from_value(tagged)
    }

    /// The bare fields of the record, as written in element content
    pub fn to_fields(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(mut tagged)) => match tagged.remove(self.kind().as_str()) {
                Some(Value::Object(fields)) => fields,
                _ => Map::new(),
            },
            _ => Map::new(),
        }
    }

    /// Visible text of the record, if it has any
    pub fn inner_text(&self) -> Option<&str> {
        match self {
            Record::Text { inner_text }
            | Record::Link { inner_text, .. }
            | Record::Button { inner_text, .. } => Some(inner_text),
            Record::Checkbox { label, .. } => Some(label),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FormMethod {
    Get,
    #[default]
    Post,
}

/// Form-level settings. Kept beside `content` since a form's content is its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormProps {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub method: FormMethod,
    pub submit_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text_color: Option<String>,
}

impl Default for FormProps {
    fn default() -> Self {
        Self {
            action: String::new(),
            method: FormMethod::Post,
            submit_label: "Submit".to_string(),
            button_color: None,
            button_text_color: None,
        }
    }
}
