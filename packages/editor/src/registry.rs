//! # Kind Registry
//!
//! Maps each element kind to what the editor needs to know about it: the
//! default label, how to build a fresh instance when it is dropped from the
//! palette, and a one-line summary for outlines.

use crate::actions::EditError;
use pagebuilder_model::{
    Content, Element, ElementKind, FormProps, IDGenerator, ListType, Record, Styles, Tab,
};
use std::collections::BTreeMap;
use std::fmt;

/// Builds default content for a kind; may take ids for pre-filled children
pub type ContentTemplate = fn(ElementKind, &mut IDGenerator) -> Content;

/// One-line description of an element
pub type Summarizer = fn(&Element) -> String;

#[derive(Clone, Copy)]
pub struct KindSpec {
    pub kind: ElementKind,
    pub label: &'static str,
    pub template: ContentTemplate,
    pub default_styles: fn() -> Styles,
    pub summarize: Summarizer,
}

impl fmt::Debug for KindSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindSpec")
            .field("kind", &self.kind)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct KindRegistry {
    specs: BTreeMap<ElementKind, KindSpec>,
}

impl KindRegistry {
    pub fn empty() -> Self {
        Self { specs: BTreeMap::new() }
    }

    /// Registry with every placeable kind
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for kind in ElementKind::PLACEABLE {
            registry.register(builtin_spec(kind));
        }
        registry
    }

    /// Add or replace the spec for `spec.kind`
    pub fn register(&mut self, spec: KindSpec) -> Option<KindSpec> {
        self.specs.insert(spec.kind, spec)
    }

    pub fn get(&self, kind: ElementKind) -> Option<&KindSpec> {
        self.specs.get(&kind)
    }

    /// Registered specs in palette order
    pub fn kinds(&self) -> impl Iterator<Item = &KindSpec> {
        self.specs.values()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Build a fresh element from a palette `componentType` tag
    pub fn instantiate(&self, component_type: &str, ids: &mut IDGenerator) -> Result<Element, EditError> {
        let kind: ElementKind = component_type.parse()?;
        let spec = self
            .get(kind)
            .ok_or(EditError::ReservedKind(kind))?;

        let mut element = Element {
            id: ids.new_id().into(),
            kind,
            name: spec.label.to_string(),
            styles: (spec.default_styles)(),
            content: (spec.template)(kind, ids),
            form_props: None,
        };

        if kind == ElementKind::Form {
            element.form_props = Some(FormProps::default());
        }

        Ok(element)
    }

    pub fn summarize(&self, element: &Element) -> Option<String> {
        self.get(element.kind).map(|spec| (spec.summarize)(element))
    }
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_spec(kind: ElementKind) -> KindSpec {
    let label = match kind {
        ElementKind::Container => "Container",
        ElementKind::Section => "Section",
        ElementKind::TwoColumn => "Two Columns",
        ElementKind::ThreeColumn => "Three Columns",
        ElementKind::Form => "Form",
        ElementKind::Text => "Text",
        ElementKind::Link => "Link",
        ElementKind::Button => "Button",
        ElementKind::Image => "Image",
        ElementKind::Video => "Video",
        ElementKind::List => "List",
        ElementKind::Tabs => "Tabs",
        ElementKind::Spacer => "Spacer",
        ElementKind::Divider => "Divider",
        ElementKind::Input => "Input",
        ElementKind::Textarea => "Text Area",
        ElementKind::Checkbox => "Checkbox",
        ElementKind::Select => "Select",
        ElementKind::Icon => "Icon",
        ElementKind::Embed => "Embed",
        ElementKind::Countdown => "Countdown",
        ElementKind::Body | ElementKind::Empty => "",
    };

    let default_styles: fn() -> Styles = if kind.is_container() {
        container_styles
    } else {
        Styles::new
    };

    KindSpec {
        kind,
        label,
        template: builtin_content,
        default_styles,
        summarize,
    }
}

fn builtin_content(kind: ElementKind, ids: &mut IDGenerator) -> Content {
    let record = match kind {
        ElementKind::TwoColumn => return columns(ids, 2),
        ElementKind::ThreeColumn => return columns(ids, 3),
        ElementKind::Body
        | ElementKind::Empty
        | ElementKind::Container
        | ElementKind::Section
        | ElementKind::Form => return Content::empty_children(),
        ElementKind::Text => Record::Text {
            inner_text: "Text Element".to_string(),
        },
        ElementKind::Link => Record::Link {
            inner_text: "Link Element".to_string(),
            href: "#".to_string(),
        },
        ElementKind::Button => Record::Button {
            inner_text: "Click me".to_string(),
            href: None,
        },
        ElementKind::Image => Record::Image {
            src: String::new(),
            alt: String::new(),
        },
        ElementKind::Video => Record::Video {
            src: String::new(),
            autoplay: false,
        },
        ElementKind::List => Record::List {
            items: vec!["First item".to_string(), "Second item".to_string()],
            list_type: ListType::Unordered,
        },
        ElementKind::Tabs => Record::Tabs {
            tabs: vec![
                Tab { label: "Tab 1".to_string(), body: String::new() },
                Tab { label: "Tab 2".to_string(), body: String::new() },
            ],
        },
        ElementKind::Spacer => Record::Spacer,
        ElementKind::Divider => Record::Divider,
        ElementKind::Input => Record::Input {
            field_name: "field".to_string(),
            placeholder: String::new(),
            input_type: "text".to_string(),
            required: false,
        },
        ElementKind::Textarea => Record::Textarea {
            field_name: "message".to_string(),
            placeholder: String::new(),
            rows: 4,
        },
        ElementKind::Checkbox => Record::Checkbox {
            field_name: "agree".to_string(),
            label: "I agree".to_string(),
            checked: false,
        },
        ElementKind::Select => Record::Select {
            field_name: "choice".to_string(),
            options: vec!["Option 1".to_string()],
        },
        ElementKind::Icon => Record::Icon { name: "star".to_string() },
        ElementKind::Embed => Record::Embed { html: String::new() },
        ElementKind::Countdown => Record::Countdown {
            target: String::new(),
            expired_text: "Offer expired".to_string(),
        },
    };

    Content::Record(record)
}

fn container_styles() -> Styles {
    let mut styles = Styles::new();
    styles.insert("display".to_string(), "flex".into());
    styles.insert("width".to_string(), "100%".into());
    styles
}

fn columns(ids: &mut IDGenerator, count: usize) -> Content {
    let children = (0..count)
        .map(|_| {
            let mut column = Element::container(ids.new_id(), ElementKind::Container, "Container");
            column.styles = container_styles();
            column
        })
        .collect();
    Content::Children(children)
}

fn summarize(element: &Element) -> String {
    match element.record() {
        None => match element.children() {
            Some(children) => format!("{} children", children.len()),
            None => String::new(),
        },
        Some(record) => match record {
            Record::Text { inner_text } | Record::Button { inner_text, .. } => {
                format!("{:?}", inner_text)
            }
            Record::Link { inner_text, href } => format!("{:?} -> {}", inner_text, href),
            Record::Image { src, .. } | Record::Video { src, .. } => src.clone(),
            Record::List { items, list_type } => format!("{} items ({:?})", items.len(), list_type),
            Record::Tabs { tabs } => tabs
                .iter()
                .map(|t| t.label.as_str())
                .collect::<Vec<_>>()
                .join(" | "),
            Record::Spacer | Record::Divider => String::new(),
            Record::Input { field_name, input_type, .. } => format!("{}: {}", field_name, input_type),
            Record::Textarea { field_name, .. } | Record::Select { field_name, .. } => field_name.clone(),
            Record::Checkbox { field_name, label, .. } => format!("{}: {:?}", field_name, label),
            Record::Icon { name } => name.clone(),
            Record::Embed { html } => format!("{} bytes", html.len()),
            Record::Countdown { target, .. } => target.clone(),
        },
    }
}
