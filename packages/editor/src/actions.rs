//! # Editor Actions
//!
//! Every change to the page goes through one of these actions.
//!
//! ## Semantics
//!
//! ### AddElement
//! - Appends to the end of the target container's children
//! - Target must exist and be a container kind
//! - Payload must be well formed and share no id with the page, nor with
//!   any element deleted earlier
//!
//! ### UpdateElement
//! - Fields missing from the payload keep their current value
//! - `styles` merge key-wise into the existing styles
//! - Record fields merge one by one, container children are kept
//! - `formProps` fields merge one by one
//! - The element's type can never change
//!
//! ### DeleteElement
//! - Removes the node and all of its descendants
//! - Their ids are retired and never accepted again
//! - The page root cannot be deleted
//!
//! A rejected action leaves the state untouched.

use crate::state::EditorState;
use crate::validation::{validate_subtree, Violation};
use pagebuilder_common::IdCollector;
use pagebuilder_model::{
    Content, Element, ElementId, ElementKind, FormProps, Record, StyleValue, Styles, UnknownKind,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Reference to an element by id.
///
/// Deserializes from a full element value too; every field but `id` is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementRef {
    pub id: ElementId,
}

impl ElementRef {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self { id: id.into() }
    }
}

impl From<&Element> for ElementRef {
    fn from(element: &Element) -> Self {
        Self { id: element.id.clone() }
    }
}

/// New values for an existing element.
///
/// Same wire shape as an element, but every field except `id` and `type`
/// may be left out. `content` holds bare record fields for leaf kinds; for
/// container kinds a list is accepted and ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    pub id: ElementId,

    #[serde(rename = "type")]
    pub kind: ElementKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Styles::is_empty")]
    pub styles: Styles,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_props: Option<Map<String, Value>>,
}

impl ElementPatch {
    /// Patch that changes nothing yet
    pub fn new(id: impl Into<ElementId>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            name: None,
            styles: Styles::new(),
            content: None,
            form_props: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    /// Set one record field, e.g. `innerText`
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut fields = match self.content.take() {
            Some(Value::Object(fields)) => fields,
            _ => Map::new(),
        };
        fields.insert(field.into(), value.into());
        self.content = Some(Value::Object(fields));
        self
    }

    /// The record of `existing` with this patch's fields laid over it,
    /// or `None` when the record is left alone
    fn merged_record(&self, existing: &Element) -> Result<Option<Record>, EditError> {
        match (&existing.content, &self.content) {
            (_, None | Some(Value::Null)) => Ok(None),
            (Content::Children(_), Some(Value::Array(_))) => Ok(None),
            (Content::Record(record), Some(Value::Object(changes))) => {
                let mut fields = record.to_fields();
                fields.extend(changes.iter().map(|(k, v)| (k.clone(), v.clone())));

                Record::from_fields(existing.kind, Value::Object(fields))
                    .map(Some)
                    .map_err(|err| self.invalid_content(err))
            }
            _ => Err(EditError::ShapeMismatch {
                id: self.id.clone(),
                kind: self.kind,
            }),
        }
    }

    /// Form settings of `existing` with this patch's fields laid over them
    fn merged_form_props(&self, existing: &Element) -> Result<Option<FormProps>, EditError> {
        let Some(changes) = &self.form_props else {
            return Ok(None);
        };

        if existing.kind != ElementKind::Form {
            return Err(EditError::FormPropsOnNonForm(self.id.clone()));
        }

        let current = existing.form_props.clone().unwrap_or_default();
        let mut fields = match serde_json::to_value(current) {
            Ok(Value::Object(fields)) => fields,
            _ => Map::new(),
        };
        fields.extend(changes.iter().map(|(k, v)| (k.clone(), v.clone())));

        serde_json::from_value(Value::Object(fields))
            .map(Some)
            .map_err(|err| self.invalid_content(err))
    }

    fn invalid_content(&self, err: serde_json::Error) -> EditError {
        EditError::InvalidContent {
            id: self.id.clone(),
            reason: err.to_string(),
        }
    }
}

/// A whole element as a patch: every field it carries is written
impl From<Element> for ElementPatch {
    fn from(element: Element) -> Self {
        let content = element.record().map(|record| Value::Object(record.to_fields()));
        let form_props = element
            .form_props
            .as_ref()
            .and_then(|props| match serde_json::to_value(props) {
                Ok(Value::Object(fields)) => Some(fields),
                _ => None,
            });

        Self {
            id: element.id,
            kind: element.kind,
            name: Some(element.name),
            styles: element.styles,
            content,
            form_props,
        }
    }
}

/// Requests a consumer can dispatch to the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    /// Append a new element to a container
    AddElement {
        container_id: ElementId,
        element_details: Element,
    },

    /// Merge new values into an existing element
    UpdateElement { element_details: ElementPatch },

    /// Remove an element and its subtree
    DeleteElement { element_details: ElementRef },

    /// Select an element, or clear the selection with `None`
    ChangeClickedElement {
        #[serde(default)]
        element_details: Option<ElementRef>,
    },

    ToggleLiveMode,

    SetLiveMode { value: bool },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("Element not found: {0}")]
    NotFound(ElementId),

    #[error("Element {0} cannot hold children")]
    InvalidContainerTarget(ElementId),

    #[error("Content of {id} does not match its type {kind}")]
    ShapeMismatch { id: ElementId, kind: ElementKind },

    #[error("Duplicate element id: {0}")]
    DuplicateId(ElementId),

    #[error("Element of kind {0} has an empty id")]
    EmptyId(ElementKind),

    #[error("Invalid content for {id}: {reason}")]
    InvalidContent { id: ElementId, reason: String },

    #[error(transparent)]
    InvalidRoot(Violation),

    #[error("The page root cannot be deleted")]
    RootProtected,

    #[error("Cannot change type of {id} from {from} to {to}")]
    KindChange {
        id: ElementId,
        from: ElementKind,
        to: ElementKind,
    },

    #[error("Element kind {0} cannot be placed on a page")]
    ReservedKind(ElementKind),

    #[error("Form settings on non-form element {0}")]
    FormPropsOnNonForm(ElementId),

    #[error(transparent)]
    UnknownKind(#[from] UnknownKind),
}

impl From<Violation> for EditError {
    fn from(violation: Violation) -> Self {
        match violation {
            Violation::EmptyId(kind) => EditError::EmptyId(kind),
            Violation::DuplicateId(id) => EditError::DuplicateId(id),
            Violation::ShapeMismatch { id, kind } => EditError::ShapeMismatch { id, kind },
            Violation::MisplacedReservedKind { kind, .. } => EditError::ReservedKind(kind),
            Violation::FormPropsOnNonForm(id) => EditError::FormPropsOnNonForm(id),
            Violation::RootNotBody(_) | Violation::RootIdMismatch(_) => EditError::InvalidRoot(violation),
        }
    }
}

impl Action {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddElement { .. } => "ADD_ELEMENT",
            Action::UpdateElement { .. } => "UPDATE_ELEMENT",
            Action::DeleteElement { .. } => "DELETE_ELEMENT",
            Action::ChangeClickedElement { .. } => "CHANGE_CLICKED_ELEMENT",
            Action::ToggleLiveMode => "TOGGLE_LIVE_MODE",
            Action::SetLiveMode { .. } => "SET_LIVE_MODE",
        }
    }

    /// Id of the element the action targets, if any
    pub fn target_id(&self) -> Option<&ElementId> {
        match self {
            Action::AddElement { container_id, .. } => Some(container_id),
            Action::UpdateElement { element_details } => Some(&element_details.id),
            Action::DeleteElement { element_details } => Some(&element_details.id),
            Action::ChangeClickedElement { element_details } => {
                element_details.as_ref().map(|e| &e.id)
            }
            Action::ToggleLiveMode | Action::SetLiveMode { .. } => None,
        }
    }

    /// Apply action to the state with validation
    pub fn apply(&self, state: &mut EditorState) -> Result<(), EditError> {
        self.validate(state)?;

        match self {
            Action::AddElement { container_id, element_details } => {
                Self::apply_add(state, container_id, element_details)
            }

            Action::UpdateElement { element_details } => Self::apply_update(state, element_details),

            Action::DeleteElement { element_details } => Self::apply_delete(state, &element_details.id),

            Action::ChangeClickedElement { element_details } => {
                state.selected = element_details
                    .as_ref()
                    .filter(|e| !e.id.as_str().is_empty())
                    .map(|e| e.id.clone());
                Ok(())
            }

            Action::ToggleLiveMode => {
                state.live_mode = !state.live_mode;
                Ok(())
            }

            Action::SetLiveMode { value } => {
                state.live_mode = *value;
                Ok(())
            }
        }
    }

    fn apply_add(state: &mut EditorState, container_id: &ElementId, element: &Element) -> Result<(), EditError> {
        let container = state
            .tree
            .find_mut(container_id.as_str())
            .ok_or_else(|| EditError::NotFound(container_id.clone()))?;

        let children = container
            .children_mut()
            .ok_or_else(|| EditError::InvalidContainerTarget(container_id.clone()))?;
        children.push(element.clone());
        Ok(())
    }

    fn apply_update(state: &mut EditorState, details: &ElementPatch) -> Result<(), EditError> {
        let existing = state
            .tree
            .find(details.id.as_str())
            .ok_or_else(|| EditError::NotFound(details.id.clone()))?;
        let record = details.merged_record(existing)?;
        let form_props = details.merged_form_props(existing)?;

        let node = state
            .tree
            .find_mut(details.id.as_str())
            .ok_or_else(|| EditError::NotFound(details.id.clone()))?;

        if let Some(name) = &details.name {
            node.name = name.clone();
        }

        node.styles
            .extend(details.styles.iter().map(|(k, v)| (k.clone(), v.clone())));

        if let Some(record) = record {
            node.content = Content::Record(record);
        }

        if let Some(form_props) = form_props {
            node.form_props = Some(form_props);
        }

        Ok(())
    }

    fn apply_delete(state: &mut EditorState, id: &ElementId) -> Result<(), EditError> {
        let removed = Self::remove_from_element(&mut state.tree, id.as_str())
            .ok_or_else(|| EditError::NotFound(id.clone()))?;

        state
            .retired
            .extend(IdCollector::collect(&removed).into_iter().map(ElementId::from));
        Ok(())
    }

    /// Remove `target_id` from anywhere below `elem` and return it
    fn remove_from_element(elem: &mut Element, target_id: &str) -> Option<Element> {
        let children = elem.children_mut()?;

        if let Some(pos) = children.iter().position(|c| c.id == target_id) {
            return Some(children.remove(pos));
        }

        children
            .iter_mut()
            .find_map(|child| Self::remove_from_element(child, target_id))
    }

    /// Validate without applying
    pub fn validate(&self, state: &EditorState) -> Result<(), EditError> {
        match self {
            Action::AddElement { container_id, element_details } => {
                if element_details.kind.is_reserved() {
                    return Err(EditError::ReservedKind(element_details.kind));
                }

                if let Some(violation) = validate_subtree(element_details).into_iter().next() {
                    return Err(violation.into());
                }

                let container = state
                    .tree
                    .find(container_id.as_str())
                    .ok_or_else(|| EditError::NotFound(container_id.clone()))?;

                if !container.is_container() {
                    return Err(EditError::InvalidContainerTarget(container_id.clone()));
                }

                let incoming = IdCollector::collect(element_details);
                match incoming
                    .into_iter()
                    .find(|id| state.tree.contains(id) || state.is_retired(id))
                {
                    Some(id) => Err(EditError::DuplicateId(id.into())),
                    None => Ok(()),
                }
            }

            Action::UpdateElement { element_details } => {
                let existing = state
                    .tree
                    .find(element_details.id.as_str())
                    .ok_or_else(|| EditError::NotFound(element_details.id.clone()))?;

                if existing.kind != element_details.kind {
                    return Err(EditError::KindChange {
                        id: existing.id.clone(),
                        from: existing.kind,
                        to: element_details.kind,
                    });
                }

                element_details.merged_record(existing)?;
                element_details.merged_form_props(existing)?;
                Ok(())
            }

            Action::DeleteElement { element_details } => {
                if element_details.id.is_root() {
                    return Err(EditError::RootProtected);
                }

                if !state.tree.contains(element_details.id.as_str()) {
                    return Err(EditError::NotFound(element_details.id.clone()));
                }

                Ok(())
            }

            Action::ChangeClickedElement { element_details: Some(target) } if !target.id.as_str().is_empty() => {
                if state.tree.contains(target.id.as_str()) {
                    Ok(())
                } else {
                    Err(EditError::NotFound(target.id.clone()))
                }
            }

            Action::ChangeClickedElement { .. } | Action::ToggleLiveMode | Action::SetLiveMode { .. } => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(id: &str, value: &str) -> Element {
        Element::leaf(id, "Text", Record::Text { inner_text: value.to_string() })
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::AddElement {
            container_id: ElementId::root(),
            element_details: text("a", "hi"),
        };

        let json = serde_json::to_string(&action).unwrap();
        let deserialized: Action = serde_json::from_str(&json).unwrap();

        assert_eq!(action, deserialized);
    }

    #[test]
    fn test_dispatch_payload_shape() {
        let json = serde_json::json!({
            "type": "ADD_ELEMENT",
            "payload": {
                "containerId": "__body",
                "elementDetails": {
                    "id": "a",
                    "type": "text",
                    "name": "Text",
                    "styles": {},
                    "content": { "innerText": "hi" }
                }
            }
        });

        let action: Action = serde_json::from_value(json).unwrap();
        assert_eq!(action.name(), "ADD_ELEMENT");
        assert_eq!(action.target_id().map(ElementId::as_str), Some("__body"));
        assert_eq!(
            action,
            Action::AddElement { container_id: ElementId::root(), element_details: text("a", "hi") }
        );
    }

    #[test]
    fn test_partial_update_payload() {
        let json = serde_json::json!({
            "type": "UPDATE_ELEMENT",
            "payload": {
                "elementDetails": { "id": "cta", "type": "button", "content": { "innerText": "Buy" } }
            }
        });

        let action: Action = serde_json::from_value(json).unwrap();
        assert_eq!(
            action,
            Action::UpdateElement {
                element_details: ElementPatch::new("cta", ElementKind::Button).with_field("innerText", "Buy"),
            }
        );
    }

    #[test]
    fn test_element_ref_accepts_full_element() {
        let json = serde_json::json!({
            "type": "DELETE_ELEMENT",
            "payload": {
                "elementDetails": {
                    "id": "a",
                    "type": "text",
                    "name": "Text",
                    "styles": {},
                    "content": { "innerText": "hi" }
                }
            }
        });

        let action: Action = serde_json::from_value(json).unwrap();
        assert_eq!(
            action,
            Action::DeleteElement { element_details: ElementRef::new("a") }
        );
    }

    #[test]
    fn test_unit_and_clear_payloads() {
        let toggle: Action = serde_json::from_str(r#"{ "type": "TOGGLE_LIVE_MODE" }"#).unwrap();
        assert_eq!(toggle, Action::ToggleLiveMode);

        let clear: Action = serde_json::from_str(
            r#"{ "type": "CHANGE_CLICKED_ELEMENT", "payload": { "elementDetails": null } }"#,
        )
        .unwrap();
        assert_eq!(clear, Action::ChangeClickedElement { element_details: None });
    }

    fn state_with(children: Vec<Element>) -> EditorState {
        EditorState::with_tree(Element::body().with_children(children)).unwrap()
    }

    #[test]
    fn test_validation_rejects_empty_ids() {
        let state = EditorState::new();

        let action = Action::UpdateElement { element_details: text("", "x").into() };
        assert_eq!(action.validate(&state), Err(EditError::NotFound(ElementId::default())));

        let action = Action::AddElement {
            container_id: ElementId::root(),
            element_details: text("", "x"),
        };
        assert_eq!(action.validate(&state), Err(EditError::EmptyId(ElementKind::Text)));
    }

    #[test]
    fn test_deleted_ids_are_retired() {
        let mut state = state_with(vec![Element::container("box", ElementKind::Container, "Box")
            .with_children(vec![text("a", "hi")])]);

        let delete = Action::DeleteElement { element_details: ElementRef::new("box") };
        delete.apply(&mut state).unwrap();
        assert!(state.is_retired("box"));
        assert!(state.is_retired("a"));

        let re_add = Action::AddElement {
            container_id: ElementId::root(),
            element_details: text("a", "again"),
        };
        assert_eq!(re_add.validate(&state), Err(EditError::DuplicateId("a".into())));
    }

    #[test]
    fn test_update_merges_record_fields() {
        let button = Element::leaf(
            "cta",
            "CTA",
            Record::Button { inner_text: "Go".to_string(), href: Some("/buy".to_string()) },
        );
        let mut state = state_with(vec![button]);

        let patch = ElementPatch::new("cta", ElementKind::Button).with_field("innerText", "Buy");
        Action::UpdateElement { element_details: patch }.apply(&mut state).unwrap();

        let cta = state.find("cta").unwrap();
        assert_eq!(cta.name, "CTA");
        assert_eq!(
            cta.record(),
            Some(&Record::Button { inner_text: "Buy".to_string(), href: Some("/buy".to_string()) })
        );

        // An explicit null clears an optional field
        let patch = ElementPatch::new("cta", ElementKind::Button).with_field("href", Value::Null);
        Action::UpdateElement { element_details: patch }.apply(&mut state).unwrap();
        assert_eq!(
            state.find("cta").unwrap().record(),
            Some(&Record::Button { inner_text: "Buy".to_string(), href: None })
        );
    }

    #[test]
    fn test_update_rejects_bad_fields() {
        let state = state_with(vec![text("a", "hi")]);

        let patch = ElementPatch::new("a", ElementKind::Text).with_field("innerText", 5);
        let result = Action::UpdateElement { element_details: patch }.validate(&state);
        assert!(matches!(result, Err(EditError::InvalidContent { .. })));

        let mut patch = ElementPatch::new("a", ElementKind::Text);
        patch.content = Some(Value::Array(Vec::new()));
        let result = Action::UpdateElement { element_details: patch }.validate(&state);
        assert_eq!(result, Err(EditError::ShapeMismatch { id: "a".into(), kind: ElementKind::Text }));
    }

    #[test]
    fn test_update_merges_form_props() {
        let form = Element::container("signup", ElementKind::Form, "Signup").with_form_props(FormProps {
            action: "/subscribe".to_string(),
            ..FormProps::default()
        });
        let mut state = state_with(vec![form]);

        let mut patch = ElementPatch::new("signup", ElementKind::Form);
        patch.form_props = serde_json::json!({ "submitLabel": "Join" }).as_object().cloned();
        Action::UpdateElement { element_details: patch }.apply(&mut state).unwrap();

        let props = state.find("signup").unwrap().form_props.clone().unwrap();
        assert_eq!(props.submit_label, "Join");
        assert_eq!(props.action, "/subscribe");
    }

    #[test]
    fn test_validation_rejects_reserved_payload() {
        let state = EditorState::new();

        let action = Action::AddElement {
            container_id: ElementId::root(),
            element_details: Element::body(),
        };
        assert_eq!(action.validate(&state), Err(EditError::ReservedKind(ElementKind::Body)));
    }

    #[test]
    fn test_remove_nested() {
        let mut tree = Element::body().with_children(vec![Element::container(
            "box",
            ElementKind::Container,
            "Box",
        )
        .with_children(vec![text("a", "1"), text("b", "2")])]);

        let removed = Action::remove_from_element(&mut tree, "b").unwrap();
        assert_eq!(removed.id, "b");
        assert!(!tree.contains("b"));
        assert!(tree.contains("a"));
        assert!(Action::remove_from_element(&mut tree, "b").is_none());
    }
}
