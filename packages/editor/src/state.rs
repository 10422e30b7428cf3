//! # Editor State
//!
//! The page tree, the selection and the live-mode flag of one open page.
//!
//! The selection is stored as an id and resolved against the tree on every
//! read, so it always reflects the latest version of the selected node.
//!
//! Ids of deleted elements are kept as retired so a later insert can never
//! bring them back and make a stale reference point at a different node.

use crate::actions::{Action, EditError};
use crate::post_effects::PostEffectEngine;
use crate::validation::{validate, Violation};
use pagebuilder_model::{Element, ElementId, ElementKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    pub(crate) tree: Element,
    pub(crate) selected: Option<ElementId>,
    pub(crate) live_mode: bool,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub(crate) retired: BTreeSet<ElementId>,
}

impl EditorState {
    /// Empty page in edit mode with nothing selected
    pub fn new() -> Self {
        Self {
            tree: Element::body(),
            selected: None,
            live_mode: false,
            retired: BTreeSet::new(),
        }
    }

    /// Start from an existing tree. The tree must pass [`validate`].
    pub fn with_tree(tree: Element) -> Result<Self, Vec<Violation>> {
        let violations = validate(&tree);
        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(Self {
            tree,
            selected: None,
            live_mode: false,
            retired: BTreeSet::new(),
        })
    }

    pub fn tree(&self) -> &Element {
        &self.tree
    }

    pub fn live_mode(&self) -> bool {
        self.live_mode
    }

    pub fn selected_id(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    /// The selected node, or the empty sentinel when nothing is selected
    pub fn selected_element(&self) -> &Element {
        self.selected
            .as_ref()
            .and_then(|id| self.tree.find(id.as_str()))
            .unwrap_or_else(|| empty_sentinel())
    }

    pub fn find(&self, id: &str) -> Option<&Element> {
        self.tree.find(id)
    }

    /// True when `id` belonged to an element that has been deleted
    pub fn is_retired(&self, id: &str) -> bool {
        self.retired.contains(id)
    }

    /// Kind of the selected node, `__empty` when nothing is selected
    pub fn selected_kind(&self) -> ElementKind {
        self.selected_element().kind
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared "nothing selected" value
pub fn empty_sentinel() -> &'static Element {
    static EMPTY: OnceLock<Element> = OnceLock::new();
    EMPTY.get_or_init(Element::empty)
}

/// Pure transition: the state after `action`, with the default post-effects.
///
/// `state` is never modified. A rejected action returns the reason instead.
pub fn reduce(state: &EditorState, action: &Action) -> Result<EditorState, EditError> {
    PostEffectEngine::default()
        .reduce(state, action)
        .map(|(next, _)| next)
}
