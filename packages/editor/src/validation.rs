//! # Tree Invariants
//!
//! Checks a page tree for:
//! - non-empty, globally unique ids
//! - `content` shape matching `type` on every node
//! - `__body` only at the root, the selection sentinel nowhere
//! - form settings only on forms

use pagebuilder_common::{walk_element, Visitor};
use pagebuilder_model::{Element, ElementId, ElementKind};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    #[error("Element of kind {0} has an empty id")]
    EmptyId(ElementKind),

    #[error("Duplicate element id: {0}")]
    DuplicateId(ElementId),

    #[error("Content of {id} does not match its type {kind}")]
    ShapeMismatch { id: ElementId, kind: ElementKind },

    #[error("Element {id} of kind {kind} is not allowed here")]
    MisplacedReservedKind { id: ElementId, kind: ElementKind },

    #[error("Form settings on non-form element {0}")]
    FormPropsOnNonForm(ElementId),

    #[error("Page root has kind {0}, expected __body")]
    RootNotBody(ElementKind),

    #[error("Page root has id {0}, expected __body")]
    RootIdMismatch(ElementId),
}

/// Validate a whole page. The root must be `__body`, with id `__body`.
pub fn validate(tree: &Element) -> Vec<Violation> {
    let mut validator = TreeValidator::default();

    if tree.kind != ElementKind::Body {
        validator.violations.push(Violation::RootNotBody(tree.kind));
    }

    if !tree.id.is_root() {
        validator.violations.push(Violation::RootIdMismatch(tree.id.clone()));
    }

    validator.check_node(tree);
    walk_element(&mut validator, tree);
    validator.violations
}

/// Validate a detached subtree, e.g. an element about to be inserted.
/// Reserved kinds are not allowed anywhere in it.
pub fn validate_subtree(element: &Element) -> Vec<Violation> {
    let mut validator = TreeValidator::default();
    validator.visit_element(element);
    validator.violations
}

#[derive(Default)]
struct TreeValidator {
    seen: HashSet<ElementId>,
    violations: Vec<Violation>,
}

impl TreeValidator {
    fn check_node(&mut self, element: &Element) {
        if element.id.as_str().is_empty() {
            self.violations.push(Violation::EmptyId(element.kind));
        }

        if !self.seen.insert(element.id.clone()) {
            self.violations.push(Violation::DuplicateId(element.id.clone()));
        }

        if !element.shape_matches() {
            self.violations.push(Violation::ShapeMismatch {
                id: element.id.clone(),
                kind: element.kind,
            });
        }

        if element.form_props.is_some() && element.kind != ElementKind::Form {
            self.violations
                .push(Violation::FormPropsOnNonForm(element.id.clone()));
        }
    }
}

impl Visitor for TreeValidator {
    fn visit_element(&mut self, element: &Element) {
        if element.kind.is_reserved() {
            self.violations.push(Violation::MisplacedReservedKind {
                id: element.id.clone(),
                kind: element.kind,
            });
        }

        self.check_node(element);
        walk_element(self, element);
    }
}
