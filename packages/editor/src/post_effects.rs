//! # Post-Effect System
//!
//! An action may require follow-up actions to keep the state consistent.
//! For example, deleting the selected node (or one of its ancestors) must
//! also clear the selection.
//!
//! Post-effects are:
//! - **Deterministic**: Same action on the same state yields the same effects
//! - **Atomic**: Applied in the same dispatch as the primary action
//! - **Minimal**: Only generate necessary secondary actions

use crate::actions::{Action, EditError, ElementRef};
use crate::state::EditorState;
use tracing::debug;

/// Post-effect that can be triggered by an applied action
pub trait PostEffect: std::fmt::Debug + Send + Sync {
    /// Inspect the state after `action` and return secondary actions
    fn analyze(&self, action: &Action, state: &EditorState) -> Vec<Action>;
}

/// Clear the selection when it no longer resolves to a node
#[derive(Debug)]
pub struct ClearDanglingSelection;

impl PostEffect for ClearDanglingSelection {
    fn analyze(&self, action: &Action, state: &EditorState) -> Vec<Action> {
        match action {
            Action::DeleteElement { .. } => match state.selected_id() {
                Some(id) if state.find(id.as_str()).is_none() => {
                    vec![Action::ChangeClickedElement { element_details: None }]
                }
                _ => vec![],
            },
            _ => vec![],
        }
    }
}

/// Select a freshly added element so the settings panel opens on it
#[derive(Debug)]
pub struct SelectInserted;

impl PostEffect for SelectInserted {
    fn analyze(&self, action: &Action, _state: &EditorState) -> Vec<Action> {
        match action {
            Action::AddElement { element_details, .. } => vec![Action::ChangeClickedElement {
                element_details: Some(ElementRef::from(element_details)),
            }],
            _ => vec![],
        }
    }
}

/// Post-effect engine that applies all registered effects
#[derive(Debug)]
pub struct PostEffectEngine {
    effects: Vec<Box<dyn PostEffect>>,
}

impl PostEffectEngine {
    /// Engine with only the effects needed to keep the state valid
    pub fn new() -> Self {
        Self {
            effects: vec![Box::new(ClearDanglingSelection)],
        }
    }

    /// Register an additional effect, run after the existing ones
    pub fn with_effect(mut self, effect: impl PostEffect + 'static) -> Self {
        self.effects.push(Box::new(effect));
        self
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Analyze an applied action and generate all secondary actions
    pub fn analyze(&self, action: &Action, state: &EditorState) -> Vec<Action> {
        self.effects
            .iter()
            .flat_map(|effect| effect.analyze(action, state))
            .collect()
    }

    /// Apply an action with all its post-effects to a copy of `state`.
    ///
    /// Returns the next state and the secondary actions that were applied.
    /// If any step fails, the error is returned and nothing is committed.
    pub fn reduce(&self, state: &EditorState, action: &Action) -> Result<(EditorState, Vec<Action>), EditError> {
        let mut next = state.clone();
        action.apply(&mut next)?;

        let secondary = self.analyze(action, &next);
        for secondary_action in &secondary {
            debug!(effect = secondary_action.name(), "Applying post-effect");
            secondary_action.apply(&mut next)?;
        }

        Ok((next, secondary))
    }
}

impl Default for PostEffectEngine {
    fn default() -> Self {
        Self::new()
    }
}
