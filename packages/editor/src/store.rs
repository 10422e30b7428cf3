//! # Element Tree Store
//!
//! The single owner of one open page's [`EditorState`].
//!
//! Consumers read the state and dispatch [`Action`]s; they never touch tree
//! nodes directly. Each dispatch runs to completion, post-effects included,
//! before the next one starts, and either commits a whole new state or
//! leaves the old one in place.
//!
//! ## Lifecycle
//!
//! ```text
//! Palette drop / click / blur → Action → reduce → post-effects → commit
//!                                          ↓ rejected
//!                                        Noop (state untouched)
//! ```

use crate::actions::{Action, EditError, ElementPatch, ElementRef};
use crate::errors::EditorError;
use crate::post_effects::PostEffectEngine;
use crate::registry::KindRegistry;
use crate::state::EditorState;
use crate::validation::validate;
use pagebuilder_common::IdCollector;
use pagebuilder_model::{Element, ElementId, IDGenerator};
use tracing::{debug, instrument, warn};

/// Outcome of one dispatch
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchResult {
    /// The action was applied and the version advanced
    Applied {
        version: u64,
        /// Secondary actions applied by post-effects
        effects: Vec<Action>,
    },
    /// The action had no effect
    Noop { reason: EditError },
}

impl DispatchResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, DispatchResult::Applied { .. })
    }

    pub fn reason(&self) -> Option<&EditError> {
        match self {
            DispatchResult::Noop { reason } => Some(reason),
            DispatchResult::Applied { .. } => None,
        }
    }

    /// Turn a no-op into an error, for callers that want to fail loudly
    pub fn into_result(self) -> Result<u64, EditError> {
        match self {
            DispatchResult::Applied { version, .. } => Ok(version),
            DispatchResult::Noop { reason } => Err(reason),
        }
    }
}

/// Editable page
#[derive(Debug)]
pub struct Editor {
    /// Name the id seed is derived from
    pub page_name: String,

    /// Current version number (increments on each applied action)
    version: u64,

    state: EditorState,
    ids: IDGenerator,
    registry: KindRegistry,
    effects: PostEffectEngine,
}

impl Editor {
    /// Empty page
    pub fn new(page_name: impl Into<String>) -> Self {
        let page_name = page_name.into();
        let mut ids = IDGenerator::new(&page_name);
        ids.reserve([pagebuilder_model::ROOT_ID]);

        Self {
            page_name,
            version: 0,
            state: EditorState::new(),
            ids,
            registry: KindRegistry::builtin(),
            effects: PostEffectEngine::new(),
        }
    }

    /// Open an existing tree after validating it
    pub fn with_tree(page_name: impl Into<String>, tree: Element) -> Result<Self, EditorError> {
        let state = EditorState::with_tree(tree).map_err(EditorError::InvalidTree)?;

        let mut editor = Self::new(page_name);
        editor.ids.reserve(IdCollector::collect(state.tree()));
        editor.state = state;
        Ok(editor)
    }

    pub fn with_registry(mut self, registry: KindRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_effects(mut self, effects: PostEffectEngine) -> Self {
        self.effects = effects;
        self
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn tree(&self) -> &Element {
        self.state.tree()
    }

    /// The selected node, or the empty sentinel
    pub fn selected_element(&self) -> &Element {
        self.state.selected_element()
    }

    pub fn live_mode(&self) -> bool {
        self.state.live_mode()
    }

    pub fn registry(&self) -> &KindRegistry {
        &self.registry
    }

    /// Fresh id that is not, and never was, used on this page
    pub fn new_id(&mut self) -> ElementId {
        self.ids.new_id().into()
    }

    /// Apply an action
    #[instrument(skip(self, action), fields(action = action.name(), version = self.version))]
    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match self.effects.reduce(&self.state, &action) {
            Ok((next, effects)) => {
                if let Action::AddElement { element_details, .. } = &action {
                    self.ids.reserve(IdCollector::collect(element_details));
                }

                debug_assert!(
                    validate(next.tree()).is_empty(),
                    "dispatch produced an invalid tree"
                );

                self.state = next;
                self.version += 1;

                debug!(
                    target_id = action.target_id().map(ElementId::as_str),
                    effects = effects.len(),
                    new_version = self.version,
                    "Action applied"
                );

                DispatchResult::Applied {
                    version: self.version,
                    effects,
                }
            }
            Err(reason) => {
                warn!(%reason, "Action had no effect");
                DispatchResult::Noop { reason }
            }
        }
    }

    /// Parse a JSON dispatch payload and apply it
    pub fn dispatch_json(&mut self, payload: &str) -> Result<DispatchResult, EditorError> {
        let action: Action = serde_json::from_str(payload)?;
        Ok(self.dispatch(action))
    }

    pub fn add_element(&mut self, container_id: impl Into<ElementId>, element: Element) -> DispatchResult {
        self.dispatch(Action::AddElement {
            container_id: container_id.into(),
            element_details: element,
        })
    }

    /// Drop handler: build a `component_type` element and append it to `container_id`
    pub fn insert_kind(&mut self, container_id: impl Into<ElementId>, component_type: &str) -> DispatchResult {
        match self.registry.instantiate(component_type, &mut self.ids) {
            Ok(element) => self.add_element(container_id, element),
            Err(reason) => {
                warn!(%reason, component_type, "Dropped component could not be built");
                DispatchResult::Noop { reason }
            }
        }
    }

    /// Merge into an existing element. A whole [`Element`] converts into a
    /// patch that writes every field it carries.
    pub fn update_element(&mut self, update: impl Into<ElementPatch>) -> DispatchResult {
        self.dispatch(Action::UpdateElement {
            element_details: update.into(),
        })
    }

    pub fn delete_element(&mut self, id: impl Into<ElementId>) -> DispatchResult {
        self.dispatch(Action::DeleteElement {
            element_details: ElementRef::new(id),
        })
    }

    pub fn select(&mut self, id: impl Into<ElementId>) -> DispatchResult {
        self.dispatch(Action::ChangeClickedElement {
            element_details: Some(ElementRef::new(id)),
        })
    }

    pub fn clear_selection(&mut self) -> DispatchResult {
        self.dispatch(Action::ChangeClickedElement { element_details: None })
    }

    pub fn toggle_live_mode(&mut self) -> DispatchResult {
        self.dispatch(Action::ToggleLiveMode)
    }

    pub fn set_live_mode(&mut self, value: bool) -> DispatchResult {
        self.dispatch(Action::SetLiveMode { value })
    }
}
