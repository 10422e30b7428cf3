//! # Pagebuilder Editor
//!
//! Element Tree Store for the visual page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Element tree, kinds, content records │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Element Tree Store                  │
//! │  - Pure reducer over EditorState            │
//! │  - Invariant checks on every action         │
//! │  - Post-effects (selection repair)          │
//! │  - Kind registry for palette drops          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ consumers: renderers, settings panel        │
//! │  (read state, dispatch actions)             │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **One owner**: only the store replaces tree nodes
//! 2. **All or nothing**: an action commits fully or is a no-op
//! 3. **Never crash the page**: rejected actions are reported, not raised
//! 4. **Live selection**: the selection is an id resolved on read
//!
//! ## Usage
//!
//! ```rust
//! use pagebuilder_editor::Editor;
//! use pagebuilder_model::{Element, Record, ROOT_ID};
//!
//! let mut editor = Editor::new("landing");
//!
//! let text = Element::leaf("a", "Text", Record::Text { inner_text: "hi".into() });
//! assert!(editor.add_element(ROOT_ID, text).is_applied());
//! assert!(editor.select("a").is_applied());
//!
//! assert!(editor.delete_element("a").is_applied());
//! assert!(editor.selected_element().is_empty_sentinel());
//! ```

mod actions;
mod errors;
mod outline;
mod post_effects;
mod registry;
mod state;
mod store;
mod validation;

pub use actions::{Action, EditError, ElementPatch, ElementRef};
pub use errors::EditorError;
pub use outline::{render_outline, render_outline_with, OutlineOptions};
pub use post_effects::{ClearDanglingSelection, PostEffect, PostEffectEngine, SelectInserted};
pub use registry::{ContentTemplate, KindRegistry, KindSpec, Summarizer};
pub use state::{empty_sentinel, reduce, EditorState};
pub use store::{DispatchResult, Editor};
pub use validation::{validate, validate_subtree, Violation};

// Re-export model types for convenience
pub use pagebuilder_model::{Element, ElementId, ElementKind};
