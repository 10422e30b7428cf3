//! # Pagebuilder Model
//!
//! Data model of a visually edited page: a tree of typed elements whose
//! `content` is either a list of children (container kinds) or a typed
//! record (every other kind).

pub mod content;
pub mod element;
pub mod id_generator;
pub mod kind;

pub use content::{Content, FormMethod, FormProps, ListType, Record, StyleValue, Styles, Tab};
pub use element::{Element, ElementId, ROOT_ID};
pub use id_generator::{get_page_id, IDGenerator};
pub use kind::{ElementKind, KindCategory, UnknownKind};
