//! Error types for the editor

use crate::validation::Violation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Edit error: {0}")]
    Edit(#[from] crate::actions::EditError),

    #[error("Invalid page tree: {}", format_violations(.0))]
    InvalidTree(Vec<Violation>),

    #[error("Invalid action payload: {0}")]
    Payload(#[from] serde_json::Error),
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
