//! Text outline of a page tree.
//!
//! Dispatches on each node's kind through the [`KindRegistry`]. A node whose
//! content does not fit its kind is rendered as an inline error marker and
//! its subtree is skipped, so one bad node never hides the rest of the page.

use crate::registry::KindRegistry;
use pagebuilder_model::{Element, ElementId};
use std::fmt::Write;

#[derive(Debug, Clone, Default)]
pub struct OutlineOptions {
    /// Mark this node with a leading `>`
    pub selected: Option<ElementId>,
    pub show_styles: bool,
}

pub fn render_outline(tree: &Element, registry: &KindRegistry) -> String {
    render_outline_with(tree, registry, &OutlineOptions::default())
}

pub fn render_outline_with(tree: &Element, registry: &KindRegistry, options: &OutlineOptions) -> String {
    let mut out = String::new();
    render_node(&mut out, tree, registry, options, 0);
    out
}

fn render_node(out: &mut String, element: &Element, registry: &KindRegistry, options: &OutlineOptions, depth: usize) {
    let marker = match &options.selected {
        Some(id) if *id == element.id => "> ",
        _ => "  ",
    };

    let _ = write!(
        out,
        "{}{}{} <{}> #{}",
        marker,
        "  ".repeat(depth),
        element.name,
        element.kind,
        element.id
    );

    if !element.shape_matches() {
        let _ = writeln!(out, " [invalid: content does not match type]");
        return;
    }

    if !element.kind.is_reserved() {
        match registry.summarize(element) {
            Some(summary) if !summary.is_empty() => {
                let _ = write!(out, " {}", summary);
            }
            Some(_) => {}
            None => {
                let _ = write!(out, " [unregistered kind]");
            }
        }
    }

    if options.show_styles && !element.styles.is_empty() {
        let styles = element
            .styles
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join("; ");
        let _ = write!(out, " {{{}}}", styles);
    }

    out.push('\n');

    for child in element.children().unwrap_or_default() {
        render_node(out, child, registry, options, depth + 1);
    }
}
