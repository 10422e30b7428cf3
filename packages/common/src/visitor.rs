use pagebuilder_model::{Content, Element, Record, Styles};

/// Visitor pattern for traversing element trees immutably
///
/// Default implementations walk the entire tree depth-first, parents before
/// children. Override specific visit_* methods to act on nodes.
pub trait Visitor: Sized {
    fn visit_element(&mut self, element: &Element) {
        walk_element(self, element);
    }

    fn visit_styles(&mut self, _styles: &Styles) {
        // Leaf, no children to walk
    }

    fn visit_record(&mut self, _record: &Record) {
        // Leaf, no children to walk
    }
}

/// Mutable visitor pattern for transforming element trees
pub trait VisitorMut: Sized {
    fn visit_element_mut(&mut self, element: &mut Element) {
        walk_element_mut(self, element);
    }

    fn visit_styles_mut(&mut self, _styles: &mut Styles) {
        // Leaf, no children to walk
    }

    fn visit_record_mut(&mut self, _record: &mut Record) {
        // Leaf, no children to walk
    }
}

pub fn walk_element<V: Visitor>(visitor: &mut V, element: &Element) {
    visitor.visit_styles(&element.styles);

    match &element.content {
        Content::Children(children) => {
            for child in children {
                visitor.visit_element(child);
            }
        }
        Content::Record(record) => {
            visitor.visit_record(record);
        }
    }
}

pub fn walk_element_mut<V: VisitorMut>(visitor: &mut V, element: &mut Element) {
    visitor.visit_styles_mut(&mut element.styles);

    match &mut element.content {
        Content::Children(children) => {
            for child in children {
                visitor.visit_element_mut(child);
            }
        }
        Content::Record(record) => {
            visitor.visit_record_mut(record);
        }
    }
}

/// Collects every element id in visit order
#[derive(Debug, Default)]
pub struct IdCollector {
    pub ids: Vec<String>,
}

impl IdCollector {
    pub fn collect(element: &Element) -> Vec<String> {
        let mut collector = Self::default();
        collector.visit_element(element);
        collector.ids
    }
}

impl Visitor for IdCollector {
    fn visit_element(&mut self, element: &Element) {
        self.ids.push(element.id.to_string());
        walk_element(self, element);
    }
}
