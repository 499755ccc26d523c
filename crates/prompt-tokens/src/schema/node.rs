//! # Schema Node
//!
//! A tagged-variant tree for tool input schemas. Dispatch on `kind` is
//! exhaustive; there is no duck-typed field probing anywhere downstream.

use indexmap::IndexMap;

/// One node of an input-schema tree, with its own optional description.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub description: Option<String>,
    pub kind: NodeKind,
}

/// The shape of a [`SchemaNode`].
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Properties in insertion order; the walker's first-vs-additional
    /// coefficients depend on this order being preserved.
    Object { properties: IndexMap<String, SchemaNode> },
    String,
    Number,
    Boolean,
    Enum { values: Vec<String> },
    Array { element: Box<SchemaNode> },
}

impl SchemaNode {
    pub fn object(properties: IndexMap<String, SchemaNode>) -> Self {
        SchemaNode { description: None, kind: NodeKind::Object { properties } }
    }

    pub fn string() -> Self {
        SchemaNode { description: None, kind: NodeKind::String }
    }

    pub fn number() -> Self {
        SchemaNode { description: None, kind: NodeKind::Number }
    }

    pub fn boolean() -> Self {
        SchemaNode { description: None, kind: NodeKind::Boolean }
    }

    pub fn enum_of(values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        SchemaNode {
            description: None,
            kind: NodeKind::Enum { values: values.into_iter().map(Into::into).collect() },
        }
    }

    pub fn array(element: SchemaNode) -> Self {
        SchemaNode { description: None, kind: NodeKind::Array { element: Box::new(element) } }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_attach_descriptions() {
        let node = SchemaNode::string().with_description("a location");
        assert_eq!(node.description.as_deref(), Some("a location"));
        assert_eq!(node.kind, NodeKind::String);
    }
}
