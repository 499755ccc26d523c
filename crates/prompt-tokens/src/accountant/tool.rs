//! # Tool Definition

use crate::schema::SchemaNode;

/// A tool's name, optional description, and typed input schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: Option<String>,
    pub input_schema: SchemaNode,
}
