//! # Schema Walker
//!
//! Walks a tool's input-schema tree in property insertion order, summing
//! the overhead coefficients a [`TokenCoefficients`] assigns to each
//! structural feature encountered.

use crate::bpe::BpeEngine;
use crate::errors::{Error, Result};
use crate::model::TokenCoefficients;
use crate::schema::node::{NodeKind, SchemaNode};
use indexmap::IndexMap;

/// Recursion guard against adversarially deep schemas; real tool schemas
/// never come close to this.
const MAX_DEPTH: usize = 64;

/// Walk an object-root schema node, returning its total token cost.
pub fn walk(engine: &BpeEngine, coeffs: &TokenCoefficients, root: &SchemaNode) -> Result<usize> {
    match &root.kind {
        NodeKind::Object { properties } => walk_object(engine, coeffs, properties, 0),
        _ => Err(Error::InvalidSchemaNode {
            reason: "schema walker root must be an object node".to_string(),
        }),
    }
}

fn walk_object(
    engine: &BpeEngine,
    coeffs: &TokenCoefficients,
    properties: &IndexMap<String, SchemaNode>,
    depth: usize,
) -> Result<usize> {
    if depth > MAX_DEPTH {
        return Err(Error::InvalidSchemaNode {
            reason: format!("schema nesting exceeds the maximum depth of {MAX_DEPTH}"),
        });
    }

    let mut total = 0usize;
    for (i, (name, node)) in properties.iter().enumerate() {
        total += engine.count(name);
        total += if i == 0 { coeffs.per_first_prop } else { coeffs.per_additional_prop } as usize;

        if let Some(description) = &node.description {
            total += coeffs.per_prop_desc as usize + engine.count(description);
        }

        total += walk_contents(engine, coeffs, node, depth)?;
    }
    Ok(total)
}

/// Cost contributed by a node's own shape, independent of the
/// name/description overhead a containing property already accounted for.
fn walk_contents(
    engine: &BpeEngine,
    coeffs: &TokenCoefficients,
    node: &SchemaNode,
    depth: usize,
) -> Result<usize> {
    if depth > MAX_DEPTH {
        return Err(Error::InvalidSchemaNode {
            reason: format!("schema nesting exceeds the maximum depth of {MAX_DEPTH}"),
        });
    }

    match &node.kind {
        NodeKind::String | NodeKind::Number | NodeKind::Boolean => Ok(0),
        NodeKind::Enum { values } => {
            let mut total = coeffs.per_enum as usize;
            for value in values {
                total += engine.count(value);
            }
            Ok(total)
        }
        NodeKind::Object { properties } => {
            Ok(coeffs.per_nested_object as usize + walk_object(engine, coeffs, properties, depth + 1)?)
        }
        NodeKind::Array { element } => match &element.kind {
            NodeKind::Object { properties } => {
                Ok(coeffs.per_array_of_objects as usize
                    + walk_object(engine, coeffs, properties, depth + 1)?)
            }
            _ => walk_contents(engine, coeffs, element, depth + 1),
        },
    }
}
