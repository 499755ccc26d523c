//! Tool input-schema tree and the walker that costs it out in tokens.

mod node;
mod walker;

pub use node::{NodeKind, SchemaNode};
pub use walker::walk;
