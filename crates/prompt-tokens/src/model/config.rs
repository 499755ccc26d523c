//! # Model Config
//!
//! The per-model overhead coefficients and metadata the accountant
//! combines with tokenized content.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// USD-per-million-tokens keyed by usage dimension (`"input"`, `"output"`,
/// `"cache_write"`, `"cache_read"`, ...). A `BTreeMap` rather than a
/// `HashMap` so a persisted config serializes with a stable key order.
pub type Pricing = BTreeMap<String, f64>;

/// Per-model overhead coefficients. Every integer field is a token count;
/// `content_multiplier` is the only real-valued field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenCoefficients {
    /// Added once per request.
    pub base_overhead: u32,
    /// Added per message, including the framing the server inserts
    /// around each one.
    pub per_message: u32,
    /// Added once if at least one tool is present.
    pub tools_exist: u32,
    /// Added per tool beyond the first.
    pub per_tool: u32,
    /// Added per tool that carries a description, before the description
    /// text itself is counted.
    pub per_desc: u32,
    /// Added for the first property of an object schema.
    pub per_first_prop: u32,
    /// Added for each property after the first.
    pub per_additional_prop: u32,
    /// Added per property that has a description, before the description
    /// text itself is counted.
    pub per_prop_desc: u32,
    /// Added per property whose type is an enumeration, before its
    /// values are counted.
    pub per_enum: u32,
    /// Added when an object property's value is itself an object.
    pub per_nested_object: u32,
    /// Added when an array property's element type is an object.
    pub per_array_of_objects: u32,
    /// Scales raw tokenized content length before rounding. Must be
    /// `>= 0.5`; defaults to `1.0` when a persisted config omits it.
    #[serde(default = "default_content_multiplier")]
    pub content_multiplier: f64,
}

fn default_content_multiplier() -> f64 {
    1.0
}

/// Everything needed to account for one model's prompts: which encoding
/// to tokenize with, its overhead coefficients, and display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Name of the [`crate::encoding::EncodingTable`] this model tokenizes
    /// with.
    pub encoding: String,
    /// Overhead coefficients.
    pub tokens: TokenCoefficients,
    /// Display name.
    pub name: String,
    /// Total context window, in tokens.
    pub context_window: u32,
    /// Maximum tokens the model will generate in one response.
    pub max_tokens: u32,
    /// Per-usage-dimension pricing.
    #[serde(default)]
    pub pricing: Pricing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_multiplier_defaults_to_one_when_absent() {
        let json = r#"{
            "base_overhead": 3, "per_message": 4, "tools_exist": 10,
            "per_tool": 12, "per_desc": 6, "per_first_prop": 5,
            "per_additional_prop": 3, "per_prop_desc": 6, "per_enum": 5,
            "per_nested_object": 6, "per_array_of_objects": 6
        }"#;
        let coeffs: TokenCoefficients = serde_json::from_str(json).unwrap();
        assert_eq!(coeffs.content_multiplier, 1.0);
    }
}
