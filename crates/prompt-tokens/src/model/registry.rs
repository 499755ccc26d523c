//! # Model Config Persistence
//!
//! Loads and saves the single JSON document (keyed by model identifier)
//! that holds every [`ModelConfig`], plus the accuracy-report sidecar used
//! to decide when a model needs recalibration.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::encoding::EncodingTable;
use crate::errors::{Error, Result};
use crate::model::config::{ModelConfig, TokenCoefficients};

/// Keyed by model identifier (e.g. `"openai/gpt-5"`).
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ModelConfigStore {
    #[serde(flatten)]
    models: HashMap<String, ModelConfig>,
}

impl ModelConfigStore {
    /// Load a store from JSON, validating every entry's coefficients.
    pub fn load_reader<R: Read>(reader: R) -> Result<Self> {
        let store: Self = serde_json::from_reader(reader)?;
        store.validate()?;
        Ok(store)
    }

    /// Serialize the store as JSON.
    pub fn save_writer<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Look up a model's config by identifier.
    pub fn get(&self, model: &str) -> Option<&ModelConfig> {
        self.models.get(model)
    }

    /// Insert or replace a model's config.
    pub fn insert(&mut self, model: impl Into<String>, config: ModelConfig) {
        self.models.insert(model.into(), config);
    }

    /// Iterate over every `(model identifier, config)` pair.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ModelConfig)> {
        self.models.iter()
    }

    /// Resolve a model identifier to the [`EncodingTable`] its config
    /// names, looked up in `tables` by encoding name.
    ///
    /// Fails with [`Error::UnknownEncoding`] when the model's `encoding`
    /// field names a table that was never loaded.
    pub fn engine_for(
        &self,
        model: &str,
        tables: &HashMap<String, Arc<EncodingTable>>,
    ) -> Result<Arc<EncodingTable>> {
        let config = self.get(model).ok_or_else(|| Error::Parse(format!("unknown model {model:?}")))?;
        tables
            .get(&config.encoding)
            .cloned()
            .ok_or_else(|| Error::UnknownEncoding { name: config.encoding.clone() })
    }

    fn validate(&self) -> Result<()> {
        for (name, config) in &self.models {
            if config.tokens.content_multiplier < 0.5 {
                return Err(Error::Parse(format!(
                    "model {name:?}: content_multiplier {} is below the floor of 0.5",
                    config.tokens.content_multiplier
                )));
            }
        }
        Ok(())
    }
}

/// One size-bucket's calibration-vs-observed measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracySample {
    /// What the accountant reported for this bucket's fixture prompt.
    pub reported: u64,
    /// What the vendor API reported for the same prompt.
    pub observed: u64,
}

/// Per-model accuracy snapshot, keyed by prompt size. `config_hash` lets a
/// caller detect drift: recompute [`hash_token_coefficients`] over the
/// live config and compare against the stored value before trusting this
/// report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    #[serde(rename = "configHash")]
    pub config_hash: u64,
    pub small: AccuracySample,
    pub medium: AccuracySample,
    pub large: AccuracySample,
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Stable FNV-1a hash of a coefficient subrecord, over a fixed field
/// order, so persisted configs can detect when recalibration is needed.
pub fn hash_token_coefficients(coeffs: &TokenCoefficients) -> u64 {
    let fields: [u64; 11] = [
        coeffs.base_overhead as u64,
        coeffs.per_message as u64,
        coeffs.tools_exist as u64,
        coeffs.per_tool as u64,
        coeffs.per_desc as u64,
        coeffs.per_first_prop as u64,
        coeffs.per_additional_prop as u64,
        coeffs.per_prop_desc as u64,
        coeffs.per_enum as u64,
        coeffs.per_nested_object as u64,
        coeffs.per_array_of_objects as u64,
    ];

    let mut hash = FNV_OFFSET_BASIS;
    for field in fields {
        hash = fnv1a(hash, &field.to_le_bytes());
    }
    fnv1a(hash, &coeffs.content_multiplier.to_bits().to_le_bytes())
}

fn fnv1a(mut hash: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_coeffs() -> TokenCoefficients {
        TokenCoefficients {
            base_overhead: 3,
            per_message: 4,
            tools_exist: 10,
            per_tool: 12,
            per_desc: 6,
            per_first_prop: 5,
            per_additional_prop: 3,
            per_prop_desc: 6,
            per_enum: 5,
            per_nested_object: 6,
            per_array_of_objects: 6,
            content_multiplier: 1.0,
        }
    }

    #[test]
    fn round_trips_through_a_real_file() {
        let dir = tempdir::TempDir::new("prompt-tokens-registry").unwrap();
        let path = dir.path().join("models.json");

        let mut store = ModelConfigStore::default();
        store.insert(
            "openai/gpt-5",
            ModelConfig {
                encoding: "o200k_base".to_string(),
                tokens: sample_coeffs(),
                name: "GPT-5".to_string(),
                context_window: 400_000,
                max_tokens: 128_000,
                pricing: Default::default(),
            },
        );
        store.save_writer(std::fs::File::create(&path).unwrap()).unwrap();

        let loaded = ModelConfigStore::load_reader(std::fs::File::open(&path).unwrap()).unwrap();
        assert_eq!(loaded.get("openai/gpt-5"), store.get("openai/gpt-5"));
    }

    #[test]
    fn hash_is_stable_and_sensitive_to_every_field() {
        let base = sample_coeffs();
        let h1 = hash_token_coefficients(&base);
        let h2 = hash_token_coefficients(&base);
        assert_eq!(h1, h2);

        let mut changed = base.clone();
        changed.per_tool += 1;
        assert_ne!(h1, hash_token_coefficients(&changed));

        let mut multiplier_changed = base;
        multiplier_changed.content_multiplier = 1.5;
        assert_ne!(h1, hash_token_coefficients(&multiplier_changed));
    }

    #[test]
    fn engine_for_resolves_a_loaded_table() {
        let mut store = ModelConfigStore::default();
        store.insert(
            "openai/gpt-5",
            ModelConfig {
                encoding: "o200k_base".to_string(),
                tokens: sample_coeffs(),
                name: "GPT-5".to_string(),
                context_window: 400_000,
                max_tokens: 128_000,
                pricing: Default::default(),
            },
        );

        let table = crate::encoding::EncodingTable::from_parts(
            "o200k_base",
            r".",
            HashMap::new(),
            HashMap::new(),
            Vec::new(),
        )
        .unwrap();
        let mut tables = HashMap::new();
        tables.insert("o200k_base".to_string(), std::sync::Arc::new(table));

        let resolved = store.engine_for("openai/gpt-5", &tables).unwrap();
        assert_eq!(resolved.name(), "o200k_base");
    }

    #[test]
    fn engine_for_rejects_an_unloaded_encoding_name() {
        let mut store = ModelConfigStore::default();
        store.insert(
            "openai/gpt-5",
            ModelConfig {
                encoding: "o200k_base".to_string(),
                tokens: sample_coeffs(),
                name: "GPT-5".to_string(),
                context_window: 400_000,
                max_tokens: 128_000,
                pricing: Default::default(),
            },
        );

        let tables = HashMap::new();
        let err = store.engine_for("openai/gpt-5", &tables);
        assert!(matches!(err, Err(Error::UnknownEncoding { name }) if name == "o200k_base"));
    }

    #[test]
    fn rejects_content_multiplier_below_floor() {
        let mut coeffs = sample_coeffs();
        coeffs.content_multiplier = 0.1;
        let config = ModelConfig {
            encoding: "cl100k_base".to_string(),
            tokens: coeffs,
            name: "test".to_string(),
            context_window: 128_000,
            max_tokens: 4096,
            pricing: Default::default(),
        };
        let mut store = ModelConfigStore::default();
        store.insert("test/model", config);

        let mut buf = Vec::new();
        store.save_writer(&mut buf).unwrap();
        let err = ModelConfigStore::load_reader(Cursor::new(buf));
        assert!(err.is_err());
    }
}
