//! Per-model overhead coefficients, metadata, and JSON persistence.

mod config;
mod registry;

pub use config::{ModelConfig, Pricing, TokenCoefficients};
pub use registry::{AccuracyReport, AccuracySample, ModelConfigStore, hash_token_coefficients};
