//! # Error Types

/// Errors from `prompt-tokens` operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `encode` input contains a special-token literal that was not in the
    /// allowed set.
    #[error("text contains disallowed special token {literal:?}")]
    DisallowedSpecial {
        /// The literal special-token string that triggered the failure.
        literal: String,
    },

    /// A [`crate::model::ModelConfig`] names an encoding with no loaded
    /// [`crate::encoding::EncodingTable`].
    #[error("unknown encoding {name:?}")]
    UnknownEncoding {
        /// The encoding name that could not be resolved.
        name: String,
    },

    /// The schema walker encountered a node whose shape violates the data
    /// model (e.g. an `array` nested past the recursion guard).
    #[error("invalid schema node: {reason}")]
    InvalidSchemaNode {
        /// Human-readable description of the violation.
        reason: String,
    },

    /// The calibration probe could not extract a coefficient: the API
    /// returned an error, or the derived value was negative or non-finite.
    #[error("calibration failed for {model:?}: {reason}")]
    CalibrationFailed {
        /// The model identifier being calibrated.
        model: String,
        /// Human-readable description of the failure.
        reason: String,
    },

    /// I/O error loading an encoding table or persisted model config.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A persisted model config or accuracy report failed to parse as JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A vocabulary or other plain-text data file failed to parse.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type for `prompt-tokens` operations.
pub type Result<T> = core::result::Result<T, Error>;
