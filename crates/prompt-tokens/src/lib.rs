//! Offline BPE tokenization and per-model prompt token accounting.
//!
//! Two tightly coupled halves:
//!
//! - [`bpe`]/[`encoding`]: a byte-pair-encoding tokenizer that reproduces
//!   a reference vocabulary's output exactly, given a pre-generated
//!   [`encoding::EncodingTable`].
//! - [`accountant`]/[`schema`]/[`model`]: a per-model accounting layer
//!   that combines tokenized content with calibrated overhead
//!   coefficients to approximate vendor-reported prompt token usage.
//!
//! [`calibration`] holds the pure math side of deriving those
//! coefficients; it does not perform network I/O.

pub mod accountant;
pub mod bpe;
pub mod calibration;
pub mod encoding;
mod errors;
pub mod model;
pub mod schema;
mod types;

pub use bpe::BpeEngine;
pub use errors::{Error, Result};
pub use types::{NO_RANK, Rank};
