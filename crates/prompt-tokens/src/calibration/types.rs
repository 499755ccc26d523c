//! # Calibration Data Shapes
//!
//! The collaborator seam between this crate's pure differential math and
//! whatever actually calls a vendor API. Nothing in this module performs
//! network I/O.

use thiserror::Error;

/// One synthetic request's shape, varied across a calibration battery.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationRequest {
    pub message_count: u32,
    pub tools_present: bool,
    pub property_count: u32,
    pub nesting_depth: u32,
}

/// One collected measurement: a request shape paired with the vendor's
/// reported `input_tokens`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationSample {
    pub message_count: u32,
    pub tools_present: bool,
    pub property_count: u32,
    pub nesting_depth: u32,
    pub input_tokens: u64,
}

/// Implemented by a caller's own HTTP client; this crate only consumes
/// the trait, never a concrete network-calling type.
pub trait ApiUsageSource {
    fn input_tokens(&self, request: &CalibrationRequest) -> Result<u64, CalibrationError>;
}

/// Failure modes of the pure extraction math below.
#[derive(Debug, Error, PartialEq)]
pub enum CalibrationError {
    #[error("derived coefficient is negative: {value}")]
    NegativeCoefficient { value: f64 },
    #[error("derived coefficient is not finite")]
    NotFinite,
    #[error("no candidate encodings were supplied")]
    NoCandidates,
    #[error("api usage source failed: {reason}")]
    Source { reason: String },
}
