//! # Calibration Extraction Math
//!
//! Pure functions over already-collected [`CalibrationSample`]s: no
//! network calls, no side effects. The caller is responsible for
//! gathering samples via an [`ApiUsageSource`](crate::calibration::ApiUsageSource)
//! and feeding the resulting numbers in here.

use crate::bpe::BpeEngine;
use crate::calibration::types::CalibrationError;

/// Differential subtraction: infer one overhead coefficient from a pair
/// of totals that differ by a known number of structural `steps` (e.g. a
/// 3-message total vs. a 1-message total differ by 2 messages' worth of
/// `per_message` overhead), after subtracting whatever of the difference
/// is already accounted for by tokenized text/role content.
pub fn differential_coefficient(
    high_total: u64,
    low_total: u64,
    accounted_for: u64,
    steps: u32,
) -> Result<f64, CalibrationError> {
    let diff = high_total as f64 - low_total as f64 - accounted_for as f64;
    reject_invalid(diff / steps as f64)
}

/// One candidate encoding to score during encoding selection.
pub struct EncodingCandidate<'a> {
    pub name: &'a str,
    pub engine: &'a BpeEngine,
}

/// Tokenizes `corpus` with every candidate, picks the one whose count has
/// the smallest absolute error against `observed_input_tokens`, and
/// infers a `content_multiplier` from that winner's ratio.
pub fn select_encoding<'a>(
    candidates: &[EncodingCandidate<'a>],
    corpus: &str,
    observed_input_tokens: u64,
) -> Result<(&'a str, f64), CalibrationError> {
    let mut best: Option<(&str, u64, i64)> = None;
    for candidate in candidates {
        let raw = candidate.engine.count(corpus) as u64;
        let error = (raw as i64 - observed_input_tokens as i64).abs();
        let is_better = match &best {
            None => true,
            Some((_, _, best_error)) => error < *best_error,
        };
        if is_better {
            best = Some((candidate.name, raw, error));
        }
    }

    let (name, raw, _) = best.ok_or(CalibrationError::NoCandidates)?;
    let multiplier = observed_input_tokens as f64 / raw.max(1) as f64;
    Ok((name, reject_invalid(multiplier)?))
}

fn reject_invalid(value: f64) -> Result<f64, CalibrationError> {
    if !value.is_finite() {
        return Err(CalibrationError::NotFinite);
    }
    if value < 0.0 {
        return Err(CalibrationError::NegativeCoefficient { value });
    }
    Ok(value)
}
