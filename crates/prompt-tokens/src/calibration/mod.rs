//! Offline-only half of the calibration protocol: data shapes plus the
//! pure differential-subtraction and encoding-selection math. Does not
//! perform network I/O; see [`ApiUsageSource`] for the seam a caller
//! wires to a real HTTP client.

mod extract;
mod types;

pub use extract::{EncodingCandidate, differential_coefficient, select_encoding};
pub use types::{ApiUsageSource, CalibrationError, CalibrationRequest, CalibrationSample};
