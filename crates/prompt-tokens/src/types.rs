//! # Common Types

/// The concrete token-id type used throughout this crate.
///
/// Every vocabulary this crate loads fits comfortably in `u32`, so no
/// generic token-width parameter is introduced; see `DESIGN.md`.
pub type Rank = u32;

/// A sentinel meaning "no merge rank known for this pair/piece".
pub const NO_RANK: Rank = Rank::MAX;
