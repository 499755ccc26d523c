//! BPE engine: piece cache, merge loop, special-token splitting, and the
//! public [`BpeEngine`] surface.

mod cache;
mod engine;
mod merge;
mod special;

pub use cache::PieceCache;
pub use engine::BpeEngine;
pub use merge::merge_piece;
pub use special::{Segment, SpecialTokenSet, split_on_specials};
