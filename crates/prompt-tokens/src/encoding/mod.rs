//! # Encoding Table
//!
//! The immutable vocabulary data a [`crate::bpe::BpeEngine`] is built
//! over: pattern, special tokens, rank tables, and decoder.

mod loader;
pub mod pretrained;
mod table;

pub use loader::{LoadedRanks, load_tiktoken_reader};
pub use table::{DecoderEntry, EncodingTable, checked_special_tokens};
