//! # BPE Engine (C2)
//!
//! The public tokenizer surface: `encode`, `encode_ordinary`, `decode`,
//! `count`, built over a shared [`EncodingTable`] and an owned, mutable
//! [`PieceCache`]. Not `Sync`: the cache path uses a [`RefCell`]. A
//! caller wanting concurrency constructs one engine per worker rather
//! than sharing one across threads.

use std::cell::RefCell;
use std::sync::Arc;

use fancy_regex::Regex;

use crate::bpe::cache::PieceCache;
use crate::bpe::merge::merge_piece;
use crate::bpe::special::{Segment, SpecialTokenSet, split_on_specials};
use crate::encoding::{DecoderEntry, EncodingTable};
use crate::errors::Result;
use crate::types::Rank;

/// Average bytes-per-token used only to pre-size the output buffer; not
/// load-bearing for correctness.
const EXPECTED_BYTES_PER_TOKEN: f64 = 4.0;

/// A BPE tokenizer bound to one [`EncodingTable`].
pub struct BpeEngine {
    table: Arc<EncodingTable>,
    pattern: Regex,
    cache: RefCell<PieceCache>,
}

impl BpeEngine {
    /// Build an engine over a shared encoding table, with the default
    /// piece-cache capacity.
    pub fn new(table: Arc<EncodingTable>) -> Result<Self> {
        Self::with_cache_capacity(table, PieceCache::DEFAULT_CAPACITY)
    }

    /// Build an engine with an explicit piece-cache capacity (`0`
    /// disables caching).
    pub fn with_cache_capacity(table: Arc<EncodingTable>, cache_capacity: usize) -> Result<Self> {
        let pattern = Regex::new(table.pattern())
            .map_err(|e| crate::errors::Error::Parse(format!("invalid pattern regex: {e}")))?;
        Ok(Self {
            table,
            pattern,
            cache: RefCell::new(PieceCache::with_capacity(cache_capacity)),
        })
    }

    /// The underlying encoding table.
    pub fn table(&self) -> &EncodingTable {
        &self.table
    }

    /// Encode text, splitting on allowed special-token occurrences and
    /// failing on disallowed ones.
    #[tracing::instrument(level = "debug", skip(self, text), fields(text_len = text.len()))]
    pub fn encode(
        &self,
        text: &str,
        allowed_special: &SpecialTokenSet,
        disallowed_special: &SpecialTokenSet,
    ) -> Result<Vec<Rank>> {
        let segments = split_on_specials(text, &self.table, allowed_special, disallowed_special)?;

        let mut tokens = Vec::with_capacity((text.len() as f64 / EXPECTED_BYTES_PER_TOKEN) as usize);
        for segment in segments {
            match segment {
                Segment::Ordinary(span) => self.encode_ordinary_append(span, &mut tokens),
                Segment::Special(rank) => tokens.push(rank),
            }
        }
        Ok(tokens)
    }

    /// Encode text with no special-token awareness at all: the pattern is
    /// applied to the whole string and special-token literals are just
    /// ordinary bytes.
    #[tracing::instrument(level = "debug", skip(self, text), fields(text_len = text.len()))]
    pub fn encode_ordinary(&self, text: &str) -> Vec<Rank> {
        let mut tokens = Vec::with_capacity((text.len() as f64 / EXPECTED_BYTES_PER_TOKEN) as usize);
        self.encode_ordinary_append(text, &mut tokens);
        tokens
    }

    /// `count(text) == encode_ordinary(text).len()`.
    pub fn count(&self, text: &str) -> usize {
        self.encode_ordinary(text).len()
    }

    /// Decode tokens back to text. Unknown ranks are skipped, never
    /// fatal.
    #[tracing::instrument(level = "debug", skip(self, tokens), fields(n = tokens.len()))]
    pub fn decode(&self, tokens: &[Rank]) -> String {
        let mut out = String::new();
        let mut byte_buf: Vec<u8> = Vec::new();

        let flush = |byte_buf: &mut Vec<u8>, out: &mut String| {
            if !byte_buf.is_empty() {
                out.push_str(&String::from_utf8_lossy(byte_buf));
                byte_buf.clear();
            }
        };

        for &rank in tokens {
            match self.table.decode_rank(rank) {
                Some(DecoderEntry::Str(s)) => {
                    flush(&mut byte_buf, &mut out);
                    out.push_str(s);
                }
                Some(DecoderEntry::Bytes(bytes)) => {
                    byte_buf.extend_from_slice(bytes);
                }
                None => {
                    if let Some(literal) = self.table.special_literal_for_rank(rank) {
                        flush(&mut byte_buf, &mut out);
                        out.push_str(literal);
                    }
                    // Otherwise: unknown rank, silently skipped.
                }
            }
        }
        flush(&mut byte_buf, &mut out);
        out
    }

    fn encode_ordinary_append(&self, text: &str, tokens: &mut Vec<Rank>) {
        for m in self.pattern.find_iter(text) {
            let Ok(m) = m else { continue };
            let piece = m.as_str();
            self.encode_piece_append(piece, tokens);
        }
    }

    fn encode_piece_append(&self, piece: &str, tokens: &mut Vec<Rank>) {
        if let Some(rank) = self.table.lookup_string(piece) {
            tokens.push(rank);
            return;
        }
        if let Some(cached) = self.cache.borrow().get(piece) {
            tokens.extend_from_slice(cached);
            return;
        }
        let merged = merge_piece(&self.table, piece.as_bytes());
        self.cache.borrow_mut().insert(piece.to_string(), merged.clone());
        tokens.extend(merged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::EncodingTable;
    use std::collections::HashMap;

    fn toy_engine() -> BpeEngine {
        let mut string_ranks: HashMap<String, u32> = HashMap::new();
        let mut binary_ranks: Vec<(Vec<u8>, u32)> = Vec::new();
        for b in 0u32..256 {
            if b < 128 {
                string_ranks.insert((b as u8 as char).to_string(), b);
            } else {
                binary_ranks.push((vec![b as u8], b));
            }
        }
        string_ranks.insert("at".to_string(), 300);
        string_ranks.insert("ate".to_string(), 301);

        let mut specials = HashMap::new();
        specials.insert("<|endoftext|>".to_string(), 500);

        let table =
            EncodingTable::from_parts("toy", r"\w+|\s+|.", specials, string_ranks, binary_ranks)
                .unwrap();
        BpeEngine::new(Arc::new(table)).unwrap()
    }

    #[test]
    fn empty_string_encodes_to_nothing() {
        let engine = toy_engine();
        assert_eq!(engine.encode_ordinary(""), Vec::<u32>::new());
        assert_eq!(engine.count(""), 0);
    }

    #[test]
    fn round_trips_through_ordinary_encoding() {
        let engine = toy_engine();
        for text in ["ate", "plate", "hello world", ""] {
            let tokens = engine.encode_ordinary(text);
            assert_eq!(engine.decode(&tokens), text);
        }
    }

    #[test]
    fn count_matches_encode_ordinary_length() {
        let engine = toy_engine();
        for text in ["ate plate", "a", ""] {
            assert_eq!(engine.count(text), engine.encode_ordinary(text).len());
        }
    }

    #[test]
    fn cache_does_not_change_output() {
        let engine = toy_engine();
        let first = engine.encode_ordinary("plate plate plate");
        let second = engine.encode_ordinary("plate plate plate");
        assert_eq!(first, second);
    }

    #[test]
    fn disallowed_special_errors_allowed_special_emits_one_token() {
        let engine = toy_engine();
        let text = "hi<|endoftext|>bye";

        let err = engine.encode(text, &SpecialTokenSet::none(), &SpecialTokenSet::All);
        assert!(err.is_err());

        let tokens = engine
            .encode(text, &SpecialTokenSet::All, &SpecialTokenSet::none())
            .unwrap();
        assert!(tokens.contains(&500));
    }

    #[test]
    fn decode_skips_unknown_ranks() {
        let engine = toy_engine();
        let tokens = vec!['a' as u32, 999_999, 'b' as u32];
        assert_eq!(engine.decode(&tokens), "ab");
    }
}
