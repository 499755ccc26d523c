//! # Encoding Table
//!
//! Immutable data: the pattern regex, the special-token map, the two rank
//! tables (string-keyed and byte-keyed), and the decoder.

use std::collections::HashMap;
use std::ops::Range;
use std::str;

use crate::errors::{Error, Result};
use crate::types::Rank;

/// A decoded entry: the majority of ranks decode straight back to a valid
/// UTF-8 string (stored directly, so decode can append strings without
/// touching a byte buffer); the minority decode to an opaque byte sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecoderEntry {
    /// The rank's bytes round-trip through UTF-8.
    Str(String),
    /// The rank's bytes do not form valid UTF-8.
    Bytes(Vec<u8>),
}

impl DecoderEntry {
    /// Classify and wrap a raw byte sequence, preferring [`DecoderEntry::Str`]
    /// when the bytes are valid UTF-8.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(s) => DecoderEntry::Str(s),
            Err(e) => DecoderEntry::Bytes(e.into_bytes()),
        }
    }
}

/// Immutable BPE vocabulary: pattern, rank tables, specials, decoder.
///
/// Every rank used by the vocabulary appears in exactly one of
/// `string_ranks` or `binary_ranks`; `decoder[rank]` agrees with that
/// entry's key; `binary_ranks` is sorted and deduplicated by byte key.
#[derive(Debug, Clone)]
pub struct EncodingTable {
    name: String,
    pattern: String,
    special_tokens: HashMap<String, Rank>,
    string_ranks: HashMap<String, Rank>,
    binary_ranks: Vec<(Vec<u8>, Rank)>,
    decoder: HashMap<Rank, DecoderEntry>,
    /// `first_byte_index[b]` is the sub-range of `binary_ranks` whose
    /// first byte equals `b`. Built once at construction.
    first_byte_index: [Range<usize>; 256],
    /// Inverse of `special_tokens`, for decode's fallback lookup.
    special_by_rank: HashMap<Rank, String>,
}

impl EncodingTable {
    /// Construct an [`EncodingTable`] from its parts.
    ///
    /// `binary_ranks` need not be pre-sorted; it is sorted here.
    pub fn from_parts(
        name: impl Into<String>,
        pattern: impl Into<String>,
        special_tokens: HashMap<String, Rank>,
        string_ranks: HashMap<String, Rank>,
        mut binary_ranks: Vec<(Vec<u8>, Rank)>,
    ) -> Result<Self> {
        binary_ranks.sort_by(|a, b| a.0.cmp(&b.0));
        binary_ranks.dedup_by(|a, b| a.0 == b.0);

        let mut decoder = HashMap::with_capacity(string_ranks.len() + binary_ranks.len());
        for (s, &rank) in &string_ranks {
            decoder.insert(rank, DecoderEntry::Str(s.clone()));
        }
        for (bytes, &rank) in &binary_ranks {
            decoder.insert(rank, DecoderEntry::from_bytes(bytes.clone()));
        }

        let first_byte_index = build_first_byte_index(&binary_ranks);
        let special_by_rank = special_tokens
            .iter()
            .map(|(literal, &rank)| (rank, literal.clone()))
            .collect();

        Ok(Self {
            name: name.into(),
            pattern: pattern.into(),
            special_tokens,
            string_ranks,
            binary_ranks,
            decoder,
            first_byte_index,
            special_by_rank,
        })
    }

    /// The encoding's identifier (e.g. `"cl100k_base"`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pattern regex source used to split text into pieces before
    /// BPE merging.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Map from special-token literal to its rank.
    pub fn special_tokens(&self) -> &HashMap<String, Rank> {
        &self.special_tokens
    }

    /// Look up a piece that is valid UTF-8 directly in the string-ranks
    /// table.
    pub fn lookup_string(&self, piece: &str) -> Option<Rank> {
        self.string_ranks.get(piece).copied()
    }

    /// Resolve a byte slice to a rank: try the UTF-8 string table first,
    /// falling back to a binary search over `binary_ranks` restricted to
    /// entries sharing the slice's first byte.
    pub fn lookup_bytes(&self, bytes: &[u8]) -> Option<Rank> {
        if bytes.is_empty() {
            return None;
        }
        if let Ok(s) = str::from_utf8(bytes) {
            if let Some(rank) = self.string_ranks.get(s) {
                return Some(*rank);
            }
        }
        let range = self.first_byte_index[bytes[0] as usize].clone();
        let candidates = &self.binary_ranks[range];
        candidates
            .binary_search_by(|(k, _)| k.as_slice().cmp(bytes))
            .ok()
            .map(|i| candidates[i].1)
    }

    /// Resolve a rank back to its decoded form, if known.
    pub fn decode_rank(&self, rank: Rank) -> Option<&DecoderEntry> {
        self.decoder.get(&rank)
    }

    /// Resolve a rank to its special-token literal, if it is one.
    pub fn special_literal_for_rank(&self, rank: Rank) -> Option<&str> {
        self.special_by_rank.get(&rank).map(String::as_str)
    }

    /// Total number of distinct ranks covered by `string_ranks` ∪
    /// `binary_ranks` (not including special tokens).
    pub fn len(&self) -> usize {
        self.string_ranks.len() + self.binary_ranks.len()
    }

    /// `true` if the vocabulary (excluding specials) is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn build_first_byte_index(binary_ranks: &[(Vec<u8>, Rank)]) -> [Range<usize>; 256] {
    let mut index: [Range<usize>; 256] = std::array::from_fn(|_| 0..0);
    let mut i = 0;
    while i < binary_ranks.len() {
        let byte = binary_ranks[i].0[0];
        let start = i;
        while i < binary_ranks.len() && binary_ranks[i].0[0] == byte {
            i += 1;
        }
        index[byte as usize] = start..i;
    }
    index
}

/// Load a special-token map checking for rank collisions with the base
/// vocabulary.
pub fn checked_special_tokens(
    encoding_name: &str,
    special_tokens: HashMap<String, Rank>,
    string_ranks: &HashMap<String, Rank>,
) -> Result<HashMap<String, Rank>> {
    let base_ranks: std::collections::HashSet<Rank> = string_ranks.values().copied().collect();
    for (literal, rank) in &special_tokens {
        if base_ranks.contains(rank) {
            return Err(Error::Parse(format!(
                "special token {literal:?} in encoding {encoding_name:?} collides with base vocabulary rank {rank}"
            )));
        }
    }
    Ok(special_tokens)
}
