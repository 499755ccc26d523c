//! # Tiktoken-Format Vocabulary IO
//!
//! Reads the `base64(bytes) SP rank` line format used by the publicly
//! distributed `cl100k_base.tiktoken`/`o200k_base.tiktoken` files. This is
//! the only supported way to load a full rank table at runtime; training
//! new merge rules from a corpus is not implemented here.

use std::collections::HashMap;
use std::io::BufRead;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;

use crate::errors::{Error, Result};
use crate::types::Rank;

/// The two rank tables produced by splitting a loaded vocabulary on
/// whether its bytes round-trip through UTF-8.
pub struct LoadedRanks {
    /// Entries whose bytes are valid UTF-8.
    pub string_ranks: HashMap<String, Rank>,
    /// Entries whose bytes are not valid UTF-8.
    pub binary_ranks: Vec<(Vec<u8>, Rank)>,
}

/// Load and split a tiktoken-format vocabulary from any [`BufRead`]
/// source.
///
/// Each line is `base64(span) SP rank`. A span that decodes to valid
/// UTF-8 lands in `string_ranks`; all others land in `binary_ranks`.
pub fn load_tiktoken_reader<R: BufRead>(reader: R) -> Result<LoadedRanks> {
    let mut string_ranks = HashMap::new();
    let mut binary_ranks = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let (span_b64, rank_str) = line.split_once(' ').ok_or_else(|| Error::Parse("malformed tiktoken line (no space separator)".to_string()))?;

        let span = BASE64_STANDARD
            .decode(span_b64)
            .map_err(|e| Error::Parse(format!("invalid base64 span: {e}")))?;
        let rank: Rank = rank_str
            .parse()
            .map_err(|e| Error::Parse(format!("invalid rank {rank_str:?}: {e}")))?;

        match String::from_utf8(span) {
            Ok(s) => {
                string_ranks.insert(s, rank);
            }
            Err(e) => {
                binary_ranks.push((e.into_bytes(), rank));
            }
        }
    }

    Ok(LoadedRanks {
        string_ranks,
        binary_ranks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn loads_utf8_and_binary_entries() {
        let a = BASE64_STANDARD.encode("apple");
        let invalid = BASE64_STANDARD.encode([0xff, 0xfe]);
        let text = format!("{a} 0\n{invalid} 1\n");

        let loaded = load_tiktoken_reader(Cursor::new(text)).unwrap();
        assert_eq!(loaded.string_ranks.get("apple"), Some(&0));
        assert_eq!(loaded.binary_ranks, vec![(vec![0xff, 0xfe], 1)]);
    }

    #[test]
    fn rejects_malformed_line() {
        let err = load_tiktoken_reader(Cursor::new("no-separator-here\n"));
        assert!(err.is_err());
    }
}
