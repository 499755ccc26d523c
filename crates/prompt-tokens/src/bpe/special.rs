//! # Special-Token Handling
//!
//! Decides which special-token literals are allowed to split the text
//! (and be emitted as single tokens) versus which are disallowed
//! (causing `encode` to fail). Literals that are neither allowed nor
//! disallowed pass through untouched, to be tokenized as ordinary text.

use std::collections::HashSet;

use crate::encoding::EncodingTable;
use crate::errors::{Error, Result};
use crate::types::Rank;

/// Which special-token literals a policy applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialTokenSet {
    /// Every special token in the active [`EncodingTable`].
    All,
    /// Exactly the named literals.
    Explicit(HashSet<String>),
}

impl SpecialTokenSet {
    /// The empty explicit set: no special tokens.
    pub fn none() -> Self {
        SpecialTokenSet::Explicit(HashSet::new())
    }

    fn contains(&self, literal: &str) -> bool {
        match self {
            SpecialTokenSet::All => true,
            SpecialTokenSet::Explicit(set) => set.contains(literal),
        }
    }
}

/// One unit of a text split on special-token boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A span to be run through ordinary (pattern + BPE) encoding.
    Ordinary(&'a str),
    /// A special-token occurrence, already resolved to its rank.
    Special(Rank),
}

/// Split `text` on allowed special-token occurrences, failing if a
/// disallowed literal is present anywhere in the text.
///
/// Literals present in `text` that are neither allowed nor disallowed are
/// left untouched inside the surrounding [`Segment::Ordinary`] span.
pub fn split_on_specials<'a>(
    text: &'a str,
    table: &EncodingTable,
    allowed: &SpecialTokenSet,
    disallowed: &SpecialTokenSet,
) -> Result<Vec<Segment<'a>>> {
    for literal in table.special_tokens().keys() {
        if !allowed.contains(literal) && disallowed.contains(literal) && text.contains(literal) {
            return Err(Error::DisallowedSpecial {
                literal: literal.clone(),
            });
        }
    }

    let allowed_literals: Vec<&str> = table
        .special_tokens()
        .keys()
        .filter(|literal| allowed.contains(literal))
        .map(String::as_str)
        .collect();

    let mut segments = Vec::new();
    let mut remaining = text;
    loop {
        let next = allowed_literals
            .iter()
            .filter_map(|&literal| remaining.find(literal).map(|idx| (idx, literal)))
            .min_by_key(|&(idx, literal)| (idx, literal.len()));

        match next {
            None => {
                if !remaining.is_empty() {
                    segments.push(Segment::Ordinary(remaining));
                }
                break;
            }
            Some((idx, literal)) => {
                if idx > 0 {
                    segments.push(Segment::Ordinary(&remaining[..idx]));
                }
                let rank = table.special_tokens()[literal];
                segments.push(Segment::Special(rank));
                remaining = &remaining[idx + literal.len()..];
            }
        }
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn table_with_specials() -> EncodingTable {
        let mut specials = HashMap::new();
        specials.insert("<|endoftext|>".to_string(), 100);
        EncodingTable::from_parts("t", r".", specials, HashMap::new(), Vec::new()).unwrap()
    }

    #[test]
    fn splits_on_allowed_literal() {
        let table = table_with_specials();
        let allowed = SpecialTokenSet::All;
        let disallowed = SpecialTokenSet::none();

        let segments = split_on_specials("hi<|endoftext|>there", &table, &allowed, &disallowed)
            .unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Ordinary("hi"),
                Segment::Special(100),
                Segment::Ordinary("there"),
            ]
        );
    }

    #[test]
    fn disallowed_literal_errors() {
        let table = table_with_specials();
        let allowed = SpecialTokenSet::none();
        let disallowed = SpecialTokenSet::All;

        let err = split_on_specials("hi<|endoftext|>", &table, &allowed, &disallowed);
        assert!(matches!(err, Err(Error::DisallowedSpecial { .. })));
    }

    #[test]
    fn literal_neither_allowed_nor_disallowed_passes_through() {
        let table = table_with_specials();
        let allowed = SpecialTokenSet::none();
        let disallowed = SpecialTokenSet::none();

        let segments = split_on_specials("hi<|endoftext|>there", &table, &allowed, &disallowed)
            .unwrap();
        assert_eq!(segments, vec![Segment::Ordinary("hi<|endoftext|>there")]);
    }
}
