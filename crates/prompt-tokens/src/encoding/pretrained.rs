//! # Public Pretrained Encoding Metadata
//!
//! The pattern strings and special-token tables below are the small,
//! publicly documented metadata for OpenAI's `cl100k_base` and
//! `o200k_base` vocabularies. The multi-hundred-thousand-entry rank
//! tables are not embedded in this crate; load them at runtime with
//! [`crate::encoding::load_tiktoken_reader`] and pass the result, together
//! with these constants, to [`crate::encoding::EncodingTable::from_parts`].

/// The `cl100k_base` word-split pattern (used by `gpt-3.5`/`gpt-4`-era
/// models). Written for the `fancy_regex` dialect: case-insensitive
/// contraction group, unicode letter/number categories.
pub const CL100K_BASE_PATTERN: &str = concat!(
    r"'(?i:[sdmt]|ll|ve|re)",
    r"|[^\r\n\p{L}\p{N}]?+\p{L}++",
    r"|\p{N}{1,3}+",
    r"| ?[^\s\p{L}\p{N}]++[\r\n]*+",
    r"|\s++$",
    r"|\s*[\r\n]",
    r"|\s+(?!\S)",
    r"|\s",
);

/// The `o200k_base` word-split pattern (used by `gpt-4o`/`gpt-5`-era
/// models).
pub const O200K_BASE_PATTERN: &str = concat!(
    r"[^\r\n\p{L}\p{N}]?[\p{Lu}\p{Lt}\p{Lm}\p{Lo}\p{M}]*[\p{Ll}\p{Lm}\p{Lo}\p{M}]+(?i:'s|'t|'re|'ve|'m|'ll|'d)?",
    r"|[^\r\n\p{L}\p{N}]?[\p{Lu}\p{Lt}\p{Lm}\p{Lo}\p{M}]+[\p{Ll}\p{Lm}\p{Lo}\p{M}]*(?i:'s|'t|'re|'ve|'m|'ll|'d)?",
    r"|\p{N}{1,3}",
    r"| ?[^\s\p{L}\p{N}]+[\r\n/]*",
    r"|\s*[\r\n]+",
    r"|\s+(?!\S)",
    r"|\s+",
);

/// `cl100k_base`'s special tokens: literal text to rank.
pub const CL100K_BASE_SPECIALS: &[(&str, u32)] = &[
    ("<|endoftext|>", 100257),
    ("<|fim_prefix|>", 100258),
    ("<|fim_middle|>", 100259),
    ("<|fim_suffix|>", 100260),
    ("<|endofprompt|>", 100276),
];

/// `o200k_base`'s special tokens: literal text to rank.
pub const O200K_BASE_SPECIALS: &[(&str, u32)] = &[("<|endoftext|>", 199999), ("<|endofprompt|>", 200018)];

#[cfg(test)]
mod tests {
    use super::*;
    use fancy_regex::Regex;

    #[test]
    fn patterns_compile() {
        assert!(Regex::new(CL100K_BASE_PATTERN).is_ok());
        assert!(Regex::new(O200K_BASE_PATTERN).is_ok());
    }

    #[test]
    fn specials_are_nonempty_and_unique() {
        for table in [CL100K_BASE_SPECIALS, O200K_BASE_SPECIALS] {
            let mut seen = std::collections::HashSet::new();
            for (literal, rank) in table {
                assert!(seen.insert(*rank), "duplicate rank {rank} in {literal:?}");
            }
        }
    }
}
