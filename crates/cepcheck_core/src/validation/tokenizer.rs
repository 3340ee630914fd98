//! Input normalization for raw batch text.
//!
//! User input arrives as a single blob where codes are separated by
//! newlines, commas or semicolons. The tokenizer only splits and trims, it
//! never judges whether a token looks like a code, that is the job of
//! [`crate::validation::address::Cep`].

/// Splits a raw text blob into ordered candidate code tokens.
///
/// Runs of consecutive delimiters count as a single delimiter. Tokens are
/// trimmed of surrounding whitespace and tokens that become empty are
/// discarded. Output order matches first appearance in the input and
/// duplicates are kept.
pub fn tokenize(input: &str) -> Vec<String> {
    input
        .split(['\n', ',', ';'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
