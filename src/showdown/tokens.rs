// src/showdown/tokens.rs
use crate::core::sanitize::normalize_glyphs;

/// Split a raw fragment into tokens. Position in the returned vec is the token index.
pub fn tokenize(text: &str) -> Vec<String> {
    let norm = normalize_glyphs(text);
    norm.split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
