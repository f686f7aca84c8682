//! Text normalization into search tokens.
//!
//! Shared by vocabulary fitting and document/query transformation, so the
//! two phases always agree on what a token is.

/// Tokens shorter than this many characters are discarded.
pub const MIN_TOKEN_CHARS: usize = 2;

/// Characters kept verbatim: ASCII Latin letters, Cyrillic letters and ASCII
/// digits. Input is lower-cased before this check.
fn is_token_char(ch: char) -> bool {
    ch.is_ascii_lowercase()
        || ch.is_ascii_digit()
        || (('\u{0400}'..='\u{04FF}').contains(&ch) && ch.is_alphabetic())
}

/// Normalize `text` into tokens.
///
/// Lower-cases, replaces each maximal run of characters that are neither
/// token characters nor whitespace with a single space, splits on whitespace
/// and drops tokens shorter than [`MIN_TOKEN_CHARS`].
///
/// ```
/// use sift_search::tokenize::tokenize;
///
/// assert_eq!(tokenize("Red-Car, 2024!"), vec!["red", "car", "2024"]);
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut normalized = String::with_capacity(lowered.len());
    let mut in_run = false;

    for ch in lowered.chars() {
        if is_token_char(ch) || ch.is_whitespace() {
            normalized.push(ch);
            in_run = false;
        } else if !in_run {
            normalized.push(' ');
            in_run = true;
        }
    }

    normalized
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_owned)
        .collect()
}
