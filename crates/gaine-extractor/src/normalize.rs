//! Text normalisation shared by the extraction strategies

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercase and collapse runs of whitespace, keeping accents
///
/// ```
/// use gaine_extractor::normalize::squash;
///
/// assert_eq!(squash("  Les  Entrées\tde GSB11 "), "les entrées de gsb11");
/// ```
pub fn squash(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase, collapse whitespace and strip diacritics
///
/// ```
/// use gaine_extractor::normalize::fold;
///
/// assert_eq!(fold("Février  Août"), "fevrier aout");
/// ```
pub fn fold(text: &str) -> String {
    let stripped: String = text.nfd().filter(|c| !is_combining_mark(*c)).collect();
    squash(&stripped)
}

/// Cut `text` to at most `max_chars` characters on a char boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
