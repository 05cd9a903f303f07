//! Lexical utilities: tokenization and emoji extraction.

use lazy_static::lazy_static;
use regex::Regex;

use crate::lexicon::{MIN_TOKEN_CHARS, STOP_WORDS};

lazy_static! {
    // Contiguous runs of the symbol/pictograph/emoji blocks. Variation
    // selectors and ZWJ sit outside these ranges, so a decorated emoji
    // extracts as its base scalar values.
    static ref EMOJI_RE: Regex = Regex::new(
        "[\\x{2600}-\\x{27B0}\\x{1F1E0}-\\x{1F1FF}\\x{1F300}-\\x{1F5FF}\
         \\x{1F600}-\\x{1F64F}\\x{1F680}-\\x{1F6FF}\\x{1F900}-\\x{1F9FF}]+"
    )
    .unwrap();
}

/// Splits a message body into analysis tokens: punctuation stripped,
/// lowercased, stop words and tokens shorter than three characters dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '\''))
        .filter(|w| !w.is_empty())
        .map(|w| w.replace('\'', "").to_lowercase())
        .filter(|w| w.chars().count() >= MIN_TOKEN_CHARS && !STOP_WORDS.contains(w.as_str()))
        .collect()
}

/// Extracts contiguous emoji runs from a message body, in order.
pub fn extract_emojis(text: &str) -> Vec<&str> {
    EMOJI_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// All individual emoji scalar values in a message body, reusing the run
/// matcher so the two views always agree.
pub fn emoji_chars(text: &str) -> impl Iterator<Item = char> + '_ {
    EMOJI_RE.find_iter(text).flat_map(|m| m.as_str().chars())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_strips_punctuation_and_case() {
        assert_eq!(
            tokenize("Hello, WORLD! This is great..."),
            vec!["hello", "world", "great"]
        );
    }

    #[test]
    fn test_tokenize_drops_stop_words_and_short_tokens() {
        // "a", "to", "is" are stop words; "ok" and "42" are too short.
        assert_eq!(tokenize("a to is ok 42 coffee"), vec!["coffee"]);
    }

    #[test]
    fn test_tokenize_contractions() {
        // Apostrophes collapse instead of splitting the token.
        assert_eq!(tokenize("don't worry"), vec!["dont", "worry"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("     ").is_empty());
        assert!(tokenize("!!! ???").is_empty());
    }

    #[test]
    fn test_extract_emojis_runs() {
        assert_eq!(extract_emojis("hey 😂😂 there 🔥"), vec!["😂😂", "🔥"]);
        assert!(extract_emojis("plain text").is_empty());
    }

    #[test]
    fn test_emoji_chars_flattens_runs() {
        let chars: Vec<char> = emoji_chars("go 🎉🎉 team ❤").collect();
        assert_eq!(chars, vec!['🎉', '🎉', '❤']);
    }

    #[test]
    fn test_tokenize_keeps_unicode_words() {
        assert_eq!(tokenize("cafe münchen"), vec!["cafe", "münchen"]);
    }
}
