//! Tokenization, word normalization and the jaundice-rate scorer.

use crate::lexicon::Lexicon;
use once_cell::sync::Lazy;
use regex::Regex;

/// Leading or trailing punctuation and symbols, including typographic quotes.
static EDGE_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{P}\p{S}]+|[\p{P}\p{S}]+$").expect("static regex"));

/// Short words that still carry meaning and are kept by [`split_by_words`].
const SHORT_WORDS_KEPT: &[&str] = &["не"];

/// Maps a raw token to its canonical dictionary form.
///
/// Implementations are shared read-only across every concurrent article task.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, token: &str) -> String;
}

/// Case-folding normalizer used when no morphology engine is plugged in.
///
/// Lowercases and folds `ё` into `е`, which is how Russian dictionaries
/// usually spell their headwords.
#[derive(Debug, Default, Clone, Copy)]
pub struct LowercaseNormalizer;

impl Normalizer for LowercaseNormalizer {
    fn normalize(&self, token: &str) -> String {
        token.to_lowercase().replace('ё', "е")
    }
}

/// Strip punctuation and symbols from both ends of a raw token.
pub fn clean_word(word: &str) -> &str {
    let start = EDGE_PUNCTUATION
        .find(word)
        .filter(|m| m.start() == 0)
        .map_or(0, |m| m.end());
    let rest = &word[start..];
    match EDGE_PUNCTUATION.find_iter(rest).last() {
        Some(m) if m.end() == rest.len() => &rest[..m.start()],
        _ => rest,
    }
}

/// Split plaintext into normalized words.
///
/// Words whose normalized form is two characters or shorter are dropped,
/// except for the negation particle.
pub fn split_by_words(normalizer: &dyn Normalizer, text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(clean_word)
        .filter(|w| !w.is_empty())
        .map(|w| normalizer.normalize(w))
        .filter(|w| w.chars().count() > 2 || SHORT_WORDS_KEPT.contains(&w.as_str()))
        .collect()
}

/// Share of `words` found in `lexicon`, in `[0, 1]`.
///
/// Returns `0.0` for an empty word list.
pub fn calculate_jaundice_rate<S: AsRef<str>>(words: &[S], lexicon: &Lexicon) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let charged = words.iter().filter(|w| lexicon.contains(w.as_ref())).count();
    charged as f64 / words.len() as f64
}
