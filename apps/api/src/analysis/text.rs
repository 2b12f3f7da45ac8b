//! Text primitives: normalization, tokenization, light stemming and n-grams.
//!
//! Everything downstream (segment scoring, catalog matching) works on the output of
//! [`Normalizer::normalize`], so a term produced here and a catalog entry loaded through
//! the same normalizer always compare byte-for-byte.

use std::collections::HashSet;

/// Structural separator kept through punctuation stripping ("ci/cd", "pub/sub").
pub const DEFAULT_SEPARATOR: char = '/';

/// Candidate suffixes, tried in order. At most one is removed.
const STEM_SUFFIXES: &[&str] = &["ing", "ed", "ly", "ies", "s"];

/// A suffix is only stripped when the token is longer than `suffix + STEM_MIN_REMAINDER`.
/// Keeps "is", "as", "bus" and friends intact.
const STEM_MIN_REMAINDER: usize = 2;

// ────────────────────────────────────────────────────────────────────────────
// Normalizer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    separator: char,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
        }
    }
}

impl Normalizer {
    pub fn new(separator: char) -> Self {
        Self { separator }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Lower-cases, spaces out the separator, strips ASCII punctuation and collapses
    /// whitespace. Empty in, empty out.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let mut spaced = String::with_capacity(lowered.len() + 8);

        for c in lowered.chars() {
            if c == self.separator {
                spaced.push(' ');
                spaced.push(c);
                spaced.push(' ');
            } else if !c.is_ascii_punctuation() {
                spaced.push(c);
            }
        }

        spaced.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tokenizer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Tokenizer {
    normalizer: Normalizer,
    stopwords: HashSet<String>,
}

impl Tokenizer {
    pub fn new<I>(normalizer: Normalizer, stopwords: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            normalizer,
            stopwords: stopwords.into_iter().collect(),
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn is_stopword(&self, term: &str) -> bool {
        self.stopwords.contains(term)
    }

    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }

    /// Normalizes `text` and returns its non-stopword tokens in order.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.tokenize_normalized(&self.normalizer.normalize(text))
    }

    /// Same as [`Tokenizer::tokenize`] for text that is already normalized.
    pub fn tokenize_normalized(&self, normalized: &str) -> Vec<String> {
        normalized
            .split_whitespace()
            .filter(|t| !self.is_stopword(t))
            .map(str::to_string)
            .collect()
    }
}

/// Strips one trailing suffix for fuzzy comparison. Not a linguistic stemmer:
/// "services" → "service", "companies" → "compan". False merges are expected.
pub fn stem(token: &str) -> &str {
    let len = token.chars().count();
    for suffix in STEM_SUFFIXES {
        if token.ends_with(suffix) && len > suffix.len() + STEM_MIN_REMAINDER {
            return &token[..token.len() - suffix.len()];
        }
    }
    token
}

/// Sliding windows of `n` tokens joined by single spaces.
pub fn ngrams(tokens: &[String], n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }
    tokens.windows(n).map(|w| w.join(" ")).collect()
}
