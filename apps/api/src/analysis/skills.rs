//! Catalog skill matching.
//!
//! A skill is present in a text when its canonical form appears as a substring of the
//! normalized text, or when every stemmed token of the canonical form appears somewhere
//! among the stemmed text tokens. The second test ignores order and adjacency, so
//! "machine learning" matches "learning ... machine". Both tests over-match: "r" is a
//! substring of most English text.

use std::collections::{BTreeSet, HashSet};

use crate::analysis::lexicon::Lexicon;
use crate::analysis::text::stem;

/// A document normalized once and indexed for repeated presence tests.
#[derive(Debug, Clone)]
pub struct PreparedText {
    normalized: String,
    /// `" " + normalized + " "`, for token-boundary phrase tests.
    padded: String,
    stems: HashSet<String>,
}

impl PreparedText {
    pub fn new(lexicon: &Lexicon, text: &str) -> Self {
        let normalized = lexicon.normalizer().normalize(text);
        let stems = normalized
            .split_whitespace()
            .map(|t| stem(t).to_string())
            .collect();
        let padded = format!(" {normalized} ");
        Self {
            normalized,
            padded,
            stems,
        }
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Substring test, then stemmed-token subset test. `phrase` must be normalized.
    pub fn contains_phrase(&self, phrase: &str) -> bool {
        if phrase.is_empty() {
            return false;
        }
        if self.normalized.contains(phrase) {
            return true;
        }
        phrase
            .split_whitespace()
            .all(|token| self.stems.contains(stem(token)))
    }

    /// Whole-token phrase test: `phrase` must start and end on token boundaries.
    pub fn contains_tokens(&self, phrase: &str) -> bool {
        !phrase.is_empty() && self.padded.contains(&format!(" {phrase} "))
    }
}

/// Normalizes a term and maps it through the synonym table.
pub fn normalize_skill(lexicon: &Lexicon, term: &str) -> String {
    let normalized = lexicon.normalizer().normalize(term);
    match lexicon.synonyms().resolve(&normalized) {
        Some(canonical) => canonical.to_string(),
        None => normalized,
    }
}

/// Whether `skill`, after canonicalization, is present in `text`.
pub fn skill_present(lexicon: &Lexicon, text: &PreparedText, skill: &str) -> bool {
    text.contains_phrase(&normalize_skill(lexicon, skill))
}

/// Canonical skills found in `text`, sorted and unique.
pub fn extract_skills(lexicon: &Lexicon, text: &str) -> Vec<String> {
    let prepared = PreparedText::new(lexicon, text);
    extract_prepared(lexicon, &prepared).into_iter().collect()
}

/// Catalog scan over an already prepared text.
///
/// Catalog entries are tested through their canonical form. Aliases are additionally
/// tested by their own wording on token boundaries, so "postgres" in a resume yields
/// "postgresql" while "tf" inside "platform" does not yield "tensorflow".
pub fn extract_prepared(lexicon: &Lexicon, text: &PreparedText) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    if text.normalized().is_empty() {
        return found;
    }

    for skill in lexicon.catalog().iter() {
        let canonical = normalize_skill(lexicon, skill);
        if text.contains_phrase(&canonical) {
            found.insert(canonical);
        }
    }

    for (alias, canonical) in lexicon.synonyms().iter() {
        if text.contains_tokens(alias) || text.contains_phrase(canonical) {
            found.insert(canonical.to_string());
        }
    }

    found
}
