//! Context-weighted TF-IDF over the segments of a single document.
//!
//! Segments play the role of documents: `idf` is computed across the segments of the
//! text being scored, never across a corpus. Scores accumulate additively, so a term
//! repeated in several boosted segments compounds.
//!
//! Iteration order is first-occurrence order everywhere (`IndexMap`), and the final sort
//! is stable, so equal scores always come back in the same order.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::lexicon::Lexicon;
use crate::analysis::segment::build_segments;

/// Terms of at most this many characters are down-weighted.
const SHORT_TERM_MAX_CHARS: usize = 2;
const SHORT_TERM_PENALTY: f64 = 0.5;

pub const DEFAULT_TOP_K: usize = 30;
pub const DEFAULT_MAX_TOKENS: usize = 20_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TfIdfOptions {
    pub top_k: usize,
    /// When false only unigrams are scored.
    pub use_ngrams: bool,
    /// Per-document token cap.
    pub max_tokens: usize,
}

impl Default for TfIdfOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            use_ngrams: true,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTerm {
    pub term: String,
    pub score: f64,
}

/// Ranked terms of `text`, highest score first, stopword terms removed, at most
/// `options.top_k` entries.
pub fn tfidf_score(lexicon: &Lexicon, text: &str, options: &TfIdfOptions) -> Vec<ScoredTerm> {
    let segments = build_segments(
        text,
        lexicon.tokenizer(),
        lexicon.context_rules(),
        options.max_tokens,
    );
    let weighted_terms: Vec<(Vec<String>, f64)> = segments
        .iter()
        .map(|s| (s.terms(options.use_ngrams), s.context_weight))
        .collect();

    let idf = inverse_document_frequency(weighted_terms.iter().map(|(terms, _)| terms.as_slice()));

    let mut scores: IndexMap<String, f64> = IndexMap::new();
    for (terms, weight) in &weighted_terms {
        for (term, tf) in term_frequency(terms) {
            let idf_value = idf.get(term).copied().unwrap_or(0.0);
            *scores.entry(term.to_string()).or_insert(0.0) += tf * idf_value * weight;
        }
    }

    for (term, score) in scores.iter_mut() {
        if term.chars().count() <= SHORT_TERM_MAX_CHARS {
            *score *= SHORT_TERM_PENALTY;
        }
    }

    let mut ranked: Vec<ScoredTerm> = scores
        .into_iter()
        .map(|(term, score)| ScoredTerm { term, score })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

    debug!(
        segments = segments.len(),
        terms = ranked.len(),
        top_k = options.top_k,
        "Scored document terms"
    );

    let tokenizer = lexicon.tokenizer();
    ranked
        .into_iter()
        .filter(|t| !tokenizer.is_stopword(&t.term))
        .take(options.top_k)
        .collect()
}

/// Relative frequency of each term within one segment, in first-occurrence order.
/// Empty for a segment without terms.
fn term_frequency(terms: &[String]) -> IndexMap<&str, f64> {
    let mut counts: IndexMap<&str, f64> = IndexMap::new();
    if terms.is_empty() {
        return counts;
    }
    for term in terms {
        *counts.entry(term.as_str()).or_insert(0.0) += 1.0;
    }
    let total = terms.len() as f64;
    for count in counts.values_mut() {
        *count /= total;
    }
    counts
}

/// Smoothed idf, `ln((N + 1) / (df + 1)) + 1`; always positive.
fn inverse_document_frequency<'a, I>(segments: I) -> HashMap<&'a str, f64>
where
    I: Iterator<Item = &'a [String]>,
{
    let mut document_frequency: HashMap<&'a str, usize> = HashMap::new();
    let mut segment_count = 0usize;

    for terms in segments {
        segment_count += 1;
        let mut seen: HashSet<&str> = HashSet::new();
        for term in terms {
            if seen.insert(term.as_str()) {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }
    }

    let n = segment_count as f64;
    document_frequency
        .into_iter()
        .map(|(term, df)| (term, ((n + 1.0) / (df as f64 + 1.0)).ln() + 1.0))
        .collect()
}
