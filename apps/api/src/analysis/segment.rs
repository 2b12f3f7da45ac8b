//! Segmentation and context weighting.
//!
//! A document is cut into pseudo-sentences; each segment keeps its own tokens and a
//! multiplicative weight derived from signal phrases ("required", "preferred", ...).
//! Boundaries are heuristic: "node.js" splits in two, run-ons stay whole. Segments are
//! only a scoring-locality device.

use regex::Regex;
use serde::Serialize;
use tracing::warn;

use crate::analysis::lexicon::LexiconError;
use crate::analysis::text::{ngrams, Tokenizer};

/// Newlines, bullets and list dashes. Runs collapse because empty pieces are dropped.
const BOUNDARY_CHARS: &[char] = &['\n', '\r', '\u{2022}', '-', '.'];

// ────────────────────────────────────────────────────────────────────────────
// Context rules
// ────────────────────────────────────────────────────────────────────────────

/// A `(pattern, multiplier)` pair. The pattern is compiled once at load time so a
/// malformed rule fails configuration instead of silently never matching.
#[derive(Debug, Clone)]
pub struct ContextRule {
    pattern: Regex,
    multiplier: f64,
}

impl ContextRule {
    pub fn new(pattern: &str, multiplier: f64) -> Result<Self, LexiconError> {
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(LexiconError::InvalidMultiplier {
                pattern: pattern.to_string(),
                multiplier,
            });
        }
        let pattern = Regex::new(pattern).map_err(|source| LexiconError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern,
            multiplier,
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    fn matches(&self, lowered: &str) -> bool {
        self.pattern.is_match(lowered)
    }
}

/// Product of the multipliers of every rule matching the lower-cased segment.
pub fn segment_weight(rules: &[ContextRule], segment_text: &str) -> f64 {
    let lowered = segment_text.to_lowercase();
    rules
        .iter()
        .filter(|rule| rule.matches(&lowered))
        .fold(1.0, |weight, rule| weight * rule.multiplier)
}

// ────────────────────────────────────────────────────────────────────────────
// Segments
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub text: String,
    pub tokens: Vec<String>,
    pub context_weight: f64,
}

impl Segment {
    /// The segment's term multiset: unigrams, then bigrams, then trigrams.
    pub fn terms(&self, use_ngrams: bool) -> Vec<String> {
        let mut terms = self.tokens.clone();
        if use_ngrams {
            terms.extend(ngrams(&self.tokens, 2));
            terms.extend(ngrams(&self.tokens, 3));
        }
        terms
    }
}

/// Splits raw text into trimmed, non-empty pieces. Never returns an empty list: text
/// without any content yields a single piece holding the trimmed text.
pub fn split_segments(text: &str) -> Vec<&str> {
    let pieces: Vec<&str> = text
        .split(BOUNDARY_CHARS)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    if pieces.is_empty() {
        vec![text.trim()]
    } else {
        pieces
    }
}

/// Segments, tokenizes and weights a document.
///
/// `max_tokens` bounds the total token count; once it is spent the remaining segments
/// are dropped (the first segment is always kept, possibly truncated).
pub fn build_segments(
    text: &str,
    tokenizer: &Tokenizer,
    rules: &[ContextRule],
    max_tokens: usize,
) -> Vec<Segment> {
    let pieces = split_segments(text);
    let piece_count = pieces.len();
    let mut budget = max_tokens;
    let mut segments = Vec::with_capacity(piece_count);

    for piece in pieces {
        if budget == 0 && !segments.is_empty() {
            warn!(
                kept = segments.len(),
                total = piece_count,
                max_tokens,
                "document exceeds token cap, trailing segments dropped"
            );
            break;
        }

        let mut tokens = tokenizer.tokenize(piece);
        tokens.truncate(budget);
        budget -= tokens.len();

        segments.push(Segment {
            text: piece.to_string(),
            tokens,
            context_weight: segment_weight(rules, piece),
        });
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::text::Normalizer;

    fn tokenizer() -> Tokenizer {
        Tokenizer::new(Normalizer::default(), ["and", "the"].iter().map(|s| s.to_string()))
    }

    fn default_rules() -> Vec<ContextRule> {
        vec![
            ContextRule::new(r"\b(required|must have|qualifications|requirements)\b", 1.4).unwrap(),
            ContextRule::new(r"\b(nice to have|preferred)\b", 1.15).unwrap(),
            ContextRule::new(r"\b(responsibilities|you will|we are looking)\b", 1.1).unwrap(),
        ]
    }

    #[test]
    fn test_split_on_newlines_bullets_and_periods() {
        let text = "Python required.\n• Kubernetes preferred\r\n- SQL. Docker";
        assert_eq!(
            split_segments(text),
            vec!["Python required", "Kubernetes preferred", "SQL", "Docker"]
        );
    }

    #[test]
    fn test_split_falls_back_to_whole_text() {
        assert_eq!(split_segments("no boundaries here"), vec!["no boundaries here"]);
        assert_eq!(split_segments(""), vec![""]);
        assert_eq!(split_segments(" ... \n "), vec!["..."]);
    }

    #[test]
    fn test_weight_defaults_to_one() {
        assert_eq!(segment_weight(&default_rules(), "We use Rust daily"), 1.0);
        assert_eq!(segment_weight(&[], "Required: anything"), 1.0);
    }

    #[test]
    fn test_weight_single_rule() {
        let w = segment_weight(&default_rules(), "Preferred: Kubernetes");
        assert!((w - 1.15).abs() < 1e-12, "weight was {w}");
    }

    #[test]
    fn test_weights_compose_multiplicatively() {
        let w = segment_weight(
            &default_rules(),
            "Responsibilities include the REQUIRED on-call rotation",
        );
        assert!((w - 1.4 * 1.1).abs() < 1e-12, "weight was {w}");
    }

    #[test]
    fn test_weight_respects_word_boundaries() {
        // "requiredness" must not trip the \b-anchored requirement rule
        assert_eq!(segment_weight(&default_rules(), "requiredness"), 1.0);
    }

    #[test]
    fn test_invalid_pattern_fails_fast() {
        let err = ContextRule::new(r"(unclosed", 1.2).unwrap_err();
        assert!(matches!(err, LexiconError::InvalidPattern { .. }));
    }

    #[test]
    fn test_invalid_multiplier_rejected() {
        assert!(ContextRule::new("x", f64::NAN).is_err());
        assert!(ContextRule::new("x", -1.0).is_err());
        assert!(ContextRule::new("x", 0.0).is_ok());
    }

    #[test]
    fn test_build_segments_carries_tokens_and_weight() {
        let segments = build_segments(
            "Requirements: Python and SQL. Nice to have: Go",
            &tokenizer(),
            &default_rules(),
            1_000,
        );
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].tokens, vec!["requirements", "python", "sql"]);
        assert!((segments[0].context_weight - 1.4).abs() < 1e-12);
        assert_eq!(segments[1].tokens, vec!["nice", "to", "have", "go"]);
        assert!((segments[1].context_weight - 1.15).abs() < 1e-12);
    }

    #[test]
    fn test_build_segments_empty_document_has_one_empty_segment() {
        let segments = build_segments("", &tokenizer(), &default_rules(), 1_000);
        assert_eq!(segments.len(), 1);
        assert!(segments[0].tokens.is_empty());
    }

    #[test]
    fn test_build_segments_respects_token_cap() {
        let segments = build_segments("a b c. d e f. g h i", &tokenizer(), &[], 4);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].tokens.len(), 3);
        assert_eq!(segments[1].tokens, vec!["d"]);
    }

    #[test]
    fn test_terms_unigrams_then_multigrams() {
        let segment = Segment {
            text: "a b c".to_string(),
            tokens: vec!["a".into(), "b".into(), "c".into()],
            context_weight: 1.0,
        };
        assert_eq!(segment.terms(false), vec!["a", "b", "c"]);
        assert_eq!(
            segment.terms(true),
            vec!["a", "b", "c", "a b", "b c", "a b c"]
        );
    }
}
