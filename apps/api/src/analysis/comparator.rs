//! Job ↔ resume comparison.
//!
//! Pipeline:
//! 1. Catalog skills of both documents.
//! 2. TF-IDF terms of the job text, kept when they contain a signal substring or are
//!    catalog skills ("heuristic terms", used verbatim).
//! 3. A job skill is covered when it is a resume skill, or when it is a heuristic term
//!    that also occurs as an n-gram of the resume. Identical documents never report gaps.
//! 4. Set algebra, then missing skills ranked by their job TF-IDF score.
//!
//! `resume_skills` is always the plain catalog extraction of the resume; heuristic
//! coverage only moves terms between `present` and `missing`.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::lexicon::Lexicon;
use crate::analysis::segment::build_segments;
use crate::analysis::skills::{extract_prepared, PreparedText};
use crate::analysis::tfidf::{tfidf_score, ScoredTerm, TfIdfOptions};

/// Output of one comparison. All sets are sorted and unique; `missing_ranked` holds
/// the same strings as `missing_skills` ordered by importance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Catalog skills of the job plus heuristic terms.
    pub job_skills: Vec<String>,
    pub resume_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub present_skills: Vec<String>,
    pub extra_skills: Vec<String>,
    pub missing_ranked: Vec<String>,
}

/// Whether a ranked job term looks like a skill.
pub fn is_heuristic_term(lexicon: &Lexicon, term: &str) -> bool {
    lexicon
        .signal_terms()
        .iter()
        .any(|signal| term.contains(signal.as_str()))
        || lexicon.catalog().contains(term)
}

pub fn compare(
    lexicon: &Lexicon,
    job_text: &str,
    resume_text: &str,
    options: &TfIdfOptions,
) -> AnalysisResult {
    let job = PreparedText::new(lexicon, job_text);
    let resume = PreparedText::new(lexicon, resume_text);

    let job_skills = extract_prepared(lexicon, &job);
    let resume_skills = extract_prepared(lexicon, &resume);

    let ranked_terms = tfidf_score(lexicon, job_text, options);
    let heuristic_terms: BTreeSet<String> = ranked_terms
        .iter()
        .filter(|t| is_heuristic_term(lexicon, &t.term))
        .map(|t| t.term.clone())
        .collect();

    let resume_terms = term_space(lexicon, resume_text, options);
    let mut covered = resume_skills.clone();
    covered.extend(
        heuristic_terms
            .iter()
            .filter(|term| resume_terms.contains(term.as_str()))
            .cloned(),
    );

    let job_all: BTreeSet<String> = job_skills.union(&heuristic_terms).cloned().collect();

    let missing: Vec<String> = job_all.difference(&covered).cloned().collect();
    let present: Vec<String> = job_all.intersection(&covered).cloned().collect();
    let extra: Vec<String> = resume_skills.difference(&job_all).cloned().collect();
    let missing_ranked = rank_by_score(&missing, &ranked_terms);

    debug!(
        job_skills = job_all.len(),
        resume_skills = resume_skills.len(),
        heuristic_terms = heuristic_terms.len(),
        missing = missing.len(),
        "Compared job and resume"
    );

    AnalysisResult {
        job_skills: job_all.into_iter().collect(),
        resume_skills: resume_skills.into_iter().collect(),
        missing_skills: missing,
        present_skills: present,
        extra_skills: extra,
        missing_ranked,
    }
}

/// Every n-gram the scorer would consider for `text`.
fn term_space(lexicon: &Lexicon, text: &str, options: &TfIdfOptions) -> HashSet<String> {
    build_segments(
        text,
        lexicon.tokenizer(),
        lexicon.context_rules(),
        options.max_tokens,
    )
    .iter()
    .flat_map(|segment| segment.terms(options.use_ngrams))
    .collect()
}

/// Orders `sorted_terms` by descending score; unscored terms count as 0.0 and ties keep
/// the incoming (lexical) order.
fn rank_by_score(sorted_terms: &[String], ranked_terms: &[ScoredTerm]) -> Vec<String> {
    let scores: HashMap<&str, f64> = ranked_terms
        .iter()
        .map(|t| (t.term.as_str(), t.score))
        .collect();
    let score = |term: &str| scores.get(term).copied().unwrap_or(0.0);

    let mut ranked = sorted_terms.to_vec();
    ranked.sort_by(|a, b| score(b).total_cmp(&score(a)));
    ranked
}
