//! `SkillGapEngine`: the shared entry point used by handlers.
//!
//! Holds the immutable lexicon and scoring options. Every call is pure and synchronous;
//! callers on the async runtime should go through `tokio::task::spawn_blocking`.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use crate::analysis::comparator::{compare, AnalysisResult};
use crate::analysis::lexicon::Lexicon;
use crate::analysis::skills::extract_skills;
use crate::analysis::tfidf::{tfidf_score, ScoredTerm, TfIdfOptions};

#[derive(Debug, Clone)]
pub struct SkillGapEngine {
    lexicon: Arc<Lexicon>,
    options: TfIdfOptions,
}

impl SkillGapEngine {
    /// `options.top_k` is the number of TF-IDF terms the comparator considers.
    pub fn new(lexicon: Arc<Lexicon>, options: TfIdfOptions) -> Self {
        Self { lexicon, options }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn options(&self) -> &TfIdfOptions {
        &self.options
    }

    pub fn extract_skills(&self, text: &str) -> Vec<String> {
        extract_skills(&self.lexicon, text)
    }

    /// Ranked TF-IDF terms, `top_k` overriding the configured comparator depth.
    pub fn keywords(&self, text: &str, top_k: Option<usize>) -> Vec<ScoredTerm> {
        let options = TfIdfOptions {
            top_k: top_k.unwrap_or(self.options.top_k),
            ..self.options
        };
        tfidf_score(&self.lexicon, text, &options)
    }

    pub fn compare(&self, job_text: &str, resume_text: &str) -> AnalysisResult {
        compare(&self.lexicon, job_text, resume_text, &self.options)
    }

    /// Independent comparisons on the rayon pool. Output order matches input order.
    pub fn compare_batch<S>(&self, pairs: &[(S, S)]) -> Vec<AnalysisResult>
    where
        S: AsRef<str> + Sync,
    {
        debug!(pairs = pairs.len(), "Comparing batch");
        pairs
            .par_iter()
            .map(|(job, resume)| self.compare(job.as_ref(), resume.as_ref()))
            .collect()
    }
}
