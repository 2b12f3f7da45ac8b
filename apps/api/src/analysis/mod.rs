#![allow(dead_code)]

// Skill gap analysis engine.
// Implements: normalization, segmentation, context-weighted TF-IDF, catalog matching,
// job/resume comparison. Pure and CPU-bound; handlers call it via spawn_blocking.

pub mod catalog;
pub mod comparator;
pub mod engine;
pub mod handlers;
pub mod lexicon;
pub mod segment;
pub mod skills;
pub mod suggestions;
pub mod text;
pub mod tfidf;

// Re-export the public API consumed by handlers and startup.
pub use comparator::AnalysisResult;
pub use engine::SkillGapEngine;
pub use lexicon::Lexicon;
pub use tfidf::{ScoredTerm, TfIdfOptions};
