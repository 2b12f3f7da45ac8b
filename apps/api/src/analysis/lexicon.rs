//! Lexicon: the static configuration surface of the engine.
//!
//! Stopwords, skill catalog, synonym table, context-boost rules and the heuristic signal
//! list are bundled into one immutable [`Lexicon`], built once at startup and shared
//! behind an `Arc`. Tests build their own lexicons; nothing here is a global.
//!
//! Every entry is validated while loading (see [`LexiconError`]). Scoring code never
//! re-checks configuration.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::analysis::catalog::{
    default_skills, SkillCatalog, SynonymTable, DEFAULT_SYNONYMS,
};
use crate::analysis::segment::ContextRule;
use crate::analysis::text::{Normalizer, Tokenizer, DEFAULT_SEPARATOR};

pub const DEFAULT_STOPWORDS: &[&str] = &[
    "the", "a", "an", "of", "to", "in", "for", "on", "and", "or", "with", "at", "by", "is", "it",
    "this", "that", "from", "as", "are", "be", "we", "you", "your", "our", "i", "me", "my",
    "they", "their", "them", "was", "were", "will", "would", "can", "could", "should", "has",
    "have", "had", "do", "does", "did", "not", "no", "yes", "but", "so", "if", "then", "than",
    "into", "over", "under", "about", "across", "per", "via", "using",
];

/// Requirement signals, preference signals, responsibility signals.
pub const DEFAULT_CONTEXT_RULES: &[(&str, f64)] = &[
    (r"\b(required|must have|qualifications|requirements)\b", 1.4),
    (r"\b(nice to have|preferred)\b", 1.15),
    (r"\b(responsibilities|you will|we are looking)\b", 1.1),
];

/// Substrings that admit a TF-IDF term into the job's skill set.
// TODO: derive these from catalog tokens once the catalog wording settles; today a new
// catalog group needs a matching entry here to surface its free-text n-grams.
pub const DEFAULT_SIGNAL_TERMS: &[&str] = &[
    "python", "sql", "api", "ml", "data", "learning", "cloud", "docker", "kuber", "pipeline",
    "model", "pandas", "spark", "aws", "azure", "gcp", "react", "java", "testing", "deployment",
    "analytics", "analysis", "visualization", "communication", "leadership", "etl", "airflow",
    "kafka", "git", "ci", "cd", "security", "monitoring", "prometheus", "grafana", "selenium",
    "cypress", "bigquery", "redshift", "snowflake", "dbt", "kubernetes", "terraform", "ansible",
    "helm", "istio", "vertex", "sagemaker", "lambda", "gke", "eks", "ecs", "pub", "sub",
    "pub/sub",
];

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("{section} entry {entry:?} is empty after normalization")]
    EmptyEntry { section: &'static str, entry: String },

    #[error("alias {alias:?} maps to both {first:?} and {second:?}")]
    ConflictingAlias {
        alias: String,
        first: String,
        second: String,
    },

    #[error("alias {alias:?} maps to {canonical:?}, which is itself an alias")]
    TransitiveAlias { alias: String, canonical: String },

    #[error("invalid context rule pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("context rule {pattern:?} has invalid multiplier {multiplier}")]
    InvalidMultiplier { pattern: String, multiplier: f64 },

    #[error("separator {0:?} must be a punctuation character")]
    InvalidSeparator(char),

    #[error("failed to read lexicon file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse lexicon file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// On-disk format
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ContextRuleEntry {
    pub pattern: String,
    pub multiplier: f64,
}

/// JSON lexicon. Every section is optional; omitted sections keep the built-in tables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LexiconFile {
    pub separator: Option<char>,
    pub stopwords: Option<Vec<String>>,
    /// Topic group → skills. Group names are documentation only.
    pub catalog: Option<IndexMap<String, Vec<String>>>,
    pub synonyms: Option<IndexMap<String, String>>,
    pub context_rules: Option<Vec<ContextRuleEntry>>,
    pub signal_terms: Option<Vec<String>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Lexicon
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Lexicon {
    tokenizer: Tokenizer,
    catalog: SkillCatalog,
    synonyms: SynonymTable,
    context_rules: Vec<ContextRule>,
    signal_terms: Vec<String>,
}

impl Lexicon {
    /// The compiled-in tables.
    pub fn builtin() -> Result<Self, LexiconError> {
        Self::from_tables(LexiconFile::default())
    }

    /// Loads a JSON lexicon from disk, filling omitted sections with built-in tables.
    pub fn from_file(path: &Path) -> Result<Self, LexiconError> {
        let raw = std::fs::read_to_string(path).map_err(|source| LexiconError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let tables: LexiconFile =
            serde_json::from_str(&raw).map_err(|source| LexiconError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let lexicon = Self::from_tables(tables)?;
        info!(
            path = %path.display(),
            skills = lexicon.catalog.len(),
            synonyms = lexicon.synonyms.len(),
            "Loaded lexicon file"
        );
        Ok(lexicon)
    }

    /// Validates and normalizes a lexicon description.
    pub fn from_tables(tables: LexiconFile) -> Result<Self, LexiconError> {
        let separator = tables.separator.unwrap_or(DEFAULT_SEPARATOR);
        if !separator.is_ascii_punctuation() {
            return Err(LexiconError::InvalidSeparator(separator));
        }
        let normalizer = Normalizer::new(separator);

        let stopwords: Vec<String> = match &tables.stopwords {
            Some(words) => normalize_entries(&normalizer, "stopwords", words.iter().map(String::as_str))?,
            None => normalize_entries(&normalizer, "stopwords", DEFAULT_STOPWORDS.iter().copied())?,
        };

        let catalog = match &tables.catalog {
            Some(groups) => SkillCatalog::new(
                &normalizer,
                groups.values().flat_map(|skills| skills.iter().map(String::as_str)),
            )?,
            None => SkillCatalog::new(&normalizer, default_skills())?,
        };

        let synonyms = match &tables.synonyms {
            Some(pairs) => SynonymTable::new(
                &normalizer,
                pairs.iter().map(|(a, c)| (a.as_str(), c.as_str())),
            )?,
            None => SynonymTable::new(&normalizer, DEFAULT_SYNONYMS.iter().copied())?,
        };

        let context_rules = match &tables.context_rules {
            Some(rules) => rules
                .iter()
                .map(|r| ContextRule::new(&r.pattern, r.multiplier))
                .collect::<Result<Vec<_>, _>>()?,
            None => DEFAULT_CONTEXT_RULES
                .iter()
                .map(|(pattern, multiplier)| ContextRule::new(pattern, *multiplier))
                .collect::<Result<Vec<_>, _>>()?,
        };

        let signal_terms = match &tables.signal_terms {
            Some(terms) => normalize_entries(&normalizer, "signal_terms", terms.iter().map(String::as_str))?,
            None => normalize_entries(&normalizer, "signal_terms", DEFAULT_SIGNAL_TERMS.iter().copied())?,
        };

        Ok(Self {
            tokenizer: Tokenizer::new(normalizer, stopwords),
            catalog,
            synonyms,
            context_rules,
            signal_terms,
        })
    }

    pub fn normalizer(&self) -> &Normalizer {
        self.tokenizer.normalizer()
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    pub fn context_rules(&self) -> &[ContextRule] {
        &self.context_rules
    }

    pub fn signal_terms(&self) -> &[String] {
        &self.signal_terms
    }
}

/// Normalizes list entries, rejecting any that normalize to nothing and dropping repeats.
fn normalize_entries<'a, I>(
    normalizer: &Normalizer,
    section: &'static str,
    entries: I,
) -> Result<Vec<String>, LexiconError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out: Vec<String> = Vec::new();
    for raw in entries {
        let entry = normalizer.normalize(raw);
        if entry.is_empty() {
            return Err(LexiconError::EmptyEntry {
                section,
                entry: raw.to_string(),
            });
        }
        if !out.contains(&entry) {
            out.push(entry);
        }
    }
    Ok(out)
}
