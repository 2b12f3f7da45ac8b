use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::analysis::tfidf::DEFAULT_MAX_TOKENS;

/// Comparator depth used when `KEYWORD_TOP_K` is unset.
pub const DEFAULT_KEYWORD_TOP_K: usize = 48;
pub const DEFAULT_MAX_BATCH_SIZE: usize = 64;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON lexicon replacing the built-in stopwords, catalog, synonyms and rules.
    pub lexicon_path: Option<PathBuf>,
    pub keyword_top_k: usize,
    pub max_document_tokens: usize,
    pub use_ngrams: bool,
    pub max_batch_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            lexicon_path: None,
            keyword_top_k: DEFAULT_KEYWORD_TOP_K,
            max_document_tokens: DEFAULT_MAX_TOKENS,
            use_ngrams: true,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, so tests need not touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let config = Config {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            lexicon_path: lookup("LEXICON_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            keyword_top_k: parse_or(&lookup, "KEYWORD_TOP_K", defaults.keyword_top_k)?,
            max_document_tokens: parse_or(
                &lookup,
                "MAX_DOCUMENT_TOKENS",
                defaults.max_document_tokens,
            )?,
            use_ngrams: parse_or(&lookup, "USE_NGRAMS", defaults.use_ngrams)?,
            max_batch_size: parse_or(&lookup, "MAX_BATCH_SIZE", defaults.max_batch_size)?,
        };

        if config.keyword_top_k == 0 {
            bail!("KEYWORD_TOP_K must be at least 1");
        }
        if config.max_document_tokens == 0 {
            bail!("MAX_DOCUMENT_TOKENS must be at least 1");
        }
        if config.max_batch_size == 0 {
            bail!("MAX_BATCH_SIZE must be at least 1");
        }

        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}
