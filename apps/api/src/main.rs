mod analysis;
mod config;
mod errors;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::{Lexicon, SkillGapEngine, TfIdfOptions};
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillGap API v{}", env!("CARGO_PKG_VERSION"));

    // Load the lexicon (built-in tables unless LEXICON_PATH is set)
    let lexicon = match &config.lexicon_path {
        Some(path) => Lexicon::from_file(path)
            .with_context(|| format!("Failed to load lexicon from {}", path.display()))?,
        None => Lexicon::builtin().context("Built-in lexicon is invalid")?,
    };
    info!(
        "Lexicon ready: {} catalog skills, {} synonyms, {} context rules",
        lexicon.catalog().len(),
        lexicon.synonyms().len(),
        lexicon.context_rules().len()
    );

    let options = TfIdfOptions {
        top_k: config.keyword_top_k,
        use_ngrams: config.use_ngrams,
        max_tokens: config.max_document_tokens,
    };
    info!(
        "Scoring options: top_k={} ngrams={} max_tokens={}",
        options.top_k, options.use_ngrams, options.max_tokens
    );
    let engine = Arc::new(SkillGapEngine::new(Arc::new(lexicon), options));

    // Build app state
    let state = AppState {
        config: config.clone(),
        engine,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict allowed origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
