use std::sync::Arc;

use crate::analysis::SkillGapEngine;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Immutable lexicon plus scoring options; shared by every request and batch worker.
    pub engine: Arc<SkillGapEngine>,
}
