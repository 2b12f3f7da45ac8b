use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and loaded catalog size.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let lexicon = state.engine.lexicon();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "skillgap-api",
        "catalog_skills": lexicon.catalog().len(),
        "synonyms": lexicon.synonyms().len()
    }))
}
