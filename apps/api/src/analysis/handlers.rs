//! Axum route handlers for the Analysis API.

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::suggestions::suggest_improvements;
use crate::analysis::{AnalysisResult, ScoredTerm, SkillGapEngine};
use crate::errors::AppError;
use crate::state::AppState;

/// Upper bound for a caller-supplied `top_k`.
pub const MAX_KEYWORDS_TOP_K: usize = 200;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractSkillsRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractSkillsResponse {
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub text: String,
    #[serde(default)]
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<ScoredTerm>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub job_text: String,
    pub resume_text: String,
}

/// `analysis_id` and `created_at` identify this response for callers that persist it;
/// `result` itself depends only on the two texts.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub result: AnalysisResult,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct BatchAnalyzeRequest {
    pub pairs: Vec<AnalyzeRequest>,
}

#[derive(Debug, Serialize)]
pub struct BatchAnalyzeResponse {
    pub results: Vec<AnalyzeResponse>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/skills/extract
///
/// Catalog skills found in a single document.
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    Json(request): Json<ExtractSkillsRequest>,
) -> Result<Json<ExtractSkillsResponse>, AppError> {
    require_text("text", &request.text)?;

    let skills = run_blocking(state.engine, move |engine| engine.extract_skills(&request.text)).await?;

    Ok(Json(ExtractSkillsResponse { skills }))
}

/// POST /api/v1/keywords
///
/// Context-weighted TF-IDF terms of a document, highest score first.
pub async fn handle_keywords(
    State(state): State<AppState>,
    Json(request): Json<KeywordsRequest>,
) -> Result<Json<KeywordsResponse>, AppError> {
    require_text("text", &request.text)?;
    if let Some(top_k) = request.top_k {
        if top_k == 0 || top_k > MAX_KEYWORDS_TOP_K {
            return Err(AppError::Validation(format!(
                "top_k must be between 1 and {MAX_KEYWORDS_TOP_K}"
            )));
        }
    }

    let keywords = run_blocking(state.engine, move |engine| {
        engine.keywords(&request.text, request.top_k)
    })
    .await?;

    Ok(Json(KeywordsResponse { keywords }))
}

/// POST /api/v1/analyses
///
/// Compares a job description with a resume. Returns present/missing/extra skill sets,
/// missing skills ranked by importance, and one suggestion per missing skill.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    validate_pair(&request)?;

    let result = run_blocking(state.engine, move |engine| {
        engine.compare(&request.job_text, &request.resume_text)
    })
    .await?;

    info!(
        missing = result.missing_skills.len(),
        present = result.present_skills.len(),
        "Analysis complete"
    );

    Ok(Json(into_response(result)))
}

/// POST /api/v1/analyses/batch
///
/// Compares many pairs in parallel. Results follow request order.
pub async fn handle_analyze_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchAnalyzeRequest>,
) -> Result<Json<BatchAnalyzeResponse>, AppError> {
    if request.pairs.is_empty() {
        return Err(AppError::Validation("pairs cannot be empty".to_string()));
    }
    let max = state.config.max_batch_size;
    if request.pairs.len() > max {
        return Err(AppError::PayloadTooLarge(format!(
            "batch of {} pairs exceeds the limit of {max}",
            request.pairs.len()
        )));
    }
    for pair in &request.pairs {
        validate_pair(pair)?;
    }

    let pairs: Vec<(String, String)> = request
        .pairs
        .into_iter()
        .map(|p| (p.job_text, p.resume_text))
        .collect();
    let results = run_blocking(state.engine, move |engine| engine.compare_batch(&pairs)).await?;

    info!(pairs = results.len(), "Batch analysis complete");

    Ok(Json(BatchAnalyzeResponse {
        results: results.into_iter().map(into_response).collect(),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn validate_pair(pair: &AnalyzeRequest) -> Result<(), AppError> {
    require_text("job_text", &pair.job_text)?;
    require_text("resume_text", &pair.resume_text)
}

fn into_response(result: AnalysisResult) -> AnalyzeResponse {
    let suggestions = suggest_improvements(&result.missing_ranked);
    AnalyzeResponse {
        analysis_id: Uuid::new_v4(),
        created_at: Utc::now(),
        result,
        suggestions,
    }
}

/// Runs CPU-bound engine work off the async executor.
async fn run_blocking<T, F>(engine: Arc<SkillGapEngine>, work: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&SkillGapEngine) -> T + Send + 'static,
{
    tokio::task::spawn_blocking(move || work(&engine))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("analysis task failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Lexicon, TfIdfOptions};
    use crate::config::Config;

    fn state() -> AppState {
        let config = Config::default();
        let engine = SkillGapEngine::new(
            Arc::new(Lexicon::builtin().unwrap()),
            TfIdfOptions {
                top_k: config.keyword_top_k,
                ..Default::default()
            },
        );
        AppState {
            config,
            engine: Arc::new(engine),
        }
    }

    fn analyze_request(job: &str, resume: &str) -> AnalyzeRequest {
        AnalyzeRequest {
            job_text: job.to_string(),
            resume_text: resume.to_string(),
        }
    }

    #[tokio::test]
    async fn test_extract_skills_handler() {
        let Json(response) = handle_extract_skills(
            State(state()),
            Json(ExtractSkillsRequest {
                text: "Kubernetes, Terraform and Postgres".to_string(),
            }),
        )
        .await
        .unwrap();
        for skill in ["kubernetes", "postgresql", "terraform"] {
            assert!(response.skills.contains(&skill.to_string()), "{skill}");
        }
    }

    #[tokio::test]
    async fn test_extract_skills_rejects_blank_text() {
        let err = handle_extract_skills(
            State(state()),
            Json(ExtractSkillsRequest {
                text: "   ".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_keywords_handler_respects_top_k() {
        let Json(response) = handle_keywords(
            State(state()),
            Json(KeywordsRequest {
                text: "Build data pipelines. Deploy models. Monitor pipelines.".to_string(),
                top_k: Some(3),
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.keywords.len(), 3);
    }

    #[tokio::test]
    async fn test_keywords_handler_rejects_out_of_range_top_k() {
        for top_k in [0, MAX_KEYWORDS_TOP_K + 1] {
            let err = handle_keywords(
                State(state()),
                Json(KeywordsRequest {
                    text: "rust".to_string(),
                    top_k: Some(top_k),
                }),
            )
            .await
            .unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_analyze_handler_returns_result_and_suggestions() {
        let Json(response) = handle_analyze(
            State(state()),
            Json(analyze_request(
                "Requirements: Python, SQL, and AWS experience required.",
                "Built dashboards using SQL and Excel.",
            )),
        )
        .await
        .unwrap();
        assert!(response.result.missing_skills.contains(&"python".to_string()));
        assert!(response.result.present_skills.contains(&"sql".to_string()));
        assert!(!response.suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_analyze_handler_rejects_empty_job() {
        let err = handle_analyze(State(state()), Json(analyze_request("", "resume")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("job_text")));
    }

    #[tokio::test]
    async fn test_analyze_handler_rejects_blank_resume() {
        let err = handle_analyze(State(state()), Json(analyze_request("SQL required", " \n ")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("resume_text")));
    }

    #[tokio::test]
    async fn test_batch_handler_preserves_order() {
        let Json(response) = handle_analyze_batch(
            State(state()),
            Json(BatchAnalyzeRequest {
                pairs: vec![
                    analyze_request("Kubernetes required", "Kubernetes"),
                    analyze_request("Terraform required", "Ansible"),
                ],
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.results.len(), 2);
        assert!(response.results[0]
            .result
            .present_skills
            .contains(&"kubernetes".to_string()));
        assert!(response.results[1]
            .result
            .missing_skills
            .contains(&"terraform".to_string()));
    }

    #[tokio::test]
    async fn test_batch_handler_enforces_limits() {
        let mut state = state();
        state.config.max_batch_size = 1;

        let err = handle_analyze_batch(
            State(state.clone()),
            Json(BatchAnalyzeRequest {
                pairs: vec![analyze_request("a", "b"), analyze_request("c", "d")],
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));

        let err = handle_analyze_batch(State(state), Json(BatchAnalyzeRequest { pairs: vec![] }))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
