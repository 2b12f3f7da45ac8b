pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route(
            "/api/v1/skills/extract",
            post(handlers::handle_extract_skills),
        )
        .route("/api/v1/keywords", post(handlers::handle_keywords))
        .route("/api/v1/analyses", post(handlers::handle_analyze))
        .route(
            "/api/v1/analyses/batch",
            post(handlers::handle_analyze_batch),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::{Lexicon, SkillGapEngine, TfIdfOptions};
    use crate::config::Config;

    fn app() -> Router {
        let config = Config::default();
        let engine = SkillGapEngine::new(
            Arc::new(Lexicon::builtin().unwrap()),
            TfIdfOptions {
                top_k: config.keyword_top_k,
                use_ngrams: config.use_ngrams,
                max_tokens: config.max_document_tokens,
            },
        );
        build_router(AppState {
            config,
            engine: Arc::new(engine),
        })
    }

    async fn send(method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = app().oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "skillgap-api");
        assert!(body["catalog_skills"].as_u64().unwrap() > 200);
    }

    #[tokio::test]
    async fn test_analyses_route() {
        let (status, body) = send(
            Method::POST,
            "/api/v1/analyses",
            Some(json!({
                "job_text": "Requirements: Python, SQL, and AWS experience required.",
                "resume_text": "Built dashboards using SQL and Excel."
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["analysis_id"].is_string());
        let present = body["result"]["present_skills"].as_array().unwrap();
        assert!(present.contains(&json!("sql")));
        let extra = body["result"]["extra_skills"].as_array().unwrap();
        assert!(extra.contains(&json!("excel")));
        assert!(!body["suggestions"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_job_text_is_bad_request() {
        let (status, body) = send(
            Method::POST,
            "/api/v1/analyses",
            Some(json!({ "job_text": "", "resume_text": "SQL" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_keywords_route() {
        let (status, body) = send(
            Method::POST,
            "/api/v1/keywords",
            Some(json!({ "text": "Must have Kubernetes. Kubernetes operators.", "top_k": 2 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let keywords = body["keywords"].as_array().unwrap();
        assert_eq!(keywords.len(), 2);
        assert_eq!(keywords[0]["term"], "kubernetes");
        assert!(keywords[0]["score"].as_f64().unwrap() > 0.0);
    }

    #[tokio::test]
    async fn test_extract_route() {
        let (status, body) = send(
            Method::POST,
            "/api/v1/skills/extract",
            Some(json!({ "text": "Docker and Postgres" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let skills = body["skills"].as_array().unwrap();
        assert!(skills.contains(&json!("docker")));
        assert!(skills.contains(&json!("postgresql")));
    }

    #[tokio::test]
    async fn test_batch_route() {
        let (status, body) = send(
            Method::POST,
            "/api/v1/analyses/batch",
            Some(json!({ "pairs": [
                { "job_text": "Terraform required", "resume_text": "Terraform" },
                { "job_text": "Snowflake preferred", "resume_text": "Excel" }
            ]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"].as_array().unwrap().len(), 2);
    }
}
