pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::keywords::handlers as keywords;
use crate::metrics::handlers as metrics;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Keywords API
        .route("/api/v1/keywords/extract", post(keywords::handle_extract))
        .route("/api/v1/keywords/match", post(keywords::handle_match))
        // Metrics API
        .route("/api/v1/metrics", post(metrics::handle_metrics))
        .route("/api/v1/metrics/batch", post(metrics::handle_metrics_batch))
        .route("/api/v1/metrics/config", get(metrics::handle_metrics_config))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::keywords::extractor::KeywordExtractor;

    fn app_with(config: Config) -> Router {
        build_router(AppState::new(config, KeywordExtractor::rule_based()))
    }

    fn app() -> Router {
        app_with(Config::default())
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    const JOB: &str = "Backend engineer with Python, PostgreSQL and Docker experience.";
    const RESUME: &str = "Experience\n- Built Python services on PostgreSQL\n- Packaged them with Docker";

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "matchscore");
        assert_eq!(body["delegated_extraction"], false);
    }

    #[tokio::test]
    async fn test_extract_keywords() {
        let (status, body) = send(
            app(),
            "POST",
            "/api/v1/keywords/extract",
            Some(json!({ "text": JOB })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["keywords"]["method"], "rule_based");
        let all = body["keywords"]["all_keywords"].as_array().unwrap();
        assert!(all.contains(&json!("python")));
    }

    #[tokio::test]
    async fn test_match_keywords() {
        let (status, body) = send(
            app(),
            "POST",
            "/api/v1/keywords/match",
            Some(json!({ "job_text": JOB, "resume_text": RESUME })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let python = body["matches"]
            .as_array()
            .unwrap()
            .iter()
            .find(|m| m["keyword"] == "python")
            .expect("python match record");
        assert_eq!(python["found"], true);
        assert_eq!(python["sections_present"], json!(["experience"]));
        assert!(body["summary"]["total"].as_u64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_metrics() {
        let (status, body) = send(
            app(),
            "POST",
            "/api/v1/metrics",
            Some(json!({
                "job_text": JOB,
                "resume_text": RESUME,
                "original_resume_text": RESUME,
                "options": { "target_pages": 1.0 }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["authenticity"]["score"], 1.0);
        assert!(body["overall_score"].as_f64().unwrap() > 0.0);
        assert!(body["recommendations"].is_array());
    }

    #[tokio::test]
    async fn test_metrics_rejects_blank_job() {
        let (status, body) = send(
            app(),
            "POST",
            "/api/v1/metrics",
            Some(json!({ "job_text": "  ", "resume_text": RESUME })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_metrics_rejects_oversized_text() {
        let config = Config {
            max_text_bytes: 16,
            ..Default::default()
        };
        let (status, body) = send(
            app_with(config),
            "POST",
            "/api/v1/metrics",
            Some(json!({ "job_text": JOB, "resume_text": RESUME })),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_batch() {
        let pair = json!({ "job_text": JOB, "resume_text": RESUME });
        let (status, body) = send(
            app(),
            "POST",
            "/api/v1/metrics/batch",
            Some(json!({ "pairs": [pair.clone(), pair] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0], results[1], "identical pairs score identically");
    }

    #[tokio::test]
    async fn test_batch_limit() {
        let config = Config {
            max_batch_pairs: 1,
            ..Default::default()
        };
        let pair = json!({ "job_text": JOB, "resume_text": RESUME });
        let (status, _) = send(
            app_with(config),
            "POST",
            "/api/v1/metrics/batch",
            Some(json!({ "pairs": [pair.clone(), pair] })),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_metrics_config_reflects_environment_target() {
        let config = Config {
            target_pages: 1.0,
            ..Default::default()
        };
        let (status, body) = send(app_with(config), "GET", "/api/v1/metrics/config", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["target_pages"], 1.0);
        assert_eq!(body["ats_threshold"], 0.8);
    }
}
