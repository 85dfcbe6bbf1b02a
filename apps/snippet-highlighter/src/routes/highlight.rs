//! Highlight API routes
//!
//! - `POST /api/v1/highlight`: highlight one snippet in one document
//! - `POST /api/v1/highlight/batch`: highlight the snippets of a retrieval answer
//!
//! Output always goes to the conventional highlighted location of the
//! document; clients cannot choose arbitrary paths.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::highlight::HighlightOutcome;
use crate::service::{BatchEntry, HighlightRequest, RetrievedDocument};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(highlight))
        .route("/batch", post(highlight_batch))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightBody {
    pub identifier: String,
    pub snippet: String,
    /// 0-based target page
    pub page: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightResponse {
    pub identifier: String,
    pub outcome: HighlightOutcome,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchBody {
    pub documents: Vec<RetrievedDocument>,
    /// Clear earlier highlighted copies first
    #[serde(default)]
    pub reset: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub highlighted: usize,
    pub results: Vec<BatchEntry>,
}

async fn highlight(
    State(state): State<AppState>,
    Json(body): Json<HighlightBody>,
) -> Result<Json<HighlightResponse>> {
    if body.snippet.trim().is_empty() {
        return Err(AppError::BadRequest("Snippet must not be empty".to_string()));
    }

    let outcome = state
        .highlighter()
        .highlight(HighlightRequest {
            identifier: body.identifier.clone(),
            snippet: body.snippet,
            page: body.page,
            output: None,
        })
        .await?;

    Ok(Json(HighlightResponse {
        identifier: body.identifier,
        outcome,
    }))
}

async fn highlight_batch(
    State(state): State<AppState>,
    Json(body): Json<BatchBody>,
) -> Result<Json<BatchResponse>> {
    let results = state
        .highlighter()
        .highlight_batch(body.documents, body.reset)
        .await?;

    let highlighted = results
        .iter()
        .filter(|r| r.outcome.as_ref().is_some_and(HighlightOutcome::is_highlighted))
        .count();

    Ok(Json(BatchResponse {
        highlighted,
        results,
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::routes::app;
    use crate::state::AppState;

    fn test_app(dir: &TempDir) -> axum::Router {
        let mut config = Config::default();
        config.storage.highlighted_dir = dir.path().join("highlighted");
        config.storage.import_dir = dir.path().join("import");
        app(AppState::new(config))
    }

    async fn post_json(app: axum::Router, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::post(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let dir = TempDir::new().unwrap();
        let response = test_app(&dir)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_document_is_404() {
        let dir = TempDir::new().unwrap();
        let (status, body) = post_json(
            test_app(&dir),
            "/api/v1/highlight",
            serde_json::json!({ "identifier": "missing.pdf", "snippet": "some text", "page": 0 }),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_path_traversal_is_400() {
        let dir = TempDir::new().unwrap();
        let (status, _) = post_json(
            test_app(&dir),
            "/api/v1/highlight",
            serde_json::json!({ "identifier": "../../etc/passwd", "snippet": "root", "page": 0 }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_empty_snippet_is_400() {
        let dir = TempDir::new().unwrap();
        let (status, body) = post_json(
            test_app(&dir),
            "/api/v1/highlight",
            serde_json::json!({ "identifier": "a.pdf", "snippet": "  ", "page": 0 }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_batch_reports_missing_documents() {
        let dir = TempDir::new().unwrap();
        let (status, body) = post_json(
            test_app(&dir),
            "/api/v1/highlight/batch",
            serde_json::json!({
                "documents": [{ "filePath": "missing.pdf", "content": "snippet", "pageNumber": 1 }],
                "reset": true
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["highlighted"], 0);
        assert_eq!(body["results"][0]["filePath"], "missing.pdf");
        assert!(body["results"][0]["error"].is_string());
    }
}
