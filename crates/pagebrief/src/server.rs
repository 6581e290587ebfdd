//! HTTP surface: `POST /summarize` plus optional static frontend

use crate::error::SummarizeError;
use crate::summarizer::Summarizer;
use crate::types::{SummarizeRequest, SummaryResult};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use bytes::Bytes;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Build the application router
///
/// When `static_dir` is set, every path other than `/summarize` is served
/// from it, falling back to its `index.html`.
pub fn router(summarizer: Arc<Summarizer>, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new().route("/summarize", post(summarize_handler).layer(cors));

    if let Some(dir) = static_dir {
        let index = dir.join("index.html");
        app = app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    app.layer(TraceLayer::new_for_http()).with_state(summarizer)
}

/// Serve `app` on `listener` until the process stops
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "PageBrief listening");
    }
    axum::serve(listener, app).await
}

/// Body accepted regardless of content type; parse failures are 400s
async fn summarize_handler(State(summarizer): State<Arc<Summarizer>>, body: Bytes) -> Response {
    let request: SummarizeRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(SummaryResult::error(format!("Invalid JSON payload: {}", e))),
            )
                .into_response();
        }
    };

    match summarizer.summarize(request).await {
        Ok(summary) => (StatusCode::OK, Json(SummaryResult::summary(summary))).into_response(),
        Err(e) => e.into_response(),
    }
}

impl IntoResponse for SummarizeError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self, "Summarize request failed");
        }
        (status, Json(SummaryResult::error(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarizer::tests::{summarizer_with, StubCompletion};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use tower::ServiceExt;

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/summarize")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ORIGIN, "http://localhost:5173")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_result(response: Response) -> SummaryResult {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn app(stub: Arc<StubCompletion>) -> Router {
        router(Arc::new(summarizer_with(stub)), None)
    }

    #[tokio::test]
    async fn test_summarize_text() {
        let stub = StubCompletion::replying("Short summary.");
        let response = app(stub.clone())
            .oneshot(post_json(r#"{"text": "Hello world.", "length": 1, "style": "bullet_points"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
        assert_eq!(
            read_result(response).await,
            SummaryResult::summary("Short summary.")
        );
        assert_eq!(stub.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_input_is_400() {
        for body in [r#"{}"#, r#"{"url": "", "text": ""}"#, r#"{"length": 5}"#] {
            let stub = StubCompletion::replying("unused");
            let response = app(stub.clone()).oneshot(post_json(body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                read_result(response).await,
                SummaryResult::error("Either URL or text is required!")
            );
            assert!(stub.calls.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_400() {
        let response = app(StubCompletion::replying("unused"))
            .oneshot(post_json("not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        match read_result(response).await {
            SummaryResult::Error { error } => assert!(error.starts_with("Invalid JSON payload")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_string_input_is_not_a_bad_payload() {
        let stub = StubCompletion::replying("A number.");
        let response = app(stub.clone())
            .oneshot(post_json(r#"{"text": 123}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(stub.calls.lock().unwrap()[0]
            .user()
            .content
            .ends_with("\n\n123"));

        let response = app(StubCompletion::replying("unused"))
            .oneshot(post_json(r#"{"url": 42}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        match read_result(response).await {
            SummaryResult::Error { error } => assert!(error.contains("Invalid URL '42'")),
            other => panic!("unexpected result: {:?}", other),
        }

        let response = app(StubCompletion::replying("unused"))
            .oneshot(post_json(r#"{"text": 0}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_completion_failure_is_500() {
        let response = app(StubCompletion::failing(401))
            .oneshot(post_json(r#"{"text": "anything"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            read_result(response).await,
            SummaryResult::error("Completion API error (401): stub failure")
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_is_500() {
        let response = app(StubCompletion::replying("unused"))
            .oneshot(post_json(r#"{"url": "nope"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        match read_result(response).await {
            SummaryResult::Error { error } => assert!(error.contains("Invalid URL 'nope'")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/summarize")
            .header(header::ORIGIN, "https://elsewhere.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let response = app(StubCompletion::replying("unused"))
            .oneshot(request)
            .await
            .unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn test_get_summarize_not_allowed() {
        let request = Request::builder()
            .uri("/summarize")
            .body(Body::empty())
            .unwrap();
        let response = app(StubCompletion::replying("unused"))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_no_static_dir_is_404() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app(StubCompletion::replying("unused"))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
