//! Router configuration for the scan service.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/scan", post(handlers::scan_document))
        .route("/face/compare", post(handlers::compare_faces))
        .route("/notifications", post(handlers::send_notification))
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use idscan_core::IdDocumentParser;

    use super::*;
    use crate::collaborators::{
        FaceComparison, FaceMatcher, PushMessage, PushRelay, Record, StaticRecordStore,
        TextRecognizer, UpstreamError,
    };

    /// OCR stub returning canned text, or a provider failure.
    struct CannedOcr(Result<Option<String>, String>);

    #[async_trait]
    impl TextRecognizer for CannedOcr {
        async fn recognize(&self, _image: &str) -> Result<Option<String>, UpstreamError> {
            self.0.clone().map_err(UpstreamError::Provider)
        }
    }

    struct FixedFace(f64);

    #[async_trait]
    impl FaceMatcher for FixedFace {
        async fn compare(&self, _a: &str, _b: &str) -> Result<FaceComparison, UpstreamError> {
            Ok(FaceComparison {
                confidence: self.0,
                thresholds: [("1e-5".to_string(), 73.9)].into_iter().collect(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingPush(Mutex<Vec<PushMessage>>);

    #[async_trait]
    impl PushRelay for RecordingPush {
        async fn send(&self, message: &PushMessage) -> Result<Value, UpstreamError> {
            self.0.lock().unwrap().push(message.clone());
            Ok(json!({"data": {"status": "ok", "id": "ticket-1"}}))
        }
    }

    fn member() -> Record {
        match json!({
            "idNumber": "1234567890123",
            "firstName": "Juan",
            "middleName": "Reyes",
            "lastName": "Dela Cruz",
            "disability": "orthopedic"
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn app_with(ocr: CannedOcr, push: Arc<RecordingPush>) -> Router {
        let state = AppState::new(
            IdDocumentParser::new(),
            Arc::new(ocr),
            Arc::new(StaticRecordStore::new(vec![member()])),
            Arc::new(FixedFace(88.0)),
            push,
        );
        create_router(state, 1024 * 1024)
    }

    fn app(ocr_text: &str) -> Router {
        app_with(
            CannedOcr(Ok(Some(ocr_text.to_string()))),
            Arc::new(RecordingPush::default()),
        )
    }

    fn png_base64() -> String {
        STANDARD.encode(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR")
    }

    async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        post_raw(app, uri, "application/json", body.to_string()).await
    }

    async fn post_raw(
        app: Router,
        uri: &str,
        content_type: &str,
        body: String,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", content_type)
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app("").oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert!(body["uptimeSeconds"].is_u64());
    }

    #[tokio::test]
    async fn test_scan_verified_member() {
        let text = "CITY OF SILAY\nPWD ID\n1234567890123\nFIRST NAME: JUAN";
        let (status, body) = post(app(text), "/scan", json!({"image": png_base64()})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["verified"], true);
        assert_eq!(body["belongsToJurisdiction"], true);
        assert_eq!(body["identifier"], "1234567890123");
        assert_eq!(body["statusMessage"], "Found Silay identifier 1234567890123.");
        assert_eq!(body["firstName"], "JUAN");
        assert_eq!(body["lastName"], "Dela Cruz");
        assert_eq!(body["record"]["disability"], "orthopedic");
    }

    #[tokio::test]
    async fn test_scan_other_jurisdiction_skips_lookup() {
        let text = "BACOLOD CITY\n1234567890123";
        let (status, body) = post(app(text), "/scan", json!({"image": png_base64()})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["verified"], false);
        assert_eq!(body["record"], Value::Null);
        assert_eq!(body["statusMessage"], "Not a Silay document.");
    }

    #[tokio::test]
    async fn test_scan_without_identifier() {
        let (status, body) =
            post(app("SILAY CITY PWD ID"), "/scan", json!({"image": png_base64()})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["verified"], false);
        assert_eq!(
            body["statusMessage"],
            "Silay document detected but no identifier found."
        );
    }

    #[tokio::test]
    async fn test_scan_unknown_member() {
        let text = "SILAY CITY PWD ID\n9999999999999";
        let (status, body) = post(app(text), "/scan", json!({"image": png_base64()})).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["category"], "not_found");
    }

    #[tokio::test]
    async fn test_scan_bad_input() {
        let (status, body) = post(app("SILAY"), "/scan", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["category"], "bad_input");

        let (status, _) = post(app("SILAY"), "/scan", json!({"image": "!!!"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_scan_no_text() {
        let app = app_with(CannedOcr(Ok(None)), Arc::new(RecordingPush::default()));
        let (status, body) = post(app, "/scan", json!({"image": png_base64()})).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["category"], "no_text");
    }

    #[tokio::test]
    async fn test_scan_ocr_failure() {
        let app = app_with(
            CannedOcr(Err("quota exceeded".to_string())),
            Arc::new(RecordingPush::default()),
        );
        let (status, body) = post(app, "/scan", json!({"image": png_base64()})).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["category"], "upstream");
        assert_eq!(body["error"], "ocr error: provider error: quota exceeded");
    }

    #[tokio::test]
    async fn test_face_compare_passthrough() {
        let (status, body) = post(
            app(""),
            "/face/compare",
            json!({"image1": png_base64(), "image2": png_base64()}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["confidence"], 88.0);
        assert_eq!(body["thresholds"]["1e-5"], 73.9);
    }

    #[tokio::test]
    async fn test_face_compare_requires_both_images() {
        let (status, body) =
            post(app(""), "/face/compare", json!({"image1": png_base64()})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "image2 is required");
    }

    #[tokio::test]
    async fn test_notification_forwarded() {
        let push = Arc::new(RecordingPush::default());
        let app = app_with(CannedOcr(Ok(None)), push.clone());

        let (status, body) = post(
            app,
            "/notifications",
            json!({
                "token": "ExponentPushToken[abc]",
                "title": "Verified",
                "body": "Welcome",
                "data": {"screen": "profile"}
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], "ticket-1");

        let sent = push.0.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "ExponentPushToken[abc]");
        assert_eq!(sent[0].data, json!({"screen": "profile"}));
    }

    #[tokio::test]
    async fn test_notification_requires_token() {
        let (status, _) = post(app(""), "/notifications", json!({"title": "x"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_body_limit() {
        let state = AppState::new(
            IdDocumentParser::new(),
            Arc::new(CannedOcr(Ok(None))),
            Arc::new(StaticRecordStore::default()),
            Arc::new(FixedFace(0.0)),
            Arc::new(RecordingPush::default()),
        );
        let app = create_router(state, 64);

        let (status, body) = post(app, "/scan", json!({"image": "A".repeat(1024)})).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["category"], "too_large");
    }

    #[tokio::test]
    async fn test_unreadable_bodies_are_bad_input() {
        let cases = [
            ("/scan", "application/json", r#"{"image": 123}"#),
            ("/scan", "application/json", "{not json"),
            ("/scan", "text/plain", r#"{"image": "abc"}"#),
            ("/face/compare", "application/json", r#"{"image1": ["a"], "image2": ""}"#),
            ("/notifications", "application/json", r#"{"token": 7}"#),
        ];

        for (uri, content_type, body) in cases {
            let (status, json) = post_raw(app("SILAY"), uri, content_type, body.to_string()).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", uri, body);
            assert_eq!(json["category"], "bad_input", "{} {}", uri, body);
            assert!(json["error"].is_string());
        }
    }
}
