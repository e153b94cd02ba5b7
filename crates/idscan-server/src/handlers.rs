//! HTTP request handlers.

use axum::{extract::State, Json};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use idscan_core::{DocumentParser, ExtractionResult};

use crate::collaborators::{FaceComparison, PushMessage, Record};
use crate::error::ServiceError;
use crate::extract::JsonBody;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: &'static str,
    pub uptime_seconds: u64,
    pub timestamp: DateTime<Utc>,
}

/// Handler for `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        uptime_seconds: state.uptime().as_secs(),
        timestamp: Utc::now(),
    })
}

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    /// Base64 image, optionally as a `data:` URL.
    #[serde(default)]
    pub image: String,
}

/// Extracted fields plus the outcome of the member lookup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    #[serde(flatten)]
    pub extraction: ExtractionResult,
    pub record: Option<Record>,
    pub verified: bool,
}

/// Handler for `POST /scan`
pub async fn scan_document(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ScanRequest>,
) -> Result<Json<ScanResponse>, ServiceError> {
    let image = validate_image("image", &req.image)?;

    let text = state
        .ocr
        .recognize(&image)
        .await
        .map_err(ServiceError::upstream("ocr"))?
        .ok_or(ServiceError::NoText)?;

    let extraction = state.parser.parse(&text);
    info!("Scan: {}", extraction.status_message);

    if !extraction.is_verifiable() {
        return Ok(Json(ScanResponse {
            extraction,
            record: None,
            verified: false,
        }));
    }

    let record = state
        .records
        .find_by_field(
            &state.lookup.collection,
            &state.lookup.identifier_field,
            &extraction.identifier,
        )
        .await
        .map_err(ServiceError::upstream("record store"))?
        .ok_or_else(|| {
            ServiceError::NotFound(format!(
                "no record found for identifier {}",
                extraction.identifier
            ))
        })?;

    info!("Verified member {}", extraction.identifier);

    Ok(Json(ScanResponse {
        extraction: merge_record(extraction, &record),
        record: Some(record),
        verified: true,
    }))
}

/// Fill name fields the OCR text did not yield from the matched record.
fn merge_record(mut extraction: ExtractionResult, record: &Record) -> ExtractionResult {
    let fields = [
        ("firstName", &mut extraction.first_name),
        ("middleName", &mut extraction.middle_name),
        ("lastName", &mut extraction.last_name),
    ];

    for (key, slot) in fields {
        if slot.is_empty() {
            if let Some(Value::String(stored)) = record.get(key) {
                *slot = stored.trim().to_string();
            }
        }
    }

    extraction
}

#[derive(Debug, Deserialize)]
pub struct FaceCompareRequest {
    #[serde(default)]
    pub image1: String,
    #[serde(default)]
    pub image2: String,
}

/// Handler for `POST /face/compare`
pub async fn compare_faces(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<FaceCompareRequest>,
) -> Result<Json<FaceComparison>, ServiceError> {
    let image1 = validate_image("image1", &req.image1)?;
    let image2 = validate_image("image2", &req.image2)?;

    let comparison = state
        .face
        .compare(&image1, &image2)
        .await
        .map_err(ServiceError::upstream("face match"))?;

    Ok(Json(comparison))
}

#[derive(Debug, Deserialize)]
pub struct NotificationRequest {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub data: Value,
}

/// Handler for `POST /notifications`
pub async fn send_notification(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<NotificationRequest>,
) -> Result<Json<Value>, ServiceError> {
    if req.token.trim().is_empty() {
        return Err(ServiceError::BadInput("token is required".to_string()));
    }

    let message = PushMessage {
        to: req.token,
        title: req.title,
        body: req.body,
        data: req.data,
    };

    let response = state
        .push
        .send(&message)
        .await
        .map_err(ServiceError::upstream("push relay"))?;

    Ok(Json(response))
}

/// Check that a field holds a base64 encoded image and return the bare
/// base64 payload with any line wrapping removed.
fn validate_image(field: &str, value: &str) -> Result<String, ServiceError> {
    let value = value.trim();
    let payload = match value.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map(|(_, data)| data).unwrap_or(""),
        None => value,
    };

    let payload: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    if payload.is_empty() {
        return Err(ServiceError::BadInput(format!("{} is required", field)));
    }

    let bytes = STANDARD
        .decode(&payload)
        .map_err(|_| ServiceError::BadInput(format!("{} is not valid base64", field)))?;

    image::guess_format(&bytes)
        .map_err(|_| ServiceError::BadInput(format!("{} is not a supported image", field)))?;

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn test_validate_image() {
        let encoded = STANDARD.encode(PNG_MAGIC);
        assert_eq!(validate_image("image", &encoded).unwrap(), encoded);

        let data_url = format!("data:image/png;base64,{}", encoded);
        assert_eq!(validate_image("image", &data_url).unwrap(), encoded);
    }

    #[test]
    fn test_validate_image_strips_line_wrapping() {
        let encoded = STANDARD.encode(PNG_MAGIC);
        let (head, tail) = encoded.split_at(8);
        let wrapped = format!("{}\r\n{}\n ", head, tail);

        assert_eq!(validate_image("image", &wrapped).unwrap(), encoded);

        let data_url = format!("data:image/png;base64,{}\n{}", head, tail);
        assert_eq!(validate_image("image", &data_url).unwrap(), encoded);
    }

    #[test]
    fn test_validate_image_rejects() {
        let not_image = STANDARD.encode(b"plain text, not an image");
        for value in ["", "   ", "data:image/png;base64,", "%%%not base64%%%", not_image.as_str()] {
            assert!(
                matches!(validate_image("image", value), Err(ServiceError::BadInput(_))),
                "accepted {:?}",
                value
            );
        }
    }

    #[test]
    fn test_merge_fills_only_empty_names() {
        let extraction = ExtractionResult {
            belongs_to_jurisdiction: true,
            identifier: "1234567890123".to_string(),
            first_name: "JUAN".to_string(),
            ..Default::default()
        };
        let record = match json!({
            "firstName": "Juan",
            "middleName": " Reyes ",
            "lastName": "Dela Cruz",
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        let merged = merge_record(extraction, &record);
        assert_eq!(merged.first_name, "JUAN");
        assert_eq!(merged.middle_name, "Reyes");
        assert_eq!(merged.last_name, "Dela Cruz");
    }
}
