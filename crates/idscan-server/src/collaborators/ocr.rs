//! OCR provider: image in, plain text out.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{check_status, UpstreamError};
use idscan_core::models::config::OcrConfig;

/// Converts an image to text.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Recognize text in a base64 encoded image.
    ///
    /// Returns `Ok(None)` when the provider found no text at all.
    async fn recognize(&self, image_base64: &str) -> Result<Option<String>, UpstreamError>;
}

/// Google Cloud Vision `images:annotate` client using `TEXT_DETECTION`.
pub struct VisionOcrClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl VisionOcrClient {
    pub fn new(client: Client, config: &OcrConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl TextRecognizer for VisionOcrClient {
    async fn recognize(&self, image_base64: &str) -> Result<Option<String>, UpstreamError> {
        let request = json!({
            "requests": [{
                "image": { "content": image_base64 },
                "features": [{ "type": "TEXT_DETECTION" }]
            }]
        });

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.query(&[("key", key)]);
        }

        let resp = check_status(builder.send().await?).await?;
        let annotated: AnnotateResponse = resp
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        let text = text_from_response(annotated)?;
        debug!(
            "OCR returned {} characters",
            text.as_ref().map(|t| t.len()).unwrap_or(0)
        );
        Ok(text)
    }
}

/// Vision batch response.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AnnotateResponse {
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AnnotateImageResponse {
    full_text_annotation: Option<FullTextAnnotation>,
    text_annotations: Vec<EntityAnnotation>,
    error: Option<ProviderStatus>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FullTextAnnotation {
    text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EntityAnnotation {
    description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProviderStatus {
    message: String,
}

/// Pick the document text out of an annotate response.
fn text_from_response(resp: AnnotateResponse) -> Result<Option<String>, UpstreamError> {
    let Some(first) = resp.responses.into_iter().next() else {
        return Ok(None);
    };

    if let Some(err) = first.error {
        return Err(UpstreamError::Provider(err.message));
    }

    let text = first
        .full_text_annotation
        .map(|a| a.text)
        .filter(|t| !t.trim().is_empty())
        .or_else(|| {
            first
                .text_annotations
                .into_iter()
                .next()
                .map(|a| a.description)
                .filter(|t| !t.trim().is_empty())
        });

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Option<String>, UpstreamError> {
        text_from_response(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_full_text_preferred() {
        let text = parse(
            r#"{"responses":[{
                "textAnnotations":[{"description":"partial"}],
                "fullTextAnnotation":{"text":"SILAY CITY\n1234567890123"}
            }]}"#,
        )
        .unwrap();
        assert_eq!(text.as_deref(), Some("SILAY CITY\n1234567890123"));
    }

    #[test]
    fn test_falls_back_to_first_annotation() {
        let text = parse(r#"{"responses":[{"textAnnotations":[{"description":"SILAY"},{"description":"x"}]}]}"#)
            .unwrap();
        assert_eq!(text.as_deref(), Some("SILAY"));
    }

    #[test]
    fn test_no_text() {
        assert_eq!(parse(r#"{"responses":[{}]}"#).unwrap(), None);
        assert_eq!(parse(r#"{"responses":[]}"#).unwrap(), None);
        assert_eq!(parse(r#"{}"#).unwrap(), None);
        assert_eq!(
            parse(r#"{"responses":[{"fullTextAnnotation":{"text":"  \n"}}]}"#).unwrap(),
            None
        );
    }

    #[test]
    fn test_provider_error() {
        let err = parse(r#"{"responses":[{"error":{"code":3,"message":"Bad image data."}}]}"#)
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Provider(msg) if msg == "Bad image data."));
    }
}
