//! Face similarity provider.

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{check_status, UpstreamError};
use idscan_core::models::config::FaceConfig;

/// Provider confidence that two images show the same person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceComparison {
    /// Similarity score as reported by the provider.
    pub confidence: f64,

    /// Provider-defined confidence thresholds keyed by false-accept rate.
    #[serde(default)]
    pub thresholds: BTreeMap<String, f64>,
}

/// Compares the faces in two images.
#[async_trait]
pub trait FaceMatcher: Send + Sync {
    async fn compare(
        &self,
        image1_base64: &str,
        image2_base64: &str,
    ) -> Result<FaceComparison, UpstreamError>;
}

/// Face++ `compare` API client.
pub struct FacePlusPlusClient {
    client: Client,
    endpoint: String,
    api_key: String,
    api_secret: String,
}

impl FacePlusPlusClient {
    pub fn new(client: Client, config: &FaceConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone().unwrap_or_default(),
            api_secret: config.api_secret.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompareResponse {
    confidence: Option<f64>,
    #[serde(default)]
    thresholds: BTreeMap<String, f64>,
    error_message: Option<String>,
}

impl CompareResponse {
    fn into_comparison(self) -> Result<FaceComparison, UpstreamError> {
        if let Some(message) = self.error_message {
            return Err(UpstreamError::Provider(message));
        }

        // Face++ omits confidence when either image has no face.
        let confidence = self
            .confidence
            .ok_or_else(|| UpstreamError::Provider("no face detected in one of the images".to_string()))?;

        Ok(FaceComparison {
            confidence,
            thresholds: self.thresholds,
        })
    }
}

#[async_trait]
impl FaceMatcher for FacePlusPlusClient {
    async fn compare(
        &self,
        image1_base64: &str,
        image2_base64: &str,
    ) -> Result<FaceComparison, UpstreamError> {
        let form = [
            ("api_key", self.api_key.as_str()),
            ("api_secret", self.api_secret.as_str()),
            ("image_base64_1", image1_base64),
            ("image_base64_2", image2_base64),
        ];

        let resp = check_status(self.client.post(&self.endpoint).form(&form).send().await?).await?;
        let parsed: CompareResponse = resp
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        parsed.into_comparison()
    }
}
