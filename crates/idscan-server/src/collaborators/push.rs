//! Push notification relay.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{check_status, UpstreamError};
use idscan_core::models::config::PushConfig;

/// A notification addressed to one device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushMessage {
    /// Destination device token.
    pub to: String,
    pub title: String,
    pub body: String,
    /// Arbitrary payload delivered with the notification.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

/// Forwards notifications to a delivery provider.
#[async_trait]
pub trait PushRelay: Send + Sync {
    /// Send a message; the provider response is returned unmodified.
    async fn send(&self, message: &PushMessage) -> Result<Value, UpstreamError>;
}

/// Expo push API client.
pub struct ExpoPushClient {
    client: Client,
    endpoint: String,
    access_token: Option<String>,
}

impl ExpoPushClient {
    pub fn new(client: Client, config: &PushConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            access_token: config.access_token.clone(),
        }
    }
}

#[async_trait]
impl PushRelay for ExpoPushClient {
    async fn send(&self, message: &PushMessage) -> Result<Value, UpstreamError> {
        let mut builder = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(message);
        if let Some(token) = &self.access_token {
            builder = builder.bearer_auth(token);
        }

        let resp = check_status(builder.send().await?).await?;
        resp.json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}
