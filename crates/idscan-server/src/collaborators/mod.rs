//! External providers the scan service depends on.
//!
//! Each provider sits behind a trait so the HTTP handlers can be exercised
//! with in-process implementations.

pub mod face;
pub mod ocr;
pub mod push;
pub mod records;

pub use face::{FaceComparison, FaceMatcher, FacePlusPlusClient};
pub use ocr::{TextRecognizer, VisionOcrClient};
pub use push::{ExpoPushClient, PushMessage, PushRelay};
pub use records::{HttpRecordStore, Record, RecordStore, StaticRecordStore};

use std::time::Duration;

use reqwest::{Client, Response};
use thiserror::Error;

/// Errors returned by provider clients.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Connection, timeout or TLS failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Provider reported an error inside a successful response.
    #[error("provider error: {0}")]
    Provider(String),

    /// Response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Local data source could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the shared HTTP client used by provider clients.
pub fn http_client(timeout: Duration) -> Result<Client, UpstreamError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Turn non-success responses into [`UpstreamError::Status`].
pub(crate) async fn check_status(resp: Response) -> Result<Response, UpstreamError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(UpstreamError::Status {
        status: status.as_u16(),
        body: truncate(&body, 500).to_string(),
    })
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ñññ", 3), "ñ");
    }
}
