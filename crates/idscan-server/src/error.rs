//! Error types for the scan service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::collaborators::UpstreamError;

/// Errors returned to HTTP clients.
///
/// Each variant maps to a distinct status code and `category` so clients can
/// tell bad input, provider failures and missing records apart.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The request itself is unusable.
    #[error("{0}")]
    BadInput(String),

    /// The request body exceeds the configured limit.
    #[error("{0}")]
    TooLarge(String),

    /// OCR found no text in the image.
    #[error("no text found in image")]
    NoText,

    /// No member record matches.
    #[error("{0}")]
    NotFound(String),

    /// A provider call failed.
    #[error("{provider} error: {source}")]
    Upstream {
        provider: &'static str,
        #[source]
        source: UpstreamError,
    },
}

impl ServiceError {
    /// Wrap a provider error, for use with `map_err`.
    pub fn upstream(provider: &'static str) -> impl FnOnce(UpstreamError) -> Self {
        move |source| Self::Upstream { provider, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadInput(_) => StatusCode::BAD_REQUEST,
            Self::TooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NoText => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            Self::BadInput(_) => "bad_input",
            Self::TooLarge(_) => "too_large",
            Self::NoText => "no_text",
            Self::NotFound(_) => "not_found",
            Self::Upstream { .. } => "upstream",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    category: &'static str,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match &self {
            Self::Upstream { .. } => error!("Request failed: {}", self),
            _ => warn!("Request rejected: {}", self),
        }

        let body = ErrorBody {
            error: self.to_string(),
            category: self.category(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Errors raised while starting the service.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] idscan_core::ConfigError),

    #[error("failed to set up provider: {0}")]
    Client(#[from] UpstreamError),

    #[error("invalid bind address: {0}")]
    Addr(#[from] std::net::AddrParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
