//! Request body extraction with service error responses.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};

use crate::error::ServiceError;

/// JSON request body whose rejections are reported as [`ServiceError`].
///
/// A malformed body, a mistyped field or a missing JSON content type is bad
/// input. Bodies over the configured limit keep their 413 status.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Err(ServiceError::TooLarge(rejection.body_text()))
            }
            Err(rejection) => Err(ServiceError::BadInput(rejection.body_text())),
        }
    }
}
