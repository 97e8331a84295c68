//! Request extractors whose rejections render as [`ApiError`] bodies.
//!
//! axum's own `Json`, `Form` and `Path` reject with plain-text responses;
//! these wrappers keep the `{"detail": ...}` shape for malformed input too.

use axum::extract::rejection::FormRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;

use super::handlers::ApiError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Form), rejection(ApiError))]
pub struct ApiForm<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::from_rejection(rejection.status(), rejection.body_text())
    }
}

impl ApiError {
    fn from_rejection(status: StatusCode, detail: String) -> Self {
        tracing::debug!(status = status.as_u16(), detail = %detail, "Request rejected");
        match status {
            StatusCode::UNPROCESSABLE_ENTITY => ApiError::UnprocessableEntity(detail),
            StatusCode::UNSUPPORTED_MEDIA_TYPE => ApiError::UnsupportedMediaType(detail),
            status if status.is_server_error() => ApiError::InternalServerError(detail),
            _ => ApiError::BadRequest(detail),
        }
    }
}
