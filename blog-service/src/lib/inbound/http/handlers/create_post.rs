use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::PostData;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::IdentityContext;
use crate::inbound::http::extractors::ApiJson;
use crate::inbound::http::router::AppState;

/// Only reachable behind the bearer-token middleware, which supplies the
/// identity; the author is never read from the body.
pub async fn create_post(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
    ApiJson(body): ApiJson<CreatePostRequest>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let command = CreatePostCommand {
        title: body.title,
        content: body.content,
    };

    state
        .post_service
        .create_post(&identity, command)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::CREATED, post.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePostRequest {
    title: String,
    content: String,
}
