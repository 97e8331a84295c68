use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::INVALID_CREDENTIALS;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::extractors::ApiForm;
use crate::inbound::http::router::AppState;
use crate::user::models::Username;

/// OAuth2 password-flow login: form-encoded credentials in, bearer token out.
///
/// Every credential failure, including a username that could never exist,
/// answers with the same 401.
pub async fn login(
    State(state): State<AppState>,
    ApiForm(form): ApiForm<LoginForm>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let username = Username::new(form.username)
        .map_err(|_| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let result = state
        .user_service
        .login(&username, &form.password)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            access_token: result.access_token,
            token_type: "bearer".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub token_type: String,
}
