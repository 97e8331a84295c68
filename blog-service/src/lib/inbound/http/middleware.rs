use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::COULD_NOT_VALIDATE;
use crate::inbound::http::router::AppState;

/// Middleware that resolves the bearer token and adds the caller's
/// `IdentityContext` to request extensions.
///
/// Requests without a resolvable token stop here with 401 and never reach
/// the handler.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let identity = state.user_service.resolve(token).map_err(ApiError::from)?;

    tracing::debug!(
        user_id = %identity.user_id,
        username = %identity.username,
        "Caller authenticated"
    );
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized(COULD_NOT_VALIDATE.to_string()))?;

    match auth_str.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => {
            let token = token.trim();
            if token.is_empty() {
                return Err(ApiError::Unauthorized("Not authenticated".to_string()));
            }
            Ok(token)
        }
        _ => {
            tracing::warn!("Authorization header is not a bearer token");
            Err(ApiError::Unauthorized("Not authenticated".to_string()))
        }
    }
}
