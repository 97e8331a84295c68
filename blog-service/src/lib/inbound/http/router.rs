use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_post;
use super::handlers::create_user;
use super::handlers::get_post;
use super::handlers::list_posts;
use super::handlers::login;
use super::middleware::authenticate as auth_middleware;
use crate::domain::post::service::PostService;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::SqlitePostRepository;
use crate::outbound::repositories::SqliteUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<SqliteUserRepository>>,
    pub post_service: Arc<PostService<SqlitePostRepository>>,
}

pub fn create_router(
    user_service: Arc<UserService<SqliteUserRepository>>,
    post_service: Arc<PostService<SqlitePostRepository>>,
) -> Router {
    let state = AppState {
        user_service,
        post_service,
    };

    let auth_routes = Router::new()
        .route("/auth/create_user", post(create_user))
        .route("/auth/login", post(login));

    // Listing and reading are public; only creation sits behind the token gate.
    let protected_create = post(create_post).route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth_middleware,
    ));

    let blog_routes = Router::new()
        .route("/blog/", get(list_posts).merge(protected_create))
        .route("/blog/:id", get(get_post));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(auth_routes)
        .merge(blog_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
