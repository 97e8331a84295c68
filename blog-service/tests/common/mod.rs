#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use auth::Authenticator;
use auth::JwtSettings;
use blog_service::domain::post::service::PostService;
use blog_service::domain::user::service::UserService;
use blog_service::inbound::http::router::create_router;
use blog_service::outbound::repositories::SqlitePostRepository;
use blog_service::outbound::repositories::SqliteUserRepository;
use serde_json::json;
use serde_json::Value;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub const JWT_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const JWT_ALGORITHM: &str = "HS256";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub db: TestDb,
    pub api_client: reqwest::Client,
    pub authenticator: Authenticator,
}

/// Test database helper
pub struct TestDb {
    pub pool: SqlitePool,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let db = TestDb::new().await;

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repository = Arc::new(SqliteUserRepository::new(db.pool.clone()));
        let post_repository = Arc::new(SqlitePostRepository::new(db.pool.clone()));

        let authenticator = Arc::new(Authenticator::new(jwt_settings()));
        let user_service = Arc::new(UserService::new(user_repository, authenticator));
        let post_service = Arc::new(PostService::new(post_repository));

        let router = create_router(user_service, post_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            db,
            api_client: reqwest::Client::new(),
            authenticator: Authenticator::new(jwt_settings()),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Register a user with the given username and password, returning the response body
    pub async fn register(&self, username: &str, password: &str, role: &str) -> Value {
        let local_part = username.replace(|c: char| !c.is_ascii_alphanumeric(), "_");
        let response = self
            .post("/auth/create_user")
            .json(&json!({
                "email": format!("{}@example.com", local_part),
                "username": username,
                "name": "Test",
                "surname": "User",
                "password": password,
                "role": role
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in with form-encoded credentials
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/auth/login")
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the access token
    pub async fn token_for(&self, username: &str, password: &str) -> String {
        let response = self.login(username, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["access_token"]
            .as_str()
            .expect("access_token missing")
            .to_string()
    }
}

impl TestDb {
    /// Create a fresh in-memory database with migrations applied.
    ///
    /// A single long-lived connection keeps the in-memory database alive for
    /// the whole test.
    pub async fn new() -> Self {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("Failed to parse database url")
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Self { pool }
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count rows")
    }
}

pub fn jwt_settings() -> JwtSettings {
    JwtSettings::new(JWT_SECRET, JWT_ALGORITHM, 24).expect("valid test settings")
}
