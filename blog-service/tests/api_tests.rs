mod common;

use auth::Authenticator;
use auth::JwtSettings;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_create_user_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/create_user")
        .json(&json!({
            "email": "nicola@example.com",
            "username": "nicola",
            "name": "Nicola",
            "surname": "Rossi",
            "password": "pass_word!",
            "role": "admin"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], "nicola");
    assert_eq!(body["email"], "nicola@example.com");
    assert_eq!(body["role"], "admin");
    assert_eq!(body["is_active"], true);
    assert!(body["id"].is_i64());
    assert!(body["created_at"].is_string());
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_create_user_stores_digest_not_password() {
    let app = TestApp::spawn().await;
    app.register("nicola", "pass_word!", "user").await;

    let stored: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE username = ?")
        .bind("nicola")
        .fetch_one(&app.db.pool)
        .await
        .expect("Failed to fetch user");

    assert_ne!(stored, "pass_word!");
    assert!(stored.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_create_user_duplicate_username() {
    let app = TestApp::spawn().await;
    app.register("nicola", "pass_word!", "user").await;

    let response = app
        .post("/auth/create_user")
        .json(&json!({
            "email": "other@example.com",
            "username": "nicola",
            "name": "Other",
            "surname": "Person",
            "password": "pass_word!",
            "role": "user"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(app.db.count("users").await, 1);
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let app = TestApp::spawn().await;
    app.register("nicola", "pass_word!", "user").await;

    let response = app
        .post("/auth/create_user")
        .json(&json!({
            "email": "nicola@example.com",
            "username": "another",
            "name": "Other",
            "surname": "Person",
            "password": "pass_word!",
            "role": "user"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(app.db.count("users").await, 1);
}

#[tokio::test]
async fn test_create_user_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/create_user")
        .json(&json!({
            "email": "not-an-email",
            "username": "nicola",
            "name": "Nicola",
            "surname": "Rossi",
            "password": "pass_word!",
            "role": "user"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.db.count("users").await, 0);
}

#[tokio::test]
async fn test_create_user_accepts_free_form_username() {
    let app = TestApp::spawn().await;

    for username in ["bob.jones", "al", "alice smith"] {
        let body = app.register(username, "pass_word!", "user").await;
        assert_eq!(body["username"], username);
    }

    let token = app.token_for("bob.jones", "pass_word!").await;
    let claims = app.authenticator.validate_token(&token).unwrap();
    assert_eq!(claims.sub.as_deref(), Some("bob.jones"));
}

#[tokio::test]
async fn test_create_user_blank_username() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/create_user")
        .json(&json!({
            "email": "nicola@example.com",
            "username": "",
            "name": "Nicola",
            "surname": "Rossi",
            "password": "pass_word!",
            "role": "user"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.db.count("users").await, 0);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    let user = app.register("nicola", "pass_word!", "admin").await;

    let response = app.login("nicola", "pass_word!").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["token_type"], "bearer");

    let token = body["access_token"].as_str().expect("access_token missing");
    let claims = app
        .authenticator
        .validate_token(token)
        .expect("Issued token should validate");

    assert_eq!(claims.sub.as_deref(), Some("nicola"));
    assert_eq!(claims.id, user["id"].as_i64());
    assert_eq!(claims.role.as_deref(), Some("admin"));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("nicola", "pass_word!", "user").await;

    let wrong_password = app.login("nicola", "wrong").await;
    let unknown_user = app.login("nobody", "pass_word!").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    let wrong_password: Value = wrong_password.json().await.unwrap();
    let unknown_user: Value = unknown_user.json().await.unwrap();
    assert_eq!(wrong_password, unknown_user);
    assert_eq!(wrong_password["detail"], "Incorrect username or password");
}

#[tokio::test]
async fn test_create_post_without_token_is_unauthorized() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/blog/")
        .json(&json!({ "title": "Hello", "content": "World" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()["www-authenticate"], "Bearer");
    assert_eq!(app.db.count("posts").await, 0);
}

#[tokio::test]
async fn test_create_post_with_garbage_token_is_unauthorized() {
    let app = TestApp::spawn().await;

    let response = app
        .post_authenticated("/blog/", "not-a-jwt")
        .json(&json!({ "title": "Hello", "content": "World" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Could not validate user!");
    assert_eq!(app.db.count("posts").await, 0);
}

#[tokio::test]
async fn test_create_post_with_foreign_secret_is_unauthorized() {
    let app = TestApp::spawn().await;
    let user = app.register("nicola", "pass_word!", "user").await;

    let settings = JwtSettings::new("a-completely-different-secret-value", "HS256", 24).unwrap();
    let forged = Authenticator::new(settings)
        .issue_token("nicola", user["id"].as_i64().unwrap(), "user")
        .unwrap();

    let response = app
        .post_authenticated("/blog/", &forged.access_token)
        .json(&json!({ "title": "Hello", "content": "World" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.db.count("posts").await, 0);
}

#[tokio::test]
async fn test_create_post_with_expired_token_is_unauthorized() {
    let app = TestApp::spawn().await;
    let user = app.register("nicola", "pass_word!", "user").await;

    let expired = app
        .authenticator
        .issue_token_at(
            "nicola",
            user["id"].as_i64().unwrap(),
            "user",
            Utc::now() - Duration::hours(25),
        )
        .unwrap();

    let response = app
        .post_authenticated("/blog/", &expired.access_token)
        .json(&json!({ "title": "Hello", "content": "World" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.db.count("posts").await, 0);
}

#[tokio::test]
async fn test_create_post_for_deleted_identity_is_unauthorized() {
    let app = TestApp::spawn().await;

    // Well-signed token naming an id that was never registered
    let token = app
        .authenticator
        .issue_token("ghost", 4242, "user")
        .unwrap()
        .access_token;

    let response = app
        .post_authenticated("/blog/", &token)
        .json(&json!({ "title": "Hello", "content": "World" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.db.count("posts").await, 0);
}

#[tokio::test]
async fn test_register_login_post_and_read_back() {
    let app = TestApp::spawn().await;
    let alice = app.register("alice", "pw123", "user").await;
    let token = app.token_for("alice", "pw123").await;

    let response = app
        .post_authenticated("/blog/", &token)
        .json(&json!({ "title": "t", "content": "c" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    let post_id = created["id"].as_i64().expect("id missing");

    let response = app
        .get(&format!("/blog/{}", post_id))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], post_id);
    assert_eq!(body["title"], "t");
    assert_eq!(body["content"], "c");
    assert_eq!(body["author"], alice["id"]);
    assert_eq!(body["is_active"], true);
}

#[tokio::test]
async fn test_author_comes_from_token_not_body() {
    let app = TestApp::spawn().await;
    let alice = app.register("alice", "pw123", "user").await;
    app.register("bob", "pw456", "user").await;
    let token = app.token_for("alice", "pw123").await;

    let response = app
        .post_authenticated("/blog/", &token)
        .json(&json!({ "title": "t", "content": "c", "author": 999 }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["author"], alice["id"]);
}

#[tokio::test]
async fn test_get_missing_post_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/blog/999")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Blog not found!");
}

#[tokio::test]
async fn test_list_posts_empty() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/blog/")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_posts_returns_every_post() {
    let app = TestApp::spawn().await;
    app.register("alice", "pw123", "user").await;
    let token = app.token_for("alice", "pw123").await;

    for title in ["first", "second", "third"] {
        let response = app
            .post_authenticated("/blog/", &token)
            .json(&json!({ "title": title, "content": "body" }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Listing needs no token
    let response = app
        .get("/blog/")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Vec<Value> = response.json().await.unwrap();
    let titles: Vec<&str> = body.iter().filter_map(|p| p["title"].as_str()).collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_get_post_with_non_numeric_id_has_detail_body() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/blog/abc")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Body should be JSON");
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_create_post_with_malformed_body_has_detail_body() {
    let app = TestApp::spawn().await;
    app.register("alice", "pw123", "user").await;
    let token = app.token_for("alice", "pw123").await;

    let response = app
        .post_authenticated("/blog/", &token)
        .json(&json!({ "title": "missing content" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await.expect("Body should be JSON");
    assert!(body["detail"].is_string());
    assert_eq!(app.db.count("posts").await, 0);
}

#[tokio::test]
async fn test_login_without_fields_has_detail_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/login")
        .form(&[("username", "alice")])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await.expect("Body should be JSON");
    assert!(body["detail"].is_string());
}
