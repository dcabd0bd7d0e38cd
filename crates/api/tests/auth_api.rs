//! HTTP-level tests for registration, login, and profile self-service.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json, put_json_auth, seed_profile, token_for};
use sqlx::PgPool;

fn register_body(email: &str) -> serde_json::Value {
    serde_json::json!({
        "email": email,
        "password": "sup3r-secret",
        "first_name": "Mia",
        "last_name": "Petrova",
    })
}

#[sqlx::test(migrations = "../../migrations")]
async fn register_creates_client_profile(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/auth/register",
        register_body("mia@gym.test"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["email"], "mia@gym.test");
    assert_eq!(json["role"], "client");
    assert!(json.get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn register_rejects_duplicate_email(pool: PgPool) {
    seed_profile(&pool, "mia@gym.test", "client").await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/auth/register",
        register_body("mia@gym.test"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../migrations")]
async fn register_rejects_short_password(pool: PgPool) {
    let mut body = register_body("mia@gym.test");
    body["password"] = serde_json::json!("short");

    let response = post_json(common::build_test_app(pool), "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../migrations")]
async fn register_rejects_privileged_roles(pool: PgPool) {
    let mut body = register_body("mia@gym.test");
    body["role"] = serde_json::json!("admin");

    let response = post_json(common::build_test_app(pool), "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../migrations")]
async fn login_returns_token_and_user(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app.clone(),
        "/api/v1/auth/register",
        register_body("mia@gym.test"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": "mia@gym.test", "password": "sup3r-secret" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["user"]["email"], "mia@gym.test");
}

#[sqlx::test(migrations = "../../migrations")]
async fn login_rejects_wrong_password(pool: PgPool) {
    seed_profile(&pool, "mia@gym.test", "client").await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/auth/login",
        serde_json::json!({ "email": "mia@gym.test", "password": "wrong-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../migrations")]
async fn login_rejects_unknown_email(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/auth/login",
        serde_json::json!({ "email": "nobody@gym.test", "password": "sup3r-secret" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../migrations")]
async fn user_can_update_own_email(pool: PgPool) {
    let client = seed_profile(&pool, "old@gym.test", "client").await;

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/users/me/email",
        &token_for(client, "client"),
        serde_json::json!({ "email": "new@gym.test" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let email: String = sqlx::query_scalar("SELECT email FROM profiles WHERE id = $1")
        .bind(client)
        .fetch_one(&pool)
        .await
        .expect("fetch email");
    assert_eq!(email, "new@gym.test");
}

#[sqlx::test(migrations = "../../migrations")]
async fn password_update_takes_effect_at_login(pool: PgPool) {
    let client = seed_profile(&pool, "mia@gym.test", "client").await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app.clone(),
        "/api/v1/users/me/password",
        &token_for(client, "client"),
        serde_json::json!({ "password": "brand-new-pass" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": "mia@gym.test", "password": "brand-new-pass" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../migrations")]
async fn profile_updates_require_authentication(pool: PgPool) {
    let response = common::put_json(
        common::build_test_app(pool),
        "/api/v1/users/me/email",
        serde_json::json!({ "email": "new@gym.test" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
