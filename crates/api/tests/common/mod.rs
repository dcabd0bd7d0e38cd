//! Shared harness for HTTP-level integration tests.
//!
//! Uses Axum's `tower::ServiceExt::oneshot` to send requests directly to
//! the router without a TCP listener, and mirrors the production middleware
//! stack via [`gymbook_api::router::build_app_router`].

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use gymbook_api::auth::jwt::{generate_access_token, JwtConfig};
use gymbook_api::auth::password::hash_password;
use gymbook_api::config::ServerConfig;
use gymbook_api::router::build_app_router;
use gymbook_api::state::AppState;
use gymbook_core::types::DbId;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Mint a valid bearer token for a seeded profile.
pub fn token_for(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).expect("token generation")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request build"),
        None => builder.body(Body::empty()).expect("request build"),
    };
    app.oneshot(request).await.expect("request send")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, None, Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("body is valid JSON")
}

/// Collect a response body into raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    use http_body_util::BodyExt;
    response
        .into_body()
        .collect()
        .await
        .expect("body collect")
        .to_bytes()
        .to_vec()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Insert a profile directly and return its id.
pub async fn seed_profile(pool: &PgPool, email: &str, role: &str) -> DbId {
    let password_hash = hash_password("seeded-password").expect("hash");
    sqlx::query_scalar(
        "INSERT INTO profiles (email, password_hash, role, first_name, last_name) \
         VALUES ($1, $2, $3, 'Test', 'User') RETURNING id",
    )
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await
    .expect("seed profile")
}

/// Insert a room directly and return its id.
pub async fn seed_room(pool: &PgPool, name: &str, capacity: i32) -> DbId {
    sqlx::query_scalar("INSERT INTO rooms (name, capacity) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(capacity)
        .fetch_one(pool)
        .await
        .expect("seed room")
}

/// Insert a training directly (bypassing the guard) and return its id.
///
/// `start` and `end` are `HH:MM` strings on the given day.
pub async fn seed_training(
    pool: &PgPool,
    name: &str,
    trainer_id: DbId,
    room_id: DbId,
    day: &str,
    start: &str,
    end: &str,
) -> DbId {
    let start_min = minutes(start);
    let end_min = minutes(end);
    sqlx::query_scalar(
        "INSERT INTO trainings \
            (name, trainer_id, room_id, day_of_week, time_of_day, end_time, duration_min) \
         VALUES ($1, $2, $3, $4, $5::time, $6::time, $7) RETURNING id",
    )
    .bind(name)
    .bind(trainer_id)
    .bind(room_id)
    .bind(day)
    .bind(start)
    .bind(end)
    .bind(end_min - start_min)
    .fetch_one(pool)
    .await
    .expect("seed training")
}

/// Insert a booking directly and return its id.
pub async fn seed_booking(pool: &PgPool, user_id: DbId, training_id: DbId) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO bookings (user_id, training_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(user_id)
    .bind(training_id)
    .fetch_one(pool)
    .await
    .expect("seed booking")
}

fn minutes(hh_mm: &str) -> i32 {
    let (h, m) = hh_mm.split_once(':').expect("HH:MM");
    h.parse::<i32>().expect("hour") * 60 + m.parse::<i32>().expect("minute")
}
