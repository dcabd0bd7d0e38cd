//! HTTP-level tests for training CRUD behind the collision guard.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, post_json_auth, put_json_auth, seed_booking, seed_profile, seed_room,
    seed_training, token_for,
};
use sqlx::PgPool;

fn training_body(
    trainer: i64,
    room: i64,
    day: &str,
    start: &str,
    end: &str,
) -> serde_json::Value {
    serde_json::json!({
        "name": "Yoga",
        "trainer_id": trainer,
        "room_id": room,
        "day_of_week": day,
        "time_of_day": start,
        "end_time": end,
    })
}

#[sqlx::test(migrations = "../../migrations")]
async fn create_computes_duration(pool: PgPool) {
    let admin = seed_profile(&pool, "admin@gym.test", "admin").await;
    let trainer = seed_profile(&pool, "trainer@gym.test", "trainer").await;
    let room = seed_room(&pool, "Studio A", 10).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/trainings",
        &token_for(admin, "admin"),
        training_body(trainer, room, "monday", "09:00", "10:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["duration_min"], 60);
    assert_eq!(json["day_of_week"], "monday");
}

#[sqlx::test(migrations = "../../migrations")]
async fn create_rejects_non_positive_duration(pool: PgPool) {
    let admin = seed_profile(&pool, "admin@gym.test", "admin").await;
    let trainer = seed_profile(&pool, "trainer@gym.test", "trainer").await;
    let room = seed_room(&pool, "Studio A", 10).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/trainings",
        &token_for(admin, "admin"),
        training_body(trainer, room, "monday", "10:00", "09:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_DURATION");
}

#[sqlx::test(migrations = "../../migrations")]
async fn create_rejects_busy_trainer(pool: PgPool) {
    let admin = seed_profile(&pool, "admin@gym.test", "admin").await;
    let trainer = seed_profile(&pool, "trainer@gym.test", "trainer").await;
    let room_a = seed_room(&pool, "Studio A", 10).await;
    let room_b = seed_room(&pool, "Studio B", 10).await;
    seed_training(&pool, "Yoga", trainer, room_a, "monday", "09:00", "10:00").await;

    // Different room, same trainer, overlapping window.
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/trainings",
        &token_for(admin, "admin"),
        training_body(trainer, room_b, "monday", "09:30", "10:30"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../migrations")]
async fn busy_room_alone_does_not_block_create(pool: PgPool) {
    let admin = seed_profile(&pool, "admin@gym.test", "admin").await;
    let trainer_a = seed_profile(&pool, "a@gym.test", "trainer").await;
    let trainer_b = seed_profile(&pool, "b@gym.test", "trainer").await;
    let room = seed_room(&pool, "Studio A", 10).await;
    seed_training(&pool, "Yoga", trainer_a, room, "monday", "09:00", "10:00").await;

    // Same room, overlapping window, different trainer: room conflicts are
    // advisory, so the write is allowed.
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/trainings",
        &token_for(admin, "admin"),
        training_body(trainer_b, room, "monday", "09:30", "10:30"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../migrations")]
async fn edit_does_not_conflict_with_itself(pool: PgPool) {
    let admin = seed_profile(&pool, "admin@gym.test", "admin").await;
    let trainer = seed_profile(&pool, "trainer@gym.test", "trainer").await;
    let room = seed_room(&pool, "Studio A", 10).await;
    let training =
        seed_training(&pool, "Yoga", trainer, room, "monday", "09:00", "10:00").await;

    // Unchanged schedule, resubmitted via PUT.
    let response = put_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/trainings/{training}"),
        &token_for(admin, "admin"),
        training_body(trainer, room, "monday", "09:00", "10:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../migrations")]
async fn edit_still_collides_with_other_trainings(pool: PgPool) {
    let admin = seed_profile(&pool, "admin@gym.test", "admin").await;
    let trainer = seed_profile(&pool, "trainer@gym.test", "trainer").await;
    let room = seed_room(&pool, "Studio A", 10).await;
    seed_training(&pool, "Yoga", trainer, room, "monday", "09:00", "10:00").await;
    let edited =
        seed_training(&pool, "Pilates", trainer, room, "monday", "11:00", "12:00").await;

    // Move the 11:00 session onto the 09:00 one.
    let response = put_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/trainings/{edited}"),
        &token_for(admin, "admin"),
        training_body(trainer, room, "monday", "09:30", "10:30"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../migrations")]
async fn create_requires_staff_role(pool: PgPool) {
    let client = seed_profile(&pool, "client@gym.test", "client").await;
    let trainer = seed_profile(&pool, "trainer@gym.test", "trainer").await;
    let room = seed_room(&pool, "Studio A", 10).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/trainings",
        &token_for(client, "client"),
        training_body(trainer, room, "monday", "09:00", "10:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../migrations")]
async fn create_rejects_unknown_trainer(pool: PgPool) {
    let admin = seed_profile(&pool, "admin@gym.test", "admin").await;
    let room = seed_room(&pool, "Studio A", 10).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/trainings",
        &token_for(admin, "admin"),
        training_body(999_999, room, "monday", "09:00", "10:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
async fn delete_blocked_by_bookings(pool: PgPool) {
    let admin = seed_profile(&pool, "admin@gym.test", "admin").await;
    let trainer = seed_profile(&pool, "trainer@gym.test", "trainer").await;
    let client = seed_profile(&pool, "client@gym.test", "client").await;
    let room = seed_room(&pool, "Studio A", 10).await;
    let training =
        seed_training(&pool, "Yoga", trainer, room, "monday", "09:00", "10:00").await;
    seed_booking(&pool, client, training).await;

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/trainings/{training}"),
        &token_for(admin, "admin"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "RESOURCE_IN_USE");
}

#[sqlx::test(migrations = "../../migrations")]
async fn delete_without_bookings_succeeds(pool: PgPool) {
    let admin = seed_profile(&pool, "admin@gym.test", "admin").await;
    let trainer = seed_profile(&pool, "trainer@gym.test", "trainer").await;
    let room = seed_room(&pool, "Studio A", 10).await;
    let training =
        seed_training(&pool, "Yoga", trainer, room, "monday", "09:00", "10:00").await;

    let response = delete_auth(
        common::build_test_app(pool),
        &format!("/api/v1/trainings/{training}"),
        &token_for(admin, "admin"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_includes_occupancy(pool: PgPool) {
    let trainer = seed_profile(&pool, "trainer@gym.test", "trainer").await;
    let client_a = seed_profile(&pool, "a@gym.test", "client").await;
    let client_b = seed_profile(&pool, "b@gym.test", "client").await;
    let room = seed_room(&pool, "Studio A", 10).await;
    let training =
        seed_training(&pool, "Yoga", trainer, room, "monday", "09:00", "10:00").await;
    seed_booking(&pool, client_a, training).await;
    seed_booking(&pool, client_b, training).await;

    let response = common::get(common::build_test_app(pool), "/api/v1/trainings").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json[0]["booked_count"], 2);
    assert_eq!(json[0]["free_seats"], 8);
    assert_eq!(json[0]["room_name"], "Studio A");
}
