//! Integration tests for session token persistence.
//!
//! - Live lookup ignores expired rows
//! - Rotation overwrites the same row in place
//! - Logout deletes only the matching `(user, token)` row
//! - Expired-row cleanup

use chrono::{Duration, Utc};
use spooky_core::platform::PlatformType;
use spooky_db::models::session_token::CreateSessionToken;
use spooky_db::models::user::{CreateUser, User};
use spooky_db::repositories::{SessionTokenRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, platform_user_id: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            platform_type: PlatformType::None,
            platform_user_id: platform_user_id.to_string(),
            display_name: "anonym".to_string(),
        },
    )
    .await
    .unwrap()
    .expect("identity should be free")
}

fn token(user_id: uuid::Uuid, hash: &str, ttl: Duration) -> CreateSessionToken {
    CreateSessionToken {
        user_id,
        token_hash: hash.to_string(),
        valid_until: Utc::now() + ttl,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_platform_identity_is_rejected(pool: PgPool) {
    new_user(&pool, "dup").await;
    let second = UserRepo::create(
        &pool,
        &CreateUser {
            platform_type: PlatformType::None,
            platform_user_id: "dup".to_string(),
            display_name: "anonym".to_string(),
        },
    )
    .await
    .unwrap();
    assert!(second.is_none(), "identity must be unique per platform");

    let other_platform = UserRepo::create(
        &pool,
        &CreateUser {
            platform_type: PlatformType::Steam,
            platform_user_id: "dup".to_string(),
            display_name: "anonym".to_string(),
        },
    )
    .await
    .unwrap();
    assert!(other_platform.is_some(), "same id on another platform is a different identity");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_live_ignores_expired(pool: PgPool) {
    let user = new_user(&pool, "u1").await;
    SessionTokenRepo::create(&pool, &token(user.id, "live", Duration::minutes(5)))
        .await
        .unwrap();
    SessionTokenRepo::create(&pool, &token(user.id, "dead", Duration::minutes(-5)))
        .await
        .unwrap();

    assert!(SessionTokenRepo::find_live_by_hash(&pool, "live").await.unwrap().is_some());
    assert!(SessionTokenRepo::find_live_by_hash(&pool, "dead").await.unwrap().is_none());
    assert!(SessionTokenRepo::find_live_by_hash(&pool, "unknown").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rotate_overwrites_same_row(pool: PgPool) {
    let user = new_user(&pool, "u1").await;
    let created = SessionTokenRepo::create(&pool, &token(user.id, "old", Duration::minutes(5)))
        .await
        .unwrap();

    let extended = Utc::now() + Duration::minutes(60);
    let rotated = SessionTokenRepo::rotate(&pool, "old", "new", extended)
        .await
        .unwrap()
        .expect("live token should rotate");

    assert_eq!(rotated.id, created.id, "rotation must update in place");
    assert_eq!(rotated.token_hash, "new");
    assert!(rotated.valid_until > created.valid_until);

    let rows = SessionTokenRepo::list_for_user(&pool, user.id).await.unwrap();
    assert_eq!(rows.len(), 1);

    // The old token is gone; rotating it again fails.
    assert!(SessionTokenRepo::rotate(&pool, "old", "newer", extended)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rotate_refuses_expired(pool: PgPool) {
    let user = new_user(&pool, "u1").await;
    SessionTokenRepo::create(&pool, &token(user.id, "old", Duration::minutes(-1)))
        .await
        .unwrap();

    let rotated = SessionTokenRepo::rotate(&pool, "old", "new", Utc::now() + Duration::hours(1))
        .await
        .unwrap();
    assert!(rotated.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_for_user_is_scoped_and_idempotent(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let bob = new_user(&pool, "bob").await;
    SessionTokenRepo::create(&pool, &token(alice.id, "a1", Duration::minutes(5)))
        .await
        .unwrap();
    SessionTokenRepo::create(&pool, &token(alice.id, "a2", Duration::minutes(5)))
        .await
        .unwrap();

    // Bob cannot delete Alice's token.
    assert!(!SessionTokenRepo::delete_for_user(&pool, bob.id, "a1").await.unwrap());

    assert!(SessionTokenRepo::delete_for_user(&pool, alice.id, "a1").await.unwrap());
    assert!(!SessionTokenRepo::delete_for_user(&pool, alice.id, "a1").await.unwrap());

    let remaining = SessionTokenRepo::list_for_user(&pool, alice.id).await.unwrap();
    assert_eq!(remaining.len(), 1, "other devices stay logged in");
    assert_eq!(remaining[0].token_hash, "a2");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_expired(pool: PgPool) {
    let user = new_user(&pool, "u1").await;
    SessionTokenRepo::create(&pool, &token(user.id, "live", Duration::minutes(5)))
        .await
        .unwrap();
    SessionTokenRepo::create(&pool, &token(user.id, "dead", Duration::minutes(-5)))
        .await
        .unwrap();

    let deleted = SessionTokenRepo::delete_expired(&pool, Utc::now()).await.unwrap();
    assert_eq!(deleted, 1);
    assert_eq!(SessionTokenRepo::list_for_user(&pool, user.id).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_touch_updates_last_seen(pool: PgPool) {
    let user = new_user(&pool, "u1").await;
    let created = SessionTokenRepo::create(&pool, &token(user.id, "t", Duration::minutes(5)))
        .await
        .unwrap();

    assert!(SessionTokenRepo::touch(&pool, created.id).await.unwrap());
    let after = SessionTokenRepo::find_live_by_hash(&pool, "t").await.unwrap().unwrap();
    assert!(after.last_seen_at >= created.last_seen_at);
}
