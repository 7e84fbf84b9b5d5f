//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly; no server or database is needed.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use spooky_api::error::AppError;
use spooky_core::error::CoreError;
use uuid::Uuid;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let id = Uuid::nil();
    let (status, json) = error_to_response(AppError::Core(CoreError::NotFound {
        entity: "Level",
        id,
    }))
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], format!("Level with id {id} not found"));
}

#[tokio::test]
async fn unauthenticated_returns_401() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Unauthenticated("no token".into()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn not_authorized_returns_403() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::NotAuthorized("owner only".into()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "NOT_AUTHORIZED");
    assert_eq!(json["error"], "owner only");
}

#[tokio::test]
async fn invalid_input_and_bad_request_return_400() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::InvalidInput("bad name".into()))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_INPUT");

    let (status, json) = error_to_response(AppError::BadRequest("bad query".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn conflict_returns_409() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Conflict("locked".into()))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn store_failure_is_sanitized() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::PoolTimedOut)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "STORE_FAILURE");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn internal_errors_hide_details() {
    for err in [
        AppError::InternalError("secret detail".into()),
        AppError::Core(CoreError::Internal("secret detail".into())),
    ] {
        let (status, json) = error_to_response(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert_eq!(json["error"], "An internal error occurred");
    }
}
