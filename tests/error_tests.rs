// SPDX-License-Identifier: MIT

//! Error-to-HTTP mapping tests, one per failure class in the taxonomy.

use axum::response::IntoResponse;
use axum::http::StatusCode;
use showroom_ledger::error::AppError;

#[test]
fn test_auth_failures_map_to_401_and_403() {
    assert_eq!(
        AppError::Unauthorized.into_response().status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        AppError::InvalidToken.into_response().status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        AppError::Forbidden.into_response().status(),
        StatusCode::FORBIDDEN
    );
}

#[test]
fn test_missing_record_maps_to_404() {
    let err = AppError::NotFound("Bike b1 not found".to_string());
    assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_missing_field_maps_to_400() {
    let err = AppError::BadRequest("Missing required field: seller_name".to_string());
    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_upstream_failures_map_to_502() {
    let err = AppError::MediaApi("HTTP 500: upload failed".to_string());
    assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);

    let err = AppError::IdentityApi("HTTP 500: QUOTA_EXCEEDED".to_string());
    assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
}

#[test]
fn test_database_failure_maps_to_500() {
    let err = AppError::Database("connection refused".to_string());
    assert_eq!(
        err.into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}
