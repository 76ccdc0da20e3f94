// SPDX-License-Identifier: MIT

//! Route authentication tests: every /api route sits behind the session
//! JWT and the admin role gate.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

const ADMIN_ROUTES: &[(&str, &str)] = &[
    ("GET", "/api/me"),
    ("GET", "/api/dashboard"),
    ("GET", "/api/bikes"),
    ("GET", "/api/bikes/next-bill-number"),
    ("GET", "/api/bikes/some-id"),
    ("DELETE", "/api/bikes/some-id"),
    ("GET", "/api/drafts/new-bike"),
];

#[tokio::test]
async fn test_health_is_public() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    let (app, _state) = common::create_test_app();

    for (method, uri) in ADMIN_ROUTES {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(*method)
                    .uri(*uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{} {} should require a session token",
            method,
            uri
        );
    }
}

#[tokio::test]
async fn test_admin_routes_reject_garbage_token() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/bikes")
                .header(header::AUTHORIZATION, "Bearer not.a.token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_reaches_role_gate() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("staff-uid-123", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/bikes")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // The JWT passes and the request proceeds to the profile lookup, which
    // fails on the offline mock database rather than on authentication.
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_token_accepted_via_cookie() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("staff-uid-123", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/bikes")
                .header(header::COOKIE, format!("ledger_token={}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Same as the bearer case: past auth, into the offline profile lookup.
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
