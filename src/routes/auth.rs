// SPDX-License-Identifier: MIT

//! Staff authentication routes (email/password via the identity provider).

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_COOKIE};
use crate::models::{Role, UserProfile};
use crate::time_utils::now_rfc3339;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

// ─── Signup ──────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Serialize)]
pub struct SignupResponse {
    pub uid: String,
}

/// Create a staff account with the default editor role.
///
/// Role elevation to admin happens out-of-band; a fresh signup cannot log
/// into the panel until elevated.
async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>)> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let session = state
        .identity
        .sign_up(&payload.email, &payload.password)
        .await?;

    let profile = UserProfile {
        uid: session.uid.clone(),
        name: payload.name,
        email: session.email,
        role: Role::Editor,
        created_at: now_rfc3339(),
    };
    state.db.set_user_profile(&profile).await?;

    tracing::info!(uid = %profile.uid, "Staff account created");

    Ok((StatusCode::CREATED, Json(SignupResponse { uid: profile.uid })))
}

// ─── Login ───────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

#[derive(Serialize)]
pub struct LoginUser {
    pub uid: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Sign in and mint a session token. Admin role required.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let session = state
        .identity
        .sign_in(&payload.email, &payload.password)
        .await?;

    let profile = state
        .db
        .get_user_profile(&session.uid)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if profile.role != Role::Admin {
        tracing::warn!(uid = %profile.uid, "Login rejected: not an admin");
        return Err(AppError::Forbidden);
    }

    let token = create_jwt(&profile.uid, &state.config.jwt_signing_key)
        .map_err(AppError::Internal)?;

    tracing::info!(uid = %profile.uid, "Admin logged in");

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            token,
            user: LoginUser {
                uid: profile.uid,
                name: profile.name,
                email: profile.email,
                role: profile.role,
            },
        }),
    ))
}

// ─── Logout ──────────────────────────────────────────────────

#[derive(Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Clear the session cookie; the token itself simply expires.
async fn logout(jar: CookieJar) -> (CookieJar, Json<LogoutResponse>) {
    let cookie = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    (jar.remove(cookie), Json(LogoutResponse { success: true }))
}
