// SPDX-License-Identifier: MIT

//! Identity provider client for email/password accounts.
//!
//! Speaks the Identity Toolkit REST shape: `accounts:signInWithPassword`
//! and `accounts:signUp`, keyed by the project API key. Passwords never
//! touch our own storage; we only keep the provider's subject id.

use crate::error::AppError;
use serde::Deserialize;

/// Identity provider client.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// A verified identity returned by sign-in/sign-up.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentitySession {
    /// Provider subject id (our profile document id)
    #[serde(rename = "localId")]
    pub uid: String,
    pub email: String,
}

/// Provider error envelope: `{"error": {"message": "EMAIL_NOT_FOUND"}}`.
#[derive(Debug, Deserialize)]
struct IdentityErrorBody {
    error: IdentityErrorDetail,
}

#[derive(Debug, Deserialize)]
struct IdentityErrorDetail {
    message: String,
}

impl IdentityClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Verify email/password credentials.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<IdentitySession, AppError> {
        self.post_credentials("accounts:signInWithPassword", email, password)
            .await
    }

    /// Create a new email/password account.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<IdentitySession, AppError> {
        self.post_credentials("accounts:signUp", email, password)
            .await
    }

    async fn post_credentials(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> Result<IdentitySession, AppError> {
        let url = format!("{}/v1/{}?key={}", self.base_url, endpoint, self.api_key);

        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::IdentityApi(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(map_identity_error(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::IdentityApi(format!("JSON parse error: {}", e)))
    }
}

/// Map provider error codes onto our taxonomy.
///
/// Credential problems become 401s with no detail leak; everything else is
/// an upstream failure.
fn map_identity_error(status: reqwest::StatusCode, body: &str) -> AppError {
    let code = serde_json::from_str::<IdentityErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_default();

    match code.as_str() {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" | "USER_DISABLED" => {
            AppError::Unauthorized
        }
        "EMAIL_EXISTS" => AppError::BadRequest("Email already in use".to_string()),
        // Arrives as "WEAK_PASSWORD : Password should be at least 6 characters"
        code if code.starts_with("WEAK_PASSWORD") => {
            AppError::BadRequest("Password should be at least 6 characters".to_string())
        }
        _ => AppError::IdentityApi(format!("HTTP {}: {}", status, code)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_credentials_map_to_unauthorized() {
        let body = r#"{"error":{"message":"INVALID_PASSWORD"}}"#;
        let err = map_identity_error(reqwest::StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn test_email_exists_maps_to_bad_request() {
        let body = r#"{"error":{"message":"EMAIL_EXISTS"}}"#;
        let err = map_identity_error(reqwest::StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_unknown_code_is_upstream_failure() {
        let body = r#"{"error":{"message":"QUOTA_EXCEEDED"}}"#;
        let err = map_identity_error(reqwest::StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, AppError::IdentityApi(_)));

        // Unparseable body is still an upstream failure, not a panic
        let err = map_identity_error(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "not json");
        assert!(matches!(err, AppError::IdentityApi(_)));
    }
}
