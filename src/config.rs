//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup; the identity API key and JWT signing
//! key are the only secrets and arrive through the environment (injected by
//! the deployment, a local .env file in development).

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,

    /// Identity provider API key
    pub identity_api_key: String,
    /// Identity provider base URL (overridable for tests)
    pub identity_base_url: String,

    /// Media store cloud name (path segment of the upload endpoint)
    pub media_cloud_name: String,
    /// Media store unsigned upload preset
    pub media_upload_preset: String,
    /// Media store base URL (overridable for tests)
    pub media_base_url: String,

    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),

            identity_api_key: env::var("IDENTITY_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("IDENTITY_API_KEY"))?,
            identity_base_url: env::var("IDENTITY_BASE_URL")
                .unwrap_or_else(|_| "https://identitytoolkit.googleapis.com".to_string()),

            media_cloud_name: env::var("MEDIA_CLOUD_NAME")
                .map_err(|_| ConfigError::Missing("MEDIA_CLOUD_NAME"))?,
            media_upload_preset: env::var("MEDIA_UPLOAD_PRESET")
                .map_err(|_| ConfigError::Missing("MEDIA_UPLOAD_PRESET"))?,
            media_base_url: env::var("MEDIA_BASE_URL")
                .unwrap_or_else(|_| "https://api.cloudinary.com".to_string()),

            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
        })
    }

    /// Config for tests only; never talks to real services.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            identity_api_key: "test-api-key".to_string(),
            identity_base_url: "http://127.0.0.1:9099".to_string(),
            media_cloud_name: "test-cloud".to_string(),
            media_upload_preset: "test-preset".to_string(),
            media_base_url: "http://127.0.0.1:9100".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("IDENTITY_API_KEY", "test_key");
        env::set_var("MEDIA_CLOUD_NAME", "demo");
        env::set_var("MEDIA_UPLOAD_PRESET", "unsigned_demo");
        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.identity_api_key, "test_key");
        assert_eq!(config.media_cloud_name, "demo");
        assert_eq!(config.port, 8080);
    }
}
