// SPDX-License-Identifier: MIT

//! Media store client: forwards binary uploads to the hosted media API
//! and returns the stable public URL it assigns.
//!
//! One unsigned endpoint, one attempt per file, no retry. A stalled call
//! blocks the submit; the caller owns any timeout policy.

use crate::error::AppError;
use serde::Deserialize;

/// Media upload client.
#[derive(Clone)]
pub struct MediaClient {
    http: reqwest::Client,
    base_url: String,
    cloud_name: String,
    upload_preset: String,
}

/// Successful upload response from the media API.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl MediaClient {
    /// Create a new media client for an unsigned upload preset.
    pub fn new(base_url: &str, cloud_name: &str, upload_preset: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            cloud_name: cloud_name.to_string(),
            upload_preset: upload_preset.to_string(),
        }
    }

    /// Upload one file; returns its public URL.
    pub async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<String, AppError> {
        let url = format!("{}/v1_1/{}/upload", self.base_url, self.cloud_name);

        let form = reqwest::multipart::Form::new()
            .text("upload_preset", self.upload_preset.clone())
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string()),
            );

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::MediaApi(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::MediaApi(format!("HTTP {}: {}", status, body)));
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::MediaApi(format!("JSON parse error: {}", e)))?;

        Ok(parsed.secure_url)
    }
}
