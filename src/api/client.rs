use std::collections::HashMap;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use thiserror::Error;

use crate::utils::body_excerpt;

use super::models::{ApiConfig, DownloadRequest, DownloadResponse};

/// Characters of a non-JSON body kept for the inline diagnostic.
const EXCERPT_CHARS: usize = 100;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Server returned an unexpected response: {status}. {excerpt}")]
    UnexpectedContentType { status: u16, excerpt: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Submit a media URL for download preparation.
    ///
    /// The backend answers error outcomes as JSON with a non-2xx status, so
    /// the body is decoded regardless of the HTTP status; the flag in the
    /// returned pair reports whether the status was a success. A body that is
    /// not JSON at all is a transport error carrying a truncated excerpt.
    pub async fn download_audio(
        &self,
        request: &DownloadRequest,
    ) -> Result<(bool, DownloadResponse)> {
        let url = format!("{}/api/download_audio", self.config.base_url);
        let response = self.http.post(&url).json(request).send().await?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));

        let body = response.text().await?;
        if !is_json {
            return Err(ApiError::UnexpectedContentType {
                status: status.as_u16(),
                excerpt: body_excerpt(&body, EXCERPT_CHARS),
            });
        }

        let payload: DownloadResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("JSON decode error: {}", e)))?;

        Ok((status.is_success(), payload))
    }

    /// Fetch the locale bundle resource for a language code.
    pub async fn fetch_locale_bundle(&self, code: &str) -> Result<HashMap<String, String>> {
        let url = format!("{}/static/i18n/{}.json", self.config.base_url, code);
        let response = self.http.get(&url).send().await?.error_for_status()?;

        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("JSON decode error: {}", e)))
    }
}
