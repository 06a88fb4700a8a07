use serde::{Deserialize, Serialize};

use crate::domain::AudioFormat;

/// Body of `POST /api/download_audio`
#[derive(Debug, Clone, Serialize)]
pub struct DownloadRequest {
    pub url: String,
    pub format: AudioFormat,
}

/// One prepared file in a download response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FileInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    pub filename: String,
    pub download_url: String,
}

/// Response from the download endpoint. Failures keep the same envelope
/// with a non-"success" status and a message.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloadResponse {
    pub status: String,
    #[serde(default)]
    pub files: Vec<FileInfo>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
        }
    }
}
