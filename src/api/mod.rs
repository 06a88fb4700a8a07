mod client;
mod models;

pub use client::{ApiClient, ApiError, Result};
pub use models::{ApiConfig, DownloadRequest, DownloadResponse, FileInfo};
